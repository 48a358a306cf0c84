/// Juz listing with search
use crate::error::Result;
use std::io::Write;
use tilawa_core::{filter_by_query, Juz};
use tilawa_storage::Preferences;
use tracing::debug;

/// Print the juz matching `query` (all of them when absent)
///
/// A non-blank query is remembered in the recent searches.
pub async fn search(
    prefs: &Preferences,
    query: Option<&str>,
    out: &mut impl Write,
) -> Result<Vec<Juz>> {
    let all = Juz::all();
    let query = query.unwrap_or_default();
    let found: Vec<Juz> = filter_by_query(&all, query).into_iter().cloned().collect();
    debug!(query, matches = found.len(), "Filtered juz listing");

    if !query.trim().is_empty() {
        prefs.add_recent_search(query).await?;
    }

    if found.is_empty() {
        writeln!(out, "No juz matches \"{}\"", query.trim())?;
    }
    for juz in &found {
        writeln!(out, "{:>2}  {}  ({})", juz.number, juz.name, juz.meaning)?;
    }
    Ok(found)
}
