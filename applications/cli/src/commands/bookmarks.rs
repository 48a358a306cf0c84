/// Bookmark management
use crate::error::Result;
use std::io::Write;
use tilawa_core::Bookmark;
use tilawa_storage::Bookmarks;

pub async fn list(bookmarks: &Bookmarks, out: &mut impl Write) -> Result<usize> {
    let all = bookmarks.list().await?;
    if all.is_empty() {
        writeln!(out, "No bookmarks")?;
        return Ok(0);
    }

    for (index, bookmark) in all.iter().enumerate() {
        write_entry(out, index, bookmark)?;
    }
    Ok(all.len())
}

fn write_entry(out: &mut impl Write, index: usize, bookmark: &Bookmark) -> std::io::Result<()> {
    writeln!(
        out,
        "[{index}] {} ({})",
        bookmark.reference(),
        bookmark.timestamp.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out, "    {}", bookmark.arabic)?;
    writeln!(out, "    {}", bookmark.translation)?;
    if let Some(tafsir) = &bookmark.tafsir {
        writeln!(out, "    Tafsir: {tafsir}")?;
    }
    Ok(())
}

pub async fn add(bookmarks: &Bookmarks, bookmark: Bookmark, out: &mut impl Write) -> Result<usize> {
    let reference = bookmark.reference();
    let index = bookmarks.add(bookmark).await?;
    writeln!(out, "Bookmarked {reference} at [{index}]")?;
    Ok(index)
}

pub async fn remove(bookmarks: &Bookmarks, index: usize, out: &mut impl Write) -> Result<bool> {
    let removed = bookmarks.remove(index).await?;
    match &removed {
        Some(bookmark) => writeln!(out, "Removed {}", bookmark.reference())?,
        None => writeln!(out, "No bookmark at [{index}]")?,
    }
    Ok(removed.is_some())
}

pub async fn clear(bookmarks: &Bookmarks, out: &mut impl Write) -> Result<()> {
    bookmarks.clear().await?;
    writeln!(out, "Cleared all bookmarks")?;
    Ok(())
}
