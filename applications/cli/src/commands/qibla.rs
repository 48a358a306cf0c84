/// Qibla lookup
use crate::adapters::{FixedHeading, FixedLocation};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use std::io::Write;
use std::sync::Arc;
use tilawa_core::{BearingResult, GeoPoint};
use tilawa_qibla::{locate, CompassSession, HeadingHub, QiblaFix};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaReport {
    pub observer: GeoPoint,
    pub bearing: BearingResult,
    /// Indicator rotation for the supplied heading
    pub rotation: Option<f64>,
}

/// Compute the qibla for a position and, optionally, a compass heading
pub async fn lookup(
    config: &AppConfig,
    latitude: f64,
    longitude: f64,
    heading: Option<f64>,
) -> Result<QiblaReport> {
    let location = FixedLocation::new(GeoPoint {
        latitude,
        longitude,
    });

    let (observer, bearing) = match locate(&location).await? {
        QiblaFix::Ready { observer, bearing } => (observer, bearing),
        QiblaFix::Unavailable(reason) => return Err(CliError::BadRequest(reason.to_string())),
    };

    let rotation = match heading {
        Some(heading) => {
            let hub = HeadingHub::with_interval(
                Arc::new(FixedHeading::new(heading)?),
                config.heading_interval(),
            );
            CompassSession::open(&hub, observer)?.rotation()
        }
        None => None,
    };

    Ok(QiblaReport {
        observer,
        bearing,
        rotation,
    })
}

pub fn render(report: &QiblaReport, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Observer: {}", report.observer)?;
    writeln!(
        out,
        "Qibla:    {}° ({:.4}° from true north)",
        report.bearing.rounded(),
        report.bearing.bearing_degrees
    )?;
    if let Some(rotation) = report.rotation {
        writeln!(out, "Rotate:   {rotation:.1}°")?;
    }
    Ok(())
}
