//! Qibla compass: one location fix plus a live heading
//!
//! The location is asked for once. If the platform refuses or cannot produce
//! a position the compass reports [`QiblaFix::Unavailable`] and the bearing is
//! never computed. Otherwise a [`CompassSession`] pairs the fixed bearing with
//! a heading subscription and turns each new heading into an indicator
//! rotation.

use crate::bearing::{compute_bearing, relative_rotation};
use crate::heading::{HeadingHub, HeadingSubscription};
use serde::{Deserialize, Serialize};
use tilawa_core::{BearingResult, GeoPoint, LocationProvider, Result, TilawaError};
use tracing::{debug, info, warn};

/// Why no qibla bearing could be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unavailable {
    /// Location access was refused
    PermissionDenied(String),

    /// The device could not determine its position
    PositionUnavailable(String),
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied(reason) => write!(f, "Location permission not granted: {reason}"),
            Self::PositionUnavailable(reason) => write!(f, "Position unavailable: {reason}"),
        }
    }
}

/// Outcome of asking for the observer's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QiblaFix {
    Ready {
        observer: GeoPoint,
        bearing: BearingResult,
    },
    Unavailable(Unavailable),
}

impl QiblaFix {
    pub fn bearing(&self) -> Option<BearingResult> {
        match self {
            Self::Ready { bearing, .. } => Some(*bearing),
            Self::Unavailable(_) => None,
        }
    }
}

/// Ask `location` for a position and compute the bearing from it
///
/// # Errors
/// Location refusals become [`QiblaFix::Unavailable`]; any other provider
/// error, or a provider returning invalid coordinates, is returned as-is.
pub async fn locate<L>(location: &L) -> Result<QiblaFix>
where
    L: LocationProvider + ?Sized,
{
    let observer = match location.current_position().await {
        Ok(observer) => observer,
        Err(TilawaError::PermissionDenied(reason)) => {
            warn!(%reason, "Location permission denied");
            return Ok(QiblaFix::Unavailable(Unavailable::PermissionDenied(reason)));
        }
        Err(TilawaError::PositionUnavailable(reason)) => {
            warn!(%reason, "Position unavailable");
            return Ok(QiblaFix::Unavailable(Unavailable::PositionUnavailable(
                reason,
            )));
        }
        Err(e) => return Err(e),
    };

    let bearing = compute_bearing(&observer)?;
    info!(
        observer = %observer,
        bearing = bearing.bearing_degrees,
        "Qibla bearing computed"
    );
    Ok(QiblaFix::Ready { observer, bearing })
}

/// Live compass for one observer position
pub struct CompassSession {
    observer: GeoPoint,
    bearing: BearingResult,
    heading: HeadingSubscription,
}

impl CompassSession {
    /// Compute the bearing for `observer` and start following the heading
    pub fn open(hub: &HeadingHub, observer: GeoPoint) -> Result<Self> {
        let bearing = compute_bearing(&observer)?;
        let heading = hub.acquire()?;
        Ok(Self {
            observer,
            bearing,
            heading,
        })
    }

    /// Open a session from a ready fix; `None` when the fix is unavailable
    pub fn from_fix(hub: &HeadingHub, fix: &QiblaFix) -> Result<Option<Self>> {
        match fix {
            QiblaFix::Ready { observer, .. } => Self::open(hub, *observer).map(Some),
            QiblaFix::Unavailable(_) => Ok(None),
        }
    }

    pub fn observer(&self) -> GeoPoint {
        self.observer
    }

    pub fn bearing(&self) -> BearingResult {
        self.bearing
    }

    /// Rotation for the latest heading, `None` before the first sample
    pub fn rotation(&self) -> Option<f64> {
        self.heading
            .latest()
            .map(|heading| relative_rotation(heading, self.bearing))
    }

    /// Wait for the next heading and return its rotation
    pub async fn next_rotation(&mut self) -> Option<f64> {
        let heading = self.heading.changed().await?;
        Some(relative_rotation(heading, self.bearing))
    }

    /// Move the observer
    ///
    /// The bearing is only recomputed when the position actually changed.
    /// Returns whether it was.
    pub fn relocate(&mut self, observer: GeoPoint) -> Result<bool> {
        if observer == self.observer {
            return Ok(false);
        }
        self.bearing = compute_bearing(&observer)?;
        self.observer = observer;
        debug!(
            observer = %observer,
            bearing = self.bearing.bearing_degrees,
            "Observer moved, bearing recomputed"
        );
        Ok(true)
    }
}

impl std::fmt::Debug for CompassSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompassSession")
            .field("observer", &self.observer)
            .field("bearing", &self.bearing)
            .finish_non_exhaustive()
    }
}
