/// Geographic and compass domain types
use crate::error::{Result, TilawaError};
use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,

    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated point
    ///
    /// # Errors
    /// Returns `InvalidArgument` if either coordinate is non-finite or out of range
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite and inside their ranges
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TilawaError::invalid_argument(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TilawaError::invalid_argument(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Compass bearing, degrees clockwise from true north in [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingResult {
    pub bearing_degrees: f64,
}

impl BearingResult {
    /// Whole-degree value for display
    pub fn rounded(&self) -> u16 {
        // 359.6 rounds up to 360 which reads as north
        (self.bearing_degrees.round() as u16) % 360
    }
}

/// Latest device heading, degrees clockwise from north in [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    pub heading_degrees: f64,
}

impl HeadingSample {
    /// Wrap an arbitrary finite angle into a sample
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `heading_degrees` is NaN or infinite
    pub fn new(heading_degrees: f64) -> Result<Self> {
        if !heading_degrees.is_finite() {
            return Err(TilawaError::invalid_argument(format!(
                "heading {heading_degrees} is not a finite angle"
            )));
        }
        Ok(Self {
            heading_degrees: normalize_degrees(heading_degrees),
        })
    }

    /// Derive a heading from raw magnetometer axes
    ///
    /// Uses the planar field direction `atan2(y, x)`; no tilt compensation.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if either axis is non-finite
    pub fn from_magnetometer(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(TilawaError::invalid_argument(format!(
                "magnetometer reading ({x}, {y}) is not finite"
            )));
        }
        Self::new(y.atan2(x).to_degrees())
    }
}

/// Fold a finite angle into [0, 360)
///
/// Non-finite input yields NaN; validate first.
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs, which is
/// folded back to 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        // -0.0 + 0.0 == +0.0
        folded + 0.0
    }
}
