//! Great-circle bearing toward the Kaaba
//!
//! Initial bearing along the great circle from an observer to a fixed
//! destination:
//!
//! ```text
//! θ = atan2( sin Δλ , cos φ₁ · tan φ₂ − sin φ₁ · cos Δλ )
//! ```
//!
//! where φ₁/λ₁ is the observer and φ₂/λ₂ the destination.

use tilawa_core::{BearingResult, GeoPoint, HeadingSample, Result};

/// Location of the Kaaba in Mecca
pub const KAABA: GeoPoint = GeoPoint {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// Bearing from `observer` to the Kaaba
///
/// # Errors
/// `InvalidArgument` if the observer has non-finite or out-of-range coordinates
///
/// # Example
///
/// ```rust
/// use tilawa_core::GeoPoint;
/// use tilawa_qibla::compute_bearing;
///
/// let new_york = GeoPoint::new(40.7128, -74.0060).unwrap();
/// let bearing = compute_bearing(&new_york).unwrap();
/// assert_eq!(bearing.rounded(), 58);
/// ```
pub fn compute_bearing(observer: &GeoPoint) -> Result<BearingResult> {
    observer.validate()?;
    Ok(bearing_between(observer, &KAABA))
}

/// Initial great-circle bearing between two valid points
///
/// Coincident points give 0.
pub fn bearing_between(from: &GeoPoint, to: &GeoPoint) -> BearingResult {
    // The denominator collapses to ±ε here and atan2 would pick 0 or 180
    // depending on libm rounding.
    if from == to {
        return BearingResult {
            bearing_degrees: 0.0,
        };
    }

    let phi_from = from.latitude.to_radians();
    let phi_to = to.latitude.to_radians();
    let delta_lambda = to.longitude.to_radians() - from.longitude.to_radians();

    let numerator = delta_lambda.sin();
    let denominator = phi_from.cos() * phi_to.tan() - phi_from.sin() * delta_lambda.cos();

    let mut degrees = numerator.atan2(denominator).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // -1e-15 + 360.0 rounds to 360.0
    if degrees >= 360.0 {
        degrees = 0.0;
    }

    BearingResult {
        bearing_degrees: degrees + 0.0,
    }
}

/// Rotation to apply to the compass indicator so it points at the bearing
///
/// Plain difference, not normalized: renderers apply it as-is.
pub fn relative_rotation(heading: HeadingSample, bearing: BearingResult) -> f64 {
    heading.heading_degrees - bearing.bearing_degrees
}
