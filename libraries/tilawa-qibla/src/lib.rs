//! Tilawa - Qibla Direction
//!
//! This crate provides:
//! - Great-circle bearing from any point on the globe to the Kaaba
//! - Indicator rotation from a compass heading and that bearing
//! - A reference-counted hub sharing one device heading stream
//! - A compass session combining a one-shot location fix with live headings
//!
//! # Example
//!
//! ```rust
//! use tilawa_core::{GeoPoint, HeadingSample};
//! use tilawa_qibla::{compute_bearing, relative_rotation};
//!
//! let london = GeoPoint::new(51.5074, -0.1278).unwrap();
//! let bearing = compute_bearing(&london).unwrap();
//! assert_eq!(bearing.rounded(), 119);
//!
//! let rotation = relative_rotation(HeadingSample::new(90.0).unwrap(), bearing);
//! assert!(rotation < 0.0);
//! ```

mod bearing;
mod compass;
mod heading;

pub use bearing::{bearing_between, compute_bearing, relative_rotation, KAABA};
pub use compass::{locate, CompassSession, QiblaFix, Unavailable};
pub use heading::{HeadingHub, HeadingSubscription, DEFAULT_HEADING_INTERVAL};
