//! Tilawa CLI
//!
//! Terminal front end over the Tilawa libraries: qibla lookup, bookmark and
//! preference management, and a simulated recitation run.

#![forbid(unsafe_code)]

pub mod adapters;
pub mod commands;
pub mod config;
pub mod error;
pub mod simulated;

pub use config::AppConfig;
pub use error::{CliError, Result};
