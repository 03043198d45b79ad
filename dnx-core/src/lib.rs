//! DNX Core Library
//!
//! Core logic behind the `dnx` tool:
//! - Domain analysis client (`AnalysisService`): validates input and submits it to the
//!   remote analysis API, turning every failure into an error-shaped result
//! - Geolocation resolver (`GeolocationService`): runs a provider fallback chain per IP
//!   and caches each outcome for the session
//! - `Session`: owns the latest results and the per-IP location cache
//!
//! The location cache is abstracted behind the [`GeoLocationCache`] trait, with an
//! in-memory default.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{AnalysisService, GeolocationService, Session};
pub use traits::{GeoLocationCache, InMemoryGeoLocationCache};
