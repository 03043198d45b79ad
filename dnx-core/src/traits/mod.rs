//! Session state abstraction trait definitions

mod geo_cache;

pub use geo_cache::{GeoLocationCache, InMemoryGeoLocationCache};
