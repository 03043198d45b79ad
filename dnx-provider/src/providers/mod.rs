//! Geolocation provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod ip_api;
mod ipapi_co;
mod ipinfo;

pub use ip_api::IpApiProvider;
pub use ipapi_co::IpapiCoProvider;
pub use ipinfo::IpinfoProvider;
