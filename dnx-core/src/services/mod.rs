//! Service layer

mod analysis_service;
mod geolocation_service;
mod session;

pub use analysis_service::AnalysisService;
pub use geolocation_service::GeolocationService;
pub use session::Session;
