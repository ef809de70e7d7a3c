//! Response types returned by the handlers.

mod error_response;
mod monitor;

pub use error_response::ErrorResponse;
pub use monitor::HealthStatus;
