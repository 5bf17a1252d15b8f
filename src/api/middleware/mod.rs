//! Middleware components for the HTTP API layer.

mod error_handler;
mod logging;
mod request_id;
mod security;

pub use error_handler::error_to_status_code;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security::{SecurityPolicy, security_gate};
