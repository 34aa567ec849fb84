pub mod cors;
pub mod jwt_extract;
pub mod request_trace;
pub mod structured_logger;

pub use cors::cors_middleware;
pub use jwt_extract::JwtExtract;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
