//! Logging helpers: PII redaction and security event emitters.

pub mod pii;
pub mod security;
