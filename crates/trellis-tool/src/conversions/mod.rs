//! Wire conversions between `serde_json::Value` and the core models.

pub mod error_types;
pub mod request;
pub mod response;
