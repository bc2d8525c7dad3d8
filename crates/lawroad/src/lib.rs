pub mod acts;
pub mod config;
pub mod error;
pub mod telemetry;
