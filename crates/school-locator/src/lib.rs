pub mod config;
pub mod error;
pub mod schools;
pub mod telemetry;
