pub mod catalog;
pub mod config;
pub mod decode;
pub mod telemetry;
