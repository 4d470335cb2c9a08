//! HTTP handlers for the paper service.

pub mod health;
pub mod paper;

pub use health::health_check;
pub use paper::generate_paper;
