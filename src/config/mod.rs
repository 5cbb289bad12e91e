//! # Configuration
//!
//! Controller-level settings.

mod controller;

pub use controller::ControllerConfig;
