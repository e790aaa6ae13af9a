//! Input handling module
//!
//! Turns arena state into per-player intents for headless runs.

mod autopilot;

pub use autopilot::Autopilot;
