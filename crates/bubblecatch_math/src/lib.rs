//! 2D Mathematics Library
//!
//! This crate provides the 2D vector type shared by the bubblecatch crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components (y points up)

mod vec2;

pub use vec2::Vec2;
