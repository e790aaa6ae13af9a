//! 2D physics for bubblecatch
//!
//! This crate provides a small real-time rigid-body core, including:
//! - Collision shapes (circles, axis-aligned boxes)
//! - Narrow-phase collision detection and resolution
//! - A per-frame contact registry
//! - A fixed-substep world driver
//! - Player movement on top of a body

pub mod body;
pub mod collision;
pub mod contact;
pub mod player;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{
    Body, BodyId, BodyIdMask, BodyKey, BodyKind, DEFAULT_GRAVITY, DEFAULT_LINEAR_VELOCITY_DAMPING,
    DEFAULT_MAX_VELOCITY,
};
pub use collision::{circle_vs_aabb, circle_vs_circle};
pub use contact::{Contact, ContactRegistry};
pub use player::{PlayerIntent, PlayerMotor, PlayerStats};
pub use shapes::{Aabb, Circle, Collider, ColliderKind, DEFAULT_COLLIDER_HALF_SIZE};
pub use world::{PhysicsConfig, PhysicsWorld, DEFAULT_SUBSTEPS};
