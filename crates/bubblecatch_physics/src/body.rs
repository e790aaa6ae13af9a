//! Body types for 2D physics simulation

use crate::shapes::{Collider, ColliderKind, DEFAULT_COLLIDER_HALF_SIZE};
use bitflags::bitflags;
use bubblecatch_math::Vec2;
use slotmap::new_key_type;
use std::fmt;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing: once a body is removed, old keys resolve to
    /// `None` instead of pointing at whatever reuses the slot. Keys are also
    /// totally ordered, which gives every contact pair a canonical order.
    pub struct BodyKey;
}

/// Default per-second velocity damping factor (1.0 = no damping)
pub const DEFAULT_LINEAR_VELOCITY_DAMPING: f32 = 1.0;

/// Default speed clamp
pub const DEFAULT_MAX_VELOCITY: f32 = 10_000.0;

/// Default per-body gravity
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -100.0);

/// Whether a body moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Never integrates, never moved by collision response
    Static,
    Dynamic,
}

impl BodyKind {
    /// Upper-case name used in logs and debug output
    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Static => "STATIC",
            BodyKind::Dynamic => "DYNAMIC",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse gameplay tag attached to a body
///
/// The physics never reads it; gameplay code uses it to filter contacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyId {
    #[default]
    Undefined,
    Static,
    Bubble,
    Player,
}

impl BodyId {
    /// Upper-case name used in logs and debug output
    pub fn name(self) -> &'static str {
        match self {
            BodyId::Undefined => "UNDEFINED",
            BodyId::Static => "STATIC",
            BodyId::Bubble => "BUBBLE",
            BodyId::Player => "PLAYER",
        }
    }

    /// The mask bit for this id
    pub fn mask(self) -> BodyIdMask {
        match self {
            BodyId::Undefined => BodyIdMask::UNDEFINED,
            BodyId::Static => BodyIdMask::STATIC,
            BodyId::Bubble => BodyIdMask::BUBBLE,
            BodyId::Player => BodyIdMask::PLAYER,
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of body ids, used to filter contact queries
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BodyIdMask: u8 {
        const UNDEFINED = 1 << 0;
        const STATIC = 1 << 1;
        const BUBBLE = 1 << 2;
        const PLAYER = 1 << 3;
        const ALL = 0xF;
    }
}

impl BodyIdMask {
    /// Check whether `id` is part of this mask
    pub fn matches(self, id: BodyId) -> bool {
        self.intersects(id.mask())
    }
}

/// A 2D body with position, velocity and a collider
#[derive(Clone, Debug)]
pub struct Body {
    /// Position in world space
    pub position: Vec2,
    /// Velocity (units per second)
    pub linear_velocity: Vec2,
    /// Per-second exponential decay applied to the velocity (1.0 = none)
    pub linear_velocity_damping: f32,
    /// Speed clamp applied after integration
    pub max_velocity: f32,
    /// Acceleration applied every integration step
    pub gravity: Vec2,
    /// Collision shape, centered on `position`
    pub collider: Collider,
    kind: BodyKind,
    id: BodyId,
    name: String,
}

impl Body {
    /// Create a body with the default tuning
    pub fn new(collider: Collider, kind: BodyKind, id: BodyId) -> Self {
        Self {
            position: Vec2::ZERO,
            linear_velocity: Vec2::ZERO,
            linear_velocity_damping: DEFAULT_LINEAR_VELOCITY_DAMPING,
            max_velocity: DEFAULT_MAX_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            collider,
            kind,
            id,
            name: String::from("Body"),
        }
    }

    /// Create a body with a circle collider
    pub fn circle(radius: f32, kind: BodyKind, id: BodyId) -> Self {
        Self::new(Collider::circle(radius), kind, id)
    }

    /// Create a body with a box collider
    pub fn aabb(half_extents: Vec2, kind: BodyKind, id: BodyId) -> Self {
        Self::new(Collider::aabb(half_extents), kind, id)
    }

    /// Create a static box, the usual floor/wall
    pub fn new_static_aabb(position: Vec2, half_extents: Vec2) -> Self {
        Self::aabb(half_extents, BodyKind::Static, BodyId::Static).with_position(position)
    }

    /// Set the debug name of this body
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the position of this body
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Set the per-second velocity damping factor
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.linear_velocity_damping = damping;
        self
    }

    /// Set the speed clamp
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set the per-body gravity
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collider_kind(&self) -> ColliderKind {
        self.collider.kind()
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Current world position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the body
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Apply a positional correction (e.g. from collision resolution)
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Collider size as a single vector
    ///
    /// For a box this is its half width and half height. For a circle only
    /// `x` is meaningful and holds the radius; `y` is always 0. A body
    /// without a collider reports zero.
    pub fn collider_half_size(&self) -> Vec2 {
        match self.collider {
            Collider::None => Vec2::ZERO,
            Collider::Circle(circle) => Vec2::new(circle.radius, 0.0),
            Collider::Aabb(aabb) => aabb.half_extents,
        }
    }

    /// Advance the body by `dt` seconds (semi-implicit Euler)
    ///
    /// Damping is `damping^dt`, so splitting a frame into more substeps does
    /// not change how fast the velocity decays.
    pub fn integrate(&mut self, dt: f32) {
        if self.kind == BodyKind::Static {
            return;
        }

        self.linear_velocity += self.gravity * dt;
        self.position += self.linear_velocity * dt;

        if self.linear_velocity_damping < 1.0 {
            self.linear_velocity *= self.linear_velocity_damping.powf(dt);
        }

        if self.linear_velocity.length_squared() > self.max_velocity * self.max_velocity {
            self.linear_velocity = self.linear_velocity.with_length(self.max_velocity);
        }
    }

    /// One-line state description for debug overlays and logs
    pub fn describe(&self) -> String {
        format!(
            "{} - pos: <{:.2}, {:.2}>, vel: <{:.2}, {:.2}>, {} {} ({})",
            self.name,
            self.position.x,
            self.position.y,
            self.linear_velocity.x,
            self.linear_velocity.y,
            self.kind,
            self.collider_kind(),
            self.id,
        )
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(
            Collider::aabb(Vec2::splat(DEFAULT_COLLIDER_HALF_SIZE)),
            BodyKind::Dynamic,
            BodyId::Undefined,
        )
    }
}
