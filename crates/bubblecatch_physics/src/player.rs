//! Player movement on top of a physics body
//!
//! The motor does not own a body. Every frame it reads the grounded state of
//! its body from the world's contacts and rewrites the body's velocity, damping
//! and gravity from the player's intent before the world steps.

use crate::body::BodyKey;
use crate::world::PhysicsWorld;
use bubblecatch_math::Vec2;

/// Horizontal velocity added per frame while airborne
pub const AIR_MOVE_SPEED: f32 = 10.0;
/// Horizontal velocity added per frame while grounded
pub const GROUND_MOVE_SPEED: f32 = 20.0;
/// Vertical velocity set by a jump
pub const JUMP_VELOCITY: f32 = 600.0;
/// Horizontal velocity added per frame while dashing
pub const DASH_VELOCITY: f32 = 100.0;
/// How long a dash lasts (seconds)
pub const DASH_DURATION: f32 = 0.1;
pub const MAX_STAMINA: f32 = 1.0;
/// Stamina spent by one dash
pub const DASH_COST: f32 = 0.5;
/// Seconds to regenerate from empty to full stamina
pub const STAMINA_REGEN_TIME: f32 = 2.0;
/// Ground jump plus one air jump
pub const MAX_JUMPS: u32 = 2;
/// Gravity while airborne
pub const AIR_GRAVITY: Vec2 = Vec2::new(0.0, -1250.0);
/// Velocity damping while grounded
pub const GROUND_DAMPING: f32 = 0.2;
/// Velocity damping while airborne (none)
pub const AIR_DAMPING: f32 = 1.0;

/// Resolved input of one player for one frame
///
/// `jump` and `dash` are edge-triggered: true only on the frame the
/// button went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub dash: bool,
}

impl PlayerIntent {
    /// An intent with nothing pressed
    pub fn idle() -> Self {
        Self::default()
    }

    /// Horizontal direction requested: -1, 0 or 1 (left wins over right)
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Movement counters for one player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub jumps: u32,
    pub double_jumps: u32,
    pub dashes: u32,
}

/// Movement state of one player
#[derive(Clone, Debug)]
pub struct PlayerMotor {
    /// Jumps since the player last stood on the ground
    pub jump_count: u32,
    /// Remaining dash time, the dash is active while positive
    pub dash_timer: f32,
    /// Direction of the current dash (-1 or 1)
    pub dash_direction: f32,
    pub stamina: f32,
    pub stats: PlayerStats,
}

impl Default for PlayerMotor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerMotor {
    /// Create a motor with full stamina
    pub fn new() -> Self {
        Self {
            jump_count: 0,
            dash_timer: 0.0,
            dash_direction: 1.0,
            stamina: MAX_STAMINA,
            stats: PlayerStats::default(),
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    /// Apply one frame of `intent` to the body behind `key`
    ///
    /// Must run before [`PhysicsWorld::step`]: the grounded state comes from
    /// the previous frame's contacts. Returns `false` if the key is stale.
    pub fn apply(
        &mut self,
        world: &mut PhysicsWorld,
        key: BodyKey,
        intent: &PlayerIntent,
        dt: f32,
    ) -> bool {
        let grounded = world.is_grounded(key);
        let Some(body) = world.get_body_mut(key) else {
            return false;
        };

        let velocity = &mut body.linear_velocity;

        if grounded {
            // Resting bodies have had their downward velocity removed, so
            // zero counts as landed too
            if velocity.y <= 0.0 {
                self.jump_count = 0;
            }

            body.linear_velocity_damping = GROUND_DAMPING;
            body.gravity = Vec2::ZERO;

            if intent.left {
                if velocity.x > 0.0 {
                    velocity.x *= 0.8;
                }
                velocity.x -= GROUND_MOVE_SPEED;
            }
            if intent.right {
                if velocity.x < 0.0 {
                    velocity.x *= 0.8;
                }
                velocity.x += GROUND_MOVE_SPEED;
            }

            if intent.jump {
                self.jump(velocity);
            }
        } else {
            body.linear_velocity_damping = AIR_DAMPING;
            body.gravity = AIR_GRAVITY;

            if intent.left {
                if velocity.x > 0.0 {
                    velocity.x *= 0.8;
                }
                velocity.x -= AIR_MOVE_SPEED;
            }
            if intent.right {
                if velocity.x < 0.0 {
                    velocity.x *= 0.8;
                }
                velocity.x += AIR_MOVE_SPEED;
            }

            if intent.jump && self.jump_count < MAX_JUMPS {
                if self.jump_count > 0 {
                    self.stats.double_jumps += 1;
                }
                self.jump(velocity);
            }
        }

        if intent.dash && self.stamina >= DASH_COST {
            self.stamina -= DASH_COST;
            self.dash_timer = DASH_DURATION;
            self.stats.dashes += 1;

            self.dash_direction = if intent.left {
                if velocity.x > 0.0 {
                    velocity.x *= 0.5;
                }
                -1.0
            } else if intent.right {
                if velocity.x < 0.0 {
                    velocity.x *= 0.5;
                }
                1.0
            } else if velocity.x <= 0.0 {
                -1.0
            } else {
                1.0
            };
        }

        if self.dash_timer > 0.0 {
            self.dash_timer -= dt;
            velocity.x += self.dash_direction * DASH_VELOCITY;
        }

        self.stamina = (self.stamina + MAX_STAMINA / STAMINA_REGEN_TIME * dt).min(MAX_STAMINA);
        true
    }

    fn jump(&mut self, velocity: &mut Vec2) {
        self.jump_count += 1;
        self.stats.jumps += 1;
        velocity.y = JUMP_VELOCITY;
    }
}
