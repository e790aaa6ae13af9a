//! Falling bubbles
//!
//! Bubbles are pooled: each keeps its body for the whole match and is only
//! enabled while alive.

use crate::systems::{ArenaEvent, TickContext, Tickable};
use bubblecatch_math::Vec2;
use bubblecatch_physics::{Body, BodyId, BodyKey, BodyKind, PhysicsWorld, DEFAULT_GRAVITY};

/// Body settings shared by every bubble
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleTuning {
    pub radius: f32,
    pub max_velocity: f32,
    pub gravity: Vec2,
}

impl Default for BubbleTuning {
    fn default() -> Self {
        Self {
            radius: 64.0,
            max_velocity: 200.0,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

/// A pooled bubble
#[derive(Clone, Debug)]
pub struct Bubble {
    body: BodyKey,
}

impl Bubble {
    /// Create a dead bubble, its body is added to the world disabled
    pub fn new(world: &mut PhysicsWorld, tuning: &BubbleTuning) -> Self {
        let body = world.add_body(
            Body::circle(tuning.radius, BodyKind::Dynamic, BodyId::Bubble)
                .with_name("Bubble")
                .with_damping(1.0)
                .with_max_velocity(tuning.max_velocity)
                .with_gravity(tuning.gravity),
        );
        world.set_enabled(body, false);
        Self { body }
    }

    pub fn body(&self) -> BodyKey {
        self.body
    }

    pub fn is_alive(&self, world: &PhysicsWorld) -> bool {
        world.is_enabled(self.body)
    }

    /// Bring the bubble to life at `position`, at rest
    pub fn spawn(&self, world: &mut PhysicsWorld, position: Vec2) {
        if let Some(body) = world.get_body_mut(self.body) {
            body.set_position(position);
            body.linear_velocity = Vec2::ZERO;
        }
        world.set_enabled(self.body, true);
        log::debug!("Bubble spawned at <{:.1}, {:.1}>", position.x, position.y);
    }

    /// Take the bubble out of the simulation
    pub fn kill(&self, world: &mut PhysicsWorld) {
        world.set_enabled(self.body, false);
    }
}

impl Tickable for Bubble {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        if !self.is_alive(ctx.world) {
            return;
        }

        if ctx.world.is_grounded(self.body) {
            log::debug!("Bubble touched ground");
            self.kill(ctx.world);
            ctx.emit(ArenaEvent::BubbleDropped { bubble: self.body });
        }
    }
}
