//! The playfield: static bounds, players and the bubble pool
//!
//! An [`Arena`] owns the physics world together with the entities living in
//! it. Build one with [`ArenaBuilder`] and drive it with
//! [`SimulationSystem`](crate::systems::SimulationSystem).

mod arena_builder;
mod bubble;
mod player;

pub use arena_builder::{ArenaBuilder, ArenaError};
pub use bubble::{Bubble, BubbleTuning};
pub use player::{Player, PlayerTuning};

use bubblecatch_math::Vec2;
use bubblecatch_physics::{BodyKey, PhysicsWorld};
use rand::rngs::StdRng;
use rand::Rng;

/// A running match
pub struct Arena {
    pub(crate) world: PhysicsWorld,
    pub(crate) players: Vec<Player>,
    pub(crate) bubbles: Vec<Bubble>,
    /// Floor and walls
    bounds: Vec<BodyKey>,
    size: Vec2,
    /// Alive bubbles to keep in play
    spawn_target: usize,
    rng: StdRng,
    dropped: u32,
}

impl Arena {
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Static bodies bounding the playfield
    pub fn bounds(&self) -> &[BodyKey] {
        &self.bounds
    }

    /// Width and height of the playfield
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn spawn_target(&self) -> usize {
        self.spawn_target
    }

    pub fn alive_bubbles(&self) -> usize {
        self.bubbles.iter().filter(|b| b.is_alive(&self.world)).count()
    }

    /// Positions of the bubbles currently in play
    pub fn alive_bubble_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.bubbles
            .iter()
            .filter(|b| b.is_alive(&self.world))
            .filter_map(|b| self.world.get_body(b.body()).map(|body| body.position()))
    }

    /// Bubbles that reached the ground so far
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub(crate) fn record_dropped(&mut self) {
        self.dropped += 1;
    }

    /// Spawn one bubble if fewer than the target are alive
    ///
    /// Returns the body of the spawned bubble. The pool never grows past the
    /// target, so a full pool of alive bubbles spawns nothing.
    pub fn spawn_bubbles(&mut self) -> Option<BodyKey> {
        if self.alive_bubbles() >= self.spawn_target {
            return None;
        }

        let position = self.random_spawn_position();
        let bubble = self.bubbles.iter().find(|b| !b.is_alive(&self.world))?;
        bubble.spawn(&mut self.world, position);
        Some(bubble.body())
    }

    /// Random point above the visible area, away from the side walls
    fn random_spawn_position(&mut self) -> Vec2 {
        let (width, height) = (self.size.x, self.size.y);
        let x = lerp(width * 0.1, width - width * 0.1, self.rng.gen::<f32>());
        let y = height + lerp(height * 0.2, height, self.rng.gen::<f32>());
        Vec2::new(x, y)
    }

    /// Final points per player, in player order
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(Player::points).collect()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
