//! ArenaBuilder - Declarative arena construction
//!
//! Provides a fluent API for building a playfield with physics.

use super::{Arena, Bubble, BubbleTuning, Player, PlayerTuning};
use crate::config::AppConfig;
use bubblecatch_math::Vec2;
use bubblecatch_physics::{Body, PhysicsConfig, PhysicsWorld};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Half length of the floor and walls, wide enough for any screen
const BOUND_HALF_LENGTH: f32 = 4096.0;

/// Most players an arena supports
pub const MAX_PLAYERS: u32 = 2;

/// Builder for constructing arenas
///
/// # Example
/// ```ignore
/// let arena = ArenaBuilder::new(1920.0, 1080.0)
///     .with_physics(PhysicsConfig::new(16))
///     .add_floor(32.0)
///     .add_walls(32.0)
///     .add_players(2)
///     .with_bubble_pool(10)
///     .build()?;
/// ```
pub struct ArenaBuilder {
    size: Vec2,
    physics: PhysicsConfig,
    floor_half_height: Option<f32>,
    wall_half_width: Option<f32>,
    players: u32,
    player_tuning: PlayerTuning,
    bubbles_per_player: u32,
    bubble_tuning: BubbleTuning,
    seed: u64,
}

impl ArenaBuilder {
    /// Create a builder for an empty arena of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            physics: PhysicsConfig::default(),
            floor_half_height: None,
            wall_half_width: None,
            players: 0,
            player_tuning: PlayerTuning::default(),
            bubbles_per_player: 0,
            bubble_tuning: BubbleTuning::default(),
            seed: 0,
        }
    }

    /// Create a builder with everything taken from the configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let arena = &config.arena;
        Self::new(arena.width, arena.height)
            .with_physics(config.physics.to_physics_config())
            .add_floor(arena.floor_half_height)
            .add_walls(arena.wall_half_width)
            .with_player_tuning(config.physics.player_tuning())
            .add_players(arena.players)
            .with_bubble_tuning(config.physics.bubble_tuning(arena.bubble_radius))
            .with_bubble_pool(arena.bubbles_per_player)
            .with_seed(arena.seed)
    }

    /// Use the given physics configuration
    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics = config;
        self
    }

    /// Add a floor along the bottom edge
    pub fn add_floor(mut self, half_height: f32) -> Self {
        self.floor_half_height = Some(half_height);
        self
    }

    /// Add walls on the left and right edges
    pub fn add_walls(mut self, half_width: f32) -> Self {
        self.wall_half_width = Some(half_width);
        self
    }

    pub fn with_player_tuning(mut self, tuning: PlayerTuning) -> Self {
        self.player_tuning = tuning;
        self
    }

    /// Add `count` players (1 or 2)
    pub fn add_players(mut self, count: u32) -> Self {
        self.players = count;
        self
    }

    pub fn with_bubble_tuning(mut self, tuning: BubbleTuning) -> Self {
        self.bubble_tuning = tuning;
        self
    }

    /// Keep `per_player` bubbles per player in play
    pub fn with_bubble_pool(mut self, per_player: u32) -> Self {
        self.bubbles_per_player = per_player;
        self
    }

    /// Seed for bubble spawn positions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<(), ArenaError> {
        if !(positive(self.size.x) && positive(self.size.y)) {
            return Err(ArenaError::new(format!(
                "arena size must be positive, got {}x{}",
                self.size.x, self.size.y
            )));
        }
        if self.players == 0 || self.players > MAX_PLAYERS {
            return Err(ArenaError::new(format!(
                "player count must be between 1 and {}, got {}",
                MAX_PLAYERS, self.players
            )));
        }
        for (what, value) in [
            ("floor half height", self.floor_half_height),
            ("wall half width", self.wall_half_width),
        ] {
            if let Some(value) = value {
                if !positive(value) {
                    return Err(ArenaError::new(format!(
                        "{} must be positive, got {}",
                        what, value
                    )));
                }
            }
        }
        if !positive(self.bubble_tuning.radius) {
            return Err(ArenaError::new(format!(
                "bubble radius must be positive, got {}",
                self.bubble_tuning.radius
            )));
        }
        if !positive(self.player_tuning.radius) {
            return Err(ArenaError::new(format!(
                "player radius must be positive, got {}",
                self.player_tuning.radius
            )));
        }
        Ok(())
    }

    /// Build the arena
    ///
    /// Statics are added first, then players, then the (disabled) bubble pool.
    pub fn build(self) -> Result<Arena, ArenaError> {
        self.validate()?;

        let (width, height) = (self.size.x, self.size.y);
        let mut world = PhysicsWorld::with_config(self.physics.clone());
        let mut bounds = Vec::new();

        if let Some(half_height) = self.floor_half_height {
            let half_extents = Vec2::new(BOUND_HALF_LENGTH, half_height);
            bounds.push(world.add_body(
                Body::new_static_aabb(Vec2::new(width * 0.5, 0.0), half_extents).with_name("Floor"),
            ));
        }

        if let Some(half_width) = self.wall_half_width {
            let half_extents = Vec2::new(half_width, BOUND_HALF_LENGTH);
            bounds.push(world.add_body(
                Body::new_static_aabb(Vec2::ZERO, half_extents).with_name("Obstacle"),
            ));
            bounds.push(world.add_body(
                Body::new_static_aabb(Vec2::new(width, height), half_extents).with_name("Obstacle"),
            ));
        }

        let players: Vec<Player> = (0..self.players as usize)
            .map(|index| Player::new(&mut world, index, width, &self.player_tuning))
            .collect();

        let spawn_target = (self.bubbles_per_player * self.players) as usize;
        let bubbles: Vec<Bubble> = (0..spawn_target)
            .map(|_| Bubble::new(&mut world, &self.bubble_tuning))
            .collect();

        log::info!(
            "Built {}x{} arena: {} players, {} bounds, {} pooled bubbles",
            width,
            height,
            players.len(),
            bounds.len(),
            bubbles.len()
        );

        Ok(Arena {
            world,
            players,
            bubbles,
            bounds,
            size: self.size,
            spawn_target,
            rng: StdRng::seed_from_u64(self.seed),
            dropped: 0,
        })
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Arena construction error
#[derive(Debug)]
pub struct ArenaError {
    message: String,
}

impl ArenaError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arena error: {}", self.message)
    }
}

impl std::error::Error for ArenaError {}
