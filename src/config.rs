//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BC_SECTION__KEY`)

use crate::arena::{BubbleTuning, PlayerTuning};
use bubblecatch_math::Vec2;
use bubblecatch_physics::PhysicsConfig;
use figment::{Figment, providers::{Env, Format, Toml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsSection,
    /// Arena layout and bubble spawning
    #[serde(default)]
    pub arena: ArenaConfig,
    /// Frame rate and match length
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BC_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BC_ARENA__PLAYERS=1 -> arena.players = 1
        figment = figment.merge(Env::prefixed("BC_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSection {
    /// Integration/collision passes per frame
    pub substeps: u32,
    /// Bubble speed clamp
    pub bubble_max_velocity: f32,
    /// Bubble gravity (negative = downward)
    pub bubble_gravity: f32,
    /// Player collision radius
    pub player_radius: f32,
    /// Player per-second velocity damping before the motor takes over
    pub player_damping: f32,
    /// Player speed clamp
    pub player_max_velocity: f32,
}

impl Default for PhysicsSection {
    fn default() -> Self {
        Self {
            substeps: 16,
            bubble_max_velocity: 200.0,
            bubble_gravity: -100.0,
            player_radius: 64.0,
            player_damping: 0.01,
            player_max_velocity: 2000.0,
        }
    }
}

impl PhysicsSection {
    /// Convert to the physics crate's configuration
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(self.substeps)
    }

    /// Player body settings
    pub fn player_tuning(&self) -> PlayerTuning {
        PlayerTuning {
            radius: self.player_radius,
            damping: self.player_damping,
            max_velocity: self.player_max_velocity,
        }
    }

    /// Bubble body settings, `radius` comes from the arena section
    pub fn bubble_tuning(&self, radius: f32) -> BubbleTuning {
        BubbleTuning {
            radius,
            max_velocity: self.bubble_max_velocity,
            gravity: Vec2::new(0.0, self.bubble_gravity),
        }
    }
}

/// Arena configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Playfield width
    pub width: f32,
    /// Playfield height
    pub height: f32,
    /// Half height of the floor box
    pub floor_half_height: f32,
    /// Half width of the side walls
    pub wall_half_width: f32,
    /// Number of players (1 or 2)
    pub players: u32,
    /// Alive bubbles kept in play per player
    pub bubbles_per_player: u32,
    pub bubble_radius: f32,
    /// Seed for bubble spawn positions
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            floor_half_height: 32.0,
            wall_half_width: 32.0,
            players: 2,
            bubbles_per_player: 10,
            bubble_radius: 64.0,
            seed: 0,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed frames per second of the headless run
    pub frame_rate: u32,
    /// Match length in seconds
    pub match_seconds: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            match_seconds: 60,
        }
    }
}

impl SimulationConfig {
    /// Duration of one frame in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Number of frames in a match
    pub fn match_frames(&self) -> u64 {
        u64::from(self.frame_rate.max(1)) * u64::from(self.match_seconds)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level when `RUST_LOG` is not set (error, warn, info, debug, trace)
    pub log_level: String,
    /// Dump every body and contact at debug level once per second
    pub log_world_state: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_world_state: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
