//! Game simulation system
//!
//! Runs one frame of a match:
//! - Bubble spawning
//! - Player intents → motor
//! - Physics stepping
//! - Entity ticks (catches, drops)

use super::{ArenaEvent, TickContext, Tickable};
use crate::arena::Arena;
use bubblecatch_physics::PlayerIntent;

/// Longest frame time simulated in one update
pub const MAX_FRAME_TIME: f32 = 0.25;

/// What happened during one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Contacts detected by the physics step
    pub contacts: usize,
    /// Bubbles in play at the end of the frame
    pub alive_bubbles: usize,
    /// Bubbles caught by players this frame
    pub caught: u32,
    /// Bubbles that reached the ground this frame
    pub dropped: u32,
}

/// Drives an [`Arena`] one frame at a time
pub struct SimulationSystem {
    frame: u64,
    elapsed: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Run one simulation frame
    ///
    /// `intents` are matched to players by index; missing ones are idle.
    /// A non-finite or negative `dt` skips the frame entirely.
    pub fn update(&mut self, arena: &mut Arena, intents: &[PlayerIntent], dt: f32) -> FrameReport {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Skipping frame {} with invalid dt {}", self.frame, dt);
            return FrameReport {
                alive_bubbles: arena.alive_bubbles(),
                ..Default::default()
            };
        }

        // Cap dt so a stall does not turn into one huge step
        let dt = dt.min(MAX_FRAME_TIME);

        // 1. Keep the pool topped up, one bubble per frame
        arena.spawn_bubbles();

        // 2. Drive the players from last frame's contacts
        let idle = PlayerIntent::idle();
        for (index, player) in arena.players.iter_mut().enumerate() {
            let intent = intents.get(index).unwrap_or(&idle);
            player.apply_intent(&mut arena.world, intent, dt);
        }

        // 3. Step physics
        arena.world.step(dt);
        let contacts = arena.world.contacts().len();

        // 4. Let entities react: players catch first, then bubbles drop
        let events = {
            let mut ctx = TickContext::new(&mut arena.world, dt);
            for player in arena.players.iter_mut() {
                player.tick(&mut ctx);
            }
            for bubble in arena.bubbles.iter_mut() {
                bubble.tick(&mut ctx);
            }
            ctx.into_events()
        };

        let mut report = FrameReport {
            contacts,
            ..Default::default()
        };
        for event in &events {
            match event {
                ArenaEvent::BubbleCaught { .. } => report.caught += 1,
                ArenaEvent::BubbleDropped { .. } => {
                    report.dropped += 1;
                    arena.record_dropped();
                }
            }
        }

        report.alive_bubbles = arena.alive_bubbles();

        self.frame += 1;
        self.elapsed += dt;

        report
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
