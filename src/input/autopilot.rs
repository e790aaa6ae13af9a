//! Scripted player input
//!
//! Produces [`PlayerIntent`]s from the arena state so a match can run
//! without a keyboard. Buttons behave like real ones: `jump` and `dash`
//! are only reported on the frame they go down.

use crate::arena::Arena;
use bubblecatch_math::Vec2;
use bubblecatch_physics::PlayerIntent;

/// Horizontal distance under which the player stops chasing
const DEAD_ZONE: f32 = 24.0;
/// Jump when the target is this close horizontally...
const JUMP_REACH_X: f32 = 96.0;
/// ...and at most this far above
const JUMP_REACH_Y: f32 = 420.0;
/// Dash toward targets further than this
const DASH_DISTANCE: f32 = 600.0;

/// Held state of the edge-triggered buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Buttons {
    jump: bool,
    dash: bool,
}

/// Chases the lowest bubble in play
#[derive(Clone, Debug)]
pub struct Autopilot {
    player: usize,
    held: Buttons,
}

impl Autopilot {
    /// Create an autopilot for the player at `player` index
    pub fn new(player: usize) -> Self {
        Self {
            player,
            held: Buttons::default(),
        }
    }

    /// One autopilot per player of the arena
    pub fn for_arena(arena: &Arena) -> Vec<Self> {
        (0..arena.players().len()).map(Self::new).collect()
    }

    pub fn player(&self) -> usize {
        self.player
    }

    /// Decide this frame's input
    pub fn intent(&mut self, arena: &Arena) -> PlayerIntent {
        let Some(player) = arena.players().get(self.player) else {
            return PlayerIntent::idle();
        };
        let Some(position) = player.position(arena.world()) else {
            return PlayerIntent::idle();
        };

        let Some(target) = lowest(arena.alive_bubble_positions()) else {
            self.held = Buttons::default();
            return PlayerIntent::idle();
        };

        let dx = target.x - position.x;
        let dy = target.y - position.y;
        let grounded = arena.world().is_grounded(player.body());

        let want = Buttons {
            jump: grounded && dx.abs() < JUMP_REACH_X && dy > 0.0 && dy < JUMP_REACH_Y,
            dash: dx.abs() > DASH_DISTANCE,
        };
        let pressed = Buttons {
            jump: want.jump && !self.held.jump,
            dash: want.dash && !self.held.dash,
        };
        self.held = want;

        PlayerIntent {
            left: dx < -DEAD_ZONE,
            right: dx > DEAD_ZONE,
            jump: pressed.jump,
            dash: pressed.dash,
        }
    }
}

/// The point with the smallest y
fn lowest(points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| a.y.total_cmp(&b.y))
}
