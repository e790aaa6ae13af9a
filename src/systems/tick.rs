//! Per-frame entity logic
//!
//! Entities that react to the outcome of a physics step implement [`Tickable`].
//! They run after the step, read the world's contacts through the
//! [`TickContext`] and report what happened as [`ArenaEvent`]s.

use bubblecatch_physics::{BodyKey, PhysicsWorld};

/// Something that happened to a bubble during a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaEvent {
    /// A player touched a bubble and scored
    BubbleCaught { player: usize, bubble: BodyKey },
    /// A bubble reached the ground
    BubbleDropped { bubble: BodyKey },
}

/// What an entity can see and touch while ticking
pub struct TickContext<'a> {
    pub world: &'a mut PhysicsWorld,
    /// Frame time in seconds
    pub dt: f32,
    events: Vec<ArenaEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(world: &'a mut PhysicsWorld, dt: f32) -> Self {
        Self {
            world,
            dt,
            events: Vec::new(),
        }
    }

    /// Record an event for the frame report
    pub fn emit(&mut self, event: ArenaEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    /// Finish the tick and hand back the recorded events
    pub fn into_events(self) -> Vec<ArenaEvent> {
        self.events
    }
}

/// Per-frame update hook, called after the physics step
pub trait Tickable {
    fn tick(&mut self, ctx: &mut TickContext<'_>);
}
