//! Application systems
//!
//! The per-frame simulation and the entity tick hook it drives.

mod simulation;
mod tick;

pub use simulation::{FrameReport, SimulationSystem, MAX_FRAME_TIME};
pub use tick::{ArenaEvent, TickContext, Tickable};
