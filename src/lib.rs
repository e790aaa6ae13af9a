//! bubblecatch - catch the falling bubbles
//!
//! Library side of the game: configuration, the arena and its entities, and
//! the systems that run a match on top of `bubblecatch_physics`.

pub mod arena;
pub mod config;
pub mod input;
pub mod systems;
