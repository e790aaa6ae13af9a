//! Player entities

use crate::systems::{ArenaEvent, TickContext, Tickable};
use bubblecatch_math::Vec2;
use bubblecatch_physics::{
    Body, BodyId, BodyIdMask, BodyKey, BodyKind, PhysicsWorld, PlayerIntent, PlayerMotor,
};

/// Body settings shared by every player
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    pub radius: f32,
    /// Per-second velocity damping until the motor sets its own
    pub damping: f32,
    pub max_velocity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 64.0,
            damping: 0.01,
            max_velocity: 2000.0,
        }
    }
}

/// A player: a body, a motor and a score
#[derive(Clone, Debug)]
pub struct Player {
    index: usize,
    name: String,
    body: BodyKey,
    pub motor: PlayerMotor,
    points: u32,
}

impl Player {
    /// Add a player body to the world
    ///
    /// Player 0 starts near the left edge, player 1 near the right edge of an
    /// arena `arena_width` wide.
    pub fn new(
        world: &mut PhysicsWorld,
        index: usize,
        arena_width: f32,
        tuning: &PlayerTuning,
    ) -> Self {
        let name = format!("Player {}", index);
        let x = if index == 0 {
            tuning.radius * 2.0
        } else {
            arena_width - tuning.radius * 2.0
        };

        let body = world.add_body(
            Body::circle(tuning.radius, BodyKind::Dynamic, BodyId::Player)
                .with_name(name.clone())
                .with_position(Vec2::new(x, tuning.radius * 2.1))
                .with_damping(tuning.damping)
                .with_max_velocity(tuning.max_velocity),
        );

        Self {
            index,
            name,
            body,
            motor: PlayerMotor::new(),
            points: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> BodyKey {
        self.body
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get_body(self.body).map(Body::position)
    }

    /// Drive the body from this frame's intent, before the physics step
    pub fn apply_intent(&mut self, world: &mut PhysicsWorld, intent: &PlayerIntent, dt: f32) {
        if !self.motor.apply(world, self.body, intent, dt) {
            log::warn!("{} has no body", self.name);
        }
    }
}

impl Tickable for Player {
    /// Every bubble the player touched this frame is caught
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let touched: Vec<BodyKey> = ctx.world.touching(self.body, BodyIdMask::BUBBLE).collect();

        for bubble in touched {
            // Already caught by someone else this frame
            if !ctx.world.is_enabled(bubble) {
                continue;
            }

            ctx.world.set_enabled(bubble, false);
            self.points += 1;
            log::debug!("{} caught a bubble ({} points)", self.name, self.points);
            ctx.emit(ArenaEvent::BubbleCaught {
                player: self.index,
                bubble,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn bubble_at(world: &mut PhysicsWorld, position: Vec2) -> BodyKey {
        world.add_body(
            Body::circle(64.0, BodyKind::Dynamic, BodyId::Bubble)
                .with_position(position)
                .with_gravity(Vec2::ZERO),
        )
    }

    #[test]
    fn test_spawn_positions() {
        let mut world = PhysicsWorld::new();
        let left = Player::new(&mut world, 0, 1920.0, &PlayerTuning::default());
        let right = Player::new(&mut world, 1, 1920.0, &PlayerTuning::default());

        let left_pos = left.position(&world).unwrap();
        let right_pos = right.position(&world).unwrap();
        assert!((left_pos.x - 128.0).abs() < 0.001);
        assert!((right_pos.x - 1792.0).abs() < 0.001);
        assert!((left_pos.y - 134.4).abs() < 0.001);
        assert_eq!(left.name(), "Player 0");
        assert_eq!(right.index(), 1);
    }

    #[test]
    fn test_body_setup() {
        let mut world = PhysicsWorld::new();
        let player = Player::new(&mut world, 0, 1920.0, &PlayerTuning::default());

        let body = world.get_body(player.body()).unwrap();
        assert_eq!(body.id(), BodyId::Player);
        assert_eq!(body.collider.radius(), Some(64.0));
        assert_eq!(body.linear_velocity_damping, 0.01);
        assert_eq!(body.max_velocity, 2000.0);
        assert_eq!(body.name(), "Player 0");
    }

    #[test]
    fn test_touching_bubble_scores() {
        let mut world = PhysicsWorld::new();
        let mut player = Player::new(&mut world, 0, 1920.0, &PlayerTuning::default());
        world.get_body_mut(player.body()).unwrap().gravity = Vec2::ZERO;
        let start = player.position(&world).unwrap();
        let bubble = bubble_at(&mut world, start + Vec2::new(100.0, 0.0));
        world.step(FRAME);

        let mut ctx = TickContext::new(&mut world, FRAME);
        player.tick(&mut ctx);
        let events = ctx.into_events();

        assert_eq!(player.points(), 1);
        assert_eq!(events, vec![ArenaEvent::BubbleCaught { player: 0, bubble }]);
        assert!(!world.is_enabled(bubble));
    }

    #[test]
    fn test_bubble_caught_once() {
        let mut world = PhysicsWorld::new();
        let mut first = Player::new(&mut world, 0, 400.0, &PlayerTuning::default());
        let mut second = Player::new(&mut world, 1, 400.0, &PlayerTuning::default());
        for player in [&first, &second] {
            world.get_body_mut(player.body()).unwrap().gravity = Vec2::ZERO;
        }
        // Players at x=128 and x=272, the bubble in between touches both
        bubble_at(&mut world, Vec2::new(200.0, 134.4));
        world.step(FRAME);

        let mut ctx = TickContext::new(&mut world, FRAME);
        first.tick(&mut ctx);
        second.tick(&mut ctx);

        assert_eq!(ctx.events().len(), 1);
        assert_eq!(first.points() + second.points(), 1);
    }

    #[test]
    fn test_other_contacts_do_not_score() {
        let mut world = PhysicsWorld::new();
        world.add_body(Body::new_static_aabb(Vec2::ZERO, Vec2::new(4096.0, 32.0)));
        let mut player = Player::new(&mut world, 0, 1920.0, &PlayerTuning::default());
        world.get_body_mut(player.body()).unwrap().set_position(Vec2::new(128.0, 90.0));
        world.step(FRAME);
        assert!(world.is_grounded(player.body()));

        let mut ctx = TickContext::new(&mut world, FRAME);
        player.tick(&mut ctx);

        assert!(ctx.events().is_empty());
        assert_eq!(player.points(), 0);
    }

    #[test]
    fn test_apply_intent_moves_body() {
        let mut world = PhysicsWorld::new();
        let mut player = Player::new(&mut world, 0, 1920.0, &PlayerTuning::default());

        let right = PlayerIntent {
            right: true,
            ..Default::default()
        };
        player.apply_intent(&mut world, &right, FRAME);

        let body = world.get_body(player.body()).unwrap();
        assert!(body.linear_velocity.x > 0.0);
    }
}
