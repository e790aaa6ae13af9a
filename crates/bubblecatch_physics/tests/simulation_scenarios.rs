//! Whole-world simulation scenarios
//!
//! These run the world for many frames and check the behavior a game relies
//! on: things land and stay on the floor, statics never move, and contact
//! bookkeeping stays consistent.

use bubblecatch_math::Vec2;
use bubblecatch_physics::{Body, BodyId, BodyIdMask, BodyKind, PhysicsConfig, PhysicsWorld};

const FRAME: f32 = 1.0 / 60.0;

fn floor() -> Body {
    Body::new_static_aabb(Vec2::ZERO, Vec2::new(4096.0, 32.0)).with_name("Floor")
}

fn falling_circle(position: Vec2) -> Body {
    Body::circle(64.0, BodyKind::Dynamic, BodyId::Player)
        .with_position(position)
        .with_gravity(Vec2::new(0.0, -1250.0))
}

#[test]
fn test_circle_settles_on_floor() {
    let mut world = PhysicsWorld::with_config(PhysicsConfig::new(16));
    world.add_body(floor());
    let ball = world.add_body(falling_circle(Vec2::new(0.0, 500.0)));

    for _ in 0..120 {
        world.step(FRAME);
    }

    let body = world.get_body(ball).unwrap();
    assert!(
        (body.position.y - 96.0).abs() < 1.0,
        "expected rest height ~96, got {}",
        body.position.y
    );
    assert!(body.position.x.abs() < 0.001);
    assert!(world.is_grounded(ball));
}

#[test]
fn test_circle_stays_on_floor() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    let ball = world.add_body(falling_circle(Vec2::new(0.0, 500.0)));

    for _ in 0..120 {
        world.step(FRAME);
    }
    // Keep it resting for a long while, it must neither sink nor bounce away
    for _ in 0..600 {
        world.step(FRAME);
        let y = world.get_body(ball).unwrap().position.y;
        assert!((y - 96.0).abs() < 1.0, "drifted to {}", y);
        assert!(world.is_grounded(ball));
    }
}

#[test]
fn test_statics_never_move() {
    let mut world = PhysicsWorld::new();
    let floor_key = world.add_body(floor());
    let wall_key = world.add_body(
        Body::new_static_aabb(Vec2::new(-300.0, 0.0), Vec2::new(32.0, 4096.0))
            .with_name("Left Wall"),
    );
    for i in 0..8 {
        world.add_body(
            falling_circle(Vec2::new(-250.0 + i as f32 * 40.0, 100.0 + i as f32 * 30.0))
                .with_velocity(Vec2::new(-400.0, 0.0)),
        );
    }

    for _ in 0..240 {
        world.step(FRAME);
    }

    assert_eq!(world.get_body(floor_key).unwrap().position, Vec2::ZERO);
    assert_eq!(world.get_body(wall_key).unwrap().position, Vec2::new(-300.0, 0.0));
}

#[test]
fn test_wall_stops_sideways_motion() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    world.add_body(Body::new_static_aabb(Vec2::new(-300.0, 0.0), Vec2::new(32.0, 4096.0)));
    let ball = world.add_body(
        falling_circle(Vec2::new(0.0, 96.0)).with_velocity(Vec2::new(-600.0, 0.0)),
    );

    for _ in 0..120 {
        world.step(FRAME);
    }

    // Right face of the wall is at -268, the ball rests against it
    let body = world.get_body(ball).unwrap();
    assert!(body.position.x >= -268.0 + 64.0 - 1.0, "went through the wall: {}", body.position.x);
}

#[test]
fn test_contact_count_bounded() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    for i in 0..10 {
        world.add_body(
            Body::circle(64.0, BodyKind::Dynamic, BodyId::Bubble)
                .with_position(Vec2::new(i as f32 * 20.0, 80.0 + i as f32 * 10.0))
                .with_max_velocity(200.0),
        );
    }

    for _ in 0..60 {
        world.step(FRAME);

        let n = world.active_count();
        let contacts = world.contacts();
        assert!(contacts.len() <= n * (n - 1) / 2);

        let pairs: Vec<_> = contacts.iter().map(|c| (c.a.min(c.b), c.a.max(c.b))).collect();
        for (i, pair) in pairs.iter().enumerate() {
            assert!(!pairs[i + 1..].contains(pair), "duplicate pair {:?}", pair);
        }
    }
}

#[test]
fn test_bubble_speed_stays_clamped() {
    let mut world = PhysicsWorld::new();
    let bubble = world.add_body(
        Body::circle(64.0, BodyKind::Dynamic, BodyId::Bubble)
            .with_position(Vec2::new(0.0, 10_000.0))
            .with_max_velocity(200.0),
    );

    for _ in 0..600 {
        world.step(FRAME);
        let speed = world.get_body(bubble).unwrap().linear_velocity.length();
        assert!(speed <= 200.0 + 0.001);
    }
}

#[test]
fn test_pooled_body_is_frozen_while_disabled() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    let bubble = world.add_body(
        Body::circle(64.0, BodyKind::Dynamic, BodyId::Bubble).with_position(Vec2::new(0.0, 400.0)),
    );

    world.set_enabled(bubble, false);
    for _ in 0..60 {
        world.step(FRAME);
    }
    assert_eq!(world.get_body(bubble).unwrap().position, Vec2::new(0.0, 400.0));

    // Respawn elsewhere
    world.get_body_mut(bubble).unwrap().set_position(Vec2::new(0.0, 90.0));
    world.set_enabled(bubble, true);
    world.step(FRAME);
    assert!(world.is_grounded(bubble));
}

#[test]
fn test_player_catches_bubble() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    let player = world.add_body(falling_circle(Vec2::new(0.0, 96.0)));
    let bubble = world.add_body(
        Body::circle(64.0, BodyKind::Dynamic, BodyId::Bubble)
            .with_position(Vec2::new(0.0, 400.0))
            .with_velocity(Vec2::new(0.0, -200.0))
            .with_max_velocity(200.0),
    );

    let mut caught = false;
    for _ in 0..120 {
        world.step(FRAME);
        if world.touching(player, BodyIdMask::BUBBLE).any(|key| key == bubble) {
            caught = true;
            break;
        }
    }

    assert!(caught);
}

#[test]
fn test_removed_body_leaves_no_contacts() {
    let mut world = PhysicsWorld::new();
    world.add_body(floor());
    let keys: Vec<_> = (0..4)
        .map(|i| world.add_body(falling_circle(Vec2::new(i as f32 * 100.0, 90.0))))
        .collect();

    world.step(FRAME);
    assert!(world.contacts().iter().any(|c| c.involves(keys[1])));

    world.remove_body(keys[1]);

    assert!(world.contacts().iter().all(|c| !c.involves(keys[1])));
    assert!(!world.is_grounded(keys[1]));
    assert_eq!(world.active_count(), 4);
}
