//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use bubblecatch::arena::ArenaBuilder;
use bubblecatch::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("BC_ARENA__PLAYERS", "1");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("BC_ARENA__PLAYERS");

    assert_eq!(config.arena.players, 1);
}

#[test]
#[serial]
fn test_env_override_nested_float() {
    std::env::set_var("BC_PHYSICS__BUBBLE_MAX_VELOCITY", "350.5");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("BC_PHYSICS__BUBBLE_MAX_VELOCITY");

    assert!((config.physics.bubble_max_velocity - 350.5).abs() < 1e-4);
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("BC_ARENA__PLAYERS");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert_eq!(config.physics.substeps, 16);
    assert_eq!(config.simulation.frame_rate, 60);
}

#[test]
#[serial]
fn test_invalid_env_value_is_an_error() {
    std::env::set_var("BC_ARENA__PLAYERS", "lots");
    let result = AppConfig::load();
    std::env::remove_var("BC_ARENA__PLAYERS");

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));
}

#[test]
#[serial]
fn test_env_config_reaches_arena() {
    std::env::set_var("BC_ARENA__BUBBLES_PER_PLAYER", "3");
    std::env::set_var("BC_PHYSICS__SUBSTEPS", "4");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("BC_ARENA__BUBBLES_PER_PLAYER");
    std::env::remove_var("BC_PHYSICS__SUBSTEPS");

    let arena = ArenaBuilder::from_config(&config).build().unwrap();

    assert_eq!(arena.spawn_target(), 3 * config.arena.players as usize);
    assert_eq!(arena.world().config.substeps, 4);
}
