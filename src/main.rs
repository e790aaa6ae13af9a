//! bubblecatch - headless match runner
//!
//! Builds an arena from the configuration and plays one match with scripted
//! players, logging progress and the final score.

use bubblecatch::arena::{Arena, ArenaBuilder};
use bubblecatch::config::AppConfig;
use bubblecatch::input::Autopilot;
use bubblecatch::systems::SimulationSystem;
use bubblecatch_physics::PlayerIntent;

/// Totals over a whole match
#[derive(Debug, Default)]
struct MatchTotals {
    caught: u32,
    dropped: u32,
    peak_contacts: usize,
}

fn main() {
    // Load configuration before the logger so it can pick the default level
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let log_env = env_logger::Env::default().default_filter_or(config.debug.log_level.as_str());
    env_logger::Builder::from_env(log_env).init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut arena = match ArenaBuilder::from_config(&config).build() {
        Ok(arena) => arena,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let totals = run_match(&mut arena, &config);

    log::info!(
        "Match over: {} caught, {} dropped, at most {} contacts in a frame",
        totals.caught,
        totals.dropped,
        totals.peak_contacts
    );
    for player in arena.players() {
        let stats = player.motor.stats;
        log::info!(
            "{}: {} points ({} jumps, {} double jumps, {} dashes)",
            player.name(),
            player.points(),
            stats.jumps,
            stats.double_jumps,
            stats.dashes
        );
    }
}

/// Play one match at a fixed frame rate
fn run_match(arena: &mut Arena, config: &AppConfig) -> MatchTotals {
    let mut simulation = SimulationSystem::new();
    let mut pilots = Autopilot::for_arena(arena);
    let mut totals = MatchTotals::default();

    let dt = config.simulation.frame_dt();
    let frames = config.simulation.match_frames();
    let frame_rate = u64::from(config.simulation.frame_rate.max(1));

    log::info!(
        "Starting {} s match at {} fps ({} substeps per frame)",
        config.simulation.match_seconds,
        frame_rate,
        arena.world().substeps()
    );

    for frame in 1..=frames {
        let intents: Vec<PlayerIntent> =
            pilots.iter_mut().map(|pilot| pilot.intent(&*arena)).collect();
        let report = simulation.update(arena, &intents, dt);

        totals.caught += report.caught;
        totals.dropped += report.dropped;
        totals.peak_contacts = totals.peak_contacts.max(report.contacts);

        if frame % frame_rate == 0 {
            log::info!(
                "t={:>3}s bubbles: {:>2} alive, {:>3} caught, {:>3} dropped | score {:?}",
                frame / frame_rate,
                report.alive_bubbles,
                totals.caught,
                totals.dropped,
                arena.scores()
            );
            if config.debug.log_world_state {
                arena.world().log_state();
            }
        }
    }

    totals
}
