use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use outland_client::{ClientConfig, Hud, SessionError, WorldSession};
use outland_render::{FrameStats, TextureCacheStats};
use outland_world::Difficulty;
use serde::Serialize;
use tracing::{debug, error, info};

const DEFAULT_CONFIG: &str = "outland.toml";

#[derive(Serialize)]
struct StatsReport<'a> {
    world: &'a str,
    seed: &'a str,
    difficulty: Difficulty,
    hud: Hud,
    frame: FrameStats,
    textures: TextureCacheStats,
    biome_counts: BTreeMap<&'static str, u64>,
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = if Path::new(&path).exists() {
        match ClientConfig::load(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        ClientConfig::default()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run(&config) {
        error!("viewer failed: {e}");
        std::process::exit(1);
    }
}

fn run(config: &ClientConfig) -> Result<(), SessionError> {
    let world = config.world_data()?;
    info!(
        "Outland viewer: world \"{}\" seed {} ({})",
        world.name(),
        world.seed(),
        world.difficulty()
    );

    let settings = config.session_settings();
    let settle = settings.debounce;
    let mut session = WorldSession::new(world, settings)?;

    let interval = Duration::from_millis(config.viewer.frame_interval_ms.max(1));
    let mut now = Instant::now();
    session.set_zoom(config.viewer.zoom, now)?;

    // Replay the scripted drag through the pointer API, one frame per point.
    let mut path = config.viewer.drag_path.iter();
    if let Some(&[x, y]) = path.next() {
        session.pointer_down(x, y);
        for &[x, y] in path {
            now += interval;
            session.pointer_move(x, y, now);
            let stats = session.frame(now);
            debug!(
                drawn = stats.drawn,
                culled = stats.culled,
                missing = stats.missing,
                "frame"
            );
        }
        session.pointer_up();
    }

    // Let the last debounced load pass fire before the snapshot.
    now += settle + interval;
    let frame = session.frame(now);
    let hud = session.hud();
    info!(
        "camera ({:.0}, {:.0}) centre block ({}, {}) biome {} | {} chunks resident, {} textures",
        hud.camera_x,
        hud.camera_y,
        hud.center_block.0,
        hud.center_block.1,
        hud.center_biome,
        hud.resident_chunks,
        hud.cached_textures
    );

    session.surface().save_png(&config.viewer.snapshot)?;
    info!("snapshot written to {}", config.viewer.snapshot.display());

    let report = StatsReport {
        world: session.world().name(),
        seed: session.world().seed(),
        difficulty: session.world().difficulty(),
        hud,
        frame,
        textures: session.textures().stats(),
        biome_counts: session
            .biome_counts()
            .iter()
            .map(|(biome, count)| (biome.name(), count))
            .collect(),
    };
    std::fs::write(&config.viewer.report, serde_json::to_string_pretty(&report)?)?;
    info!("stats written to {}", config.viewer.report.display());

    session.teardown();
    Ok(())
}
