//! dispatch — drives the fleet_track engine over a synthetic Delhi fleet.
//!
//! Ticks the engine at the configured frame interval for a fixed stretch of
//! simulated time, swaps in an updated feed halfway through, records frames
//! to CSV, and finally prints the vehicles nearest to a user location.
//!
//! ```text
//! dispatch [config.json]
//! RUST_LOG=fleet_motion=trace dispatch
//! ```

mod fleet;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use fleet_core::{EngineConfig, FrameClock, SimRng, Timestamp};
use fleet_engine::EngineBuilder;
use fleet_output::{CsvWriter, FrameRecorder};
use tracing::info;

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_SECS:              u64   = 60;
const FEED_UPDATE_AT_MS:     u64   = 30_000;
const OUTPUT_INTERVAL_TICKS: u64   = 10;  // ~3 rows per vehicle per second
const NEAREST:               usize = 3;
const OUTPUT_DIR:            &str  = "output/dispatch";

fn load_config() -> Result<EngineConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(EngineConfig { seed: 42, ..Default::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: EngineConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    println!("=== dispatch — fleet_track motion engine ===");
    println!(
        "Seed: {}  |  Frame: {} ms  |  Origination every {} ms  |  Simulated: {} s",
        config.seed, config.frame_interval_ms, config.origination_period_ms, SIM_SECS
    );
    println!();

    // 1. Engine with the initial feed.
    let mut engine = EngineBuilder::new(config.clone())
        .initial_fleet(fleet::initial_feed())
        .build()?;
    info!(vehicles = engine.len(), "initial fleet loaded");

    // 2. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut recorder = FrameRecorder::new(writer, OUTPUT_INTERVAL_TICKS);

    // 3. Drive.
    let mut clock = FrameClock::new(Timestamp::ZERO, config.frame_interval_ms);
    let total_frames = clock.frames_for_ms(SIM_SECS * 1_000);
    let mut updated = false;
    // Feed drift draws from its own stream so the engine's movements do not
    // depend on it.
    let mut feed_rng = SimRng::new(config.seed).child(1);

    let t0 = Instant::now();
    engine.tick_observed(clock.now(), &mut recorder);
    while clock.frame < total_frames {
        let now = clock.advance();
        if !updated && clock.elapsed_ms() >= FEED_UPDATE_AT_MS {
            let report = engine.ingest(&fleet::updated_feed(&mut feed_rng));
            info!(
                at      = %clock,
                removed = report.removed.len(),
                updated = report.updated,
                "feed update applied"
            );
            updated = true;
        }
        engine.tick_observed(now, &mut recorder);
    }
    let elapsed = t0.elapsed();
    recorder.finish().context("writing frames")?;

    // 4. Summary.
    let stats = engine.stats();
    println!("Ran {} ticks in {:.3} s", stats.ticks, elapsed.as_secs_f64());
    println!(
        "  movements started: {}  arrivals: {}  skipped: {}",
        stats.movements_started, stats.arrivals, stats.movements_skipped
    );
    println!("  frames written to {OUTPUT_DIR}/");
    println!();

    // 5. Final fleet table.
    let snapshot = engine.snapshot();
    println!("{:<9} {:<10} {:<10} {:<26} {:<6} {:<5}", "Vehicle", "Kind", "Status", "Position", "Moving", "Trail");
    println!("{}", "-".repeat(70));
    for v in &snapshot {
        println!(
            "{:<9} {:<10} {:<10} {:<26} {:<6} {:<5}",
            v.id.as_str(),
            v.kind.as_str(),
            v.status.as_str(),
            v.position.to_string(),
            if v.animating { "yes" } else { "no" },
            v.trail.len(),
        );
    }
    println!();

    // 6. Nearest to the user.
    let here = fleet::user_location();
    println!("Nearest {NEAREST} to {here}:");
    for near in snapshot.nearest_to(here, NEAREST) {
        println!("  {:<9} {:<10} {}", near.vehicle.id.as_str(), near.vehicle.kind.as_str(), near.label);
    }
    println!();

    // 7. JSON dump for map renderers.
    let json = serde_json::to_string_pretty(&snapshot)?;
    let json_path = Path::new(OUTPUT_DIR).join("snapshot.json");
    std::fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;
    println!("Snapshot written to {}", json_path.display());

    Ok(())
}
