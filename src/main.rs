//! SLAC headless session
//!
//! Synthesizes a walk around a room, replays it through the orchestrator
//! with a dead-reckoning estimator, and writes the resulting map as SVG.
//!
//! Usage:
//!   slac --config configs/slac.toml --output slac.svg
//!   slac --steps 20 --seed 7
//!
//! Enable debug logging to see lifecycle and rescale events:
//!   RUST_LOG=debug slac

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

use slac::estimator::DeadReckoningFactory;
use slac::orchestrator::{Readout, ViewState};
use slac::render::{SceneStyle, ScaledTransform, SurfaceRegistry, draw_scene};
use slac::sensors::{ReplayMotionSource, ReplayRadioSource};
use slac::sim::synthesize_walk;
use slac::{App, Orchestrator, Renderer, Result, SlacConfig, SvgSurface};

/// Surface identifier the map is drawn on
const MAP_SURFACE: &str = "map";

/// Headless SLAC session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/slac.toml")]
    config: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "slac.svg")]
    output: PathBuf,

    /// Stop the walk after this many steps
    #[arg(long)]
    steps: Option<usize>,

    /// Noise seed (0 = random), overrides the config
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = SlacConfig::load_or_default(&args.config)?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    run(&config, args.steps, &args.output)
}

fn run(config: &SlacConfig, steps: Option<usize>, output: &Path) -> Result<()> {
    let session = synthesize_walk(config, steps);
    let walked = session.steps();
    let duration_ms = session.duration_ms;
    info!(
        "Walk: {} steps, {} motion samples, {} adverts",
        walked,
        session.motion.len(),
        session.adverts.len()
    );

    let orchestrator = Orchestrator::new(
        Box::new(DeadReckoningFactory::default()),
        config.estimator_params(),
        ViewState::new(),
    );
    let motion = ReplayMotionSource::new(session.motion);
    let radio = ReplayRadioSource::new(config.ble.frequency, session.adverts);
    let mut app = App::new(orchestrator, motion, radio);

    let capabilities = app.initialize();
    if !capabilities.is_complete() {
        warn!("Running with degraded sensing: {:?}", capabilities);
    }
    app.orchestrator_mut().start();

    let tick_ms = (1000.0 / config.sensor.frequency).round().max(1.0) as u64;
    let mut now_ms = 0;
    let mut events = 0;
    while now_ms <= duration_ms + tick_ms {
        events += app.tick(now_ms);
        now_ms += tick_ms;
    }

    let view = app.orchestrator().view();
    info!(
        "Replayed {} events: {} steps detected (walked {}), last beacon {} at {} dBm",
        events,
        view.readout(Readout::StepCount).unwrap_or("0"),
        walked,
        view.readout(Readout::LastDevice).unwrap_or("-"),
        view.readout(Readout::Rssi).unwrap_or("-")
    );

    let Some(estimator) = app.orchestrator().estimator() else {
        warn!("No estimator active, nothing to render");
        return Ok(());
    };
    for user in estimator.users() {
        info!(
            "Agent {}: {} poses, {:.1} m estimated",
            user.id,
            user.trace.len(),
            user.trace.path_length()
        );
    }

    let render = &config.render;
    let surface =
        SvgSurface::with_pixel_ratio(render.width, render.height, render.device_pixel_ratio);
    let mut surfaces = SurfaceRegistry::new().with(MAP_SURFACE, surface);
    let mut renderer = Renderer::bind_with(&mut surfaces, MAP_SURFACE, ScaledTransform::default())?;
    renderer.optimize_for_retina();

    let stats = draw_scene(&mut renderer, estimator, &SceneStyle::from(render));
    info!(
        "Rendered {} traces and {} landmarks at {:.1} px/m",
        stats.traces,
        stats.landmarks,
        stats.scale.unwrap_or(1.0)
    );

    renderer.surface().write_to(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_writes_map() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("walk.svg");
        let config = SlacConfig::default();

        run(&config, Some(6), &output).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<path d=\"M "));
        assert!(svg.contains(">entrance</text>"));
    }
}
