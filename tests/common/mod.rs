//! Shared fixtures for integration tests.

#![allow(dead_code)]

use slac::estimator::DeadReckoningFactory;
use slac::orchestrator::ViewState;
use slac::sensors::{ReplayMotionSource, ReplayRadioSource};
use slac::sim::{RecordedSession, synthesize_walk};
use slac::{App, Orchestrator, SlacConfig};

/// App wired to replay sources and an in-memory view
pub type ReplayApp = App<ReplayMotionSource, ReplayRadioSource, ViewState>;

/// Defaults with every noise source switched off
pub fn quiet_config() -> SlacConfig {
    let mut config = SlacConfig::default();
    config.simulation.accel_noise = 0.0;
    config.simulation.heading_noise = 0.0;
    config.simulation.rssi_noise = 0.0;
    config.simulation.advert_loss = 0.0;
    config
}

/// Synthesize a walk and wire it into an app
pub fn replay_app(config: &SlacConfig, steps: Option<usize>) -> (ReplayApp, RecordedSession) {
    let session = synthesize_walk(config, steps);
    let orchestrator = Orchestrator::new(
        Box::new(DeadReckoningFactory::default()),
        config.estimator_params(),
        ViewState::new(),
    );
    let app = App::new(
        orchestrator,
        ReplayMotionSource::new(session.motion.clone()),
        ReplayRadioSource::new(config.ble.frequency, session.adverts.clone()),
    );
    (app, session)
}

/// Tick the app every 20 ms through `until_ms`; returns events dispatched
pub fn run_until(app: &mut ReplayApp, from_ms: u64, until_ms: u64) -> usize {
    let mut events = 0;
    let mut now = from_ms;
    while now <= until_ms {
        events += app.tick(now);
        now += 20;
    }
    events
}
