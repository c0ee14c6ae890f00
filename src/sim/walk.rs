//! Synthetic rectangular walk with beacon advertisements.
//!
//! The walker starts at the configured initial pose and walks the rectangle
//! east, north, west, then south, `laps` times. Motion samples carry a
//! vertical acceleration bump per step and the leg's compass bearing.
//! Every beacon advertises once per scan interval; readings pass through
//! [`SensorModel`].

use std::f64::consts::TAU;

use log::debug;

use crate::config::SlacConfig;
use crate::core::{MotionObservation, Pose, ProximityObservation, bearing_to_theta};
use crate::sensors::Timed;

use super::sensor_model::SensorModel;

const GRAVITY: f64 = 9.81;

/// Peak vertical acceleration above gravity per step (m/s²)
const STEP_AMPLITUDE: f64 = 2.5;

/// A synthesized session ready for replay
#[derive(Clone, Debug, Default)]
pub struct RecordedSession {
    /// Motion samples at sensor frequency
    pub motion: Vec<Timed<MotionObservation>>,
    /// Beacon advertisements, oldest first
    pub adverts: Vec<Timed<ProximityObservation>>,
    /// True position after every step, starting pose first
    pub ground_truth: Vec<Pose>,
    /// Time of the last sample (ms)
    pub duration_ms: u64,
}

impl RecordedSession {
    /// Steps walked
    pub fn steps(&self) -> usize {
        self.ground_truth.len().saturating_sub(1)
    }
}

/// Compass bearings (degrees) of every step, leg by leg
fn step_bearings(config: &SlacConfig) -> Vec<f64> {
    let sim = &config.simulation;
    let legs = [
        (90.0, sim.room_width),
        (0.0, sim.room_height),
        (270.0, sim.room_width),
        (180.0, sim.room_height),
    ];

    let mut bearings = Vec::new();
    for _ in 0..sim.laps {
        for &(bearing, length) in &legs {
            let steps = (length / sim.step_length).round().max(1.0) as usize;
            bearings.extend(std::iter::repeat_n(bearing, steps));
        }
    }
    bearings
}

/// Synthesize a walk from `config`, optionally capped at `max_steps`.
pub fn synthesize_walk(config: &SlacConfig, max_steps: Option<usize>) -> RecordedSession {
    let sim = &config.simulation;
    let mut model = SensorModel::new(sim);

    let mut bearings = step_bearings(config);
    if let Some(max) = max_steps {
        bearings.truncate(max);
    }
    if bearings.is_empty() {
        return RecordedSession {
            ground_truth: vec![config.particles.default_pose],
            ..RecordedSession::default()
        };
    }

    let mut ground_truth = Vec::with_capacity(bearings.len() + 1);
    ground_truth.push(config.particles.default_pose);
    for &bearing in &bearings {
        let theta = bearing_to_theta(bearing);
        let last = ground_truth[ground_truth.len() - 1];
        ground_truth.push(last.advance(sim.step_length, theta));
    }

    let cadence = sim.step_frequency;
    let duration_s = bearings.len() as f64 / cadence;

    let rate = config.sensor.frequency;
    // Tolerate rounding in duration so the final sample lands on the end
    let samples = (duration_s * rate + 1e-6).floor() as usize + 1;
    let mut motion = Vec::with_capacity(samples);
    for i in 0..samples {
        let t = i as f64 / rate;
        let step = ((t * cadence) as usize).min(bearings.len() - 1);
        let z = GRAVITY + STEP_AMPLITUDE * (TAU * cadence * t).sin();
        let heading = model.heading(bearings[step]);
        let (x, y) = (model.accel(0.0), model.accel(0.0));
        let obs = MotionObservation::new(x, y, model.accel(z), heading);
        motion.push(Timed::new(to_ms(t), obs));
    }

    let interval = 1.0 / config.ble.frequency;
    let mut adverts = Vec::new();
    let mut dropped = 0;
    let mut t = 0.0;
    while t <= duration_s {
        let position = position_at(&ground_truth, t * cadence);
        for (i, beacon) in config.beacons.iter().enumerate() {
            if model.advert_lost() {
                dropped += 1;
                continue;
            }
            let rssi = model.rssi((beacon.x - position.x).hypot(beacon.y - position.y));
            // Stagger beacons so arrival order is stable
            let at_ms = to_ms(t) + i as u64;
            adverts.push(Timed::new(at_ms, ProximityObservation::new(&beacon.uid, rssi)));
        }
        t += interval;
    }

    let duration_ms = motion.last().map_or(0, |s| s.at_ms);
    debug!(
        "[SLAC] Synthesized {} steps: {} motion samples, {} adverts ({} dropped) over {} ms",
        bearings.len(),
        motion.len(),
        adverts.len(),
        dropped,
        duration_ms
    );

    RecordedSession {
        motion,
        adverts,
        ground_truth,
        duration_ms,
    }
}

/// Interpolated position after walking `progress` steps
fn position_at(waypoints: &[Pose], progress: f64) -> Pose {
    let last = waypoints.len() - 1;
    let index = (progress.floor() as usize).min(last);
    if index == last {
        return waypoints[last];
    }
    let frac = progress - index as f64;
    let (a, b) = (waypoints[index], waypoints[index + 1]);
    Pose::new(a.x + (b.x - a.x) * frac, a.y + (b.y - a.y) * frac, b.theta)
}

fn to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quiet_config() -> SlacConfig {
        let mut config = SlacConfig::default();
        config.simulation.accel_noise = 0.0;
        config.simulation.heading_noise = 0.0;
        config.simulation.rssi_noise = 0.0;
        config.simulation.advert_loss = 0.0;
        config
    }

    #[test]
    fn test_rectangle_closes() {
        let session = synthesize_walk(&quiet_config(), None);
        let start = session.ground_truth[0];
        let end = session.ground_truth[session.steps()];

        // 8 m / 0.7 m and 4 m / 0.7 m round to 11 and 6 steps per leg
        assert_eq!(session.steps(), 2 * (11 + 6));
        assert_relative_eq!(start.x, end.x, epsilon = 1e-9);
        assert_relative_eq!(start.y, end.y, epsilon = 1e-9);
    }

    #[test]
    fn test_step_cap() {
        let session = synthesize_walk(&quiet_config(), Some(5));
        assert_eq!(session.steps(), 5);
        let last = session.ground_truth[5];
        assert_relative_eq!(last.x, 5.0 * 0.7, epsilon = 1e-9);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_motion_samples_follow_sensor_rate() {
        let session = synthesize_walk(&quiet_config(), Some(9));
        // 9 steps at 1.8 Hz = 5 s at 50 Hz
        assert_eq!(session.motion.len(), 251);
        assert_eq!(session.motion[1].at_ms, 20);
        assert_eq!(session.duration_ms, 5000);
        assert!(session.motion.iter().all(|s| s.value.heading == 90.0));
    }

    #[test]
    fn test_rssi_falls_with_distance() {
        let config = quiet_config();
        let session = synthesize_walk(&config, Some(11));

        // Entrance beacon sits behind the start; the walk heads away from it
        let entrance = &config.beacons[0].uid;
        let readings: Vec<f64> = session
            .adverts
            .iter()
            .filter(|a| &a.value.device_id == entrance)
            .map(|a| a.value.rssi)
            .collect();
        assert!(readings.len() > 2);
        assert!(readings.first() > readings.last());
    }

    #[test]
    fn test_advert_loss_drops_everything() {
        let mut config = quiet_config();
        config.simulation.advert_loss = 1.0;
        let session = synthesize_walk(&config, Some(4));
        assert!(session.adverts.is_empty());
        assert!(!session.motion.is_empty());
    }

    #[test]
    fn test_zero_steps() {
        let session = synthesize_walk(&quiet_config(), Some(0));
        assert_eq!(session.steps(), 0);
        assert!(session.motion.is_empty());
    }
}
