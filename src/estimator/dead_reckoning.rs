//! Pedometer + compass dead reckoning.

use std::collections::HashMap;

use log::{debug, trace};

use crate::core::{
    DeviceObservation, Landmark, MotionObservation, Pose, Trace, bearing_to_theta,
};

use super::pedometer::{Pedometer, PedometerConfig};
use super::{Estimator, EstimatorParams, User};

/// Strongest sighting of a beacon without a configured position
#[derive(Clone, Debug)]
struct Sighting {
    rssi: f64,
    x: f64,
    y: f64,
}

/// Dead-reckoning estimator.
///
/// Advances a single agent by one step length along the latest compass
/// heading every time the pedometer fires. Beacons listed in the params
/// keep their configured position. Unknown beacons are placed where the
/// agent stood when their strongest advertisement was heard.
pub struct DeadReckoning {
    particle_count: usize,
    pedometer: Pedometer,
    users: Vec<User>,
    known: Vec<Landmark>,
    known_uids: Vec<String>,
    sightings: HashMap<String, Sighting>,
    heading: f64,
    paused: bool,
}

impl DeadReckoning {
    /// Create an estimator from construction params
    pub fn new(params: &EstimatorParams, pedometer: PedometerConfig) -> Self {
        debug!(
            "[SLAC] DeadReckoning: {} particles, start ({:.2}, {:.2}), {} beacons, {:.0} Hz",
            params.particle_count,
            params.initial_pose.x,
            params.initial_pose.y,
            params.beacons.len(),
            params.frequency
        );

        Self {
            particle_count: params.particle_count,
            pedometer: Pedometer::new(pedometer, params.frequency),
            users: vec![User {
                id: 0,
                trace: Trace::starting_at(params.initial_pose),
            }],
            known: params.beacons.iter().map(|b| b.landmark()).collect(),
            known_uids: params.beacons.iter().map(|b| b.uid.clone()).collect(),
            sightings: HashMap::new(),
            heading: params.initial_pose.theta,
            paused: false,
        }
    }

    /// Configured particle count
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Whether observations are currently ignored
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_pose(&self) -> Pose {
        self.users[0].trace.last().copied().unwrap_or_default()
    }
}

impl Estimator for DeadReckoning {
    fn add_motion_observation(&mut self, x: f64, y: f64, z: f64, heading: f64) {
        if self.paused {
            return;
        }

        self.heading = bearing_to_theta(heading);
        let magnitude = MotionObservation::new(x, y, z, heading).magnitude();
        if self.pedometer.update(magnitude) {
            let pose = self
                .current_pose()
                .advance(self.pedometer.step_length(), self.heading);
            trace!(
                "[SLAC] Step {} -> ({:.2}, {:.2})",
                self.pedometer.step_count(),
                pose.x,
                pose.y
            );
            self.users[0].trace.push(pose);
        }
    }

    fn add_device_observation(&mut self, observation: DeviceObservation) {
        if self.paused || self.known_uids.contains(&observation.uid) {
            return;
        }

        let pose = self.current_pose();
        let stronger = self
            .sightings
            .get(&observation.uid)
            .is_none_or(|s| observation.rssi > s.rssi);
        if stronger {
            self.sightings.insert(
                observation.uid,
                Sighting {
                    rssi: observation.rssi,
                    x: pose.x,
                    y: pose.y,
                },
            );
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn step_count(&self) -> u64 {
        self.pedometer.step_count()
    }

    fn users(&self) -> &[User] {
        &self.users
    }

    fn landmarks(&self) -> Vec<Landmark> {
        let mut landmarks = self.known.clone();
        let mut unknown: Vec<_> = self.sightings.iter().collect();
        unknown.sort_by(|a, b| a.0.cmp(b.0));
        landmarks.extend(
            unknown
                .into_iter()
                .map(|(uid, s)| Landmark::named(s.x, s.y, uid.clone())),
        );
        landmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Beacon;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn params() -> EstimatorParams {
        EstimatorParams {
            particle_count: 10,
            initial_pose: Pose::identity(),
            beacons: vec![Beacon {
                uid: "AA:01".to_string(),
                name: Some("door".to_string()),
                x: 5.0,
                y: 0.0,
            }],
            frequency: 50.0,
        }
    }

    fn walk(estimator: &mut DeadReckoning, bearing: f64, seconds: f64) {
        let n = (50.0 * seconds) as usize;
        for i in 0..n {
            let t = i as f64 / 50.0;
            let z = 9.81 + 2.5 * (TAU * 2.0 * t).sin();
            estimator.add_motion_observation(0.0, 0.0, z, bearing);
        }
    }

    #[test]
    fn test_walking_east_extends_trace_along_x() {
        let mut estimator = DeadReckoning::new(&params(), PedometerConfig::default());
        walk(&mut estimator, 90.0, 3.0);

        let steps = estimator.step_count();
        assert!(steps >= 5);

        let trace = &estimator.users()[0].trace;
        assert_eq!(trace.len() as u64, steps + 1);
        let last = trace.last().copied().unwrap();
        assert_relative_eq!(last.x, steps as f64 * 0.7, epsilon = 1e-6);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_paused_ignores_motion() {
        let mut estimator = DeadReckoning::new(&params(), PedometerConfig::default());
        estimator.pause();
        walk(&mut estimator, 0.0, 2.0);
        assert_eq!(estimator.step_count(), 0);
        assert!(estimator.is_paused());

        estimator.resume();
        walk(&mut estimator, 0.0, 2.0);
        assert!(estimator.step_count() > 0);
    }

    #[test]
    fn test_landmarks_include_known_and_sighted() {
        let mut estimator = DeadReckoning::new(&params(), PedometerConfig::default());
        estimator.add_device_observation(DeviceObservation {
            uid: "AA:01".to_string(),
            rssi: -40.0,
        });
        estimator.add_device_observation(DeviceObservation {
            uid: "BB:02".to_string(),
            rssi: -70.0,
        });

        let landmarks = estimator.landmarks();
        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks[0].name.as_deref(), Some("door"));
        assert_eq!(landmarks[1].name.as_deref(), Some("BB:02"));
    }

    #[test]
    fn test_unknown_beacon_keeps_strongest_sighting() {
        let mut estimator = DeadReckoning::new(&params(), PedometerConfig::default());
        estimator.add_device_observation(DeviceObservation {
            uid: "BB:02".to_string(),
            rssi: -60.0,
        });
        walk(&mut estimator, 90.0, 2.0);
        estimator.add_device_observation(DeviceObservation {
            uid: "BB:02".to_string(),
            rssi: -80.0,
        });

        let landmark = estimator.landmarks().pop().unwrap();
        assert_eq!(landmark.x, 0.0);
    }
}
