//! Estimator contract consumed by the orchestrator and the renderer.
//!
//! The statistical localization algorithm lives behind [`Estimator`]. The
//! orchestrator only constructs it (through an [`EstimatorFactory`]),
//! forwards observations into it, and drops it on reset. The renderer reads
//! its users' traces and its landmarks.
//!
//! [`DeadReckoning`] is a deterministic stand-in (pedometer + compass) that
//! satisfies the contract so a session can run end to end.

mod dead_reckoning;
mod pedometer;

pub use dead_reckoning::DeadReckoning;
pub use pedometer::{Pedometer, PedometerConfig};

use crate::core::{Beacon, DeviceObservation, Landmark, Pose, Trace};

/// Parameters for constructing a fresh estimator
#[derive(Clone, Debug)]
pub struct EstimatorParams {
    /// Number of particles/agents
    pub particle_count: usize,
    /// Pose every agent starts from
    pub initial_pose: Pose,
    /// Beacons with known positions
    pub beacons: Vec<Beacon>,
    /// Motion sampling frequency (Hz)
    pub frequency: f64,
}

/// One tracked agent and its estimated trajectory
#[derive(Clone, Debug, Default)]
pub struct User {
    /// Agent index
    pub id: usize,
    /// Estimated poses, oldest first
    pub trace: Trace,
}

/// Pose and landmark estimator.
///
/// Implementations own their traces and landmark set. All calls arrive on
/// the orchestrator's thread, one at a time.
pub trait Estimator {
    /// Feed one motion sample (accelerometer axes in m/s², compass bearing
    /// in degrees).
    fn add_motion_observation(&mut self, x: f64, y: f64, z: f64, heading: f64);

    /// Feed one beacon advertisement.
    fn add_device_observation(&mut self, observation: DeviceObservation);

    /// Stop integrating observations until resumed.
    fn pause(&mut self);

    /// Continue integrating observations.
    fn resume(&mut self) {}

    /// Steps detected since construction
    fn step_count(&self) -> u64;

    /// Tracked agents
    fn users(&self) -> &[User];

    /// Current landmark set
    fn landmarks(&self) -> Vec<Landmark>;
}

/// Builds estimators for the orchestrator.
///
/// Any `Fn(&EstimatorParams) -> Box<dyn Estimator>` closure is a factory.
pub trait EstimatorFactory {
    /// Construct a fresh estimator
    fn create(&self, params: &EstimatorParams) -> Box<dyn Estimator>;
}

impl<F> EstimatorFactory for F
where
    F: Fn(&EstimatorParams) -> Box<dyn Estimator>,
{
    fn create(&self, params: &EstimatorParams) -> Box<dyn Estimator> {
        self(params)
    }
}

/// Factory producing [`DeadReckoning`] estimators
#[derive(Clone, Debug, Default)]
pub struct DeadReckoningFactory {
    /// Step detection settings for every estimator built
    pub pedometer: PedometerConfig,
}

impl EstimatorFactory for DeadReckoningFactory {
    fn create(&self, params: &EstimatorParams) -> Box<dyn Estimator> {
        Box::new(DeadReckoning::new(params, self.pedometer.clone()))
    }
}
