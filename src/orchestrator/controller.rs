//! Estimator lifecycle controller.
//!
//! # State Machine
//!
//! ```text
//!            start
//!   IDLE ─────────────► RUNNING ◄──────┐
//!    ▲                   │   ▲         │ start
//!    │ reset      pause  │   │ resume  │ (reset + start)
//!    │                   ▼   │         │
//!    └──────────────── PAUSED ─────────┘
//! ```
//!
//! Reset is accepted from every state. Pause and resume outside their
//! source state are ignored.

use log::{debug, info, trace};

use crate::core::{DeviceObservation, MotionObservation, ProximityObservation};
use crate::estimator::{Estimator, EstimatorFactory, EstimatorParams};

use super::state::{ControlAction, ControlOutcome, LifecycleState};
use super::view::{Readout, ViewBindings};

/// Owns the active estimator and routes observations into it.
///
/// At most one estimator exists at a time. Observations always update the
/// view; they reach the estimator only while one exists.
pub struct Orchestrator<V: ViewBindings> {
    state: LifecycleState,
    estimator: Option<Box<dyn Estimator>>,
    factory: Box<dyn EstimatorFactory>,
    params: EstimatorParams,
    view: V,
    generation: u64,
}

impl<V: ViewBindings> Orchestrator<V> {
    /// Create an idle orchestrator and sync the view's controls to Idle.
    pub fn new(factory: Box<dyn EstimatorFactory>, params: EstimatorParams, view: V) -> Self {
        let mut orchestrator = Self {
            state: LifecycleState::Idle,
            estimator: None,
            factory,
            params,
            view,
            generation: 0,
        };
        orchestrator.sync_controls();
        orchestrator
    }

    /// Construct a fresh estimator, resetting any existing one first.
    pub fn start(&mut self) {
        if self.estimator.is_some() {
            self.reset();
        }

        info!(
            "[SLAC] Starting ({} particles, {} beacons)",
            self.params.particle_count,
            self.params.beacons.len()
        );
        self.estimator = Some(self.factory.create(&self.params));
        self.generation += 1;
        self.transition(LifecycleState::Running);
    }

    /// Drop the estimator. Safe when idle.
    pub fn reset(&mut self) {
        if let Some(estimator) = self.estimator.take() {
            info!("[SLAC] Resetting after {} steps", estimator.step_count());
            drop(estimator);
        } else {
            debug!("[SLAC] Reset while idle");
        }
        self.transition(LifecycleState::Idle);
    }

    /// Pause the running estimator.
    pub fn pause(&mut self) -> ControlOutcome {
        if self.state != LifecycleState::Running {
            debug!("[SLAC] Pause ignored in {}", self.state.name());
            return ControlOutcome::Ignored;
        }
        if let Some(estimator) = self.estimator.as_mut() {
            estimator.pause();
        }
        info!("[SLAC] Paused");
        self.transition(LifecycleState::Paused);
        ControlOutcome::Applied
    }

    /// Resume a paused estimator.
    pub fn resume(&mut self) -> ControlOutcome {
        if self.state != LifecycleState::Paused {
            debug!("[SLAC] Resume ignored in {}", self.state.name());
            return ControlOutcome::Ignored;
        }
        if let Some(estimator) = self.estimator.as_mut() {
            estimator.resume();
        }
        info!("[SLAC] Resumed");
        self.transition(LifecycleState::Running);
        ControlOutcome::Applied
    }

    /// Apply a control action
    pub fn dispatch(&mut self, action: ControlAction) -> ControlOutcome {
        match action {
            ControlAction::Start => {
                self.start();
                ControlOutcome::Applied
            }
            ControlAction::Reset => {
                self.reset();
                ControlOutcome::Applied
            }
            ControlAction::Pause => self.pause(),
            ControlAction::Resume => self.resume(),
        }
    }

    /// Handle one motion sample.
    ///
    /// Returns true if it was forwarded to an estimator.
    pub fn on_motion(&mut self, obs: MotionObservation) -> bool {
        self.view.set_readout(Readout::AccelX, &format!("{:.2}", obs.x));
        self.view.set_readout(Readout::AccelY, &format!("{:.2}", obs.y));
        self.view.set_readout(Readout::AccelZ, &format!("{:.2}", obs.z));
        self.view.set_readout(Readout::Heading, &format!("{:.2}", obs.heading));

        let Some(estimator) = self.estimator.as_mut() else {
            trace!("[SLAC] Motion while idle");
            return false;
        };
        estimator.add_motion_observation(obs.x, obs.y, obs.z, obs.heading);
        let steps = estimator.step_count();
        self.view.set_readout(Readout::StepCount, &steps.to_string());
        true
    }

    /// Handle one beacon advertisement.
    ///
    /// Returns true if it was forwarded to an estimator.
    pub fn on_proximity(&mut self, obs: ProximityObservation) -> bool {
        self.view.set_readout(Readout::LastDevice, &obs.device_id);
        self.view.set_readout(Readout::Rssi, &obs.rssi.to_string());

        let Some(estimator) = self.estimator.as_mut() else {
            trace!("[SLAC] Advertisement from {} while idle", obs.device_id);
            return false;
        };
        estimator.add_device_observation(DeviceObservation::from(obs));
        true
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether an estimator exists
    pub fn is_active(&self) -> bool {
        self.estimator.is_some()
    }

    /// The active estimator
    pub fn estimator(&self) -> Option<&dyn Estimator> {
        self.estimator.as_deref()
    }

    /// Number of estimators constructed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Construction parameters for new estimators
    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// The bound view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the bound view
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn transition(&mut self, next: LifecycleState) {
        if self.state != next {
            debug!("[SLAC] {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        self.sync_controls();
    }

    fn sync_controls(&mut self) {
        for action in ControlAction::ALL {
            self.view.set_control_enabled(action, action.enabled_in(self.state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Landmark, Pose};
    use crate::estimator::User;
    use crate::orchestrator::ViewState;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Probe {
        live: Cell<i32>,
        created: Cell<i32>,
        motions: Cell<u32>,
        devices: RefCell<Vec<String>>,
        paused: Cell<bool>,
    }

    struct ProbeEstimator {
        probe: Rc<Probe>,
        users: Vec<User>,
    }

    impl Drop for ProbeEstimator {
        fn drop(&mut self) {
            self.probe.live.set(self.probe.live.get() - 1);
        }
    }

    impl Estimator for ProbeEstimator {
        fn add_motion_observation(&mut self, _x: f64, _y: f64, _z: f64, _heading: f64) {
            self.probe.motions.set(self.probe.motions.get() + 1);
        }

        fn add_device_observation(&mut self, observation: DeviceObservation) {
            self.probe.devices.borrow_mut().push(observation.uid);
        }

        fn pause(&mut self) {
            self.probe.paused.set(true);
        }

        fn resume(&mut self) {
            self.probe.paused.set(false);
        }

        fn step_count(&self) -> u64 {
            u64::from(self.probe.motions.get())
        }

        fn users(&self) -> &[User] {
            &self.users
        }

        fn landmarks(&self) -> Vec<Landmark> {
            Vec::new()
        }
    }

    fn orchestrator() -> (Orchestrator<ViewState>, Rc<Probe>) {
        let probe = Rc::new(Probe::default());
        let shared = probe.clone();
        let factory = move |_: &EstimatorParams| -> Box<dyn Estimator> {
            assert_eq!(shared.live.get(), 0, "previous estimator still alive");
            shared.live.set(shared.live.get() + 1);
            shared.created.set(shared.created.get() + 1);
            Box::new(ProbeEstimator {
                probe: shared.clone(),
                users: Vec::new(),
            })
        };
        let params = EstimatorParams {
            particle_count: 20,
            initial_pose: Pose::identity(),
            beacons: Vec::new(),
            frequency: 50.0,
        };
        (
            Orchestrator::new(Box::new(factory), params, ViewState::new()),
            probe,
        )
    }

    #[test]
    fn test_start_keeps_single_estimator() {
        let (mut orch, probe) = orchestrator();
        orch.start();
        orch.start();
        orch.start();

        assert_eq!(probe.created.get(), 3);
        assert_eq!(probe.live.get(), 1);
        assert_eq!(orch.generation(), 3);
        assert_eq!(orch.state(), LifecycleState::Running);
    }

    #[test]
    fn test_controls_follow_state() {
        let (mut orch, _) = orchestrator();
        assert!(orch.view().control_enabled(ControlAction::Start));
        assert!(!orch.view().control_enabled(ControlAction::Reset));
        assert!(!orch.view().control_enabled(ControlAction::Pause));

        orch.start();
        assert!(!orch.view().control_enabled(ControlAction::Start));
        assert!(orch.view().control_enabled(ControlAction::Reset));
        assert!(orch.view().control_enabled(ControlAction::Pause));

        orch.reset();
        assert!(orch.view().control_enabled(ControlAction::Start));
        assert!(!orch.view().control_enabled(ControlAction::Reset));
        assert!(!orch.view().control_enabled(ControlAction::Pause));
    }

    #[test]
    fn test_reset_and_pause_tolerate_idle() {
        let (mut orch, probe) = orchestrator();
        orch.reset();
        assert_eq!(orch.pause(), ControlOutcome::Ignored);
        assert_eq!(orch.resume(), ControlOutcome::Ignored);
        assert!(!orch.on_motion(MotionObservation::new(0.0, 0.0, 9.81, 0.0)));
        assert!(!orch.on_proximity(ProximityObservation::new("AA", -50.0)));

        assert_eq!(orch.state(), LifecycleState::Idle);
        assert_eq!(probe.created.get(), 0);
    }

    #[test]
    fn test_idle_motion_updates_view_only() {
        let (mut orch, probe) = orchestrator();
        let before = orch.view().writes();

        for i in 0..10 {
            let forwarded = orch.on_motion(MotionObservation::new(0.1, 0.2, 9.8, i as f64));
            assert!(!forwarded);
        }

        assert!(orch.view().writes() > before);
        assert_eq!(orch.view().readout(Readout::Heading), Some("9.00"));
        assert_eq!(orch.view().readout(Readout::StepCount), None);
        assert!(!orch.is_active());
        assert_eq!(probe.motions.get(), 0);
    }

    #[test]
    fn test_forwarding_while_running() {
        let (mut orch, probe) = orchestrator();
        orch.start();

        assert!(orch.on_motion(MotionObservation::new(1.234, 0.0, 9.81, 45.0)));
        assert!(orch.on_proximity(ProximityObservation::new("D0:39", -62.5)));

        assert_eq!(probe.motions.get(), 1);
        assert_eq!(*probe.devices.borrow(), vec!["D0:39".to_string()]);
        assert_eq!(orch.view().readout(Readout::AccelX), Some("1.23"));
        assert_eq!(orch.view().readout(Readout::StepCount), Some("1"));
        assert_eq!(orch.view().readout(Readout::LastDevice), Some("D0:39"));
        assert_eq!(orch.view().readout(Readout::Rssi), Some("-62.5"));
    }

    #[test]
    fn test_pause_resume_cycle() {
        let (mut orch, probe) = orchestrator();
        orch.start();

        assert!(orch.dispatch(ControlAction::Pause).is_applied());
        assert!(probe.paused.get());
        assert_eq!(orch.state(), LifecycleState::Paused);
        assert_eq!(orch.pause(), ControlOutcome::Ignored);

        // Still forwarded; the estimator decides what to do with it
        assert!(orch.on_motion(MotionObservation::default()));

        assert!(orch.dispatch(ControlAction::Resume).is_applied());
        assert!(!probe.paused.get());
        assert_eq!(orch.state(), LifecycleState::Running);
    }

    #[test]
    fn test_start_from_paused_restarts() {
        let (mut orch, probe) = orchestrator();
        orch.start();
        orch.pause();
        orch.start();

        assert_eq!(orch.state(), LifecycleState::Running);
        assert_eq!(probe.live.get(), 1);
        assert_eq!(probe.created.get(), 2);
    }
}
