//! Application context wiring sensor sources, the orchestrator and the view.
//!
//! Sources never call the orchestrator directly. Their handlers push
//! [`AppEvent`]s into a channel owned by the [`App`], and [`App::pump`]
//! dispatches them one at a time, so every handler runs to completion before
//! the next event is looked at.
//!
//! ```text
//! MotionSource ──┐
//!                ├──► channel ──► pump ──► Orchestrator ──► ViewBindings
//! RadioSource ───┤                              │
//! View controls ─┘                              ▼
//!                                           Estimator
//! ```

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{info, trace, warn};

use crate::core::{Capabilities, MotionObservation, ProximityObservation};
use crate::orchestrator::{ControlAction, Indicator, Orchestrator, ViewBindings};
use crate::sensors::{MotionSource, RadioSource};

/// Events queued for the orchestrator
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// Motion sample from the motion source
    Motion(MotionObservation),
    /// Advertisement from the radio source
    Proximity(ProximityObservation),
    /// Control activated in the view
    Control(ControlAction),
}

/// Top-level context: owns the sources, the orchestrator and the event queue.
pub struct App<M: MotionSource, R: RadioSource, V: ViewBindings> {
    orchestrator: Orchestrator<V>,
    motion: M,
    radio: R,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
    capabilities: Option<Capabilities>,
}

impl<M: MotionSource, R: RadioSource, V: ViewBindings> App<M, R, V> {
    /// Wire an orchestrator to its sources. Nothing is subscribed until
    /// [`initialize`](Self::initialize).
    pub fn new(orchestrator: Orchestrator<V>, motion: M, radio: R) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            orchestrator,
            motion,
            radio,
            event_tx,
            event_rx,
            capabilities: None,
        }
    }

    /// Subscribe to both sources, start sensing, reflect capabilities into
    /// the view and bind its controls.
    ///
    /// Calling this twice subscribes twice: every observation is then
    /// delivered twice.
    pub fn initialize(&mut self) -> Capabilities {
        if self.capabilities.is_some() {
            warn!("[SLAC] initialize called again; sources will deliver duplicates");
        }

        let tx = self.event_tx.clone();
        self.motion.on_change(Box::new(move |obs| {
            if tx.send(AppEvent::Motion(obs)).is_err() {
                trace!("[SLAC] Event queue closed, motion sample dropped");
            }
        }));
        let motion = self.motion.start_listening();

        let radio = self.radio.init_radio();
        let tx = self.event_tx.clone();
        self.radio.on_observation(Box::new(move |obs| {
            if tx.send(AppEvent::Proximity(obs)).is_err() {
                trace!("[SLAC] Event queue closed, advertisement dropped");
            }
        }));

        let view = self.orchestrator.view_mut();
        view.set_indicator(Indicator::Accelerometer, motion.accelerometer);
        view.set_indicator(Indicator::Compass, motion.compass);
        view.set_indicator(Indicator::Radio, radio);

        let tx = self.event_tx.clone();
        view.bind_controls(Box::new(move |action| {
            if tx.send(AppEvent::Control(action)).is_err() {
                trace!("[SLAC] Event queue closed, {:?} dropped", action);
            }
        }));

        let capabilities = Capabilities { motion, radio };
        if capabilities.is_complete() {
            info!("[SLAC] Initialized: accelerometer, compass and radio up");
        } else {
            warn!(
                "[SLAC] Initialized degraded: accelerometer={} compass={} radio={}",
                motion.accelerometer, motion.compass, radio
            );
        }
        self.capabilities = Some(capabilities);
        capabilities
    }

    /// Let both sources deliver what is due at `now_ms`, then dispatch.
    ///
    /// Returns the number of events dispatched.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.motion.poll(now_ms);
        self.radio.poll(now_ms);
        self.pump()
    }

    /// Dispatch every queued event in arrival order.
    ///
    /// Returns the number of events dispatched.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    processed += 1;
                }
                Err(TryRecvError::Empty) => break,
                // Unreachable while self holds a sender
                Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    /// Dispatch one event immediately, bypassing the queue
    pub fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::Motion(obs) => {
                self.orchestrator.on_motion(obs);
            }
            AppEvent::Proximity(obs) => {
                self.orchestrator.on_proximity(obs);
            }
            AppEvent::Control(action) => {
                self.orchestrator.dispatch(action);
            }
        }
    }

    /// Handle for queueing events from outside the app
    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Capabilities reported by the last `initialize`
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.capabilities
    }

    /// The orchestrator
    pub fn orchestrator(&self) -> &Orchestrator<V> {
        &self.orchestrator
    }

    /// Mutable access to the orchestrator
    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator<V> {
        &mut self.orchestrator
    }

    /// The motion source
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// The radio source
    pub fn radio(&self) -> &R {
        &self.radio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MotionCapabilities, Pose};
    use crate::estimator::{DeadReckoningFactory, EstimatorParams};
    use crate::orchestrator::{LifecycleState, Readout, ViewState};
    use crate::sensors::{ReplayMotionSource, ReplayRadioSource, Timed};

    fn params() -> EstimatorParams {
        EstimatorParams {
            particle_count: 20,
            initial_pose: Pose::identity(),
            beacons: Vec::new(),
            frequency: 50.0,
        }
    }

    fn app(
        motion: ReplayMotionSource,
        radio: ReplayRadioSource,
    ) -> App<ReplayMotionSource, ReplayRadioSource, ViewState> {
        let orchestrator = Orchestrator::new(
            Box::new(DeadReckoningFactory::default()),
            params(),
            ViewState::new(),
        );
        App::new(orchestrator, motion, radio)
    }

    fn samples(n: u64) -> Vec<Timed<MotionObservation>> {
        (0..n)
            .map(|i| Timed::new(i * 20, MotionObservation::new(0.0, 0.0, 9.81, 90.0)))
            .collect()
    }

    #[test]
    fn test_initialize_reflects_capabilities() {
        let motion = ReplayMotionSource::with_capabilities(
            Vec::new(),
            MotionCapabilities {
                accelerometer: true,
                compass: false,
            },
        );
        let mut app = app(motion, ReplayRadioSource::unavailable(2.0));
        let caps = app.initialize();

        assert!(!caps.is_complete());
        let view = app.orchestrator().view();
        assert!(view.indicator(Indicator::Accelerometer));
        assert!(!view.indicator(Indicator::Compass));
        assert!(!view.indicator(Indicator::Radio));
    }

    #[test]
    fn test_tick_dispatches_in_order() {
        let adverts = vec![Timed::new(0, ProximityObservation::new("AA:01", -55.0))];
        let mut app = app(
            ReplayMotionSource::new(samples(10)),
            ReplayRadioSource::new(2.0, adverts),
        );
        app.initialize();

        let processed = app.tick(100);
        assert_eq!(processed, 6 + 1);

        let view = app.orchestrator().view();
        assert_eq!(view.readout(Readout::Heading), Some("90.00"));
        assert_eq!(view.readout(Readout::LastDevice), Some("AA:01"));
        assert!(!app.orchestrator().is_active());
    }

    #[test]
    fn test_view_controls_route_through_queue() {
        let mut app = app(
            ReplayMotionSource::new(samples(5)),
            ReplayRadioSource::new(2.0, Vec::new()),
        );
        app.initialize();

        assert!(app.orchestrator_mut().view_mut().press(ControlAction::Start));
        // Queued, not yet applied
        assert_eq!(app.orchestrator().state(), LifecycleState::Idle);

        app.tick(1000);
        assert_eq!(app.orchestrator().state(), LifecycleState::Running);
        assert_eq!(
            app.orchestrator().view().readout(Readout::StepCount),
            Some("0")
        );
    }

    #[test]
    fn test_initialize_twice_duplicates_delivery() {
        let mut app = app(
            ReplayMotionSource::new(samples(3)),
            ReplayRadioSource::new(2.0, Vec::new()),
        );
        app.initialize();
        app.initialize();

        assert_eq!(app.tick(1000), 6);
    }

    #[test]
    fn test_external_sender() {
        let mut app = app(
            ReplayMotionSource::new(Vec::new()),
            ReplayRadioSource::new(2.0, Vec::new()),
        );
        let tx = app.sender();
        tx.send(AppEvent::Control(ControlAction::Start)).unwrap();
        tx.send(AppEvent::Control(ControlAction::Pause)).unwrap();

        assert_eq!(app.pump(), 2);
        assert_eq!(app.orchestrator().state(), LifecycleState::Paused);
    }
}
