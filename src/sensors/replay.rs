//! Sources that replay pre-recorded, timestamped observations.
//!
//! Both sources are poll-driven: `poll(now_ms)` hands every observation due
//! by `now_ms` to the registered handlers, oldest first. A source whose
//! capability is unavailable accepts handlers but never calls them.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::core::{MotionCapabilities, MotionObservation, ProximityObservation};

use super::{MotionHandler, MotionSource, RadioHandler, RadioSource};

/// A value stamped with its production time
#[derive(Clone, Debug, PartialEq)]
pub struct Timed<T> {
    /// Milliseconds since session start
    pub at_ms: u64,
    /// Payload
    pub value: T,
}

impl<T> Timed<T> {
    /// Stamp a value
    pub fn new(at_ms: u64, value: T) -> Self {
        Self { at_ms, value }
    }
}

/// Replays motion samples.
pub struct ReplayMotionSource {
    pending: VecDeque<Timed<MotionObservation>>,
    capabilities: MotionCapabilities,
    handlers: Vec<MotionHandler>,
    listening: bool,
}

impl ReplayMotionSource {
    /// Replay `samples` with every motion subsystem available.
    ///
    /// Samples are sorted by time; equal timestamps keep their order.
    pub fn new(samples: Vec<Timed<MotionObservation>>) -> Self {
        Self::with_capabilities(samples, MotionCapabilities::ALL)
    }

    /// Replay `samples` reporting the given capabilities.
    pub fn with_capabilities(
        mut samples: Vec<Timed<MotionObservation>>,
        capabilities: MotionCapabilities,
    ) -> Self {
        samples.sort_by_key(|s| s.at_ms);
        Self {
            pending: samples.into(),
            capabilities,
            handlers: Vec::new(),
            listening: false,
        }
    }

    /// Samples not yet delivered
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl MotionSource for ReplayMotionSource {
    fn start_listening(&mut self) -> MotionCapabilities {
        self.listening = self.capabilities.any();
        if !self.listening {
            warn!("[SLAC] Motion replay: no motion subsystem available");
        }
        self.capabilities
    }

    fn on_change(&mut self, handler: MotionHandler) {
        self.handlers.push(handler);
    }

    fn poll(&mut self, now_ms: u64) {
        if !self.listening {
            return;
        }

        while self.pending.front().is_some_and(|s| s.at_ms <= now_ms) {
            let Some(sample) = self.pending.pop_front() else {
                break;
            };
            for handler in &mut self.handlers {
                handler(sample.value);
            }
        }
    }
}

/// Replays radio advertisements in scan batches.
///
/// The radio scans at a fixed frequency; advertisements produced between
/// two scans are detected, in order, at the next scan.
pub struct ReplayRadioSource {
    pending: VecDeque<Timed<ProximityObservation>>,
    scan_interval_ms: u64,
    next_scan_ms: u64,
    available: bool,
    handlers: Vec<RadioHandler>,
    scanning: bool,
}

impl ReplayRadioSource {
    /// Replay `advertisements`, scanning at `frequency` Hz.
    pub fn new(frequency: f64, mut advertisements: Vec<Timed<ProximityObservation>>) -> Self {
        advertisements.sort_by_key(|a| a.at_ms);
        let scan_interval_ms = (1000.0 / frequency.max(0.001)).round().max(1.0) as u64;
        Self {
            pending: advertisements.into(),
            scan_interval_ms,
            next_scan_ms: 0,
            available: true,
            handlers: Vec::new(),
            scanning: false,
        }
    }

    /// A radio that fails to initialize
    pub fn unavailable(frequency: f64) -> Self {
        let mut source = Self::new(frequency, Vec::new());
        source.available = false;
        source
    }

    /// Time between scans (ms)
    pub fn scan_interval_ms(&self) -> u64 {
        self.scan_interval_ms
    }

    /// Advertisements not yet delivered
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl RadioSource for ReplayRadioSource {
    fn init_radio(&mut self) -> bool {
        self.scanning = self.available;
        if self.scanning {
            debug!(
                "[SLAC] Radio replay: scanning every {} ms",
                self.scan_interval_ms
            );
        } else {
            warn!("[SLAC] Radio replay: radio unavailable");
        }
        self.scanning
    }

    fn on_observation(&mut self, handler: RadioHandler) {
        self.handlers.push(handler);
    }

    fn poll(&mut self, now_ms: u64) {
        if !self.scanning {
            return;
        }

        while self.next_scan_ms <= now_ms {
            let scan_at = self.next_scan_ms;
            self.next_scan_ms += self.scan_interval_ms;

            while self.pending.front().is_some_and(|a| a.at_ms <= scan_at) {
                let Some(advert) = self.pending.pop_front() else {
                    break;
                };
                for handler in &mut self.handlers {
                    handler(advert.value.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn motion(at_ms: u64, heading: f64) -> Timed<MotionObservation> {
        Timed::new(at_ms, MotionObservation::new(0.0, 0.0, 9.81, heading))
    }

    #[test]
    fn test_motion_delivers_due_samples_in_order() {
        let mut source =
            ReplayMotionSource::new(vec![motion(20, 2.0), motion(0, 0.0), motion(10, 1.0)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        source.on_change(Box::new(move |obs| sink.borrow_mut().push(obs.heading)));

        assert!(source.start_listening().accelerometer);
        source.poll(10);
        assert_eq!(*seen.borrow(), vec![0.0, 1.0]);
        assert_eq!(source.remaining(), 1);

        source.poll(100);
        assert_eq!(*seen.borrow(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_motion_without_capabilities_never_fires() {
        let mut source = ReplayMotionSource::with_capabilities(
            vec![motion(0, 0.0)],
            MotionCapabilities::default(),
        );
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        source.on_change(Box::new(move |_| *sink.borrow_mut() += 1));

        assert!(!source.start_listening().any());
        source.poll(1000);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_radio_batches_by_scan() {
        let adverts = vec![
            Timed::new(100, ProximityObservation::new("A", -50.0)),
            Timed::new(400, ProximityObservation::new("B", -60.0)),
            Timed::new(600, ProximityObservation::new("C", -70.0)),
        ];
        let mut source = ReplayRadioSource::new(2.0, adverts);
        assert_eq!(source.scan_interval_ms(), 500);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        source.on_observation(Box::new(move |obs| sink.borrow_mut().push(obs.device_id)));
        assert!(source.init_radio());

        // Scan at 0 ms sees nothing yet
        source.poll(499);
        assert!(seen.borrow().is_empty());

        // Scan at 500 ms picks up A and B
        source.poll(500);
        assert_eq!(*seen.borrow(), vec!["A".to_string(), "B".to_string()]);

        source.poll(1000);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_unavailable_radio() {
        let mut source = ReplayRadioSource::unavailable(1.0);
        assert!(!source.init_radio());
        source.poll(10_000);
        assert_eq!(source.remaining(), 0);
    }
}
