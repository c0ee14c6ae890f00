//! Sensor source traits.
//!
//! Implement these traits to connect the orchestrator to real hardware, a
//! simulator, or a recorded session. Sources push observations into the
//! handlers registered with them; they never call the orchestrator directly.
//!
//! # Example
//!
//! ```ignore
//! struct PhoneMotion {
//!     handlers: Vec<MotionHandler>,
//! }
//!
//! impl MotionSource for PhoneMotion {
//!     fn start_listening(&mut self) -> MotionCapabilities {
//!         MotionCapabilities { accelerometer: true, compass: self.has_magnetometer() }
//!     }
//!
//!     fn on_change(&mut self, handler: MotionHandler) {
//!         self.handlers.push(handler);
//!     }
//! }
//! ```

mod replay;

pub use replay::{ReplayMotionSource, ReplayRadioSource, Timed};

use crate::core::{MotionCapabilities, MotionObservation, ProximityObservation};

/// Callback receiving motion samples
pub type MotionHandler = Box<dyn FnMut(MotionObservation)>;

/// Callback receiving radio advertisements
pub type RadioHandler = Box<dyn FnMut(ProximityObservation)>;

/// Accelerometer + compass source.
pub trait MotionSource {
    /// Start sensing. Returns which subsystems came up; a subsystem that
    /// failed never delivers samples.
    fn start_listening(&mut self) -> MotionCapabilities;

    /// Register a handler for every sample, in production order.
    ///
    /// Registering twice delivers every sample twice.
    fn on_change(&mut self, handler: MotionHandler);

    /// Deliver samples due at `now_ms`.
    ///
    /// Push-driven sources can ignore this. Default does nothing.
    fn poll(&mut self, _now_ms: u64) {}
}

/// Beacon advertisement scanner.
pub trait RadioSource {
    /// Power up the radio. Returns false when scanning is unavailable; the
    /// source then never delivers advertisements.
    fn init_radio(&mut self) -> bool;

    /// Register a handler for every detected advertisement, in detection
    /// order.
    fn on_observation(&mut self, handler: RadioHandler);

    /// Deliver advertisements due at `now_ms`.
    ///
    /// Push-driven sources can ignore this. Default does nothing.
    fn poll(&mut self, _now_ms: u64) {}
}
