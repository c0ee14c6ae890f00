//! Walk simulation for headless sessions.
//!
//! [`synthesize_walk`] produces a [`RecordedSession`] whose motion samples
//! and advertisements feed [`ReplayMotionSource`](crate::sensors::ReplayMotionSource)
//! and [`ReplayRadioSource`](crate::sensors::ReplayRadioSource).

mod sensor_model;
mod walk;

pub use sensor_model::SensorModel;
pub use walk::{RecordedSession, synthesize_walk};
