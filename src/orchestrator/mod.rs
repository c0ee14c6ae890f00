//! Estimator lifecycle and view updates.
//!
//! The [`Orchestrator`] owns at most one estimator, forwards sensor
//! observations into it, and mirrors readouts and control availability into
//! a [`ViewBindings`] implementation.

mod controller;
mod state;
mod view;

pub use controller::Orchestrator;
pub use state::{ControlAction, ControlOutcome, LifecycleState};
pub use view::{ControlSink, Indicator, Readout, ViewBindings, ViewState};
