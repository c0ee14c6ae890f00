//! # SLAC
//!
//! Sensor-fusion orchestrator and map renderer for pedestrian localization
//! and beacon mapping.
//!
//! ## Overview
//!
//! A walker carries a phone-class device: an accelerometer and compass
//! sample motion at a fixed rate, and a radio scans for beacon
//! advertisements. SLAC wires those sources to a pluggable estimator and
//! draws what the estimator believes:
//!
//! - **Orchestrator**: owns at most one estimator, forwards observations
//!   into it, and keeps live readouts and control availability in a view
//! - **App**: explicit context that subscribes to the sources and
//!   dispatches their events one at a time
//! - **Renderer**: canvas-style drawing of traces and landmarks with
//!   retina sizing and scale discovery
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use slac::{App, Orchestrator, SlacConfig};
//! use slac::estimator::DeadReckoningFactory;
//! use slac::orchestrator::ViewState;
//! use slac::sensors::{ReplayMotionSource, ReplayRadioSource};
//!
//! let config = SlacConfig::default();
//! let orchestrator = Orchestrator::new(
//!     Box::new(DeadReckoningFactory::default()),
//!     config.estimator_params(),
//!     ViewState::new(),
//! );
//! let mut app = App::new(orchestrator, motion, radio);
//! app.initialize();
//! app.orchestrator_mut().start();
//! app.tick(now_ms);
//! ```
//!
//! ## Coordinate System
//!
//! - X: East, Y: North, in meters
//! - Theta: radians, CCW positive from +X
//! - Compass headings: degrees clockwise from north, converted with
//!   [`core::bearing_to_theta`]

#![warn(missing_docs)]

// Application context and event queue
pub mod app;

// Unified configuration
pub mod config;

// Geometry, observations, landmarks
pub mod core;

// Error types
pub mod error;

// Estimator contract and dead reckoning
pub mod estimator;

// Lifecycle state machine and view bindings
pub mod orchestrator;

// Drawing surfaces and the map renderer
pub mod render;

// Sensor source traits and replay sources
pub mod sensors;

// Walk simulation
pub mod sim;

pub use app::{App, AppEvent};
pub use config::SlacConfig;
pub use error::{Error, Result};
pub use estimator::{Estimator, EstimatorFactory, EstimatorParams};
pub use orchestrator::{ControlAction, ControlOutcome, LifecycleState, Orchestrator};
pub use render::{Renderer, SvgSurface};
