//! Core types shared by the orchestrator, the estimator and the renderer.
//!
//! ## Type Categories
//!
//! ### Geometry
//! - [`Pose`]: Position (x, y) in meters and heading (theta) in radians
//! - [`Trace`]: Append-only pose history of one agent
//! - [`Bounds`]: Axis-aligned extent of plotted content
//!
//! ### Observations
//! - [`MotionObservation`]: Accelerometer axes plus compass bearing
//! - [`ProximityObservation`]: Beacon advertisement (address, RSSI)
//! - [`DeviceObservation`]: Normalized form handed to the estimator
//! - [`Capabilities`]: Which sensing subsystems came up
//!
//! ### Map entities
//! - [`Landmark`]: Point of interest drawn on the map
//! - [`Beacon`]: Landmark with a known radio address

mod bounds;
mod landmark;
mod observations;
mod pose;
mod trace;

pub use bounds::Bounds;
pub use landmark::{Beacon, Landmark};
pub use observations::{
    Capabilities, DeviceObservation, MotionCapabilities, MotionObservation, ProximityObservation,
};
pub use pose::{Pose, TWO_PI, bearing_to_theta, normalize_angle};
pub use trace::Trace;
