//! Configuration loading for SLAC.
//!
//! Loads all configuration from a single TOML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use slac::config::SlacConfig;
//! use std::path::Path;
//!
//! // Load from file, falling back to built-in defaults
//! let config = SlacConfig::load_or_default(Path::new("configs/slac.toml"))?;
//!
//! // Parameters for a fresh estimator
//! let params = config.estimator_params();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`ParticlesSection`] | Particle count, initial pose |
//! | [`SensorSection`] | Motion sampling frequency |
//! | [`BleSection`] | Radio scan frequency |
//! | `[[beacons]]` | Known beacons (uid, name, x, y) |
//! | [`RenderSection`] | Canvas size, padding, colors |
//! | [`SimulationSection`] | Synthetic walk for the binary |
//! | [`LoggingSection`] | Log level |
//!
//! ## Example TOML
//!
//! ```toml
//! [particles]
//! count = 20
//! default_pose = { x = 0.0, y = 0.0, theta = 0.0 }
//!
//! [sensor]
//! frequency = 50.0   # Hz
//!
//! [[beacons]]
//! uid = "D0:39:72:A4:10:01"
//! name = "entrance"
//! x = -1.0
//! y = -1.0
//! ```

mod defaults;
mod render;
mod sensing;
mod simulation;
mod slac;

pub use render::RenderSection;
pub use sensing::{BleSection, ParticlesSection, SensorSection};
pub use simulation::SimulationSection;
pub use slac::{LoggingSection, SlacConfig};
