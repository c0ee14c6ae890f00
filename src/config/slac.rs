//! Main SlacConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Beacon;
use crate::error::{Error, Result};
use crate::estimator::EstimatorParams;

use super::defaults;
use super::render::RenderSection;
use super::sensing::{BleSection, ParticlesSection, SensorSection};
use super::simulation::SimulationSection;

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Full SLAC configuration loaded from TOML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlacConfig {
    /// Estimator construction settings
    #[serde(default)]
    pub particles: ParticlesSection,

    /// Motion sensor settings
    #[serde(default)]
    pub sensor: SensorSection,

    /// Radio settings
    #[serde(default)]
    pub ble: BleSection,

    /// Known beacons
    #[serde(default = "defaults::beacons")]
    pub beacons: Vec<Beacon>,

    /// Canvas and styling
    #[serde(default)]
    pub render: RenderSection,

    /// Synthetic walk
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Logging
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for SlacConfig {
    fn default() -> Self {
        Self {
            particles: ParticlesSection::default(),
            sensor: SensorSection::default(),
            ble: BleSection::default(),
            beacons: defaults::beacons(),
            render: RenderSection::default(),
            simulation: SimulationSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl SlacConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!(
                "Config {} not found, using built-in defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Parse and validate from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SlacConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values nothing downstream can work with
    pub fn validate(&self) -> Result<()> {
        if self.particles.count == 0 {
            return Err(Error::InvalidConfig(
                "particles.count must be at least 1".to_string(),
            ));
        }
        if !is_positive(self.sensor.frequency) {
            return Err(Error::InvalidConfig(format!(
                "sensor.frequency must be positive, got {}",
                self.sensor.frequency
            )));
        }
        if !is_positive(self.ble.frequency) {
            return Err(Error::InvalidConfig(format!(
                "ble.frequency must be positive, got {}",
                self.ble.frequency
            )));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "render size must be non-zero, got {}x{}",
                self.render.width, self.render.height
            )));
        }
        if self.render.padding < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "render.padding must not be negative, got {}",
                self.render.padding
            )));
        }
        if !is_positive(self.simulation.step_length)
            || !is_positive(self.simulation.step_frequency)
        {
            return Err(Error::InvalidConfig(
                "simulation step length and frequency must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.simulation.advert_loss) {
            return Err(Error::InvalidConfig(format!(
                "simulation.advert_loss must be within 0..1, got {}",
                self.simulation.advert_loss
            )));
        }
        Ok(())
    }

    /// Parameters for constructing a fresh estimator
    pub fn estimator_params(&self) -> EstimatorParams {
        EstimatorParams {
            particle_count: self.particles.count,
            initial_pose: self.particles.default_pose,
            beacons: self.beacons.clone(),
            frequency: self.sensor.frequency,
        }
    }
}

/// Finite and strictly positive (rejects NaN)
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
