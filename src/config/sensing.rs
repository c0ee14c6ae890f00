//! Particle, motion sensor and radio configuration sections.

use serde::{Deserialize, Serialize};

use crate::core::Pose;

use super::defaults;

/// Estimator construction settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticlesSection {
    /// Number of particles/agents the estimator tracks
    #[serde(default = "defaults::particle_count")]
    pub count: usize,

    /// Pose every new estimator starts from
    #[serde(default = "defaults::default_pose")]
    pub default_pose: Pose,
}

impl Default for ParticlesSection {
    fn default() -> Self {
        Self {
            count: defaults::particle_count(),
            default_pose: defaults::default_pose(),
        }
    }
}

/// Motion sensor settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorSection {
    /// Motion sampling frequency (Hz)
    #[serde(default = "defaults::sensor_frequency")]
    pub frequency: f64,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            frequency: defaults::sensor_frequency(),
        }
    }
}

/// Radio scanning settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BleSection {
    /// Advertisement scan frequency (Hz)
    #[serde(default = "defaults::ble_frequency")]
    pub frequency: f64,
}

impl Default for BleSection {
    fn default() -> Self {
        Self {
            frequency: defaults::ble_frequency(),
        }
    }
}
