//! Walk simulation configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Settings for the synthetic walk used by the `slac` binary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Width of the rectangular walk (meters, along +X)
    #[serde(default = "defaults::room_width")]
    pub room_width: f64,

    /// Height of the rectangular walk (meters, along +Y)
    #[serde(default = "defaults::room_height")]
    pub room_height: f64,

    /// Distance covered per step (meters)
    #[serde(default = "defaults::step_length")]
    pub step_length: f64,

    /// Cadence (steps per second)
    #[serde(default = "defaults::step_frequency")]
    pub step_frequency: f64,

    /// Number of times the rectangle is walked
    #[serde(default = "defaults::laps")]
    pub laps: usize,

    /// Random seed for reproducible noise (0 = random each run)
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Accelerometer noise stddev (m/s²)
    #[serde(default = "defaults::accel_noise")]
    pub accel_noise: f64,

    /// Compass noise stddev (degrees)
    #[serde(default = "defaults::heading_noise")]
    pub heading_noise: f64,

    /// RSSI noise stddev (dB)
    #[serde(default = "defaults::rssi_noise")]
    pub rssi_noise: f64,

    /// RSSI measured at one meter (dBm)
    #[serde(default = "defaults::tx_power")]
    pub tx_power: f64,

    /// Log-distance path loss exponent
    #[serde(default = "defaults::path_loss_exponent")]
    pub path_loss_exponent: f64,

    /// Probability that an advertisement is missed (0..1)
    #[serde(default = "defaults::advert_loss")]
    pub advert_loss: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            room_width: defaults::room_width(),
            room_height: defaults::room_height(),
            step_length: defaults::step_length(),
            step_frequency: defaults::step_frequency(),
            laps: defaults::laps(),
            seed: defaults::seed(),
            accel_noise: defaults::accel_noise(),
            heading_noise: defaults::heading_noise(),
            rssi_noise: defaults::rssi_noise(),
            tx_power: defaults::tx_power(),
            path_loss_exponent: defaults::path_loss_exponent(),
            advert_loss: defaults::advert_loss(),
        }
    }
}
