//! Sensor error model for the synthetic walk.
//!
//! Turns ground truth into what a phone would report: jittered
//! accelerometer axes and compass bearing, log-distance RSSI with shadowing,
//! and advertisements the scanner misses.
//!
//! ```text
//! rssi = tx_power - 10 * n * log10(max(d, MIN_RANGE)) + N(0, rssi_noise)
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::config::SimulationSection;

/// Closest distance used for path loss (meters)
const MIN_RANGE: f64 = 0.1;

/// Seeded phone sensor model driven by the `[simulation]` section
#[derive(Clone, Debug)]
pub struct SensorModel {
    rng: SmallRng,
    accel_sigma: f64,
    heading_sigma: f64,
    rssi_sigma: f64,
    tx_power: f64,
    path_loss_exponent: f64,
    advert_loss: f64,
}

impl SensorModel {
    /// Build from the simulation settings. Seed 0 draws a fresh seed.
    pub fn new(sim: &SimulationSection) -> Self {
        let rng = match sim.seed {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed),
        };
        Self {
            rng,
            accel_sigma: sim.accel_noise.max(0.0),
            heading_sigma: sim.heading_noise.max(0.0),
            rssi_sigma: sim.rssi_noise.max(0.0),
            tx_power: sim.tx_power,
            path_loss_exponent: sim.path_loss_exponent,
            advert_loss: sim.advert_loss.clamp(0.0, 1.0),
        }
    }

    /// Measured acceleration on one axis (m/s²)
    pub fn accel(&mut self, truth: f64) -> f64 {
        truth + self.jitter(self.accel_sigma)
    }

    /// Measured compass bearing, wrapped to [0, 360)
    pub fn heading(&mut self, bearing: f64) -> f64 {
        (bearing + self.jitter(self.heading_sigma)).rem_euclid(360.0)
    }

    /// Noise-free RSSI at `range` meters
    pub fn expected_rssi(&self, range: f64) -> f64 {
        self.tx_power - 10.0 * self.path_loss_exponent * range.max(MIN_RANGE).log10()
    }

    /// Measured RSSI at `range` meters
    pub fn rssi(&mut self, range: f64) -> f64 {
        self.expected_rssi(range) + self.jitter(self.rssi_sigma)
    }

    /// Whether the scanner misses the next advertisement
    pub fn advert_lost(&mut self) -> bool {
        // No draw when lossless
        self.advert_loss > 0.0 && self.rng.r#gen::<f64>() < self.advert_loss
    }

    fn jitter(&mut self, sigma: f64) -> f64 {
        if sigma == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quiet() -> SimulationSection {
        SimulationSection {
            accel_noise: 0.0,
            heading_noise: 0.0,
            rssi_noise: 0.0,
            advert_loss: 0.0,
            ..SimulationSection::default()
        }
    }

    #[test]
    fn test_path_loss() {
        let model = SensorModel::new(&quiet());
        assert_relative_eq!(model.expected_rssi(1.0), -59.0);
        assert_relative_eq!(model.expected_rssi(10.0), -79.0);
        // Clamped below the minimum range
        assert_relative_eq!(model.expected_rssi(0.0), model.expected_rssi(MIN_RANGE));
    }

    #[test]
    fn test_quiet_model_reports_truth() {
        let mut model = SensorModel::new(&quiet());
        assert_eq!(model.accel(9.81), 9.81);
        assert_eq!(model.heading(-90.0), 270.0);
        assert_eq!(model.heading(360.0), 0.0);
        assert_relative_eq!(model.rssi(2.0), model.expected_rssi(2.0));
        assert!(!model.advert_lost());
    }

    #[test]
    fn test_same_seed_same_readings() {
        let sim = SimulationSection {
            seed: 7,
            ..SimulationSection::default()
        };
        let mut a = SensorModel::new(&sim);
        let mut b = SensorModel::new(&sim);
        for _ in 0..20 {
            assert_eq!(a.rssi(3.0), b.rssi(3.0));
            assert_eq!(a.heading(90.0), b.heading(90.0));
        }
    }

    #[test]
    fn test_total_loss() {
        let sim = SimulationSection {
            advert_loss: 1.0,
            ..quiet()
        };
        let mut model = SensorModel::new(&sim);
        assert!((0..50).all(|_| model.advert_lost()));
    }
}
