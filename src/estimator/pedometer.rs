//! Step detection from accelerometer magnitude.
//!
//! Peak detection with hysteresis on the gravity-removed, low-pass filtered
//! acceleration magnitude. Samples carry no timestamps, so time is derived
//! from the sample count and the configured sampling frequency.

/// Configuration for step detection.
#[derive(Debug, Clone)]
pub struct PedometerConfig {
    /// Filtered acceleration above this counts as a step peak (m/s²)
    pub peak_threshold: f64,
    /// Filtered acceleration must drop below this before the next peak (m/s²)
    pub rearm_threshold: f64,
    /// Minimum time between steps (seconds)
    pub min_step_interval: f64,
    /// Low-pass smoothing factor (0-1, lower = more smoothing)
    pub smoothing_alpha: f64,
    /// Gravity tracking factor (0-1, very small)
    pub gravity_alpha: f64,
    /// Distance covered per detected step (meters)
    pub step_length: f64,
}

impl Default for PedometerConfig {
    fn default() -> Self {
        Self {
            peak_threshold: 1.0,
            rearm_threshold: -0.5,
            min_step_interval: 0.25, // Max 4 steps/sec
            smoothing_alpha: 0.3,
            gravity_alpha: 0.02,
            step_length: 0.7,
        }
    }
}

/// Step counter fed one accelerometer sample at a time.
#[derive(Debug, Clone)]
pub struct Pedometer {
    config: PedometerConfig,
    sample_period: f64,
    gravity: f64,
    filtered: f64,
    armed: bool,
    elapsed: f64,
    last_step_at: Option<f64>,
    step_count: u64,
}

impl Pedometer {
    /// Create a pedometer for samples arriving at `frequency` Hz.
    pub fn new(config: PedometerConfig, frequency: f64) -> Self {
        Self {
            config,
            sample_period: 1.0 / frequency.max(f64::EPSILON),
            gravity: 9.81,
            filtered: 0.0,
            armed: true,
            elapsed: 0.0,
            last_step_at: None,
            step_count: 0,
        }
    }

    /// Feed one acceleration magnitude. Returns true when a step completes.
    pub fn update(&mut self, magnitude: f64) -> bool {
        self.elapsed += self.sample_period;

        self.gravity += self.config.gravity_alpha * (magnitude - self.gravity);
        let linear = magnitude - self.gravity;
        self.filtered += self.config.smoothing_alpha * (linear - self.filtered);

        if !self.armed {
            if self.filtered < self.config.rearm_threshold {
                self.armed = true;
            }
            return false;
        }

        if self.filtered <= self.config.peak_threshold {
            return false;
        }

        let interval_ok = self
            .last_step_at
            .is_none_or(|t| self.elapsed - t >= self.config.min_step_interval);
        if !interval_ok {
            return false;
        }

        self.armed = false;
        self.last_step_at = Some(self.elapsed);
        self.step_count += 1;
        true
    }

    /// Steps detected so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Distance covered per step (meters)
    pub fn step_length(&self) -> f64 {
        self.config.step_length
    }
}
