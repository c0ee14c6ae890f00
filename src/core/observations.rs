//! Sensor observation payloads and capability flags.

use serde::{Deserialize, Serialize};

/// One motion sample: accelerometer axes plus compass bearing.
///
/// Produced by a [`MotionSource`](crate::sensors::MotionSource) at sensor
/// frequency. The orchestrator forwards it and drops it; nothing retains it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionObservation {
    /// Acceleration along device X (m/s²)
    pub x: f64,
    /// Acceleration along device Y (m/s²)
    pub y: f64,
    /// Acceleration along device Z (m/s²)
    pub z: f64,
    /// Compass bearing in degrees (0 = north, clockwise)
    pub heading: f64,
}

impl MotionObservation {
    /// Create a new motion observation
    pub fn new(x: f64, y: f64, z: f64, heading: f64) -> Self {
        Self { x, y, z, heading }
    }

    /// Magnitude of the acceleration vector
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A radio advertisement as reported by the radio source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityObservation {
    /// Stable identity of the advertising beacon (radio address)
    pub device_id: String,
    /// Received signal strength indicator (dBm)
    pub rssi: f64,
}

impl ProximityObservation {
    /// Create a new proximity observation
    pub fn new(device_id: impl Into<String>, rssi: f64) -> Self {
        Self {
            device_id: device_id.into(),
            rssi,
        }
    }
}

/// Estimator-facing form of a proximity observation.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceObservation {
    /// Beacon identity
    pub uid: String,
    /// Received signal strength indicator (dBm)
    pub rssi: f64,
}

impl From<ProximityObservation> for DeviceObservation {
    fn from(obs: ProximityObservation) -> Self {
        Self {
            uid: obs.device_id,
            rssi: obs.rssi,
        }
    }
}

/// Which motion subsystems came up when listening started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionCapabilities {
    /// Accelerometer delivers samples
    pub accelerometer: bool,
    /// Compass delivers bearings
    pub compass: bool,
}

impl MotionCapabilities {
    /// Both subsystems available
    pub const ALL: Self = Self {
        accelerometer: true,
        compass: true,
    };

    /// True when at least one subsystem is available
    pub fn any(&self) -> bool {
        self.accelerometer || self.compass
    }
}

/// Capability flags for every sensing subsystem, as reported at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Motion subsystems
    pub motion: MotionCapabilities,
    /// Radio scanning
    pub radio: bool,
}

impl Capabilities {
    /// True when every subsystem came up
    pub fn is_complete(&self) -> bool {
        self.motion.accelerometer && self.motion.compass && self.radio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude() {
        let obs = MotionObservation::new(3.0, 4.0, 0.0, 12.0);
        assert_relative_eq!(obs.magnitude(), 5.0);
    }

    #[test]
    fn test_device_observation_from_proximity() {
        let device: DeviceObservation = ProximityObservation::new("AA:BB", -61.0).into();
        assert_eq!(device.uid, "AA:BB");
        assert_eq!(device.rssi, -61.0);
    }

    #[test]
    fn test_capabilities() {
        let caps = Capabilities {
            motion: MotionCapabilities {
                accelerometer: true,
                compass: false,
            },
            radio: true,
        };
        assert!(caps.motion.any());
        assert!(!caps.is_complete());
        assert!(
            Capabilities {
                motion: MotionCapabilities::ALL,
                radio: true
            }
            .is_complete()
        );
    }
}
