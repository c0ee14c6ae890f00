//! 2D pose type for pedestrian position and heading.
//!
//! Model space is metric with an arbitrary origin:
//! - Position: (x, y) in meters, y pointing "up" on the rendered map
//! - Theta: heading angle in radians, counter-clockwise from +X

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use slac::core::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-9);
/// assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Convert a compass bearing in degrees (0 = north, clockwise) into a model
/// heading in radians (0 = +X, counter-clockwise).
///
/// # Example
/// ```
/// use slac::core::bearing_to_theta;
/// use std::f64::consts::FRAC_PI_2;
///
/// // North is +Y on the map
/// assert!((bearing_to_theta(0.0) - FRAC_PI_2).abs() < 1e-9);
/// // East is +X
/// assert!(bearing_to_theta(90.0).abs() < 1e-9);
/// ```
#[inline]
pub fn bearing_to_theta(bearing_deg: f64) -> f64 {
    normalize_angle((90.0 - bearing_deg).to_radians())
}

/// A 2D pose: position plus heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in meters.
    pub x: f64,
    /// Y position in meters.
    pub y: f64,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    #[serde(default)]
    pub theta: f64,
}

impl Pose {
    /// Create a new pose. Theta is normalized to [-π, π).
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Pose at the origin facing +X.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Move `distance` meters along `theta`, returning the new pose with
    /// that heading.
    #[inline]
    pub fn advance(self, distance: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(self.x + distance * cos, self.y + distance * sin, theta)
    }

    /// Euclidean distance between the positions of two poses.
    #[inline]
    pub fn distance(&self, other: &Pose) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
