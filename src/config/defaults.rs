//! Default value functions for serde deserialization.

use crate::core::{Beacon, Pose};

pub fn particle_count() -> usize {
    20
}

pub fn default_pose() -> Pose {
    Pose::identity()
}

pub fn sensor_frequency() -> f64 {
    50.0
}

pub fn ble_frequency() -> f64 {
    2.0
}

pub fn beacons() -> Vec<Beacon> {
    [
        ("D0:39:72:A4:10:01", "entrance", -1.0, -1.0),
        ("D0:39:72:A4:10:02", "kitchen", 9.0, -1.0),
        ("D0:39:72:A4:10:03", "hall", 9.0, 5.0),
        ("D0:39:72:A4:10:04", "desk", -1.0, 5.0),
    ]
    .into_iter()
    .map(|(uid, name, x, y)| Beacon {
        uid: uid.to_string(),
        name: Some(name.to_string()),
        x,
        y,
    })
    .collect()
}

pub fn canvas_size() -> (u32, u32) {
    (800, 600)
}

pub fn canvas_width() -> u32 {
    canvas_size().0
}

pub fn canvas_height() -> u32 {
    canvas_size().1
}

pub fn device_pixel_ratio() -> f64 {
    1.0
}

pub fn padding() -> f64 {
    1.0
}

pub fn trace_color() -> String {
    "#A8A8A8".to_string()
}

pub fn trace_width() -> f64 {
    2.0
}

pub fn landmark_color() -> String {
    "#1E6BB8".to_string()
}

pub fn object_size() -> f64 {
    6.0
}

pub fn room_width() -> f64 {
    8.0
}

pub fn room_height() -> f64 {
    4.0
}

pub fn step_length() -> f64 {
    0.7
}

pub fn step_frequency() -> f64 {
    1.8
}

pub fn laps() -> usize {
    1
}

pub fn seed() -> u64 {
    42
}

pub fn accel_noise() -> f64 {
    0.15
}

pub fn heading_noise() -> f64 {
    2.0
}

pub fn rssi_noise() -> f64 {
    2.0
}

pub fn tx_power() -> f64 {
    -59.0
}

pub fn path_loss_exponent() -> f64 {
    2.0
}

pub fn advert_loss() -> f64 {
    0.1
}

pub fn log_level() -> String {
    "info".to_string()
}
