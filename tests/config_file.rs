//! Configuration files on disk.

use std::io::Write;

use slac::{Error, SlacConfig};

#[test]
fn test_shipped_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/slac.toml");
    let config = SlacConfig::load(&path).unwrap();

    assert_eq!(config.particles.count, 20);
    assert_eq!(config.beacons.len(), 4);
    assert_eq!(config.beacons[2].name.as_deref(), Some("hall"));
    assert_eq!(config.render.landmark_color, "#1E6BB8");
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[ble]
frequency = 4.0

[render]
width = 300
height = 200
device_pixel_ratio = 2.0
"#
    )
    .unwrap();

    let config = SlacConfig::load(file.path()).unwrap();
    assert_eq!(config.ble.frequency, 4.0);
    assert_eq!(config.render.device_pixel_ratio, 2.0);
    assert_eq!(config.sensor.frequency, 50.0);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SlacConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.particles.count, 20);

    let err = SlacConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sensor]\nfrequency = 0.0").unwrap();

    let err = SlacConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
