//! Point entities drawn on the map.

use serde::{Deserialize, Serialize};

/// A fixed point of interest, e.g. a radio beacon, optionally named.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Label drawn next to the marker
    #[serde(default)]
    pub name: Option<String>,
}

impl Landmark {
    /// Unnamed landmark
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, name: None }
    }

    /// Named landmark
    pub fn named(x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            name: Some(name.into()),
        }
    }
}

/// A beacon with a known position, keyed by its radio address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    /// Radio address the beacon advertises with
    pub uid: String,
    /// Human readable name
    #[serde(default)]
    pub name: Option<String>,
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
}

impl Beacon {
    /// Landmark view of this beacon
    pub fn landmark(&self) -> Landmark {
        Landmark {
            x: self.x,
            y: self.y,
            name: self.name.clone(),
        }
    }
}
