//! Render configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Canvas and styling settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderSection {
    /// Canvas layout width (CSS pixels)
    #[serde(default = "defaults::canvas_width")]
    pub width: u32,

    /// Canvas layout height (CSS pixels)
    #[serde(default = "defaults::canvas_height")]
    pub height: u32,

    /// Device pixel ratio reported by the output surface
    #[serde(default = "defaults::device_pixel_ratio")]
    pub device_pixel_ratio: f64,

    /// Margin around content, in meters
    #[serde(default = "defaults::padding")]
    pub padding: f64,

    /// Trace stroke color
    #[serde(default = "defaults::trace_color")]
    pub trace_color: String,

    /// Trace stroke width (pixels)
    #[serde(default = "defaults::trace_width")]
    pub trace_width: f64,

    /// Landmark fill color
    #[serde(default = "defaults::landmark_color")]
    pub landmark_color: String,

    /// Landmark marker size (pixels)
    #[serde(default = "defaults::object_size")]
    pub object_size: f64,
}

impl Default for RenderSection {
    fn default() -> Self {
        let (width, height) = defaults::canvas_size();
        Self {
            width,
            height,
            device_pixel_ratio: defaults::device_pixel_ratio(),
            padding: defaults::padding(),
            trace_color: defaults::trace_color(),
            trace_width: defaults::trace_width(),
            landmark_color: defaults::landmark_color(),
            object_size: defaults::object_size(),
        }
    }
}
