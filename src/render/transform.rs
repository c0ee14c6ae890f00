//! Model-to-pixel coordinate transforms.

use crate::core::Bounds;

/// Maps model coordinates (meters) to surface pixels.
pub trait CoordinateTransform {
    /// Pixel x for a model x
    fn to_pixel_x(&self, x: f64) -> f64;

    /// Pixel y for a model y
    fn to_pixel_y(&self, y: f64) -> f64;

    /// Fit `bounds` onto a surface `height_px` tall at `scale` pixels per
    /// meter, leaving `padding` meters split around the content.
    ///
    /// Fixed transforms ignore this.
    fn fit(&mut self, _bounds: &Bounds, _scale: f64, _padding: f64, _height_px: f64) {}
}

/// Model coordinates are pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    #[inline]
    fn to_pixel_x(&self, x: f64) -> f64 {
        x
    }

    #[inline]
    fn to_pixel_y(&self, y: f64) -> f64 {
        y
    }
}

/// Scale, origin shift and y-flip (model y-up, pixel y-down).
///
/// ```text
/// px = (x - origin_x) * scale + margin
/// py = height - ((y - origin_y) * scale + margin)
/// ```
///
/// where `margin = padding / 2 * scale`.
#[derive(Clone, Copy, Debug)]
pub struct ScaledTransform {
    scale: f64,
    origin_x: f64,
    origin_y: f64,
    margin: f64,
    height: f64,
}

impl Default for ScaledTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            margin: 0.0,
            height: 0.0,
        }
    }
}

impl ScaledTransform {
    /// Transform with an explicit scale and origin
    pub fn new(scale: f64, origin_x: f64, origin_y: f64, height_px: f64) -> Self {
        Self {
            scale,
            origin_x,
            origin_y,
            margin: 0.0,
            height: height_px,
        }
    }

    /// Pixels per meter
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl CoordinateTransform for ScaledTransform {
    #[inline]
    fn to_pixel_x(&self, x: f64) -> f64 {
        (x - self.origin_x) * self.scale + self.margin
    }

    #[inline]
    fn to_pixel_y(&self, y: f64) -> f64 {
        self.height - ((y - self.origin_y) * self.scale + self.margin)
    }

    fn fit(&mut self, bounds: &Bounds, scale: f64, padding: f64, height_px: f64) {
        if bounds.is_empty() {
            self.origin_x = 0.0;
            self.origin_y = 0.0;
        } else {
            self.origin_x = bounds.min_x;
            self.origin_y = bounds.min_y;
        }
        self.scale = scale;
        self.margin = padding / 2.0 * scale;
        self.height = height_px;
    }
}
