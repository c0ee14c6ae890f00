//! Immediate-mode 2D drawing surface abstraction.
//!
//! Mirrors the subset of a canvas 2D context the renderer needs: a backing
//! buffer with its own size, a layout ("CSS") size, a device pixel ratio,
//! a transform stack, and path/fill/text primitives.

/// Affine transform `[a c e; b d f; 0 0 1]` applied to drawing coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    /// Horizontal scale
    pub a: f64,
    /// Vertical skew
    pub b: f64,
    /// Horizontal skew
    pub c: f64,
    /// Vertical scale
    pub d: f64,
    /// Horizontal translation
    pub e: f64,
    /// Vertical translation
    pub f: f64,
}

impl Transform2D {
    /// No scale, skew or translation
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Whether this is the identity
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// How joined path segments are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Sharp corners
    #[default]
    Miter,
    /// Rounded corners
    Round,
    /// Cut-off corners
    Bevel,
}

impl LineJoin {
    /// Canvas/SVG keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// A 2D drawing target.
///
/// Sizes are in device pixels for the backing buffer and in layout pixels
/// for the display size.
pub trait DrawingSurface {
    /// Backing buffer width
    fn width(&self) -> u32;

    /// Backing buffer height
    fn height(&self) -> u32;

    /// Resize the backing buffer
    fn set_size(&mut self, width: u32, height: u32);

    /// Computed layout size, integer pixels
    fn display_size(&self) -> (u32, u32);

    /// Pin the layout size
    fn set_display_size(&mut self, width: u32, height: u32);

    /// Physical pixels per layout pixel
    fn device_pixel_ratio(&self) -> f64;

    /// Push the drawing state (transform and styles)
    fn save(&mut self);

    /// Pop the drawing state
    fn restore(&mut self);

    /// Replace the current transform
    fn set_transform(&mut self, transform: Transform2D);

    /// Erase a rectangle to transparent
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Corner style for subsequent strokes
    fn set_line_join(&mut self, join: LineJoin);

    /// Stroke width for subsequent strokes
    fn set_line_width(&mut self, width: f64);

    /// Fill color for subsequent fills and text
    fn set_fill_style(&mut self, style: &str);

    /// Stroke color for subsequent strokes
    fn set_stroke_style(&mut self, style: &str);

    /// Font for subsequent text, e.g. `15px serif`
    fn set_font(&mut self, font: &str);

    /// Start a new path
    fn begin_path(&mut self);

    /// Start a subpath at a point
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the subpath to a point
    fn line_to(&mut self, x: f64, y: f64);

    /// Stroke the current path
    fn stroke(&mut self);

    /// Close the current subpath
    fn close_path(&mut self);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw text with its baseline origin at a point
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Looks up drawing surfaces by identifier.
pub trait SurfaceProvider {
    /// Surface type handed out
    type Surface: DrawingSurface;

    /// Take ownership of the surface registered under `id`
    fn take_surface(&mut self, id: &str) -> Option<Self::Surface>;
}
