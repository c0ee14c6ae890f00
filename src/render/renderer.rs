//! Map renderer: traces and landmarks onto a drawing surface.

use log::{debug, warn};

use crate::core::{Bounds, Landmark, Trace};
use crate::error::{Error, Result};

use super::surface::{DrawingSurface, LineJoin, SurfaceProvider, Transform2D};
use super::transform::{CoordinateTransform, IdentityTransform};

/// Default trace stroke color
pub const DEFAULT_TRACE_COLOR: &str = "#A8A8A8";
/// Default trace stroke width
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
/// Default landmark fill
pub const DEFAULT_OBJECT_FILL: &str = "#000000";
/// Default landmark marker size
pub const DEFAULT_OBJECT_SIZE: f64 = 3.0;

const TRACE_FILL: &str = "#960E0E";
const LABEL_FONT: &str = "15px serif";
const LABEL_FILL: &str = "#000000";

/// Backing buffer oversampling on 2x displays
const RETINA_FACTOR: f64 = 1.99;

/// Draws traces and landmarks onto one exclusively owned surface.
///
/// Model coordinates go through the injected [`CoordinateTransform`]; with
/// the default [`IdentityTransform`] they are used as pixels directly.
pub struct Renderer<S: DrawingSurface, T: CoordinateTransform = IdentityTransform> {
    id: String,
    surface: S,
    transform: T,
    scale_factor: Option<f64>,
    fitted: Option<(Bounds, f64)>,
}

impl<S: DrawingSurface> Renderer<S> {
    /// Bind to the surface registered under `id`, drawing in pixels
    pub fn bind<P>(provider: &mut P, id: &str) -> Result<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        Self::bind_with(provider, id, IdentityTransform)
    }
}

impl<S: DrawingSurface, T: CoordinateTransform> Renderer<S, T> {
    /// Bind to the surface registered under `id` with a coordinate transform
    pub fn bind_with<P>(provider: &mut P, id: &str, transform: T) -> Result<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let surface = provider
            .take_surface(id)
            .ok_or_else(|| Error::SurfaceNotFound(id.to_string()))?;
        debug!(
            "[SLAC] Renderer bound to '{}' ({}x{})",
            id,
            surface.width(),
            surface.height()
        );
        Ok(Self::new(id, surface, transform))
    }

    /// Wrap a surface directly
    pub fn new(id: impl Into<String>, surface: S, transform: T) -> Self {
        Self {
            id: id.into(),
            surface,
            transform,
            scale_factor: None,
            fitted: None,
        }
    }

    /// Erase the whole backing buffer regardless of the current transform.
    pub fn clear_canvas(&mut self) -> &mut Self {
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());

        self.surface.save();
        self.surface.set_transform(Transform2D::IDENTITY);
        self.surface.clear_rect(0.0, 0.0, width, height);
        self.surface.restore();
        self
    }

    /// Oversample the backing buffer on 2x displays, keeping the layout
    /// size. Returns the resolution factor applied.
    ///
    /// A transform fitted by [`rescale`](Self::rescale) is refitted to the
    /// new backing size.
    pub fn optimize_for_retina(&mut self) -> f64 {
        let (width, height) = self.surface.display_size();
        let factor = if self.surface.device_pixel_ratio() == 2.0 {
            RETINA_FACTOR
        } else {
            1.0
        };

        let backing_width = (f64::from(width) * factor).round() as u32;
        let backing_height = (f64::from(height) * factor).round() as u32;
        self.surface.set_size(backing_width, backing_height);
        self.surface.set_display_size(width, height);
        self.scale_factor = None;
        if let Some((bounds, padding)) = self.fitted {
            self.rescale(&bounds, padding);
        }

        debug!(
            "[SLAC] Retina factor {}: backing {}x{}, layout {}x{}",
            factor, backing_width, backing_height, width, height
        );
        factor
    }

    /// Largest uniform scale that fits `x_max` x `y_max` model units plus
    /// `padding` into the backing buffer.
    pub fn calculate_scale_factor(&self, x_max: f64, y_max: f64, padding: f64) -> f64 {
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());

        let scale_x = width / (x_max + padding);
        let scale_y = height / (y_max + padding);
        scale_x.min(scale_y)
    }

    /// Fit the transform to `bounds` and cache the resulting scale.
    ///
    /// Degenerate bounds (zero extent and zero padding) keep the previous
    /// scale.
    pub fn rescale(&mut self, bounds: &Bounds, padding: f64) -> f64 {
        let scale = self.calculate_scale_factor(bounds.width(), bounds.height(), padding);
        if !scale.is_finite() || scale <= 0.0 {
            warn!(
                "[SLAC] Cannot fit {:.2}x{:.2} with padding {:.2}, keeping scale",
                bounds.width(),
                bounds.height(),
                padding
            );
            return self.scale_factor.unwrap_or(1.0);
        }

        self.transform.fit(bounds, scale, padding, f64::from(self.surface.height()));
        self.scale_factor = Some(scale);
        self.fitted = Some((*bounds, padding));
        debug!("[SLAC] Rescaled to {:.2} px/m", scale);
        scale
    }

    /// Stroke a trace as one polyline.
    ///
    /// Returns true when any point lands outside the backing buffer, i.e.
    /// the view needs rescaling to show the whole trace.
    pub fn plot_user_trace(&mut self, trace: &Trace, color: &str, line_width: f64) -> bool {
        self.surface.set_line_join(LineJoin::Round);
        self.surface.set_line_width(line_width);
        self.surface.set_fill_style(TRACE_FILL);
        self.surface.set_stroke_style(color);

        self.surface.begin_path();

        let mut resize = false;
        for (i, pose) in trace.values().iter().enumerate() {
            let x = self.tx(pose.x);
            let y = self.ty(pose.y);
            resize |= !self.is_visible(x, y);

            if i == 0 {
                self.surface.move_to(x, y);
            } else {
                self.surface.line_to(x, y);
            }
        }

        self.surface.stroke();
        self.surface.close_path();

        resize
    }

    /// Fill a `size` x `size` square centered on the object, labelled at
    /// its top-left corner when named.
    ///
    /// Returns true when the object's center lands outside the backing
    /// buffer.
    pub fn plot_object(&mut self, object: &Landmark, fill_style: &str, size: f64) -> bool {
        let cx = self.tx(object.x);
        let cy = self.ty(object.y);
        let x = cx - 0.5 * size;
        let y = cy - 0.5 * size;

        self.surface.set_fill_style(fill_style);
        self.surface.fill_rect(x, y, size, size);

        if let Some(name) = &object.name {
            self.surface.set_font(LABEL_FONT);
            self.surface.set_fill_style(LABEL_FILL);
            self.surface.fill_text(name, x, y);
        }

        !self.is_visible(cx, cy)
    }

    /// Pixel x for a model x
    #[inline]
    pub fn tx(&self, x: f64) -> f64 {
        self.transform.to_pixel_x(x)
    }

    /// Pixel y for a model y
    #[inline]
    pub fn ty(&self, y: f64) -> f64 {
        self.transform.to_pixel_y(y)
    }

    /// Scale set by the last [`rescale`](Self::rescale)
    pub fn scale_factor(&self) -> Option<f64> {
        self.scale_factor
    }

    /// Surface identifier this renderer was bound to
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Release the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The coordinate transform
    pub fn transform(&self) -> &T {
        &self.transform
    }

    fn is_visible(&self, x: f64, y: f64) -> bool {
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        (0.0..=width).contains(&x) && (0.0..=height).contains(&y)
    }
}
