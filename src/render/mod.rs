//! Map rendering: estimated traces and landmarks on a 2D surface.
//!
//! - [`Renderer`]: canvas-style primitives (clear, retina sizing, scale
//!   discovery, trace and object plotting)
//! - [`CoordinateTransform`]: model meters to surface pixels
//! - [`DrawingSurface`]: the drawing target; [`RecordingSurface`] logs calls
//!   for tests, [`SvgSurface`] writes an SVG document
//! - [`draw_scene`]: redraws everything an estimator knows, rescaling when
//!   content leaves the view
//!
//! # Example
//!
//! ```rust
//! use slac::core::{Landmark, Pose, Trace};
//! use slac::render::{RecordingSurface, Renderer, SurfaceRegistry};
//!
//! let mut surfaces = SurfaceRegistry::new().with("map", RecordingSurface::new(300, 200));
//! let mut renderer = Renderer::bind(&mut surfaces, "map").unwrap();
//!
//! let trace: Trace = vec![Pose::new(10.0, 10.0, 0.0), Pose::new(50.0, 40.0, 0.0)].into();
//! renderer.clear_canvas();
//! let resize = renderer.plot_user_trace(&trace, "#A8A8A8", 2.0);
//! renderer.plot_object(&Landmark::named(20.0, 20.0, "door"), "#000000", 3.0);
//! assert!(!resize);
//! ```

mod recording;
mod renderer;
mod scene;
mod surface;
mod svg;
mod transform;

pub use recording::{DrawCommand, RecordingSurface, SurfaceRegistry};
pub use renderer::{
    DEFAULT_LINE_WIDTH, DEFAULT_OBJECT_FILL, DEFAULT_OBJECT_SIZE, DEFAULT_TRACE_COLOR, Renderer,
};
pub use scene::{SceneStats, SceneStyle, content_bounds, draw_scene};
pub use surface::{DrawingSurface, LineJoin, SurfaceProvider, Transform2D};
pub use svg::SvgSurface;
pub use transform::{CoordinateTransform, IdentityTransform, ScaledTransform};
