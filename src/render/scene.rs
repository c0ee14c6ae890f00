//! Full-scene refresh from an estimator.

use log::debug;

use crate::config::RenderSection;
use crate::core::Bounds;
use crate::estimator::Estimator;

use super::renderer::{
    DEFAULT_LINE_WIDTH, DEFAULT_OBJECT_FILL, DEFAULT_OBJECT_SIZE, DEFAULT_TRACE_COLOR, Renderer,
};
use super::surface::DrawingSurface;
use super::transform::CoordinateTransform;

/// Colors and sizes for a scene
#[derive(Clone, Debug)]
pub struct SceneStyle {
    /// Trace stroke color
    pub trace_color: String,
    /// Trace stroke width
    pub trace_width: f64,
    /// Landmark fill
    pub landmark_color: String,
    /// Landmark marker size
    pub object_size: f64,
    /// Margin around content when rescaling (model units)
    pub padding: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            trace_color: DEFAULT_TRACE_COLOR.to_string(),
            trace_width: DEFAULT_LINE_WIDTH,
            landmark_color: DEFAULT_OBJECT_FILL.to_string(),
            object_size: DEFAULT_OBJECT_SIZE,
            padding: 1.0,
        }
    }
}

impl From<&RenderSection> for SceneStyle {
    fn from(render: &RenderSection) -> Self {
        Self {
            trace_color: render.trace_color.clone(),
            trace_width: render.trace_width,
            landmark_color: render.landmark_color.clone(),
            object_size: render.object_size,
            padding: render.padding,
        }
    }
}

/// What a refresh drew
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneStats {
    /// Traces plotted
    pub traces: usize,
    /// Landmarks plotted
    pub landmarks: usize,
    /// The view was rescaled during this refresh
    pub rescaled: bool,
    /// Scale in effect after the refresh
    pub scale: Option<f64>,
}

/// Model-space extent of every trace and landmark
pub fn content_bounds(estimator: &dyn Estimator) -> Bounds {
    let mut bounds = Bounds::empty();
    for user in estimator.users() {
        bounds = bounds.union(&user.trace.bounds());
    }
    for landmark in estimator.landmarks() {
        bounds.expand_to_include(landmark.x, landmark.y);
    }
    bounds
}

/// Clear and redraw landmarks then traces.
///
/// If nothing has set a scale yet, or a trace or landmark ran off the
/// surface, the view is rescaled to the content bounds and redrawn once.
pub fn draw_scene<S, T>(
    renderer: &mut Renderer<S, T>,
    estimator: &dyn Estimator,
    style: &SceneStyle,
) -> SceneStats
where
    S: DrawingSurface,
    T: CoordinateTransform,
{
    let mut rescaled = false;
    if renderer.scale_factor().is_none() {
        rescaled = fit(renderer, estimator, style);
    }

    let (mut stats, overflow) = draw_once(renderer, estimator, style);
    if overflow && fit(renderer, estimator, style) {
        debug!("[SLAC] Content left the view, redrawing");
        rescaled = true;
        stats = draw_once(renderer, estimator, style).0;
    }

    stats.rescaled = rescaled;
    stats.scale = renderer.scale_factor();
    stats
}

fn fit<S, T>(renderer: &mut Renderer<S, T>, estimator: &dyn Estimator, style: &SceneStyle) -> bool
where
    S: DrawingSurface,
    T: CoordinateTransform,
{
    let bounds = content_bounds(estimator);
    if bounds.is_empty() {
        return false;
    }
    renderer.rescale(&bounds, style.padding);
    renderer.scale_factor().is_some()
}

fn draw_once<S, T>(
    renderer: &mut Renderer<S, T>,
    estimator: &dyn Estimator,
    style: &SceneStyle,
) -> (SceneStats, bool)
where
    S: DrawingSurface,
    T: CoordinateTransform,
{
    renderer.clear_canvas();

    let mut stats = SceneStats::default();
    let mut overflow = false;
    for landmark in estimator.landmarks() {
        overflow |= renderer.plot_object(&landmark, &style.landmark_color, style.object_size);
        stats.landmarks += 1;
    }

    for user in estimator.users() {
        overflow |= renderer.plot_user_trace(&user.trace, &style.trace_color, style.trace_width);
        stats.traces += 1;
    }
    (stats, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceObservation, Landmark, Pose, Trace};
    use crate::estimator::User;
    use crate::render::{DrawCommand, RecordingSurface, ScaledTransform};

    struct Fixed {
        users: Vec<User>,
        landmarks: Vec<Landmark>,
    }

    impl Estimator for Fixed {
        fn add_motion_observation(&mut self, _x: f64, _y: f64, _z: f64, _heading: f64) {}
        fn add_device_observation(&mut self, _observation: DeviceObservation) {}
        fn pause(&mut self) {}
        fn step_count(&self) -> u64 {
            0
        }
        fn users(&self) -> &[User] {
            &self.users
        }
        fn landmarks(&self) -> Vec<Landmark> {
            self.landmarks.clone()
        }
    }

    fn fixed(points: &[(f64, f64)]) -> Fixed {
        let trace: Trace = points
            .iter()
            .map(|&(x, y)| Pose::new(x, y, 0.0))
            .collect::<Vec<_>>()
            .into();
        Fixed {
            users: vec![User { id: 0, trace }],
            landmarks: vec![Landmark::named(-1.0, -1.0, "door"), Landmark::new(4.0, 2.0)],
        }
    }

    fn renderer() -> Renderer<RecordingSurface, ScaledTransform> {
        Renderer::new(
            "map",
            RecordingSurface::new(400, 200),
            ScaledTransform::default(),
        )
    }

    fn inside(commands: &[DrawCommand], width: f64, height: f64) -> bool {
        commands.iter().all(|c| match c {
            DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => {
                (0.0..=width).contains(x) && (0.0..=height).contains(y)
            }
            _ => true,
        })
    }

    #[test]
    fn test_content_bounds_covers_traces_and_landmarks() {
        let bounds = content_bounds(&fixed(&[(0.0, 0.0), (3.0, 5.0)]));
        assert_eq!(bounds, Bounds::new(-1.0, -1.0, 4.0, 5.0));
    }

    #[test]
    fn test_first_draw_fits_content() {
        let mut r = renderer();
        let stats = draw_scene(&mut r, &fixed(&[(0.0, 0.0), (3.0, 1.0)]), &SceneStyle::default());

        assert!(stats.rescaled);
        assert_eq!(stats.traces, 1);
        assert_eq!(stats.landmarks, 2);
        assert!(stats.scale.is_some());
        assert!(inside(r.surface().commands(), 400.0, 200.0));
    }

    #[test]
    fn test_growing_trace_triggers_rescale() {
        let mut r = renderer();
        let style = SceneStyle::default();
        draw_scene(&mut r, &fixed(&[(0.0, 0.0), (3.0, 1.0)]), &style);
        let first = r.scale_factor();

        let stats = draw_scene(&mut r, &fixed(&[(0.0, 0.0), (3.0, 1.0), (20.0, 1.0)]), &style);
        assert!(stats.rescaled);
        assert!(stats.scale < first);

        // Only the redraw survives the clear
        let commands = r.surface_mut().take_commands();
        let last_clear = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .unwrap();
        assert!(inside(&commands[last_clear..], 400.0, 200.0));
    }

    #[test]
    fn test_new_landmark_outside_view_triggers_rescale() {
        let mut r = renderer();
        let style = SceneStyle::default();
        let mut estimator = fixed(&[(0.0, 0.0), (3.0, 1.0)]);
        draw_scene(&mut r, &estimator, &style);
        let first = r.scale_factor();

        estimator.landmarks.push(Landmark::named(50.0, 1.0, "far"));
        let stats = draw_scene(&mut r, &estimator, &style);
        assert!(stats.rescaled);
        assert!(stats.scale < first);

        let commands = r.surface_mut().take_commands();
        let last_clear = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .unwrap();
        let far = commands[last_clear..]
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillText { text, x, .. } if text == "far" => Some(*x),
                _ => None,
            })
            .unwrap();
        assert!(far + 0.5 * style.object_size <= 400.0);
    }

    #[test]
    fn test_stable_content_keeps_scale() {
        let mut r = renderer();
        let style = SceneStyle::default();
        let estimator = fixed(&[(0.0, 0.0), (3.0, 1.0)]);
        draw_scene(&mut r, &estimator, &style);

        let stats = draw_scene(&mut r, &estimator, &style);
        assert!(!stats.rescaled);
    }
}
