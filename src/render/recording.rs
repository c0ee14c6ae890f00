//! Headless surface that records every drawing call.

use std::collections::HashMap;

use super::surface::{DrawingSurface, LineJoin, SurfaceProvider, Transform2D};

/// One recorded drawing call; fields mirror the surface method arguments
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetTransform(Transform2D),
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    SetLineJoin(LineJoin),
    SetLineWidth(f64),
    SetFillStyle(String),
    SetStrokeStyle(String),
    SetFont(String),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
    ClosePath,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    FillText { text: String, x: f64, y: f64 },
}

#[derive(Clone, Debug, Default)]
struct DrawState {
    transform: Transform2D,
    fill_style: String,
    stroke_style: String,
}

/// Drawing surface that keeps a log of calls instead of pixels.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    display: (u32, u32),
    device_pixel_ratio: f64,
    state: DrawState,
    stack: Vec<DrawState>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Surface whose backing buffer matches its layout size
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_pixel_ratio(width, height, 1.0)
    }

    /// Surface on a display with the given device pixel ratio
    pub fn with_pixel_ratio(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            display: (width, height),
            device_pixel_ratio,
            state: DrawState::default(),
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Calls recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded calls, leaving the log empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Layout width as a CSS length
    pub fn style_width(&self) -> String {
        format!("{}px", self.display.0)
    }

    /// Layout height as a CSS length
    pub fn style_height(&self) -> String {
        format!("{}px", self.display.1)
    }

    /// Transform currently in effect
    pub fn current_transform(&self) -> Transform2D {
        self.state.transform
    }

    /// Fill style currently in effect
    pub fn fill_style(&self) -> &str {
        &self.state.fill_style
    }

    /// Stroke style currently in effect
    pub fn stroke_style(&self) -> &str {
        &self.state.stroke_style
    }

    /// Depth of the save stack
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn set_display_size(&mut self, width: u32, height: u32) {
        self.display = (width, height);
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.state.transform = transform;
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.commands.push(DrawCommand::SetLineJoin(join));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.state.fill_style = style.to_string();
        self.commands.push(DrawCommand::SetFillStyle(style.to_string()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.state.stroke_style = style.to_string();
        self.commands.push(DrawCommand::SetStrokeStyle(style.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

/// Surfaces registered by identifier.
pub struct SurfaceRegistry<S: DrawingSurface> {
    surfaces: HashMap<String, S>,
}

impl<S: DrawingSurface> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<S: DrawingSurface> SurfaceRegistry<S> {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface, replacing any previous one with the same id
    pub fn register(&mut self, id: impl Into<String>, surface: S) {
        self.surfaces.insert(id.into(), surface);
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, id: impl Into<String>, surface: S) -> Self {
        self.register(id, surface);
        self
    }

    /// Number of surfaces still available
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// No surfaces available
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<S: DrawingSurface> SurfaceProvider for SurfaceRegistry<S> {
    type Surface = S;

    fn take_surface(&mut self, id: &str) -> Option<S> {
        self.surfaces.remove(id)
    }
}
