//! SVG drawing surface.
//!
//! Translates immediate-mode drawing calls into SVG elements so a rendered
//! map can be written to disk and inspected:
//! - `stroke` emits the current path as `<path>`
//! - `fill_rect` emits `<rect>`
//! - `fill_text` emits `<text>`
//!
//! The document's `width`/`height` are the layout size and its `viewBox` is
//! the backing buffer, so an oversampled buffer displays at layout size.

use std::path::Path;

use super::surface::{DrawingSurface, LineJoin, Transform2D};

#[derive(Clone, Debug)]
struct SvgState {
    transform: Transform2D,
    fill: String,
    stroke: String,
    line_width: f64,
    line_join: LineJoin,
    font: String,
}

impl Default for SvgState {
    fn default() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            line_join: LineJoin::Miter,
            font: "10px sans-serif".to_string(),
        }
    }
}

/// Drawing surface producing an SVG document
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    display: (u32, u32),
    device_pixel_ratio: f64,
    background: String,
    state: SvgState,
    stack: Vec<SvgState>,
    path: String,
    elements: Vec<String>,
}

impl SvgSurface {
    /// Surface with matching layout and backing sizes
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_pixel_ratio(width, height, 1.0)
    }

    /// Surface reporting the given device pixel ratio
    pub fn with_pixel_ratio(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            display: (width, height),
            device_pixel_ratio,
            background: "#FFFFFF".to_string(),
            state: SvgState::default(),
            stack: Vec::new(),
            path: String::new(),
            elements: Vec::new(),
        }
    }

    /// Number of drawn elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Render the document
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.display.0, self.display.1, self.width, self.height
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.background)
        ));
        svg.push('\n');
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the document to `path`
    pub fn write_to(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, self.to_svg())?;
        log::info!("Saved SVG to: {}", path.display());
        Ok(())
    }

    fn transform_attr(&self) -> String {
        let t = self.state.transform;
        if t.is_identity() {
            String::new()
        } else {
            format!(
                r#" transform="matrix({} {} {} {} {} {})""#,
                t.a, t.b, t.c, t.d, t.e, t.f
            )
        }
    }
}

impl DrawingSurface for SvgSurface {
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
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.state.transform = transform;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let covers_all = self.state.transform.is_identity()
            && x <= 0.0
            && y <= 0.0
            && x + width >= f64::from(self.width)
            && y + height >= f64::from(self.height);
        if covers_all {
            self.elements.clear();
            return;
        }

        let element = format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"{}/>"#,
            x,
            y,
            width,
            height,
            escape_xml(&self.background),
            self.transform_attr()
        );
        self.elements.push(element);
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_fill_style(&mut self, style: &str) {
        self.state.fill = style.to_string();
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.state.stroke = style.to_string();
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = font.to_string();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push_str(&format!("M {:.1} {:.1}", x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        // Canvas treats a leading line_to as move_to
        let op = if self.path.is_empty() { "M" } else { " L" };
        self.path.push_str(&format!("{} {:.1} {:.1}", op, x, y));
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let element = format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="{}"{}/>"#,
            self.path,
            escape_xml(&self.state.stroke),
            self.state.line_width,
            self.state.line_join.as_str(),
            self.transform_attr()
        );
        self.elements.push(element);
    }

    fn close_path(&mut self) {
        if !self.path.is_empty() {
            self.path.push_str(" Z");
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let element = format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"{}/>"#,
            x,
            y,
            width,
            height,
            escape_xml(&self.state.fill),
            self.transform_attr()
        );
        self.elements.push(element);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let element = format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{}" style="font: {}"{}>{}</text>"#,
            x,
            y,
            escape_xml(&self.state.fill),
            escape_xml(&self.state.font),
            self.transform_attr(),
            escape_xml(text)
        );
        self.elements.push(element);
    }
}

/// Escape text content and attribute values
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
