// renderer/canvas.rs
// Drawing surface abstraction and a recording implementation

use ultraviolet::Vec2;

/// Straight RGBA, 0-255 per channel.
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// Replace the alpha channel with `alpha` (0..=1) times the color's own alpha.
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    let a = (color[3] as f32 / 255.0) * alpha.clamp(0.0, 1.0);
    [color[0], color[1], color[2], (a * 255.0).round() as u8]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// (on, off) lengths in pixels
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Rgba, width: f32, dash: (f32, f32)) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

/// Minimal 2D surface the field renderer draws onto. Coordinates are pixels, y down.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba);
    fn stroke_rect(&mut self, min: Vec2, max: Vec2, stroke: Stroke);
    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Text centered horizontally on `anchor`, baseline at `anchor.y`.
    fn draw_text(&mut self, anchor: Vec2, text: &str, color: Rgba);

    fn is_empty(&self) -> bool {
        let (w, h) = self.size();
        w == 0 || h == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { min: Vec2, max: Vec2, color: Rgba },
    StrokeRect { min: Vec2, max: Vec2, stroke: Stroke },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Text { anchor: Vec2, text: String, color: Rgba },
}

/// Records every call in order. Useful for headless inspection of a frame.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }

    fn stroke_rect(&mut self, min: Vec2, max: Vec2, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRect { min, max, stroke });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn draw_text(&mut self, anchor: Vec2, text: &str, color: Rgba) {
        self.commands.push(DrawCommand::Text { anchor, text: text.to_string(), color });
    }
}
