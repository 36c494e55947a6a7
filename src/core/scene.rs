//! Retained diagram primitives
//!
//! Diagrams are built as a flat list of shapes in a fixed view-box
//! coordinate space (y down). The UI scales the view box into whatever rect
//! it has and maps [`Paint`] onto the active theme.

/// Colour reference; semantic variants follow the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Rgb(u8, u8, u8),
    /// Body text
    Text,
    /// Secondary captions
    TextMuted,
    /// Neutral outlines (racks, frames)
    Outline,
    /// Neutral fills (mini racks)
    Faint,
    White,
}

/// Horizontal text anchor; y is the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    Start,
    #[default]
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub paint: Paint,
    /// (dash, gap) lengths for dashed strokes
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn solid(width: f32, paint: Paint) -> Self {
        Self {
            width,
            paint,
            dash: None,
        }
    }

    pub fn dashed(width: f32, paint: Paint, dash: f32, gap: f32) -> Self {
        Self {
            width,
            paint,
            dash: Some((dash, gap)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub size: [f32; 2],
    pub radius: f32,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: [x, y],
            size: [w, h],
            radius: 0.0,
            fill: None,
            stroke: None,
            opacity: 1.0,
        }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn fill(mut self, paint: Paint) -> Self {
        self.fill = Some(paint);
        self
    }

    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub stroke: Stroke,
    pub opacity: f32,
}

impl Line {
    pub fn new(from: [f32; 2], to: [f32; 2], stroke: Stroke) -> Self {
        Self {
            from,
            to,
            stroke,
            opacity: 1.0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: [f32; 2],
    pub radius: f32,
    pub fill: Paint,
    pub opacity: f32,
}

impl Circle {
    pub fn new(center: [f32; 2], radius: f32, fill: Paint) -> Self {
        Self {
            center,
            radius,
            fill,
            opacity: 1.0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub at: [f32; 2],
    pub text: String,
    pub size: f32,
    pub paint: Paint,
    pub bold: bool,
    pub anchor: Anchor,
}

impl Text {
    pub fn new(x: f32, y: f32, text: impl Into<String>, size: f32) -> Self {
        Self {
            at: [x, y],
            text: text.into(),
            size,
            paint: Paint::Text,
            bold: false,
            anchor: Anchor::Middle,
        }
    }

    pub fn paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Line(Line),
    Circle(Circle),
    Text(Text),
}

impl From<Rect> for Primitive {
    fn from(r: Rect) -> Self {
        Primitive::Rect(r)
    }
}

impl From<Line> for Primitive {
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Text> for Primitive {
    fn from(t: Text) -> Self {
        Primitive::Text(t)
    }
}

/// A diagram: view-box size plus shapes in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub items: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, item: impl Into<Primitive>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.items.iter().filter_map(|p| match p {
            Primitive::Rect(r) => Some(r),
            _ => None,
        })
    }

    /// Rects filled with exactly `paint`
    pub fn count_filled(&self, paint: Paint) -> usize {
        self.rects().filter(|r| r.fill == Some(paint)).count()
    }
}
