//! Flat 2-D scene description shared by the raster and text backends.

use glam::Vec2;

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

/// A filled primitive in scene coordinates (origin bottom-left, y up).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        center: Vec2,
        half_extents: Vec2,
        color: Color,
    },
    /// Convex quadrilateral, corners in winding order.
    Quad { corners: [Vec2; 4], color: Color },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// One pixel wide segment.
    Line { from: Vec2, to: Vec2, color: Color },
}

impl Shape {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Shape::Rect { color, .. }
            | Shape::Quad { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Line { color, .. } => *color,
        }
    }

    /// Glyph used when the shape is drawn on a [`crate::TextCanvas`].
    #[must_use]
    pub fn glyph(&self) -> char {
        match self {
            Shape::Rect { .. } => '#',
            Shape::Quad { .. } => '*',
            Shape::Circle { .. } => 'o',
            Shape::Line { .. } => '-',
        }
    }

    /// Inclusive bounding box `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self {
            Shape::Rect {
                center,
                half_extents,
                ..
            } => (*center - *half_extents, *center + *half_extents),
            Shape::Quad { corners, .. } => corners[1..]
                .iter()
                .fold((corners[0], corners[0]), |(lo, hi), c| (lo.min(*c), hi.max(*c))),
            Shape::Circle { center, radius, .. } => {
                (*center - Vec2::splat(*radius), *center + Vec2::splat(*radius))
            }
            Shape::Line { from, to, .. } => (
                from.min(*to) - Vec2::splat(0.5),
                from.max(*to) + Vec2::splat(0.5),
            ),
        }
    }

    /// Whether the point `p` is covered by the shape.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Shape::Rect {
                center,
                half_extents,
                ..
            } => {
                let d = (p - *center).abs();
                d.x <= half_extents.x && d.y <= half_extents.y
            }
            Shape::Quad { corners, .. } => quad_contains(corners, p),
            Shape::Circle { center, radius, .. } => p.distance_squared(*center) <= radius * radius,
            Shape::Line { from, to, .. } => segment_distance(*from, *to, p) <= 0.5,
        }
    }
}

fn quad_contains(corners: &[Vec2; 4], p: Vec2) -> bool {
    let mut winding: Option<bool> = None;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let cross = (b - a).perp_dot(p - a);
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        let positive = cross > 0.0;
        match winding {
            None => winding = Some(positive),
            Some(w) if w != positive => return false,
            Some(_) => {}
        }
    }
    true
}

fn segment_distance(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    /// Drawn in order, later shapes on top.
    pub shapes: Vec<Shape>,
}

impl Scene {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    /// Topmost shape covering `p`, if any.
    #[must_use]
    pub fn shape_at(&self, p: Vec2) -> Option<&Shape> {
        self.shapes.iter().rev().find(|s| s.contains(p))
    }
}
