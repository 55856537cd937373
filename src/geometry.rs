//! Shared geometric primitives used by the engine and the viewport controller.

/// Horizontal share of the viewport kept as a margin by bounds enforcement.
const MARGIN_X_RATIO: f64 = 0.001;
/// Vertical share of the viewport kept as a margin by bounds enforcement.
const MARGIN_Y_RATIO: f64 = 0.01;

/// Affine map from content-local coordinates to viewport coordinates.
///
/// A content point `(cx, cy)` renders at `(x + cx * scale, y + cy * scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    pub fn content_to_viewport(&self, point: Point) -> Point {
        Point::new(self.x + point.x * self.scale, self.y + point.y * self.scale)
    }

    pub fn viewport_to_content(&self, point: Point) -> Point {
        Point::new((point.x - self.x) / self.scale, (point.y - self.y) / self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Average of `points`, or `None` when the slice is empty.
    pub fn centroid(points: &[Self]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let count = points.len() as f64;
        let (sum_x, sum_y) = points
            .iter()
            .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
        Some(Self::new(sum_x / count, sum_y / count))
    }
}

/// Width/height pair. Used both for the viewport (`innerWidth`/`innerHeight`)
/// and for the unscaled content element (`offsetWidth`/`offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignX {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignY {
    Top,
    Center,
    Bottom,
}

impl AlignX {
    /// Offset placing `content_width` at this position inside `viewport_width`.
    pub fn offset(self, viewport_width: f64, content_width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => (viewport_width - content_width) / 2.0,
            Self::Right => viewport_width - content_width,
        }
    }
}

impl AlignY {
    pub fn offset(self, viewport_height: f64, content_height: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => (viewport_height - content_height) / 2.0,
            Self::Bottom => viewport_height - content_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsMargins {
    pub x: f64,
    pub y: f64,
}

impl BoundsMargins {
    pub fn for_viewport(viewport: Size) -> Self {
        Self {
            x: viewport.width * MARGIN_X_RATIO,
            y: viewport.height * MARGIN_Y_RATIO,
        }
    }
}
