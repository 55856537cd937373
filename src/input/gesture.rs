use crate::geometry::Point;
use crate::settings::ViewerConfig;

/// Share of the smaller viewport side moved per arrow-key press.
const KEYBOARD_PAN_RATIO: f64 = 0.05;
const WHEEL_ZOOM_SPEED: f64 = 0.065;
const WHEEL_ZOOM_MAX_STEP: f64 = 0.25;
const WHEEL_DELTA_UNIT: f64 = 128.0;
const MIN_TOUCH_POINTS_FOR_PAN: usize = 2;

/// What was under the pointer when a press started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A text paragraph; presses here select text.
    TextParagraph,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDownEvent {
    pub position: Point,
    pub target: PointerTarget,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub delta_y: f64,
    /// Control or command held.
    pub zoom_modifier: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Character(char),
    Other,
}

/// Whether the input was consumed by the viewer or left to native handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Handled,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGate {
    Pan,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelGate {
    /// Scroll content vertically by this many pixels.
    Scroll(f64),
    /// Zoom about the pointer by this factor.
    Zoom(f64),
}

pub fn resolve_pointer_down(target: PointerTarget, config: &ViewerConfig) -> PointerGate {
    if target == PointerTarget::TextParagraph || config.disable_mouse_pan {
        return PointerGate::Native;
    }
    PointerGate::Pan
}

pub fn resolve_wheel(event: &WheelEvent) -> WheelGate {
    if event.zoom_modifier {
        WheelGate::Zoom(wheel_zoom_factor(event.delta_y))
    } else {
        WheelGate::Scroll(-event.delta_y)
    }
}

/// Scale multiplier for one wheel step; scrolling down zooms out.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return 1.0;
    }
    let step = (WHEEL_ZOOM_SPEED * delta_y / WHEEL_DELTA_UNIT)
        .abs()
        .min(WHEEL_ZOOM_MAX_STEP);
    1.0 - delta_y.signum() * step
}

pub fn resolve_touch(touch_count: usize) -> bool {
    touch_count >= MIN_TOUCH_POINTS_FOR_PAN
}

/// Unit pan direction for a key, or `None` when the key is not a viewer key.
pub fn resolve_key(key: Key, config: &ViewerConfig) -> Option<(f64, f64)> {
    if config.disable_arrow_keys {
        return None;
    }
    match key {
        Key::ArrowLeft => Some((1.0, 0.0)),
        Key::ArrowRight => Some((-1.0, 0.0)),
        Key::ArrowUp => Some((0.0, 1.0)),
        Key::ArrowDown => Some((0.0, -1.0)),
        Key::Character(_) | Key::Other => None,
    }
}

pub fn keyboard_pan_step(viewport_width: f64, viewport_height: f64) -> f64 {
    viewport_width.min(viewport_height) * KEYBOARD_PAN_RATIO
}

/// Centroid and average spread of an active multi-touch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchFrame {
    pub centroid: Point,
    pub spread: f64,
}

impl TouchFrame {
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let centroid = Point::centroid(points)?;
        let spread = points
            .iter()
            .map(|point| point.distance(centroid))
            .sum::<f64>()
            / points.len() as f64;
        Some(Self { centroid, spread })
    }

    /// Zoom factor between two frames; `1.0` when the earlier spread is degenerate.
    pub fn pinch_ratio(&self, previous: &Self) -> f64 {
        if previous.spread <= f64::EPSILON || self.spread <= f64::EPSILON {
            return 1.0;
        }
        self.spread / previous.spread
    }
}
