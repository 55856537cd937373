//! Transform engine contract driven by the viewport controller.

mod panzoom;

use crate::geometry::Transform;

pub use panzoom::PanZoomEngine;

/// Zoom-out floor the reader starts from: ten 0.8 steps below rest (`0.8^10`).
pub const DEFAULT_MIN_ZOOM: f64 = 0.107_374_182_4;
/// Zoom-in ceiling: ten 1.25 steps above rest (`1.25^10`).
pub const DEFAULT_MAX_ZOOM: f64 = 9.313_225_746_154_785;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Scale multiplier applied about the pointer on double-click.
    pub zoom_double_click_speed: f64,
    pub enable_text_selection: bool,
}

impl EngineOptions {
    /// Options the reader mounts its page container with.
    pub const fn reader() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_double_click_speed: 1.0,
            enable_text_selection: true,
        }
    }

    pub fn double_click_factor(&self) -> f64 {
        self.zoom_double_click_speed
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::reader()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformEventKind {
    Pan,
    Zoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Owner of a pan/zoom transform.
///
/// Change notifications are queued per subscription and collected with
/// [`TransformEngine::take_pending`]; nothing is queued while paused.
/// [`TransformEngine::set_transform`] writes in place and never notifies.
pub trait TransformEngine {
    fn with_options(options: EngineOptions) -> Self
    where
        Self: Sized;

    fn options(&self) -> EngineOptions;
    fn transform(&self) -> Transform;
    fn set_transform(&mut self, transform: Transform);
    fn move_to(&mut self, x: f64, y: f64);
    fn move_by(&mut self, dx: f64, dy: f64, animate: bool);
    /// Scales by `factor` relative to the current scale, keeping the viewport
    /// point `(focal_x, focal_y)` fixed. The result stays inside the zoom range.
    fn zoom_to(&mut self, focal_x: f64, focal_y: f64, factor: f64);
    fn min_zoom(&self) -> f64;
    fn max_zoom(&self) -> f64;
    fn set_min_zoom(&mut self, scale: f64);
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
    fn subscribe(&mut self, kind: TransformEventKind) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
    /// Returns and clears the number of notifications queued for `id`.
    fn take_pending(&mut self, id: SubscriptionId) -> usize;
}
