//! Pan/zoom viewport controls and per-profile reader settings.
//!
//! [`viewport::ViewportController`] drives a [`engine::TransformEngine`] over a
//! content element, applying fit strategies and keeping content in bounds.
//! [`settings::SettingsStore`] holds the named settings profiles the
//! controller reads its policy from.

mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod settings;
pub mod viewport;

pub use engine::{
    EngineOptions, PanZoomEngine, TransformEngine, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
};
pub use error::{ViewerError, ViewerResult};
pub use geometry::{AlignX, AlignY, Point, Size, Transform};
pub use settings::{ConfigSource, Settings, SettingsStore, ViewerConfig, ZoomMode};
pub use viewport::{ContentElement, ControllerState, Environment, ViewportController};
