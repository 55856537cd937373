//! Viewport controller: fit/align strategies, dynamic zoom floor, and bounds
//! enforcement over a [`crate::engine::TransformEngine`].

mod bounds;
mod controller;
mod environment;

pub use bounds::bounded_transform;
pub use controller::{ControllerState, ViewportController};
pub use environment::{ContentElement, Environment};
