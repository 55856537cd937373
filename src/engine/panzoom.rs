use super::{EngineOptions, SubscriptionId, TransformEngine, TransformEventKind};
use crate::geometry::Transform;

#[derive(Debug, Clone)]
struct Subscription {
    id: SubscriptionId,
    kind: TransformEventKind,
    pending: usize,
}

/// In-memory transform engine.
///
/// There is no animation clock: animated moves land immediately.
#[derive(Debug, Clone)]
pub struct PanZoomEngine {
    options: EngineOptions,
    transform: Transform,
    min_zoom: f64,
    max_zoom: f64,
    paused: bool,
    subscriptions: Vec<Subscription>,
    next_subscription: u64,
}

impl PanZoomEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            transform: Transform::IDENTITY,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            paused: false,
            subscriptions: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn emit(&mut self, kind: TransformEventKind) {
        if self.paused {
            return;
        }
        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|subscription| subscription.kind == kind)
        {
            subscription.pending += 1;
        }
    }
}

impl Default for PanZoomEngine {
    fn default() -> Self {
        Self::new(EngineOptions::reader())
    }
}

impl TransformEngine for PanZoomEngine {
    fn with_options(options: EngineOptions) -> Self {
        Self::new(options)
    }

    fn options(&self) -> EngineOptions {
        self.options
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.transform.x = x;
        self.transform.y = y;
        self.emit(TransformEventKind::Pan);
    }

    fn move_by(&mut self, dx: f64, dy: f64, _animate: bool) {
        self.move_to(self.transform.x + dx, self.transform.y + dy);
    }

    fn zoom_to(&mut self, focal_x: f64, focal_y: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let scale = self.transform.scale;
        let mut ratio = factor;
        if scale * ratio < self.min_zoom {
            if scale == self.min_zoom {
                return;
            }
            ratio = self.min_zoom / scale;
        }
        if scale * ratio > self.max_zoom {
            if scale == self.max_zoom {
                return;
            }
            ratio = self.max_zoom / scale;
        }

        self.transform.x = focal_x - ratio * (focal_x - self.transform.x);
        self.transform.y = focal_y - ratio * (focal_y - self.transform.y);
        self.transform.scale = scale * ratio;
        self.emit(TransformEventKind::Zoom);
    }

    fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    fn set_min_zoom(&mut self, scale: f64) {
        self.min_zoom = scale;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn subscribe(&mut self, kind: TransformEventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            pending: 0,
        });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    fn take_pending(&mut self, id: SubscriptionId) -> usize {
        self.subscriptions
            .iter_mut()
            .find(|subscription| subscription.id == id)
            .map_or(0, |subscription| std::mem::take(&mut subscription.pending))
    }
}
