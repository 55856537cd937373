use super::bounds::bounded_transform;
use super::environment::{ContentElement, Environment};
use crate::engine::{
    EngineOptions, PanZoomEngine, SubscriptionId, TransformEngine, TransformEventKind,
    DEFAULT_MIN_ZOOM,
};
use crate::error::{ViewerError, ViewerResult};
use crate::geometry::{AlignX, AlignY, Point, Size, Transform};
use crate::input::{
    keyboard_pan_step, resolve_key, resolve_pointer_down, resolve_touch, resolve_wheel,
    InputOutcome, Key, PointerDownEvent, PointerGate, TouchFrame, WheelEvent, WheelGate,
};
use crate::settings::{ConfigSource, ViewerConfig, ZoomMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Bound,
}

#[derive(Debug, Default)]
struct GestureState {
    drag_from: Option<Point>,
    touch: Option<TouchFrame>,
}

#[derive(Debug)]
struct Binding<C, E> {
    container: C,
    engine: E,
    subscriptions: Vec<SubscriptionId>,
    gesture: GestureState,
}

/// Pan/zoom policy for one viewer instance.
///
/// Before [`ViewportController::initialize`] every operation is a silent no-op.
/// Once bound, every pan or zoom raised through the controller is followed by
/// [`ViewportController::keep_in_bounds`].
#[derive(Debug)]
pub struct ViewportController<Env, Cfg, C, E = PanZoomEngine> {
    environment: Env,
    config: Cfg,
    binding: Option<Binding<C, E>>,
}

impl<Env, Cfg, C, E> ViewportController<Env, Cfg, C, E>
where
    Env: Environment,
    Cfg: ConfigSource,
    C: ContentElement,
    E: TransformEngine,
{
    pub fn new(environment: Env, config: Cfg) -> Self {
        Self {
            environment,
            config,
            binding: None,
        }
    }

    /// Binds to `container` with a reader-configured engine.
    pub fn initialize(&mut self, container: C) {
        self.initialize_with_engine(container, E::with_options(EngineOptions::reader()));
    }

    /// Binds to `container` driving `engine`, replacing any previous binding.
    pub fn initialize_with_engine(&mut self, container: C, mut engine: E) {
        self.teardown();
        let subscriptions = vec![
            engine.subscribe(TransformEventKind::Pan),
            engine.subscribe(TransformEventKind::Zoom),
        ];
        tracing::debug!(
            content = ?container.offset_size(),
            min_zoom = engine.min_zoom(),
            max_zoom = engine.max_zoom(),
            "viewport controller bound"
        );
        self.binding = Some(Binding {
            container,
            engine,
            subscriptions,
            gesture: GestureState::default(),
        });
    }

    /// Deregisters change listeners and unbinds, handing back the container and engine.
    pub fn teardown(&mut self) -> Option<(C, E)> {
        let mut binding = self.binding.take()?;
        for id in binding.subscriptions.drain(..) {
            binding.engine.unsubscribe(id);
        }
        tracing::debug!("viewport controller unbound");
        Some((binding.container, binding.engine))
    }

    pub fn state(&self) -> ControllerState {
        if self.binding.is_some() {
            ControllerState::Bound
        } else {
            ControllerState::Uninitialized
        }
    }

    pub fn require_bound(&self) -> ViewerResult<()> {
        match self.state() {
            ControllerState::Bound => Ok(()),
            ControllerState::Uninitialized => Err(ViewerError::NotReady),
        }
    }

    pub fn transform(&self) -> Option<Transform> {
        self.binding.as_ref().map(|binding| binding.engine.transform())
    }

    pub fn min_zoom(&self) -> Option<f64> {
        self.binding.as_ref().map(|binding| binding.engine.min_zoom())
    }

    pub fn engine(&self) -> Option<&E> {
        self.binding.as_ref().map(|binding| &binding.engine)
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.binding.as_mut().map(|binding| &mut binding.engine)
    }

    pub fn container(&self) -> Option<&C> {
        self.binding.as_ref().map(|binding| &binding.container)
    }

    pub fn config(&self) -> &Cfg {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Cfg {
        &mut self.config
    }

    pub fn environment(&self) -> &Env {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Env {
        &mut self.environment
    }

    /// Places the scaled content at the given position inside the viewport.
    ///
    /// Change notifications are paused for the move, so no bounds check runs.
    pub fn align_to(&mut self, align_x: AlignX, align_y: AlignY) {
        let viewport = self.environment.viewport_size();
        let Some(binding) = self.binding.as_mut() else {
            tracing::debug!("align skipped: controller not bound");
            return;
        };
        let content = binding
            .container
            .offset_size()
            .scaled(binding.engine.transform().scale);
        let x = align_x.offset(viewport.width, content.width);
        let y = align_y.offset(viewport.height, content.height);
        tracing::debug!(?align_x, ?align_y, x, y, "align content");

        binding.engine.pause();
        binding.engine.move_to(x, y);
        binding.engine.resume();
        self.dispatch_changes();
    }

    /// One content pixel per viewport pixel, pinned top-center.
    pub fn zoom_to_original(&mut self) {
        let Some(scale) = self.transform().map(|transform| transform.scale) else {
            tracing::debug!("zoom to original skipped: controller not bound");
            return;
        };
        self.zoom_from_origin(1.0 / scale);
        self.align_to(AlignX::Center, AlignY::Top);
        self.set_dynamic_min_zoom(1.0);
    }

    pub fn zoom_fit_to_width(&mut self) {
        let Some((viewport, content, scale)) = self.fit_inputs() else {
            tracing::debug!("fit to width skipped: controller not bound");
            return;
        };
        let Some(scale_x) = fit_ratio(viewport.width, content.width) else {
            tracing::debug!(?content, ?viewport, "fit to width skipped: empty geometry");
            return;
        };
        self.zoom_from_origin(scale_x / scale);
        self.align_to(AlignX::Center, AlignY::Top);
        self.raise_zoom_floor_to_current();
    }

    /// Fits the configured target height unless that would overflow the
    /// viewport horizontally, in which case width wins.
    pub fn zoom_fit_to_height(&mut self) {
        let Some((viewport, content, scale)) = self.fit_inputs() else {
            tracing::debug!("fit to height skipped: controller not bound");
            return;
        };
        let target_height = f64::from(self.config.viewer_config().height_size.pixels());
        let (Some(scale_y), Some(scale_x)) = (
            fit_ratio(target_height, content.height),
            fit_ratio(viewport.width, content.width),
        ) else {
            tracing::debug!(?content, ?viewport, "fit to height skipped: empty geometry");
            return;
        };

        let target = if content.width * scale_y > viewport.width {
            scale_x
        } else {
            scale_y
        };
        tracing::debug!(target_height, target, "fit to height");
        self.zoom_from_origin(target / scale);
        self.raise_zoom_floor_to_current();
        self.align_to(AlignX::Center, AlignY::Top);
    }

    pub fn zoom_fit_to_screen(&mut self) {
        let Some((viewport, content, scale)) = self.fit_inputs() else {
            tracing::debug!("fit to screen skipped: controller not bound");
            return;
        };
        let (Some(scale_x), Some(scale_y)) = (
            fit_ratio(viewport.width, content.width),
            fit_ratio(viewport.height, content.height),
        ) else {
            tracing::debug!(?content, ?viewport, "fit to screen skipped: empty geometry");
            return;
        };
        self.zoom_from_origin(scale_x.min(scale_y) / scale);
        self.raise_zoom_floor_to_current();
        self.align_to(AlignX::Center, AlignY::Center);
    }

    /// Keeps the current scale for a new page: re-centers top and drops the floor.
    pub fn keep_zoom_start(&mut self) {
        if self.binding.is_none() {
            tracing::debug!("keep zoom start skipped: controller not bound");
            return;
        }
        self.align_to(AlignX::Center, AlignY::Top);
        self.set_dynamic_min_zoom(DEFAULT_MIN_ZOOM);
    }

    pub fn apply_default_zoom_strategy(&mut self) {
        if self.binding.is_none() {
            tracing::debug!("default zoom skipped: controller not bound");
            return;
        }
        let mode = self.config.viewer_config().zoom_default;
        tracing::debug!(?mode, "apply default zoom strategy");
        if mode == ZoomMode::KeepZoom {
            return;
        }

        self.set_dynamic_min_zoom(DEFAULT_MIN_ZOOM);
        match mode {
            ZoomMode::FitToScreen => self.zoom_fit_to_screen(),
            ZoomMode::FitToWidth => self.zoom_fit_to_width(),
            ZoomMode::FitToHeight => self.zoom_fit_to_height(),
            ZoomMode::Original => self.zoom_to_original(),
            ZoomMode::KeepZoomStart => self.keep_zoom_start(),
            ZoomMode::KeepZoom => {}
        }
    }

    /// Sets the zoom-out floor. No validation against the current scale.
    pub fn set_dynamic_min_zoom(&mut self, scale: f64) {
        if let Some(binding) = self.binding.as_mut() {
            binding.engine.set_min_zoom(scale);
        }
    }

    /// Pulls the transform back inside the viewport when bounds are enforced
    /// (mobile mode or the bounds setting).
    pub fn keep_in_bounds(&mut self) {
        let viewport = self.environment.viewport_size();
        let config = self.config.viewer_config();
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if !config.enforces_bounds() {
            return;
        }

        let current = binding.engine.transform();
        let bounded = bounded_transform(current, binding.container.offset_size(), viewport);
        if bounded != current {
            tracing::trace!(?current, ?bounded, "transform pulled back into bounds");
            binding.engine.set_transform(bounded);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.environment.is_fullscreen() {
            self.environment.exit_fullscreen();
        } else {
            self.environment.request_fullscreen();
        }
    }

    pub fn pointer_down(&mut self, event: PointerDownEvent) -> InputOutcome {
        let config = self.config.viewer_config();
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        match resolve_pointer_down(event.target, &config) {
            PointerGate::Pan => {
                binding.gesture.drag_from = Some(event.position);
                InputOutcome::Handled
            }
            PointerGate::Native => InputOutcome::Native,
        }
    }

    pub fn pointer_move(&mut self, position: Point) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        let Some(from) = binding.gesture.drag_from.replace(position) else {
            binding.gesture.drag_from = None;
            return InputOutcome::Native;
        };
        binding
            .engine
            .move_by(position.x - from.x, position.y - from.y, false);
        self.dispatch_changes();
        InputOutcome::Handled
    }

    pub fn pointer_up(&mut self) -> InputOutcome {
        match self
            .binding
            .as_mut()
            .and_then(|binding| binding.gesture.drag_from.take())
        {
            Some(_) => InputOutcome::Handled,
            None => InputOutcome::Native,
        }
    }

    pub fn wheel(&mut self, event: WheelEvent) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        match resolve_wheel(&event) {
            WheelGate::Scroll(dy) => binding.engine.move_by(0.0, dy, false),
            WheelGate::Zoom(factor) => {
                binding
                    .engine
                    .zoom_to(event.position.x, event.position.y, factor);
            }
        }
        self.dispatch_changes();
        InputOutcome::Handled
    }

    pub fn double_click(&mut self, position: Point) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        let factor = binding.engine.options().double_click_factor();
        if factor == 1.0 {
            return InputOutcome::Handled;
        }
        binding.engine.zoom_to(position.x, position.y, factor);
        self.dispatch_changes();
        InputOutcome::Handled
    }

    pub fn touch_start(&mut self, points: &[Point]) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        if !resolve_touch(points.len()) {
            binding.gesture.touch = None;
            return InputOutcome::Native;
        }
        binding.gesture.touch = TouchFrame::from_points(points);
        InputOutcome::Handled
    }

    /// Pans by the centroid delta and pinch-zooms about the new centroid.
    pub fn touch_move(&mut self, points: &[Point]) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        let Some(previous) = binding.gesture.touch else {
            return InputOutcome::Native;
        };
        let frame = if resolve_touch(points.len()) {
            TouchFrame::from_points(points)
        } else {
            None
        };
        let Some(frame) = frame else {
            binding.gesture.touch = None;
            return InputOutcome::Native;
        };
        binding.gesture.touch = Some(frame);

        binding.engine.move_by(
            frame.centroid.x - previous.centroid.x,
            frame.centroid.y - previous.centroid.y,
            false,
        );
        self.dispatch_changes();

        let ratio = frame.pinch_ratio(&previous);
        if (ratio - 1.0).abs() > f64::EPSILON {
            if let Some(binding) = self.binding.as_mut() {
                binding
                    .engine
                    .zoom_to(frame.centroid.x, frame.centroid.y, ratio);
            }
            self.dispatch_changes();
        }
        InputOutcome::Handled
    }

    /// `remaining` are the touch points still down after the lift.
    pub fn touch_end(&mut self, remaining: &[Point]) -> InputOutcome {
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        let was_touching = binding.gesture.touch.is_some();
        binding.gesture.touch = if resolve_touch(remaining.len()) {
            TouchFrame::from_points(remaining)
        } else {
            None
        };
        if was_touching {
            InputOutcome::Handled
        } else {
            InputOutcome::Native
        }
    }

    pub fn key_down(&mut self, key: Key) -> InputOutcome {
        let viewport = self.environment.viewport_size();
        let config = self.config.viewer_config();
        let Some(binding) = self.binding.as_mut() else {
            return InputOutcome::Native;
        };
        let Some((direction_x, direction_y)) = resolve_key(key, &config) else {
            return InputOutcome::Native;
        };
        let step = keyboard_pan_step(viewport.width, viewport.height);
        binding
            .engine
            .move_by(direction_x * step, direction_y * step, false);
        self.dispatch_changes();
        InputOutcome::Handled
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        self.config.viewer_config()
    }

    /// Runs the bounds check once per change notification queued for our listeners.
    fn dispatch_changes(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        let engine = &mut binding.engine;
        let pending: usize = binding
            .subscriptions
            .iter()
            .map(|id| engine.take_pending(*id))
            .sum();
        for _ in 0..pending {
            self.keep_in_bounds();
        }
    }

    fn fit_inputs(&self) -> Option<(Size, Size, f64)> {
        let binding = self.binding.as_ref()?;
        Some((
            self.environment.viewport_size(),
            binding.container.offset_size(),
            binding.engine.transform().scale,
        ))
    }

    /// Moves to the origin and zooms about it by `factor`. The floor is released
    /// first so the fit scale is reachable.
    fn zoom_from_origin(&mut self, factor: f64) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        binding.engine.set_min_zoom(DEFAULT_MIN_ZOOM);
        binding.engine.move_to(0.0, 0.0);
        self.dispatch_changes();
        if let Some(binding) = self.binding.as_mut() {
            binding.engine.zoom_to(0.0, 0.0, factor);
        }
        self.dispatch_changes();
    }

    fn raise_zoom_floor_to_current(&mut self) {
        if let Some(scale) = self.transform().map(|transform| transform.scale) {
            self.set_dynamic_min_zoom(scale);
        }
    }
}

fn fit_ratio(available: f64, extent: f64) -> Option<f64> {
    let ratio = available / extent;
    (extent > 0.0 && ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Transform;
    use crate::input::PointerTarget;
    use crate::settings::{HeightSize, Settings};

    #[derive(Debug)]
    struct FakeWindow {
        size: Size,
        fullscreen: bool,
        requests: usize,
        exits: usize,
    }

    impl FakeWindow {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                fullscreen: false,
                requests: 0,
                exits: 0,
            }
        }
    }

    impl Environment for FakeWindow {
        fn viewport_size(&self) -> Size {
            self.size
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn request_fullscreen(&mut self) {
            self.requests += 1;
            self.fullscreen = true;
        }

        fn exit_fullscreen(&mut self) {
            self.exits += 1;
            self.fullscreen = false;
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum EngineCall {
        MoveTo(f64, f64),
        MoveBy(f64, f64),
        ZoomTo(f64, f64, f64),
        SetMinZoom(f64),
    }

    #[derive(Debug)]
    struct RecordingEngine {
        inner: PanZoomEngine,
        calls: Vec<EngineCall>,
    }

    impl TransformEngine for RecordingEngine {
        fn with_options(options: EngineOptions) -> Self {
            Self {
                inner: PanZoomEngine::new(options),
                calls: Vec::new(),
            }
        }

        fn options(&self) -> EngineOptions {
            self.inner.options()
        }

        fn transform(&self) -> Transform {
            self.inner.transform()
        }

        fn set_transform(&mut self, transform: Transform) {
            self.inner.set_transform(transform);
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.calls.push(EngineCall::MoveTo(x, y));
            self.inner.move_to(x, y);
        }

        fn move_by(&mut self, dx: f64, dy: f64, animate: bool) {
            self.calls.push(EngineCall::MoveBy(dx, dy));
            self.inner.move_by(dx, dy, animate);
        }

        fn zoom_to(&mut self, focal_x: f64, focal_y: f64, factor: f64) {
            self.calls.push(EngineCall::ZoomTo(focal_x, focal_y, factor));
            self.inner.zoom_to(focal_x, focal_y, factor);
        }

        fn min_zoom(&self) -> f64 {
            self.inner.min_zoom()
        }

        fn max_zoom(&self) -> f64 {
            self.inner.max_zoom()
        }

        fn set_min_zoom(&mut self, scale: f64) {
            self.calls.push(EngineCall::SetMinZoom(scale));
            self.inner.set_min_zoom(scale);
        }

        fn pause(&mut self) {
            self.inner.pause();
        }

        fn resume(&mut self) {
            self.inner.resume();
        }

        fn is_paused(&self) -> bool {
            self.inner.is_paused()
        }

        fn subscribe(&mut self, kind: TransformEventKind) -> SubscriptionId {
            self.inner.subscribe(kind)
        }

        fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            self.inner.unsubscribe(id)
        }

        fn take_pending(&mut self, id: SubscriptionId) -> usize {
            self.inner.take_pending(id)
        }
    }

    type Controller = ViewportController<FakeWindow, ViewerConfig, Size>;

    const PAGE: Size = Size::new(500.0, 2000.0);

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_transform(actual: Option<Transform>, x: f64, y: f64, scale: f64) {
        let actual = actual.expect("controller should be bound");
        assert_close(actual.x, x);
        assert_close(actual.y, y);
        assert_close(actual.scale, scale);
    }

    fn free_config() -> ViewerConfig {
        ViewerConfig {
            disable_mouse_pan: false,
            bounds: false,
            mobile: false,
            ..ViewerConfig::default()
        }
    }

    fn bounded_config() -> ViewerConfig {
        ViewerConfig {
            bounds: true,
            ..free_config()
        }
    }

    fn bound(config: ViewerConfig) -> Controller {
        bound_to(config, PAGE)
    }

    fn bound_to(config: ViewerConfig, content: Size) -> Controller {
        let mut controller = Controller::new(FakeWindow::new(1000.0, 800.0), config);
        controller.initialize(content);
        controller
    }

    fn zoom_engine(controller: &mut Controller, factor: f64) {
        controller
            .engine_mut()
            .expect("controller should be bound")
            .zoom_to(0.0, 0.0, factor);
    }

    #[test]
    fn unbound_controller_ignores_every_operation() {
        let mut controller = Controller::new(FakeWindow::new(1000.0, 800.0), free_config());

        controller.align_to(AlignX::Right, AlignY::Bottom);
        controller.zoom_to_original();
        controller.zoom_fit_to_width();
        controller.zoom_fit_to_height();
        controller.zoom_fit_to_screen();
        controller.keep_zoom_start();
        controller.apply_default_zoom_strategy();
        controller.set_dynamic_min_zoom(3.0);
        controller.keep_in_bounds();

        assert_eq!(controller.state(), ControllerState::Uninitialized);
        assert!(controller.transform().is_none());
        assert!(controller.min_zoom().is_none());
        assert!(matches!(
            controller.require_bound(),
            Err(ViewerError::NotReady)
        ));
        assert_eq!(
            controller.pointer_down(PointerDownEvent {
                position: Point::ORIGIN,
                target: PointerTarget::Other,
            }),
            InputOutcome::Native
        );
        assert_eq!(controller.key_down(Key::ArrowLeft), InputOutcome::Native);
    }

    #[test]
    fn initialize_uses_reader_zoom_range() {
        let controller = bound(free_config());
        assert_eq!(controller.state(), ControllerState::Bound);
        assert!(controller.require_bound().is_ok());
        let engine = controller.engine().expect("bound");
        assert_close(engine.min_zoom(), 0.8_f64.powi(10));
        assert_close(engine.max_zoom(), 1.25_f64.powi(10));
        assert_eq!(engine.options().double_click_factor(), 1.0);
        assert_eq!(engine.subscription_count(), 2);
    }

    #[test]
    fn align_to_matches_closed_forms() {
        let mut controller = bound(free_config());
        for align_x in [AlignX::Left, AlignX::Center, AlignX::Right] {
            for align_y in [AlignY::Top, AlignY::Center, AlignY::Bottom] {
                controller.align_to(align_x, align_y);
                assert_transform(
                    controller.transform(),
                    align_x.offset(1000.0, 500.0),
                    align_y.offset(800.0, 2000.0),
                    1.0,
                );
            }
        }

        controller.align_to(AlignX::Right, AlignY::Bottom);
        assert_transform(controller.transform(), 500.0, -1200.0, 1.0);
    }

    #[test]
    fn align_to_does_not_trigger_bounds_check() {
        let mut controller = bound(bounded_config());
        // Bounds would pull x back to 499.
        controller.align_to(AlignX::Right, AlignY::Bottom);
        assert_transform(controller.transform(), 500.0, -1200.0, 1.0);
    }

    #[test]
    fn zoom_to_original_resets_scale_and_floor() {
        let mut controller = bound(free_config());
        zoom_engine(&mut controller, 2.5);
        controller.set_dynamic_min_zoom(2.5);

        controller.zoom_to_original();

        assert_transform(controller.transform(), 250.0, 0.0, 1.0);
        assert_eq!(controller.min_zoom(), Some(1.0));
    }

    #[test]
    fn zoom_fit_to_screen_fits_both_axes_and_centers() {
        let mut controller = bound(free_config());
        zoom_engine(&mut controller, 1.7);

        controller.zoom_fit_to_screen();

        assert_transform(controller.transform(), 400.0, 0.0, 0.4);
        assert_close(controller.min_zoom().expect("bound"), 0.4);
    }

    #[test]
    fn zoom_fit_to_width_raises_floor_to_width_scale() {
        let mut controller = bound(free_config());
        zoom_engine(&mut controller, 0.5);

        controller.zoom_fit_to_width();

        assert_transform(controller.transform(), 0.0, 0.0, 2.0);
        assert_close(controller.min_zoom().expect("bound"), 2.0);
    }

    #[test]
    fn zoom_fit_to_height_uses_configured_target_height() {
        let mut controller = bound(free_config());
        controller.zoom_fit_to_height();
        assert_transform(controller.transform(), 325.0, 0.0, 0.7);
        assert_close(controller.min_zoom().expect("bound"), 0.7);

        controller.config_mut().height_size = HeightSize::Px1200;
        controller.zoom_fit_to_height();
        assert_transform(controller.transform(), 350.0, 0.0, 0.6);
    }

    #[test]
    fn zoom_fit_to_height_prefers_width_when_height_fit_overflows() {
        let mut controller = bound_to(free_config(), Size::new(3000.0, 1000.0));
        controller.zoom_fit_to_height();
        assert_transform(controller.transform(), 0.0, 0.0, 1.0 / 3.0);
        assert_close(controller.min_zoom().expect("bound"), 1.0 / 3.0);
    }

    #[test]
    fn fit_on_empty_container_is_skipped() {
        let mut controller = bound_to(free_config(), Size::new(0.0, 0.0));
        controller.zoom_fit_to_width();
        controller.zoom_fit_to_height();
        controller.zoom_fit_to_screen();
        assert_transform(controller.transform(), 0.0, 0.0, 1.0);
    }

    #[test]
    fn zoom_to_original_raises_floor_to_one_whatever_the_stored_settings() {
        let settings = Settings {
            disable_dynamic_min_zoom: true,
            bounds: false,
            ..Settings::default()
        };
        let mut controller = ViewportController::<_, _, _, PanZoomEngine>::new(
            FakeWindow::new(1000.0, 800.0),
            settings,
        );
        controller.initialize(PAGE);
        controller.zoom_fit_to_width();
        assert_eq!(controller.min_zoom(), Some(2.0));

        controller.zoom_to_original();

        assert_transform(controller.transform(), 0.0, 0.0, 1.0);
        assert_eq!(controller.min_zoom(), Some(1.0));
    }

    #[test]
    fn keep_zoom_start_keeps_scale_and_drops_floor() {
        let mut controller = bound(free_config());
        zoom_engine(&mut controller, 1.5);
        controller.set_dynamic_min_zoom(1.5);

        controller.keep_zoom_start();

        assert_transform(controller.transform(), 125.0, 0.0, 1.5);
        assert_eq!(controller.min_zoom(), Some(DEFAULT_MIN_ZOOM));
    }

    #[test]
    fn keep_in_bounds_is_noop_without_bounds_or_mobile() {
        let mut controller = bound(free_config());
        let far_away = Transform::new(-5000.0, 999.0, 1.0);
        controller.engine_mut().expect("bound").set_transform(far_away);

        controller.keep_in_bounds();

        assert_eq!(controller.transform(), Some(far_away));
    }

    #[test]
    fn keep_in_bounds_runs_in_mobile_mode() {
        let config = ViewerConfig {
            mobile: true,
            ..free_config()
        };
        let mut controller = bound(config);
        controller
            .engine_mut()
            .expect("bound")
            .set_transform(Transform::new(400.0, -300.0, 0.2));

        controller.keep_in_bounds();

        assert_transform(controller.transform(), 400.0, 200.0, 0.2);
    }

    #[test]
    fn keep_in_bounds_twice_does_not_drift() {
        let mut controller = bound(bounded_config());
        controller
            .engine_mut()
            .expect("bound")
            .set_transform(Transform::new(-3000.0, 50.0, 4.0));

        controller.keep_in_bounds();
        let once = controller.transform();
        controller.keep_in_bounds();

        assert_eq!(controller.transform(), once);
        assert_transform(once, -1001.0, 8.0, 4.0);
    }

    #[test]
    fn drag_pans_and_is_followed_by_bounds_check() {
        let mut controller = bound(bounded_config());
        let outcome = controller.pointer_down(PointerDownEvent {
            position: Point::new(500.0, 400.0),
            target: PointerTarget::Other,
        });
        assert_eq!(outcome, InputOutcome::Handled);

        assert_eq!(
            controller.pointer_move(Point::new(-1000.0, 400.0)),
            InputOutcome::Handled
        );
        assert_transform(controller.transform(), 1.0, 0.0, 1.0);

        assert_eq!(controller.pointer_up(), InputOutcome::Handled);
        assert_eq!(
            controller.pointer_move(Point::new(0.0, 0.0)),
            InputOutcome::Native
        );
    }

    #[test]
    fn pointer_down_on_text_or_with_mouse_pan_disabled_is_native() {
        let mut controller = bound(free_config());
        let outcome = controller.pointer_down(PointerDownEvent {
            position: Point::ORIGIN,
            target: PointerTarget::TextParagraph,
        });
        assert_eq!(outcome, InputOutcome::Native);
        assert_eq!(
            controller.pointer_move(Point::new(50.0, 50.0)),
            InputOutcome::Native
        );
        assert_transform(controller.transform(), 0.0, 0.0, 1.0);

        controller.config_mut().disable_mouse_pan = true;
        let outcome = controller.pointer_down(PointerDownEvent {
            position: Point::ORIGIN,
            target: PointerTarget::Other,
        });
        assert_eq!(outcome, InputOutcome::Native);
    }

    #[test]
    fn wheel_scrolls_vertically_unless_zoom_modifier_held() {
        let mut controller = bound(free_config());
        let outcome = controller.wheel(WheelEvent {
            position: Point::new(10.0, 10.0),
            delta_y: 120.0,
            zoom_modifier: false,
        });
        assert_eq!(outcome, InputOutcome::Handled);
        assert_transform(controller.transform(), 0.0, -120.0, 1.0);

        controller.wheel(WheelEvent {
            position: Point::ORIGIN,
            delta_y: -128.0,
            zoom_modifier: true,
        });
        assert_transform(controller.transform(), 0.0, -127.8, 1.065);
    }

    #[test]
    fn double_click_leaves_transform_unchanged() {
        let mut controller = bound(free_config());
        assert_eq!(
            controller.double_click(Point::new(100.0, 100.0)),
            InputOutcome::Handled
        );
        assert_transform(controller.transform(), 0.0, 0.0, 1.0);
        assert_eq!(controller.min_zoom(), Some(DEFAULT_MIN_ZOOM));
    }

    #[test]
    fn double_click_with_reader_options_never_reaches_engine() {
        let mut controller = recording(ZoomMode::KeepZoom);
        let before = controller.transform();

        controller.double_click(Point::new(100.0, 100.0));

        assert!(controller.engine().expect("bound").calls.is_empty());
        assert_eq!(controller.transform(), before);
    }

    #[test]
    fn single_touch_is_left_native_and_two_finger_gesture_pans_and_pinches() {
        let mut controller = bound(free_config());
        assert_eq!(
            controller.touch_start(&[Point::new(100.0, 100.0)]),
            InputOutcome::Native
        );
        assert_eq!(
            controller.touch_move(&[Point::new(150.0, 100.0)]),
            InputOutcome::Native
        );
        assert_transform(controller.transform(), 0.0, 0.0, 1.0);

        assert_eq!(
            controller.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]),
            InputOutcome::Handled
        );
        assert_eq!(
            controller.touch_move(&[Point::new(60.0, 100.0), Point::new(260.0, 100.0)]),
            InputOutcome::Handled
        );
        assert_transform(controller.transform(), -140.0, -100.0, 2.0);

        assert_eq!(
            controller.touch_end(&[Point::new(60.0, 100.0)]),
            InputOutcome::Handled
        );
        assert_eq!(
            controller.touch_move(&[Point::new(80.0, 100.0)]),
            InputOutcome::Native
        );
    }

    #[test]
    fn arrow_keys_pan_and_other_keys_are_native() {
        let mut controller = bound(free_config());
        assert_eq!(controller.key_down(Key::ArrowLeft), InputOutcome::Handled);
        assert_transform(controller.transform(), 40.0, 0.0, 1.0);
        assert_eq!(controller.key_down(Key::ArrowDown), InputOutcome::Handled);
        assert_transform(controller.transform(), 40.0, -40.0, 1.0);

        assert_eq!(
            controller.key_down(Key::Character('+')),
            InputOutcome::Native
        );

        controller.config_mut().disable_arrow_keys = true;
        assert_eq!(controller.key_down(Key::ArrowUp), InputOutcome::Native);
    }

    #[test]
    fn toggle_fullscreen_requests_then_exits() {
        let mut controller = bound(free_config());
        controller.toggle_fullscreen();
        assert!(controller.environment().fullscreen);
        controller.toggle_fullscreen();
        assert!(!controller.environment().fullscreen);
        assert_eq!(controller.environment().requests, 1);
        assert_eq!(controller.environment().exits, 1);
    }

    #[test]
    fn teardown_deregisters_listeners() {
        let mut controller = bound(bounded_config());
        let (content, engine) = controller.teardown().expect("was bound");
        assert_eq!(content, PAGE);
        assert_eq!(engine.subscription_count(), 0);
        assert_eq!(controller.state(), ControllerState::Uninitialized);
        assert!(controller.teardown().is_none());
    }

    #[test]
    fn reinitialize_replaces_binding() {
        let mut controller = bound(free_config());
        zoom_engine(&mut controller, 2.0);
        controller.initialize(Size::new(100.0, 100.0));
        assert_transform(controller.transform(), 0.0, 0.0, 1.0);
        assert_eq!(controller.container(), Some(&Size::new(100.0, 100.0)));
    }

    type RecordingController = ViewportController<FakeWindow, ViewerConfig, Size, RecordingEngine>;

    fn recording(mode: ZoomMode) -> RecordingController {
        let config = ViewerConfig {
            zoom_default: mode,
            ..free_config()
        };
        let mut controller =
            RecordingController::new(FakeWindow::new(1000.0, 800.0), config);
        controller.initialize(PAGE);
        let engine = controller.engine_mut().expect("bound");
        engine.zoom_to(0.0, 0.0, 1.7);
        engine.set_min_zoom(1.7);
        engine.calls.clear();
        controller
    }

    fn run_directly(controller: &mut RecordingController, mode: ZoomMode) {
        controller.set_dynamic_min_zoom(DEFAULT_MIN_ZOOM);
        match mode {
            ZoomMode::FitToScreen => controller.zoom_fit_to_screen(),
            ZoomMode::FitToWidth => controller.zoom_fit_to_width(),
            ZoomMode::FitToHeight => controller.zoom_fit_to_height(),
            ZoomMode::Original => controller.zoom_to_original(),
            ZoomMode::KeepZoomStart => controller.keep_zoom_start(),
            ZoomMode::KeepZoom => {}
        }
    }

    #[test]
    fn default_zoom_strategy_resets_floor_then_runs_matching_operation() {
        for mode in [
            ZoomMode::FitToScreen,
            ZoomMode::FitToWidth,
            ZoomMode::FitToHeight,
            ZoomMode::Original,
            ZoomMode::KeepZoomStart,
        ] {
            let mut dispatched = recording(mode);
            dispatched.apply_default_zoom_strategy();

            let mut direct = recording(mode);
            run_directly(&mut direct, mode);

            let calls = &dispatched.engine().expect("bound").calls;
            assert_eq!(
                calls.first(),
                Some(&EngineCall::SetMinZoom(DEFAULT_MIN_ZOOM)),
                "{mode:?} should reset the floor first"
            );
            assert_eq!(
                calls,
                &direct.engine().expect("bound").calls,
                "{mode:?} should run its own operation"
            );
            assert_eq!(dispatched.transform(), direct.transform());
            assert_eq!(dispatched.min_zoom(), direct.min_zoom());
        }
    }

    #[test]
    fn keep_zoom_strategy_leaves_transform_and_floor_alone() {
        let mut controller = recording(ZoomMode::KeepZoom);
        let before = controller.transform();

        controller.apply_default_zoom_strategy();

        assert!(controller.engine().expect("bound").calls.is_empty());
        assert_eq!(controller.transform(), before);
        assert_eq!(controller.min_zoom(), Some(1.7));
    }
}
