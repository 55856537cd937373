mod gesture;

pub use gesture::{
    keyboard_pan_step, resolve_key, resolve_pointer_down, resolve_touch, resolve_wheel,
    wheel_zoom_factor, InputOutcome, Key, PointerDownEvent, PointerGate, PointerTarget,
    TouchFrame, WheelEvent, WheelGate,
};
