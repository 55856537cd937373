use crate::geometry::Size;

/// Host window facilities the controller reads from and drives.
pub trait Environment {
    /// Visible viewport size (`innerWidth` x `innerHeight`).
    fn viewport_size(&self) -> Size;
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// The element the transform is applied to.
pub trait ContentElement {
    /// Layout size at scale 1 (`offsetWidth` x `offsetHeight`).
    fn offset_size(&self) -> Size;
}

impl ContentElement for Size {
    fn offset_size(&self) -> Size {
        *self
    }
}
