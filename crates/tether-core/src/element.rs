#![forbid(unsafe_code)]

//! Measurable elements.

use std::rc::Rc;

use crate::geometry::ClientRect;

/// Anything the host can measure: an origin element, a scrollable
/// container, a virtual anchor.
///
/// Implementations must return the *current* rect on every call; the
/// positioning engine never caches it across applies.
pub trait BoundingRect {
    fn bounding_rect(&self) -> ClientRect;
}

/// Shared handle to a measurable element.
pub type ElementHandle = Rc<dyn BoundingRect>;

impl BoundingRect for ClientRect {
    fn bounding_rect(&self) -> ClientRect {
        *self
    }
}

impl<T: BoundingRect + ?Sized> BoundingRect for Rc<T> {
    fn bounding_rect(&self) -> ClientRect {
        (**self).bounding_rect()
    }
}

impl<T: BoundingRect + ?Sized> BoundingRect for std::cell::RefCell<T> {
    fn bounding_rect(&self) -> ClientRect {
        self.borrow().bounding_rect()
    }
}
