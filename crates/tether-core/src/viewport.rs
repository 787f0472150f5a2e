#![forbid(unsafe_code)]

//! Viewport oracle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::ClientRect;

/// Document scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScrollPosition {
    pub top: f64,
    pub left: f64,
}

impl ScrollPosition {
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Reports the visible viewport.
///
/// Both methods are queried fresh on every apply.
pub trait ViewportRuler {
    /// Viewport rectangle in document space: `top`/`left` are the scroll
    /// offset, `width`/`height` the visible size.
    fn viewport_rect(&self) -> ClientRect;

    fn scroll_position(&self) -> ScrollPosition;

    /// Viewport rectangle in client space (origin at `0, 0`).
    fn client_rect(&self) -> ClientRect {
        let scroll = self.scroll_position();
        self.viewport_rect().translate(-scroll.left, -scroll.top)
    }
}
