#![forbid(unsafe_code)]

//! Geometry primitives in client (viewport) space.
//!
//! Coordinates are `f64` CSS pixels. Browsers report fractional rectangles
//! under zoom, so nothing here rounds implicitly; callers that need stable
//! integer comparisons use [`ClientRect::floor`].
//!
//! # Invariants
//!
//! 1. `right == left + width` and `bottom == top + height` for every rect
//!    built through a constructor.
//! 2. Width and height may be zero. Negative sizes are never produced by
//!    the constructors; [`ClientRect::inset`] saturates at zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate in client space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate the point by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A bounding box in client space, shaped like `DOMRect`.
///
/// All six fields are stored so values read from a host can be kept
/// verbatim (a host may report `right` slightly different from
/// `left + width` under zoom).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClientRect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    /// Create a rect from its top-left corner and size.
    #[inline]
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Create a rect from its four edges.
    #[inline]
    #[must_use]
    pub fn from_edges(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
            width: (right - left).max(0.0),
            height: (bottom - top).max(0.0),
        }
    }

    /// Create a rect at `origin` with the given size.
    #[inline]
    #[must_use]
    pub fn from_point_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rect covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Floor every field.
    ///
    /// Under browser zoom a 30px element can measure as 30.000001px; flooring
    /// keeps fit decisions stable across repositionings.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self {
            top: self.top.floor(),
            left: self.left.floor(),
            right: self.right.floor(),
            bottom: self.bottom.floor(),
            width: self.width.floor(),
            height: self.height.floor(),
        }
    }

    /// Move the rect by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
            right: self.right + dx,
            bottom: self.bottom + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Shrink the rect by `margin` on every side. Sizes saturate at zero.
    #[must_use]
    pub fn inset(&self, margin: f64) -> Self {
        let width = (self.width - margin * 2.0).max(0.0);
        let height = (self.height - margin * 2.0).max(0.0);
        Self::new(self.left + margin, self.top + margin, width, height)
    }

    /// True when `point` lies inside the rect (edges inclusive).
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// True when `other` lies entirely inside the rect (edges inclusive).
    #[inline]
    pub fn contains_rect(&self, other: &ClientRect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Overlapping region, or `None` when the rects do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &ClientRect) -> Option<ClientRect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        (right > left && bottom > top).then(|| Self::from_edges(top, left, right, bottom))
    }
}
