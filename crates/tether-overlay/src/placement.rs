#![forbid(unsafe_code)]

//! Pure placement geometry.
//!
//! Everything here is a function of rectangles, a connection pair, and a
//! direction. No host access, no state; the strategy feeds in fresh
//! measurements on every apply.
//!
//! # Coordinate conventions
//!
//! All rects are in client space. `viewport` is the visible area narrowed by
//! the strategy's margin; `full_viewport` is the unnarrowed area that CSS
//! `bottom`/`right` offsets are measured from.
//!
//! # Invariants
//!
//! 1. Overlay sizes are floored before fit and push arithmetic.
//! 2. `visible_area` is never negative.
//! 3. A push never moves an overlay that already fits on that axis.

use tether_core::{ClientRect, Direction, OverlayConfig, Point, Size};

use crate::position::{ConnectionPositionPair, HorizontalConnectionPos, VerticalConnectionPos};

/// Geometry read from the host at the start of an apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Measurements {
    pub origin: ClientRect,
    pub overlay: ClientRect,
    pub container: ClientRect,
    pub viewport: ClientRect,
    pub full_viewport: ClientRect,
    pub config: OverlayConfig,
}

/// How an overlay at a candidate point relates to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFit {
    /// On-screen area of the overlay.
    pub visible_area: f64,
    pub is_completely_within_viewport: bool,
    pub fits_in_viewport_horizontally: bool,
    pub fits_in_viewport_vertically: bool,
}

/// Which CSS edge pins the bounding box on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerticalEdge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HorizontalEdge {
    Left,
    Right,
}

/// Space a flexible overlay may occupy, from the origin point to the
/// viewport edges the overlay grows toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundingBox {
    pub rect: ClientRect,
    pub vertical: VerticalEdge,
    pub horizontal: HorizontalEdge,
}

/// The anchor point on the origin.
pub(crate) fn origin_point(
    origin: &ClientRect,
    container: &ClientRect,
    position: &ConnectionPositionPair,
    direction: Direction,
) -> Point {
    let mut x = match position.origin.origin_x {
        HorizontalConnectionPos::Center => origin.left + origin.width / 2.0,
        HorizontalConnectionPos::Start if direction.is_rtl() => origin.right,
        HorizontalConnectionPos::Start => origin.left,
        HorizontalConnectionPos::End if direction.is_rtl() => origin.left,
        HorizontalConnectionPos::End => origin.right,
    };
    let mut y = match position.origin.origin_y {
        VerticalConnectionPos::Center => origin.top + origin.height / 2.0,
        VerticalConnectionPos::Top => origin.top,
        VerticalConnectionPos::Bottom => origin.bottom,
    };

    // A zoomed container can report a negative offset; overlays are laid out
    // relative to it, so compensate.
    if container.left < 0.0 {
        x -= container.left;
    }
    if container.top < 0.0 {
        y -= container.top;
    }

    Point::new(x, y)
}

/// Top-left corner of an overlay of `size` whose anchor sits on `origin_point`.
pub(crate) fn overlay_point(
    origin_point: Point,
    size: Size,
    position: &ConnectionPositionPair,
    direction: Direction,
) -> Point {
    let start_x = match position.overlay.overlay_x {
        HorizontalConnectionPos::Center => -size.width / 2.0,
        HorizontalConnectionPos::Start if direction.is_rtl() => -size.width,
        HorizontalConnectionPos::Start => 0.0,
        HorizontalConnectionPos::End if direction.is_rtl() => 0.0,
        HorizontalConnectionPos::End => -size.width,
    };
    let start_y = match position.overlay.overlay_y {
        VerticalConnectionPos::Center => -size.height / 2.0,
        VerticalConnectionPos::Top => 0.0,
        VerticalConnectionPos::Bottom => -size.height,
    };
    origin_point.offset(start_x, start_y)
}

/// Measure how much of an overlay at `point` is visible in `viewport`.
///
/// `point` must already include offsets.
pub(crate) fn overlay_fit(point: Point, overlay: &ClientRect, viewport: &ClientRect) -> OverlayFit {
    let overlay = overlay.floor();

    let left_overflow = viewport.left - point.x;
    let right_overflow = point.x + overlay.width - viewport.right;
    let top_overflow = viewport.top - point.y;
    let bottom_overflow = point.y + overlay.height - viewport.bottom;

    let visible_width = subtract_overflows(overlay.width, &[left_overflow, right_overflow]);
    let visible_height = subtract_overflows(overlay.height, &[top_overflow, bottom_overflow]);
    let visible_area = visible_width * visible_height;

    OverlayFit {
        visible_area,
        is_completely_within_viewport: overlay.width * overlay.height == visible_area,
        fits_in_viewport_horizontally: visible_width == overlay.width,
        fits_in_viewport_vertically: visible_height == overlay.height,
    }
}

fn subtract_overflows(length: f64, overflows: &[f64]) -> f64 {
    overflows
        .iter()
        .fold(length, |visible, overflow| visible - overflow.max(0.0))
        .max(0.0)
}

/// Space available to a flexible overlay anchored at `origin_point`.
///
/// `growth_limit` is the previous box size when centered axes must not grow
/// (re-applies without grow-after-open).
pub(crate) fn bounding_box(
    origin_point: Point,
    position: &ConnectionPositionPair,
    direction: Direction,
    viewport: &ClientRect,
    growth_limit: Option<Size>,
) -> BoundingBox {
    let (top, height, vertical) = match position.overlay.overlay_y {
        VerticalConnectionPos::Top => (
            origin_point.y,
            viewport.bottom - origin_point.y,
            VerticalEdge::Top,
        ),
        VerticalConnectionPos::Bottom => {
            let height = origin_point.y - viewport.top;
            (origin_point.y - height, height, VerticalEdge::Bottom)
        }
        VerticalConnectionPos::Center => {
            let half = (viewport.bottom - origin_point.y).min(origin_point.y - viewport.top);
            let mut height = half * 2.0;
            if let Some(limit) = growth_limit
                && height > limit.height
            {
                height = limit.height;
            }
            (origin_point.y - height / 2.0, height, VerticalEdge::Top)
        }
    };

    let overlay_x = position.overlay.overlay_x;
    let grows_right = matches!(
        (overlay_x, direction),
        (HorizontalConnectionPos::Start, Direction::Ltr)
            | (HorizontalConnectionPos::End, Direction::Rtl)
    );
    let grows_left = matches!(
        (overlay_x, direction),
        (HorizontalConnectionPos::End, Direction::Ltr)
            | (HorizontalConnectionPos::Start, Direction::Rtl)
    );

    let (left, width, horizontal) = if grows_left {
        let width = origin_point.x - viewport.left;
        (origin_point.x - width, width, HorizontalEdge::Right)
    } else if grows_right {
        (
            origin_point.x,
            viewport.right - origin_point.x,
            HorizontalEdge::Left,
        )
    } else {
        let half = (viewport.right - origin_point.x).min(origin_point.x - viewport.left);
        let mut width = half * 2.0;
        if let Some(limit) = growth_limit
            && width > limit.width
        {
            width = limit.width;
        }
        (origin_point.x - width / 2.0, width, HorizontalEdge::Left)
    };

    BoundingBox {
        rect: ClientRect::new(left, top, width.max(0.0), height.max(0.0)),
        vertical,
        horizontal,
    }
}

/// Minimum translation that brings an overlay at `start` inside `viewport`.
///
/// On an axis where the overlay is larger than the viewport it is aligned to
/// the viewport's leading edge instead.
pub(crate) fn push_amount(start: Point, overlay: &ClientRect, viewport: &ClientRect) -> Point {
    let overlay = overlay.floor();

    let overflow_right = (start.x + overlay.width - viewport.right).max(0.0);
    let overflow_bottom = (start.y + overlay.height - viewport.bottom).max(0.0);
    let overflow_top = (viewport.top - start.y).max(0.0);
    let overflow_left = (viewport.left - start.x).max(0.0);

    let push_x = if overlay.width <= viewport.width {
        if overflow_left > 0.0 {
            overflow_left
        } else {
            -overflow_right
        }
    } else {
        viewport.left - start.x
    };

    let push_y = if overlay.height <= viewport.height {
        if overflow_top > 0.0 {
            overflow_top
        } else {
            -overflow_bottom
        }
    } else {
        viewport.top - start.y
    };

    Point::new(push_x, push_y)
}
