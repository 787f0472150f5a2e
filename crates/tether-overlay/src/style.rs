#![forbid(unsafe_code)]

//! Style applicator: turns a placement into inline styles.
//!
//! Two boxes receive styles (see [`tether_core::overlay`]):
//!
//! | Placement | Pane | Bounding box |
//! |-----------|------|--------------|
//! | exact (not flexible, or pushed) | `top`/`bottom` + `left`/`right`, config max sizes | fills the viewport |
//! | flexible | `position: static` | edges, size, alignment, config max sizes |
//!
//! The pane always carries the offset `transform`. Every declaration that
//! positions a box clears all four edges first, so switching from a
//! `top`-anchored pair to a `bottom`-anchored one never leaves a stale edge.

use tether_core::{
    ClientRect, Direction, OverlayConfig, Point, Size, StyleDeclaration, StyleProperty, px,
};

use crate::placement::{BoundingBox, HorizontalEdge, VerticalEdge};
use crate::position::{ConnectionPositionPair, HorizontalConnectionPos, VerticalConnectionPos};

const EDGES: [StyleProperty; 4] = [
    StyleProperty::Top,
    StyleProperty::Bottom,
    StyleProperty::Left,
    StyleProperty::Right,
];

/// Inputs for the pane declaration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PaneLayout<'a> {
    pub position: &'a ConnectionPositionPair,
    pub direction: Direction,
    /// Top-left corner after push, before offsets.
    pub overlay_point: Point,
    pub overlay_size: Size,
    pub offset: Point,
    pub full_viewport: ClientRect,
    pub config: OverlayConfig,
    pub exact: bool,
}

/// Inputs for the bounding-box declaration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoxLayout<'a> {
    pub position: &'a ConnectionPositionPair,
    pub bounding_box: &'a BoundingBox,
    /// Box size after minimum-size clamping.
    pub size: Size,
    pub full_viewport: ClientRect,
    pub config: OverlayConfig,
    pub exact: bool,
}

/// Clears everything the pane declaration writes for placement.
pub(crate) fn pane_reset() -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    for edge in EDGES {
        styles.clear(edge);
    }
    styles
        .clear(StyleProperty::Position)
        .clear(StyleProperty::Transform);
    styles
}

/// Bounding box before measurement: pinned to the top-left, unsized.
pub(crate) fn bounding_box_reset() -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    styles
        .set(StyleProperty::Top, px(0.0))
        .set(StyleProperty::Left, px(0.0))
        .clear(StyleProperty::Right)
        .clear(StyleProperty::Bottom)
        .clear(StyleProperty::Height)
        .clear(StyleProperty::Width)
        .clear(StyleProperty::AlignItems)
        .clear(StyleProperty::JustifyContent);
    styles
}

/// Bounding box after disposal: nothing left behind.
pub(crate) fn bounding_box_cleared() -> StyleDeclaration {
    let mut styles = bounding_box_reset();
    styles.clear(StyleProperty::Top).clear(StyleProperty::Left);
    styles
}

/// Pane declaration for a chosen placement.
pub(crate) fn overlay_pane_styles(layout: &PaneLayout<'_>) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    for edge in EDGES {
        styles.clear(edge);
    }

    if layout.exact {
        styles.clear(StyleProperty::Position);
        styles.extend(&exact_overlay_y(layout));
        styles.extend(&exact_overlay_x(layout));
    } else {
        styles.set(StyleProperty::Position, "static");
    }

    styles.set(
        StyleProperty::Transform,
        offset_transform(layout.offset.x, layout.offset.y),
    );

    match (layout.exact, layout.config.max_height) {
        (true, Some(max)) => styles.set(StyleProperty::MaxHeight, px(max)),
        _ => styles.clear(StyleProperty::MaxHeight),
    };
    match (layout.exact, layout.config.max_width) {
        (true, Some(max)) => styles.set(StyleProperty::MaxWidth, px(max)),
        _ => styles.clear(StyleProperty::MaxWidth),
    };

    styles
}

fn exact_overlay_y(layout: &PaneLayout<'_>) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    styles.clear(StyleProperty::Top).clear(StyleProperty::Bottom);

    if layout.position.overlay.overlay_y == VerticalConnectionPos::Bottom {
        // Track the bottom edge so the overlay stays attached when the
        // viewport height changes.
        let bottom = layout.full_viewport.bottom
            - (layout.overlay_point.y + layout.overlay_size.height);
        styles.set(StyleProperty::Bottom, px(bottom));
    } else {
        styles.set(StyleProperty::Top, px(layout.overlay_point.y));
    }
    styles
}

fn exact_overlay_x(layout: &PaneLayout<'_>) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();
    styles.clear(StyleProperty::Left).clear(StyleProperty::Right);

    let rtl = layout.direction.is_rtl();
    let use_right = match layout.position.overlay.overlay_x {
        HorizontalConnectionPos::Start => rtl,
        HorizontalConnectionPos::End => !rtl,
        HorizontalConnectionPos::Center => false,
    };

    if use_right {
        let right =
            layout.full_viewport.right - (layout.overlay_point.x + layout.overlay_size.width);
        styles.set(StyleProperty::Right, px(right));
    } else {
        styles.set(StyleProperty::Left, px(layout.overlay_point.x));
    }
    styles
}

/// Bounding-box declaration for a chosen placement.
pub(crate) fn bounding_box_styles(layout: &BoxLayout<'_>) -> StyleDeclaration {
    let mut styles = StyleDeclaration::new();

    if layout.exact {
        styles
            .set(StyleProperty::Top, px(0.0))
            .set(StyleProperty::Left, px(0.0))
            .clear(StyleProperty::Bottom)
            .clear(StyleProperty::Right)
            .clear(StyleProperty::MaxHeight)
            .clear(StyleProperty::MaxWidth)
            .set(StyleProperty::Width, "100%")
            .set(StyleProperty::Height, "100%");
        return styles;
    }

    for edge in EDGES {
        styles.clear(edge);
    }

    let rect = &layout.bounding_box.rect;
    let full = &layout.full_viewport;
    match layout.bounding_box.vertical {
        VerticalEdge::Top => styles.set(StyleProperty::Top, px(rect.top)),
        VerticalEdge::Bottom => styles.set(StyleProperty::Bottom, px(full.bottom - rect.bottom)),
    };
    match layout.bounding_box.horizontal {
        HorizontalEdge::Left => styles.set(StyleProperty::Left, px(rect.left)),
        HorizontalEdge::Right => styles.set(StyleProperty::Right, px(full.right - rect.right)),
    };

    styles
        .set(StyleProperty::Width, px(layout.size.width))
        .set(StyleProperty::Height, px(layout.size.height));

    // The box is a flex column: align-items is the horizontal axis.
    let align = match layout.position.overlay.overlay_x {
        HorizontalConnectionPos::Center => "center",
        HorizontalConnectionPos::End => "flex-end",
        HorizontalConnectionPos::Start => "flex-start",
    };
    let justify = match layout.position.overlay.overlay_y {
        VerticalConnectionPos::Center => "center",
        VerticalConnectionPos::Bottom => "flex-end",
        VerticalConnectionPos::Top => "flex-start",
    };
    styles
        .set(StyleProperty::AlignItems, align)
        .set(StyleProperty::JustifyContent, justify);

    match layout.config.max_height {
        Some(max) => styles.set(StyleProperty::MaxHeight, px(max)),
        None => styles.clear(StyleProperty::MaxHeight),
    };
    match layout.config.max_width {
        Some(max) => styles.set(StyleProperty::MaxWidth, px(max)),
        None => styles.clear(StyleProperty::MaxWidth),
    };

    styles
}

/// `transform` value carrying the pair offsets.
pub(crate) fn offset_transform(offset_x: f64, offset_y: f64) -> String {
    let mut parts = Vec::with_capacity(2);
    if offset_x != 0.0 {
        parts.push(format!("translateX({})", px(offset_x)));
    }
    if offset_y != 0.0 {
        parts.push(format!("translateY({})", px(offset_y)));
    }
    parts.join(" ")
}

/// `transform-origin` matching the overlay anchor, e.g. `"left top"`.
pub(crate) fn transform_origin(position: &ConnectionPositionPair, direction: Direction) -> String {
    let x = match (position.overlay.overlay_x, direction) {
        (HorizontalConnectionPos::Center, _) => "center",
        (HorizontalConnectionPos::Start, Direction::Ltr)
        | (HorizontalConnectionPos::End, Direction::Rtl) => "left",
        (HorizontalConnectionPos::Start, Direction::Rtl)
        | (HorizontalConnectionPos::End, Direction::Ltr) => "right",
    };
    format!("{x} {}", position.overlay.overlay_y.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(ox: &str, oy: &str, vx: &str, vy: &str) -> ConnectionPositionPair {
        ConnectionPositionPair::parse(ox, oy, vx, vy).unwrap()
    }

    fn pane(position: &ConnectionPositionPair, direction: Direction, point: Point) -> PaneLayout<'_> {
        PaneLayout {
            position,
            direction,
            overlay_point: point,
            overlay_size: Size::new(60.0, 30.0),
            offset: Point::default(),
            full_viewport: ClientRect::new(0.0, 0.0, 1024.0, 768.0),
            config: OverlayConfig::default(),
            exact: true,
        }
    }

    #[test]
    fn exact_top_left() {
        let p = pair("start", "bottom", "start", "top");
        let s = overlay_pane_styles(&pane(&p, Direction::Ltr, Point::new(500.0, 380.0)));
        assert_eq!(s.get(StyleProperty::Top), Some("380px"));
        assert_eq!(s.get(StyleProperty::Left), Some("500px"));
        assert_eq!(s.get(StyleProperty::Bottom), Some(""));
        assert_eq!(s.get(StyleProperty::Right), Some(""));
        assert_eq!(s.get(StyleProperty::Transform), Some(""));
    }

    #[test]
    fn exact_bottom_tracks_viewport_bottom() {
        let p = pair("start", "top", "start", "bottom");
        let s = overlay_pane_styles(&pane(&p, Direction::Ltr, Point::new(500.0, 320.0)));
        // 768 - (320 + 30)
        assert_eq!(s.get(StyleProperty::Bottom), Some("418px"));
        assert_eq!(s.get(StyleProperty::Top), Some(""));
    }

    #[test]
    fn rtl_flips_left_and_right() {
        let p = pair("start", "bottom", "start", "top");
        let s = overlay_pane_styles(&pane(&p, Direction::Rtl, Point::new(500.0, 380.0)));
        // 1024 - (500 + 60)
        assert_eq!(s.get(StyleProperty::Right), Some("464px"));
        assert_eq!(s.get(StyleProperty::Left), Some(""));

        let e = pair("end", "bottom", "end", "top");
        let s = overlay_pane_styles(&pane(&e, Direction::Rtl, Point::new(500.0, 380.0)));
        assert_eq!(s.get(StyleProperty::Left), Some("500px"));
    }

    #[test]
    fn center_ignores_direction() {
        let p = pair("center", "bottom", "center", "top");
        for dir in [Direction::Ltr, Direction::Rtl] {
            let s = overlay_pane_styles(&pane(&p, dir, Point::new(470.0, 380.0)));
            assert_eq!(s.get(StyleProperty::Left), Some("470px"));
        }
    }

    #[test]
    fn zero_offsets_are_written_as_zero_px() {
        let p = pair("start", "top", "start", "top");
        let s = overlay_pane_styles(&pane(&p, Direction::Ltr, Point::new(0.0, 0.0)));
        assert_eq!(s.get(StyleProperty::Top), Some("0px"));
        assert_eq!(s.get(StyleProperty::Left), Some("0px"));

        let b = pair("end", "bottom", "end", "bottom");
        let s = overlay_pane_styles(&pane(&b, Direction::Ltr, Point::new(964.0, 738.0)));
        assert_eq!(s.get(StyleProperty::Bottom), Some("0px"));
        assert_eq!(s.get(StyleProperty::Right), Some("0px"));
    }

    #[test]
    fn flexible_pane_is_static_and_drops_max_sizes() {
        let p = pair("start", "bottom", "start", "top");
        let mut layout = pane(&p, Direction::Ltr, Point::new(500.0, 380.0));
        layout.exact = false;
        layout.config.max_height = Some(200.0);
        let s = overlay_pane_styles(&layout);
        assert_eq!(s.get(StyleProperty::Position), Some("static"));
        assert_eq!(s.get(StyleProperty::Top), Some(""));
        assert_eq!(s.get(StyleProperty::MaxHeight), Some(""));
    }

    #[test]
    fn exact_pane_carries_max_sizes() {
        let p = pair("start", "bottom", "start", "top");
        let mut layout = pane(&p, Direction::Ltr, Point::new(500.0, 380.0));
        layout.config.max_width = Some(320.0);
        let s = overlay_pane_styles(&layout);
        assert_eq!(s.get(StyleProperty::MaxWidth), Some("320px"));
    }

    #[test]
    fn transform_carries_offsets() {
        assert_eq!(offset_transform(0.0, 0.0), "");
        assert_eq!(offset_transform(10.0, 0.0), "translateX(10px)");
        assert_eq!(offset_transform(-4.0, 8.5), "translateX(-4px) translateY(8.5px)");
    }

    #[test]
    fn transform_origin_follows_overlay_anchor() {
        let p = pair("start", "bottom", "start", "top");
        assert_eq!(transform_origin(&p, Direction::Ltr), "left top");
        assert_eq!(transform_origin(&p, Direction::Rtl), "right top");
        let c = pair("center", "top", "center", "bottom");
        assert_eq!(transform_origin(&c, Direction::Rtl), "center bottom");
    }

    #[test]
    fn bounding_box_exact_fills_viewport() {
        let p = pair("start", "bottom", "start", "top");
        let bb = BoundingBox {
            rect: ClientRect::new(500.0, 380.0, 524.0, 388.0),
            vertical: VerticalEdge::Top,
            horizontal: HorizontalEdge::Left,
        };
        let s = bounding_box_styles(&BoxLayout {
            position: &p,
            bounding_box: &bb,
            size: bb.rect.size(),
            full_viewport: ClientRect::new(0.0, 0.0, 1024.0, 768.0),
            config: OverlayConfig {
                max_height: Some(100.0),
                ..OverlayConfig::default()
            },
            exact: true,
        });
        assert_eq!(s.get(StyleProperty::Width), Some("100%"));
        assert_eq!(s.get(StyleProperty::Top), Some("0px"));
        assert_eq!(s.get(StyleProperty::MaxHeight), Some(""));
    }

    #[test]
    fn bounding_box_flexible_anchors_edges() {
        let p = pair("end", "top", "end", "bottom");
        let bb = BoundingBox {
            rect: ClientRect::new(0.0, 0.0, 300.0, 200.0),
            vertical: VerticalEdge::Bottom,
            horizontal: HorizontalEdge::Right,
        };
        let s = bounding_box_styles(&BoxLayout {
            position: &p,
            bounding_box: &bb,
            size: bb.rect.size(),
            full_viewport: ClientRect::new(0.0, 0.0, 1024.0, 768.0),
            config: OverlayConfig {
                max_width: Some(250.0),
                ..OverlayConfig::default()
            },
            exact: false,
        });
        assert_eq!(s.get(StyleProperty::Bottom), Some("568px"));
        assert_eq!(s.get(StyleProperty::Right), Some("724px"));
        assert_eq!(s.get(StyleProperty::Top), Some(""));
        assert_eq!(s.get(StyleProperty::Left), Some(""));
        assert_eq!(s.get(StyleProperty::Height), Some("200px"));
        assert_eq!(s.get(StyleProperty::AlignItems), Some("flex-end"));
        assert_eq!(s.get(StyleProperty::JustifyContent), Some("flex-end"));
        assert_eq!(s.get(StyleProperty::MaxWidth), Some("250px"));
    }

    #[test]
    fn resets_clear_edges() {
        let r = pane_reset();
        for edge in EDGES {
            assert_eq!(r.get(edge), Some(""));
        }
        let b = bounding_box_reset();
        assert_eq!(b.get(StyleProperty::Top), Some("0px"));
        let c = bounding_box_cleared();
        assert_eq!(c.get(StyleProperty::Top), Some(""));
        assert_eq!(c.get(StyleProperty::JustifyContent), Some(""));
    }
}
