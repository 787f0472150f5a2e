//! Property-based invariant tests for the connected positioning engine.
//!
//! These hold for **any** origin, overlay size and candidate list:
//!
//! 1. Every apply leaves one vertical and one horizontal edge on the box
//!    that carries the position.
//! 2. The first candidate that fits is chosen, regardless of later ones.
//! 3. Identical geometry produces identical styles.
//! 4. Switching to rtl mirrors a start/end placement around the origin.
//! 5. With push, an overlay smaller than the viewport ends up inside it.

use proptest::prelude::*;
use tether_core::{ClientRect, Direction, Size, StyleProperty};
use tether_harness::{FakeOverlay, Scenario};
use tether_overlay::{
    ConnectionPositionPair, FlexibleConnectedPositionStrategy, HorizontalConnectionPos,
    OriginConnectionPosition, OverlayConnectionPosition, VerticalConnectionPos,
};

const VIEWPORT: Size = Size {
    width: 1024.0,
    height: 768.0,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn horizontal() -> impl Strategy<Value = HorizontalConnectionPos> {
    prop_oneof![
        Just(HorizontalConnectionPos::Start),
        Just(HorizontalConnectionPos::Center),
        Just(HorizontalConnectionPos::End),
    ]
}

fn vertical() -> impl Strategy<Value = VerticalConnectionPos> {
    prop_oneof![
        Just(VerticalConnectionPos::Top),
        Just(VerticalConnectionPos::Center),
        Just(VerticalConnectionPos::Bottom),
    ]
}

fn pair_strategy() -> impl Strategy<Value = ConnectionPositionPair> {
    (horizontal(), vertical(), horizontal(), vertical()).prop_map(|(ox, oy, vx, vy)| {
        ConnectionPositionPair::new(
            OriginConnectionPosition::new(ox, oy),
            OverlayConnectionPosition::new(vx, vy),
        )
    })
}

fn origin_strategy() -> impl Strategy<Value = ClientRect> {
    (-50i32..=1000, -50i32..=750, 1i32..=120, 1i32..=60)
        .prop_map(|(x, y, w, h)| ClientRect::new(x as f64, y as f64, w as f64, h as f64))
}

fn overlay_strategy() -> impl Strategy<Value = Size> {
    (1i32..=600, 1i32..=600).prop_map(|(w, h)| Size::new(w as f64, h as f64))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ltr), Just(Direction::Rtl)]
}

fn run(
    origin: ClientRect,
    overlay: Size,
    configure: impl FnOnce(FlexibleConnectedPositionStrategy) -> FlexibleConnectedPositionStrategy,
) -> (Scenario, FlexibleConnectedPositionStrategy) {
    let scenario = Scenario::with_viewport(VIEWPORT, origin, overlay);
    let mut strategy = configure(FlexibleConnectedPositionStrategy::new(
        scenario.origin_handle(),
        scenario.ruler(),
    ));
    strategy.attach(scenario.overlay_handle()).unwrap();
    strategy.apply();
    (scenario, strategy)
}

/// Whether `pair` fits entirely inside the viewport in ltr with no offsets.
fn fits_ltr(origin: &ClientRect, overlay: Size, pair: &ConnectionPositionPair) -> bool {
    let ox = match pair.origin.origin_x {
        HorizontalConnectionPos::Start => origin.left,
        HorizontalConnectionPos::Center => origin.left + origin.width / 2.0,
        HorizontalConnectionPos::End => origin.right,
    };
    let oy = match pair.origin.origin_y {
        VerticalConnectionPos::Top => origin.top,
        VerticalConnectionPos::Center => origin.top + origin.height / 2.0,
        VerticalConnectionPos::Bottom => origin.bottom,
    };
    let x = match pair.overlay.overlay_x {
        HorizontalConnectionPos::Start => ox,
        HorizontalConnectionPos::Center => ox - overlay.width / 2.0,
        HorizontalConnectionPos::End => ox - overlay.width,
    };
    let y = match pair.overlay.overlay_y {
        VerticalConnectionPos::Top => oy,
        VerticalConnectionPos::Center => oy - overlay.height / 2.0,
        VerticalConnectionPos::Bottom => oy - overlay.height,
    };
    x >= 0.0
        && y >= 0.0
        && x + overlay.width <= VIEWPORT.width
        && y + overlay.height <= VIEWPORT.height
}

type StyleReader = fn(&FakeOverlay, StyleProperty) -> Option<&str>;

fn one_of(overlay: &FakeOverlay, styles: StyleReader, a: StyleProperty, b: StyleProperty) -> bool {
    styles(overlay, a).is_some() != styles(overlay, b).is_some()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Exactly one edge per axis on the positioned box
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn apply_always_writes_one_edge_per_axis(
        origin in origin_strategy(),
        overlay in overlay_strategy(),
        pairs in proptest::collection::vec(pair_strategy(), 1..=6),
        direction in direction_strategy(),
        flexible in any::<bool>(),
        push in any::<bool>(),
        margin in 0i32..=16,
    ) {
        let (scenario, strategy) = run(origin, overlay, |s| {
            s.with_positions(pairs)
                .unwrap()
                .with_direction(direction)
                .with_flexible_dimensions(flexible, None, None)
                .with_push(push)
                .with_viewport_margin(margin as f64)
        });
        prop_assert!(strategy.last_position().is_some());

        let host = scenario.overlay.borrow();
        let positioned_by_pane = host.pane_style(StyleProperty::Position) != Some("static");
        let styles: StyleReader = if positioned_by_pane {
            FakeOverlay::pane_style
        } else {
            FakeOverlay::host_style
        };
        prop_assert!(one_of(&host, styles, StyleProperty::Top, StyleProperty::Bottom));
        prop_assert!(one_of(&host, styles, StyleProperty::Left, StyleProperty::Right));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. First exact fit wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_fitting_candidate_is_chosen(
        origin in origin_strategy(),
        overlay in overlay_strategy(),
        pairs in proptest::collection::vec(pair_strategy(), 1..=6),
        flexible in any::<bool>(),
    ) {
        let expected = pairs.iter().find(|p| fits_ltr(&origin, overlay, p)).cloned();
        let (_scenario, strategy) = run(origin, overlay, |s| {
            s.with_positions(pairs)
                .unwrap()
                .with_flexible_dimensions(flexible, None, None)
        });
        if let Some(expected) = expected {
            prop_assert_eq!(strategy.last_position(), Some(&expected));
            prop_assert!(!strategy.is_pushed());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_geometry_gives_identical_styles(
        origin in origin_strategy(),
        overlay in overlay_strategy(),
        pairs in proptest::collection::vec(pair_strategy(), 1..=6),
        direction in direction_strategy(),
        flexible in any::<bool>(),
    ) {
        let configure = |s: FlexibleConnectedPositionStrategy| {
            s.with_positions(pairs.clone())
                .unwrap()
                .with_direction(direction)
                .with_flexible_dimensions(flexible, None, None)
        };
        let (a, _sa) = run(origin, overlay, configure);
        let (b, _sb) = run(origin, overlay, configure);
        prop_assert_eq!(a.overlay.borrow().snapshot(), b.overlay.borrow().snapshot());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. RTL mirroring
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rtl_mirrors_around_origin(
        origin in origin_strategy(),
        overlay in overlay_strategy(),
        pair in pair_strategy(),
    ) {
        let place = |direction| {
            let (scenario, _strategy) = run(origin, overlay, |s| {
                s.with_positions([pair.clone()])
                    .unwrap()
                    .with_direction(direction)
                    .with_flexible_dimensions(false, None, None)
                    .with_push(false)
            });
            scenario.pane_rect()
        };
        let ltr = place(Direction::Ltr).unwrap();
        let rtl = place(Direction::Rtl).unwrap();

        prop_assert_eq!(rtl.top, ltr.top);
        prop_assert!((rtl.left - (origin.left + origin.right - ltr.right)).abs() < 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Push keeps small overlays on screen
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn push_keeps_overlay_inside_viewport(
        origin in origin_strategy(),
        overlay in overlay_strategy(),
        pairs in proptest::collection::vec(pair_strategy(), 1..=4),
    ) {
        let (scenario, _strategy) = run(origin, overlay, |s| {
            s.with_positions(pairs)
                .unwrap()
                .with_flexible_dimensions(false, None, None)
                .with_push(true)
        });
        let rect = scenario.pane_rect().unwrap();
        let viewport = ClientRect::new(0.0, 0.0, VIEWPORT.width, VIEWPORT.height);
        prop_assert!(viewport.contains_rect(&rect), "{rect:?}");
    }
}
