#![forbid(unsafe_code)]

//! Flexible connected positioning.
//!
//! [`FlexibleConnectedPositionStrategy`] places an overlay next to an origin
//! by trying an ordered list of [`ConnectionPositionPair`]s.
//!
//! # Decision order
//!
//! | Step | Rule |
//! |------|------|
//! | 1 | the first pair that fits entirely inside the narrowed viewport |
//! | 2 | with flexible dimensions: the first pair whose overlay top-left is inside the viewport and leaves at least the configured minimum on every overflowing axis |
//! | 3 | the pair with the largest visible area; ties go to the higher weight, then to list order |
//! | 4 | with push: the step 3 pair translated back on screen |
//!
//! # Invariants
//!
//! 1. Every apply writes exactly one of `top`/`bottom` and one of
//!    `left`/`right` to the pane (exact placement) or to the bounding box
//!    (flexible placement), after clearing all four.
//! 2. An earlier exact fit is never overridden by a later candidate.
//! 3. The viewport is measured on every apply; nothing is cached across
//!    calls except the last pair, box size and push amount.
//! 4. Exactly one [`ConnectedOverlayPositionChange`] is emitted per apply,
//!    after the styles were written.
//!
//! # Failure Modes
//!
//! - **Configuration**: empty candidate lists and attaching to a second
//!   overlay return [`PositionError`] at call time.
//! - **Geometry**: never an error. When nothing fits the fallback is used.
//! - **After dispose**: every operation is a silent no-op. Disposal tolerates
//!   an overlay handle that is already borrowed or torn down.
//! - **Busy host**: when the overlay handle is borrowed elsewhere, apply
//!   skips the pass and leaves the previous placement in place.

use std::rc::Rc;

use smallvec::SmallVec;
use tether_core::{
    BoundingRect, ClientRect, Direction, ElementHandle, Point, SharedOverlay, Size, StyleDeclaration,
    ViewportRuler,
};
use tracing::{debug, trace, warn};

use crate::changes::PositionChanges;
use crate::error::PositionError;
use crate::options::PositionOptions;
use crate::origin::FlexibleConnectedOrigin;
use crate::placement::{self, BoundingBox, Measurements, OverlayFit};
use crate::position::{
    ConnectedOverlayPositionChange, ConnectionPositionPair, HorizontalConnectionPos,
    VerticalConnectionPos,
};
use crate::scroll_clip::ScrollingVisibility;
use crate::style::{self, BoxLayout, PaneLayout};

/// Class added to the overlay host while a connected strategy is attached.
pub const BOUNDING_BOX_CLASS: &str = "tether-connected-position-bounding-box";

/// Best non-fitting candidate seen so far.
#[derive(Debug, Clone, Copy)]
struct Fallback {
    index: usize,
    origin_point: Point,
    fit: OverlayFit,
    weight: f64,
}

impl Fallback {
    fn beats(&self, other: &Fallback) -> bool {
        self.fit.visible_area > other.fit.visible_area
            || (self.fit.visible_area == other.fit.visible_area && self.weight > other.weight)
    }
}

/// Positions an overlay relative to an origin, choosing among candidate
/// pairs.
///
/// ```
/// use std::rc::Rc;
/// use tether_core::{ClientRect, ScrollPosition, ViewportRuler};
/// use tether_overlay::{ConnectionPositionPair, FlexibleConnectedPositionStrategy};
///
/// struct Screen;
/// impl ViewportRuler for Screen {
///     fn viewport_rect(&self) -> ClientRect { ClientRect::new(0.0, 0.0, 1024.0, 768.0) }
///     fn scroll_position(&self) -> ScrollPosition { ScrollPosition::default() }
/// }
///
/// let below = ConnectionPositionPair::parse("start", "bottom", "start", "top").unwrap();
/// let strategy = FlexibleConnectedPositionStrategy::new(
///     ClientRect::new(500.0, 350.0, 60.0, 30.0),
///     Rc::new(Screen),
/// )
/// .with_positions([below])
/// .unwrap()
/// .with_push(false);
/// assert!(!strategy.is_attached());
/// ```
pub struct FlexibleConnectedPositionStrategy {
    viewport_ruler: Rc<dyn ViewportRuler>,
    origin: FlexibleConnectedOrigin,
    preferred_positions: Vec<ConnectionPositionPair>,
    direction: Direction,
    viewport_margin: f64,
    can_push: bool,
    has_flexible_dimensions: bool,
    min_width: Option<f64>,
    min_height: Option<f64>,
    position_locked: bool,
    grow_after_open: bool,
    offset_x: f64,
    offset_y: f64,
    transform_origin_selector: Option<String>,
    scrollables: Vec<ElementHandle>,

    overlay: Option<SharedOverlay>,
    listening: bool,
    is_initial_render: bool,
    is_pushed: bool,
    is_disposed: bool,
    last_position: Option<ConnectionPositionPair>,
    last_bounding_box_size: Option<Size>,
    previous_push_amount: Option<Point>,
    applied_panel_classes: SmallVec<[String; 2]>,
    position_changes: PositionChanges,
}

impl std::fmt::Debug for FlexibleConnectedPositionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexibleConnectedPositionStrategy")
            .field("origin", &self.origin)
            .field("positions", &self.preferred_positions.len())
            .field("direction", &self.direction)
            .field("viewport_margin", &self.viewport_margin)
            .field("can_push", &self.can_push)
            .field("flexible", &self.has_flexible_dimensions)
            .field("locked", &self.position_locked)
            .field("attached", &self.is_attached())
            .field("disposed", &self.is_disposed)
            .finish_non_exhaustive()
    }
}

impl FlexibleConnectedPositionStrategy {
    /// New strategy with no candidates yet. Push and flexible dimensions
    /// are on, margin and offsets are zero.
    pub fn new(
        origin: impl Into<FlexibleConnectedOrigin>,
        viewport_ruler: Rc<dyn ViewportRuler>,
    ) -> Self {
        Self {
            viewport_ruler,
            origin: origin.into(),
            preferred_positions: Vec::new(),
            direction: Direction::Ltr,
            viewport_margin: 0.0,
            can_push: true,
            has_flexible_dimensions: true,
            min_width: None,
            min_height: None,
            position_locked: false,
            grow_after_open: false,
            offset_x: 0.0,
            offset_y: 0.0,
            transform_origin_selector: None,
            scrollables: Vec::new(),
            overlay: None,
            listening: false,
            is_initial_render: true,
            is_pushed: false,
            is_disposed: false,
            last_position: None,
            last_bounding_box_size: None,
            previous_push_amount: None,
            applied_panel_classes: SmallVec::new(),
            position_changes: PositionChanges::new(),
        }
    }

    // --- builders ---------------------------------------------------------

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<FlexibleConnectedOrigin>) -> Self {
        self.set_origin(origin);
        self
    }

    /// Replace the candidate list. Fails on an empty list.
    pub fn with_positions(
        mut self,
        positions: impl IntoIterator<Item = ConnectionPositionPair>,
    ) -> Result<Self, PositionError> {
        self.set_positions(positions)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_push(mut self, can_push: bool) -> Self {
        self.can_push = can_push;
        self
    }

    /// Allow the overlay to shrink instead of overflowing. Minimums override
    /// the overlay's own `min_width`/`min_height` when set.
    #[must_use]
    pub fn with_flexible_dimensions(
        mut self,
        flexible: bool,
        min_width: Option<f64>,
        min_height: Option<f64>,
    ) -> Self {
        self.has_flexible_dimensions = flexible;
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    #[must_use]
    pub fn with_viewport_margin(mut self, margin: f64) -> Self {
        self.viewport_margin = margin;
        self
    }

    /// Keep the first chosen pair on later applies, even when it stops
    /// fitting. A viewport resize still triggers a full search.
    #[must_use]
    pub fn with_locked_position(mut self, locked: bool) -> Self {
        self.position_locked = locked;
        self
    }

    /// Let centered flexible axes grow past their previous size on re-apply.
    #[must_use]
    pub fn with_grow_after_open(mut self, grow_after_open: bool) -> Self {
        self.grow_after_open = grow_after_open;
        self
    }

    #[must_use]
    pub fn with_default_offset_x(mut self, offset: f64) -> Self {
        self.offset_x = offset;
        self
    }

    #[must_use]
    pub fn with_default_offset_y(mut self, offset: f64) -> Self {
        self.offset_y = offset;
        self
    }

    /// Descendants of the pane matching `selector` receive a transform
    /// origin that follows the chosen anchor.
    #[must_use]
    pub fn with_transform_origin_on(mut self, selector: impl Into<String>) -> Self {
        self.transform_origin_selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn with_scrollable_containers(
        mut self,
        scrollables: impl IntoIterator<Item = ElementHandle>,
    ) -> Self {
        self.scrollables = scrollables.into_iter().collect();
        self
    }

    /// Apply a whole options record. See [`Self::configure`].
    pub fn with_options(mut self, options: &PositionOptions) -> Result<Self, PositionError> {
        self.configure(options)?;
        Ok(self)
    }

    // --- setters ----------------------------------------------------------

    /// Swap the anchor. Takes effect on the next apply.
    pub fn set_origin(&mut self, origin: impl Into<FlexibleConnectedOrigin>) {
        self.origin = origin.into();
    }

    /// Replace the candidate list and forget the last chosen pair.
    ///
    /// On an empty list the current candidates are kept.
    pub fn set_positions(
        &mut self,
        positions: impl IntoIterator<Item = ConnectionPositionPair>,
    ) -> Result<(), PositionError> {
        let positions: Vec<_> = positions.into_iter().collect();
        if positions.is_empty() {
            warn!("rejected empty connection position list");
            return Err(PositionError::NoPositions);
        }
        self.preferred_positions = positions;
        self.last_position = None;
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Apply every field of `options`. An empty `positions` list leaves the
    /// current candidates untouched.
    pub fn configure(&mut self, options: &PositionOptions) -> Result<(), PositionError> {
        if !options.positions.is_empty() {
            self.set_positions(options.positions.iter().cloned())?;
        }
        self.direction = options.direction;
        self.can_push = options.push;
        self.has_flexible_dimensions = options.flexible_dimensions;
        self.min_width = options.min_width;
        self.min_height = options.min_height;
        self.viewport_margin = options.viewport_margin;
        self.position_locked = options.locked_position;
        self.grow_after_open = options.grow_after_open;
        self.offset_x = options.default_offset_x;
        self.offset_y = options.default_offset_y;
        self.transform_origin_selector = options.transform_origin_selector.clone();
        Ok(())
    }

    /// Append one candidate. Used by the legacy fallback API.
    pub(crate) fn push_position(&mut self, position: ConnectionPositionPair) {
        self.preferred_positions.push(position);
        self.last_position = None;
    }

    // --- accessors --------------------------------------------------------

    pub fn positions(&self) -> &[ConnectionPositionPair] {
        &self.preferred_positions
    }

    pub fn origin(&self) -> &FlexibleConnectedOrigin {
        &self.origin
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn viewport_margin(&self) -> f64 {
        self.viewport_margin
    }

    pub fn can_push(&self) -> bool {
        self.can_push
    }

    pub fn has_flexible_dimensions(&self) -> bool {
        self.has_flexible_dimensions
    }

    pub fn is_position_locked(&self) -> bool {
        self.position_locked
    }

    /// Pair chosen by the most recent apply.
    pub fn last_position(&self) -> Option<&ConnectionPositionPair> {
        self.last_position.as_ref()
    }

    /// True when the most recent apply pushed a fallback on screen.
    pub fn is_pushed(&self) -> bool {
        self.is_pushed
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed
    }

    pub fn is_attached(&self) -> bool {
        self.overlay.is_some()
    }

    /// Handle to the position-change stream.
    pub fn position_changes(&self) -> PositionChanges {
        self.position_changes.clone()
    }

    // --- lifecycle --------------------------------------------------------

    /// Bind to `overlay`.
    ///
    /// Re-attaching to the overlay already bound is allowed and restarts the
    /// strategy as if freshly opened.
    pub fn attach(&mut self, overlay: SharedOverlay) -> Result<(), PositionError> {
        if let Some(current) = &self.overlay
            && !Rc::ptr_eq(current, &overlay)
            && current.borrow().id() != overlay.borrow().id()
        {
            warn!(
                current = current.borrow().id(),
                requested = overlay.borrow().id(),
                "position strategy is already attached"
            );
            return Err(PositionError::AlreadyAttached);
        }
        if self.preferred_positions.is_empty() {
            warn!("attach without connection positions");
            return Err(PositionError::NoPositions);
        }

        overlay.borrow_mut().add_host_class(BOUNDING_BOX_CLASS);
        debug!(overlay = overlay.borrow().id(), "position strategy attached");

        if self.position_changes.is_completed() {
            self.position_changes = PositionChanges::new();
        }
        self.overlay = Some(overlay);
        self.is_disposed = false;
        self.is_initial_render = true;
        self.is_pushed = false;
        self.last_position = None;
        self.last_bounding_box_size = None;
        self.previous_push_amount = None;
        self.listening = true;
        Ok(())
    }

    /// Release the overlay. Panel classes written by this strategy are
    /// removed; positioning styles stay until the next strategy overwrites
    /// them.
    pub fn detach(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.clear_panel_classes(&overlay);
            debug!("position strategy detached");
        }
        self.applied_panel_classes.clear();
        self.last_position = None;
        self.previous_push_amount = None;
        self.listening = false;
    }

    /// Viewport resized: search all candidates again, even when locked.
    pub fn handle_viewport_change(&mut self) {
        if !self.listening || self.is_disposed || self.overlay.is_none() {
            return;
        }
        self.is_initial_render = true;
        self.apply();
    }

    /// Clear everything this strategy wrote and close the change stream.
    /// Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }

        if let Some(overlay) = &self.overlay {
            match overlay.try_borrow_mut() {
                Ok(mut host) => {
                    host.apply_host_styles(&style::bounding_box_cleared());
                    host.apply_pane_styles(&style::pane_reset());
                    host.remove_host_class(BOUNDING_BOX_CLASS);
                    for class in &self.applied_panel_classes {
                        host.remove_pane_class(class);
                    }
                }
                Err(_) => debug!("overlay busy during dispose; skipping style cleanup"),
            }
        }

        self.applied_panel_classes.clear();
        self.detach();
        self.position_changes.complete();
        self.is_disposed = true;
        debug!("position strategy disposed");
    }

    // --- positioning ------------------------------------------------------

    /// Choose a pair and write its styles.
    pub fn apply(&mut self) {
        if self.is_disposed {
            return;
        }
        let Some(overlay) = self.overlay.clone() else {
            return;
        };

        if !self.is_initial_render && self.position_locked && self.last_position.is_some() {
            self.reapply_last_position();
            return;
        }

        let _span = tracing::debug_span!(
            "overlay_apply",
            candidates = self.preferred_positions.len(),
            initial = self.is_initial_render
        )
        .entered();

        self.clear_panel_classes(&overlay);
        if !self.reset_styles(&overlay) {
            return;
        }
        let Some(measured) = self.measure(&overlay) else {
            return;
        };

        let mut exact_fit: Option<(usize, Point)> = None;
        let mut flexible_fit: Option<(usize, Point)> = None;
        let mut fallback: Option<Fallback> = None;

        for (index, position) in self.preferred_positions.iter().enumerate() {
            let origin_point = placement::origin_point(
                &measured.origin,
                &measured.container,
                position,
                self.direction,
            );
            let overlay_point = placement::overlay_point(
                origin_point,
                measured.overlay.size(),
                position,
                self.direction,
            );
            let offset = self.offset_for(position);
            let fit = placement::overlay_fit(
                overlay_point.offset(offset.x, offset.y),
                &measured.overlay,
                &measured.viewport,
            );

            trace!(
                index,
                origin_x = position.origin.origin_x.as_str(),
                origin_y = position.origin.origin_y.as_str(),
                overlay_x = position.overlay.overlay_x.as_str(),
                overlay_y = position.overlay.overlay_y.as_str(),
                visible_area = fit.visible_area,
                fits = fit.is_completely_within_viewport,
                "candidate evaluated"
            );

            if fit.is_completely_within_viewport {
                exact_fit = Some((index, origin_point));
                break;
            }

            if flexible_fit.is_none()
                && self.can_fit_with_flexible_dimensions(overlay_point, &fit, &measured)
            {
                flexible_fit = Some((index, origin_point));
            }

            let candidate = Fallback {
                index,
                origin_point,
                fit,
                weight: position.effective_weight(),
            };
            if fallback.is_none_or(|best| candidate.beats(&best)) {
                fallback = Some(candidate);
            }
        }

        if let Some((index, origin_point)) = exact_fit.or(flexible_fit) {
            self.is_pushed = false;
            self.apply_position(&overlay, index, origin_point, &measured);
        } else if let Some(best) = fallback {
            self.is_pushed = self.can_push;
            if self.is_pushed {
                trace!(index = best.index, "pushing fallback on screen");
            }
            self.apply_position(&overlay, best.index, best.origin_point, &measured);
        }
    }

    /// Re-align the last chosen pair without searching. Runs a full
    /// [`apply`](Self::apply) when nothing was chosen yet.
    pub fn reapply_last_position(&mut self) {
        if self.is_disposed {
            return;
        }
        let Some(overlay) = self.overlay.clone() else {
            return;
        };
        let Some(last) = self.last_position.clone() else {
            self.apply();
            return;
        };

        self.clear_panel_classes(&overlay);
        if !self.reset_styles(&overlay) {
            return;
        }
        let Some(measured) = self.measure(&overlay) else {
            return;
        };
        let origin_point =
            placement::origin_point(&measured.origin, &measured.container, &last, self.direction);
        self.write_position(&overlay, last, origin_point, &measured);
    }

    // --- internals --------------------------------------------------------

    fn measure(&self, overlay: &SharedOverlay) -> Option<Measurements> {
        let full_viewport = self.viewport_ruler.client_rect();
        let Ok(host) = overlay.try_borrow() else {
            debug!("overlay busy; skipping apply");
            return None;
        };
        Some(Measurements {
            origin: self.origin.rect(),
            overlay: host.pane_rect(),
            container: host.container_rect(),
            viewport: full_viewport.inset(self.viewport_margin),
            full_viewport,
            config: host.config(),
        })
    }

    fn offset_for(&self, position: &ConnectionPositionPair) -> Point {
        Point::new(
            position.offset_x.unwrap_or(self.offset_x),
            position.offset_y.unwrap_or(self.offset_y),
        )
    }

    /// Minimums set on the strategy, else on the overlay config.
    fn configured_min(&self, measured: &Measurements) -> (Option<f64>, Option<f64>) {
        (
            self.min_width.or(measured.config.min_width),
            self.min_height.or(measured.config.min_height),
        )
    }

    fn min_size(&self, measured: &Measurements) -> Size {
        let (width, height) = self.configured_min(measured);
        Size::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
    }

    fn growth_limit(&self) -> Option<Size> {
        if self.is_initial_render || self.grow_after_open {
            None
        } else {
            self.last_bounding_box_size
        }
    }

    /// An overflowing axis only counts as flexible when a minimum is
    /// configured for it and the space left from `overlay_point` covers it.
    fn can_fit_with_flexible_dimensions(
        &self,
        overlay_point: Point,
        fit: &OverlayFit,
        measured: &Measurements,
    ) -> bool {
        if !self.has_flexible_dimensions || !measured.viewport.contains_point(overlay_point) {
            return false;
        }
        let available_width = measured.viewport.right - overlay_point.x;
        let available_height = measured.viewport.bottom - overlay_point.y;
        let (min_width, min_height) = self.configured_min(measured);
        let vertical = fit.fits_in_viewport_vertically
            || min_height.is_some_and(|min| min <= available_height);
        let horizontal = fit.fits_in_viewport_horizontally
            || min_width.is_some_and(|min| min <= available_width);
        vertical && horizontal
    }

    fn apply_position(
        &mut self,
        overlay: &SharedOverlay,
        index: usize,
        origin_point: Point,
        measured: &Measurements,
    ) {
        let Some(position) = self.preferred_positions.get(index).cloned() else {
            return;
        };
        self.write_position(overlay, position, origin_point, measured);
    }

    fn write_position(
        &mut self,
        overlay: &SharedOverlay,
        position: ConnectionPositionPair,
        origin_point: Point,
        measured: &Measurements,
    ) {
        let exact = !self.has_flexible_dimensions || self.is_pushed;
        let bounding_box = placement::bounding_box(
            origin_point,
            &position,
            self.direction,
            &measured.viewport,
            self.growth_limit(),
        );
        let min = self.min_size(measured);
        let box_size = Size::new(
            bounding_box.rect.width.max(min.width),
            bounding_box.rect.height.max(min.height),
        );

        let natural = measured.overlay.size();
        let offset = self.offset_for(&position);
        let overlay_point =
            placement::overlay_point(origin_point, natural, &position, self.direction);
        let push = if self.is_pushed {
            self.push_amount(overlay_point.offset(offset.x, offset.y), measured)
        } else {
            Point::default()
        };
        let placed = overlay_point.offset(push.x, push.y);

        let pane_styles = style::overlay_pane_styles(&PaneLayout {
            position: &position,
            direction: self.direction,
            overlay_point: placed,
            overlay_size: natural,
            offset,
            full_viewport: measured.full_viewport,
            config: measured.config,
            exact,
        });
        let host_styles = style::bounding_box_styles(&BoxLayout {
            position: &position,
            bounding_box: &bounding_box,
            size: box_size,
            full_viewport: measured.full_viewport,
            config: measured.config,
            exact,
        });

        let flexible_size = (!exact).then(|| {
            Size::new(
                natural.width.min(box_size.width).max(min.width),
                natural.height.min(box_size.height).max(min.height),
            )
        });
        let constrained = natural.width > box_size.width || natural.height > box_size.height;
        let applied_size = flexible_size.filter(|_| constrained);
        let overlay_rect = match flexible_size {
            Some(size) => flexible_overlay_rect(&bounding_box, box_size, size, &position)
                .translate(offset.x, offset.y),
            None => ClientRect::from_point_size(placed.offset(offset.x, offset.y), natural),
        };

        if !self.write_styles(overlay, &pane_styles, &host_styles, &position) {
            return;
        }

        debug!(
            origin_x = position.origin.origin_x.as_str(),
            origin_y = position.origin.origin_y.as_str(),
            overlay_x = position.overlay.overlay_x.as_str(),
            overlay_y = position.overlay.overlay_y.as_str(),
            exact,
            pushed = self.is_pushed,
            x = overlay_rect.left,
            y = overlay_rect.top,
            "overlay positioned"
        );

        let containers: SmallVec<[ClientRect; 4]> =
            self.scrollables.iter().map(|s| s.bounding_rect()).collect();
        let scrollable_view_properties =
            ScrollingVisibility::evaluate(&measured.origin, &overlay_rect, &containers);

        self.last_position = Some(position.clone());
        self.last_bounding_box_size = Some(bounding_box.rect.size());
        self.is_initial_render = false;

        self.position_changes.emit(ConnectedOverlayPositionChange {
            connection_pair: position,
            scrollable_view_properties,
            applied_size,
        });
    }

    fn write_styles(
        &mut self,
        overlay: &SharedOverlay,
        pane_styles: &StyleDeclaration,
        host_styles: &StyleDeclaration,
        position: &ConnectionPositionPair,
    ) -> bool {
        let Ok(mut host) = overlay.try_borrow_mut() else {
            debug!("overlay busy; skipping style write");
            return false;
        };
        if let Some(selector) = &self.transform_origin_selector {
            host.set_transform_origin(selector, &style::transform_origin(position, self.direction));
        }
        host.apply_host_styles(host_styles);
        host.apply_pane_styles(pane_styles);
        for class in &position.panel_class {
            host.add_pane_class(class);
            self.applied_panel_classes.push(class.clone());
        }
        true
    }

    fn push_amount(&mut self, start: Point, measured: &Measurements) -> Point {
        if self.position_locked
            && let Some(previous) = self.previous_push_amount
        {
            return previous;
        }
        let amount = placement::push_amount(start, &measured.overlay, &measured.viewport);
        self.previous_push_amount = Some(amount);
        amount
    }

    /// Returns false when the host is borrowed elsewhere; nothing is written.
    fn reset_styles(&self, overlay: &SharedOverlay) -> bool {
        let Ok(mut host) = overlay.try_borrow_mut() else {
            debug!("overlay busy; skipping apply");
            return false;
        };
        host.apply_pane_styles(&style::pane_reset());
        host.apply_host_styles(&style::bounding_box_reset());
        true
    }

    fn clear_panel_classes(&mut self, overlay: &SharedOverlay) {
        if self.applied_panel_classes.is_empty() {
            return;
        }
        if let Ok(mut host) = overlay.try_borrow_mut() {
            for class in &self.applied_panel_classes {
                host.remove_pane_class(class);
            }
        }
        self.applied_panel_classes.clear();
    }
}

/// Where a shrunk overlay sits inside its flexible bounding box.
fn flexible_overlay_rect(
    bounding_box: &BoundingBox,
    box_size: Size,
    size: Size,
    position: &ConnectionPositionPair,
) -> ClientRect {
    let rect = &bounding_box.rect;
    let left = match bounding_box.horizontal {
        placement::HorizontalEdge::Left => rect.left,
        placement::HorizontalEdge::Right => rect.right - box_size.width,
    };
    let top = match bounding_box.vertical {
        placement::VerticalEdge::Top => rect.top,
        placement::VerticalEdge::Bottom => rect.bottom - box_size.height,
    };
    let x = match position.overlay.overlay_x {
        HorizontalConnectionPos::Start => left,
        HorizontalConnectionPos::Center => left + (box_size.width - size.width) / 2.0,
        HorizontalConnectionPos::End => left + box_size.width - size.width,
    };
    let y = match position.overlay.overlay_y {
        VerticalConnectionPos::Top => top,
        VerticalConnectionPos::Center => top + (box_size.height - size.height) / 2.0,
        VerticalConnectionPos::Bottom => top + box_size.height - size.height,
    };
    ClientRect::from_point_size(Point::new(x, y), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::ScrollPosition;
    use tether_harness::Scenario;
    use tracing_test::traced_test;

    struct Screen;

    impl ViewportRuler for Screen {
        fn viewport_rect(&self) -> ClientRect {
            ClientRect::new(0.0, 0.0, 1024.0, 768.0)
        }

        fn scroll_position(&self) -> ScrollPosition {
            ScrollPosition::default()
        }
    }

    fn below() -> ConnectionPositionPair {
        ConnectionPositionPair::parse("start", "bottom", "start", "top").unwrap()
    }

    fn strategy() -> FlexibleConnectedPositionStrategy {
        FlexibleConnectedPositionStrategy::new(
            ClientRect::new(500.0, 350.0, 60.0, 30.0),
            Rc::new(Screen),
        )
    }

    #[test]
    fn defaults() {
        let s = strategy();
        assert!(s.can_push());
        assert!(s.has_flexible_dimensions());
        assert!(!s.is_position_locked());
        assert_eq!(s.viewport_margin(), 0.0);
        assert_eq!(s.direction(), Direction::Ltr);
        assert!(s.positions().is_empty());
    }

    #[test]
    fn empty_positions_are_rejected_and_list_kept() {
        let mut s = strategy().with_positions([below()]).unwrap();
        assert_eq!(s.set_positions([]), Err(PositionError::NoPositions));
        assert_eq!(s.positions().len(), 1);
    }

    #[test]
    fn builders_overwrite_scalars_and_replace_lists() {
        let above = ConnectionPositionPair::parse("start", "top", "start", "bottom").unwrap();
        let s = strategy()
            .with_positions([below(), above.clone()])
            .unwrap()
            .with_positions([above.clone()])
            .unwrap()
            .with_viewport_margin(4.0)
            .with_viewport_margin(8.0)
            .with_push(false);
        assert_eq!(s.positions(), &[above]);
        assert_eq!(s.viewport_margin(), 8.0);
        assert!(!s.can_push());
    }

    #[test]
    fn apply_before_attach_is_noop() {
        let mut s = strategy().with_positions([below()]).unwrap();
        s.apply();
        s.reapply_last_position();
        assert!(s.last_position().is_none());
    }

    #[test]
    fn dispose_without_overlay_is_idempotent() {
        let mut s = strategy().with_positions([below()]).unwrap();
        s.dispose();
        s.dispose();
        assert!(s.is_disposed());
        assert!(s.position_changes().is_completed());
    }

    #[test]
    fn fallback_prefers_area_then_weight_then_order() {
        let fit = |area| OverlayFit {
            visible_area: area,
            is_completely_within_viewport: false,
            fits_in_viewport_horizontally: false,
            fits_in_viewport_vertically: false,
        };
        let make = |index, area, weight| Fallback {
            index,
            origin_point: Point::default(),
            fit: fit(area),
            weight,
        };
        assert!(make(1, 20.0, 1.0).beats(&make(0, 10.0, 5.0)));
        assert!(make(1, 10.0, 2.0).beats(&make(0, 10.0, 1.0)));
        assert!(!make(1, 10.0, 1.0).beats(&make(0, 10.0, 1.0)));
    }

    #[test]
    fn flexible_rect_aligns_inside_box() {
        let bb = BoundingBox {
            rect: ClientRect::new(0.0, 0.0, 300.0, 200.0),
            vertical: placement::VerticalEdge::Bottom,
            horizontal: placement::HorizontalEdge::Right,
        };
        let end = ConnectionPositionPair::parse("end", "top", "end", "bottom").unwrap();
        let r = flexible_overlay_rect(&bb, bb.rect.size(), Size::new(60.0, 30.0), &end);
        assert_eq!(r, ClientRect::new(240.0, 170.0, 60.0, 30.0));
    }

    #[test]
    #[traced_test]
    fn logs_candidates_and_chosen_placement() {
        let s = Scenario::new(ClientRect::new(500.0, 350.0, 60.0, 30.0), Size::new(60.0, 30.0));
        let mut strategy = FlexibleConnectedPositionStrategy::new(s.origin_handle(), s.ruler())
            .with_positions([below()])
            .unwrap();
        strategy.attach(s.overlay_handle()).unwrap();
        strategy.apply();

        assert!(logs_contain("candidate evaluated"));
        assert!(logs_contain("overlay positioned"));
    }

    #[test]
    #[traced_test]
    fn warns_on_rejected_configuration() {
        let mut s = strategy();
        assert!(s.set_positions([]).is_err());
        assert!(logs_contain("rejected empty connection position list"));
    }
}
