#![forbid(unsafe_code)]

//! Legacy connected positioning.
//!
//! The older API describes one preferred alignment plus fallbacks, and never
//! resizes or pushes the overlay. It is a thin layer over
//! [`FlexibleConnectedPositionStrategy`] with flexible dimensions, push and
//! viewport margin turned off; fallbacks become later entries of the
//! candidate list.

use std::rc::Rc;

use tether_core::{Direction, SharedOverlay, ViewportRuler};

use crate::changes::{PositionChanges, Subscription};
use crate::error::PositionError;
use crate::origin::FlexibleConnectedOrigin;
use crate::position::{
    ConnectedOverlayPositionChange, ConnectionPositionPair, OriginConnectionPosition,
    OverlayConnectionPosition,
};
use crate::strategy::FlexibleConnectedPositionStrategy;

/// Preferred position plus ordered fallbacks.
#[derive(Debug)]
pub struct ConnectedPositionStrategy {
    inner: FlexibleConnectedPositionStrategy,
}

impl ConnectedPositionStrategy {
    pub fn new(
        origin_pos: OriginConnectionPosition,
        overlay_pos: OverlayConnectionPosition,
        origin: impl Into<FlexibleConnectedOrigin>,
        viewport_ruler: Rc<dyn ViewportRuler>,
    ) -> Self {
        let mut inner = FlexibleConnectedPositionStrategy::new(origin, viewport_ruler)
            .with_flexible_dimensions(false, None, None)
            .with_push(false)
            .with_viewport_margin(0.0);
        inner.push_position(ConnectionPositionPair::new(origin_pos, overlay_pos));
        Self { inner }
    }

    /// Append a fallback tried after every earlier position.
    #[must_use]
    pub fn with_fallback_position(
        mut self,
        origin_pos: OriginConnectionPosition,
        overlay_pos: OverlayConnectionPosition,
        offset_x: Option<f64>,
        offset_y: Option<f64>,
    ) -> Self {
        let mut pair = ConnectionPositionPair::new(origin_pos, overlay_pos);
        pair.offset_x = offset_x;
        pair.offset_y = offset_y;
        self.inner.push_position(pair);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.inner.set_direction(direction);
        self
    }

    #[must_use]
    pub fn with_offset_x(self, offset: f64) -> Self {
        Self {
            inner: self.inner.with_default_offset_x(offset),
        }
    }

    #[must_use]
    pub fn with_offset_y(self, offset: f64) -> Self {
        Self {
            inner: self.inner.with_default_offset_y(offset),
        }
    }

    #[must_use]
    pub fn with_locked_position(self, locked: bool) -> Self {
        Self {
            inner: self.inner.with_locked_position(locked),
        }
    }

    /// Replace the preferred position and every fallback.
    pub fn with_positions(
        self,
        positions: impl IntoIterator<Item = ConnectionPositionPair>,
    ) -> Result<Self, PositionError> {
        Ok(Self {
            inner: self.inner.with_positions(positions)?,
        })
    }

    pub fn set_origin(&mut self, origin: impl Into<FlexibleConnectedOrigin>) {
        self.inner.set_origin(origin);
    }

    pub fn positions(&self) -> &[ConnectionPositionPair] {
        self.inner.positions()
    }

    pub fn direction(&self) -> Direction {
        self.inner.direction()
    }

    /// Listen for position changes. See [`PositionChanges::subscribe`].
    pub fn on_position_change(
        &self,
        listener: impl Fn(&ConnectedOverlayPositionChange) + 'static,
    ) -> Subscription {
        self.inner.position_changes().subscribe(listener)
    }

    pub fn position_changes(&self) -> PositionChanges {
        self.inner.position_changes()
    }

    pub fn last_position(&self) -> Option<&ConnectionPositionPair> {
        self.inner.last_position()
    }

    pub fn attach(&mut self, overlay: SharedOverlay) -> Result<(), PositionError> {
        self.inner.attach(overlay)
    }

    pub fn apply(&mut self) {
        self.inner.apply();
    }

    /// Re-align the last chosen position without trying fallbacks.
    pub fn recalculate_last_position(&mut self) {
        self.inner.reapply_last_position();
    }

    pub fn detach(&mut self) {
        self.inner.detach();
    }

    pub fn dispose(&mut self) {
        self.inner.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// The flexible strategy doing the work.
    pub fn inner(&self) -> &FlexibleConnectedPositionStrategy {
        &self.inner
    }
}
