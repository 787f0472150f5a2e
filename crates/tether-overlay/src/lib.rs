#![forbid(unsafe_code)]

//! Overlay: connected positioning for floating surfaces.
//!
//! # Role in Tether
//! `tether-overlay` decides where a menu, tooltip, select panel or
//! autocomplete goes relative to the element that opened it. It reads
//! geometry through the `tether-core` traits, picks one of the caller's
//! candidate alignments, and writes inline styles back to the overlay.
//!
//! # Primary responsibilities
//! - **Candidates**: [`ConnectionPositionPair`] and its anchor enums.
//! - **Engine**: [`FlexibleConnectedPositionStrategy`] (fit, flexible
//!   sizing, push, RTL, locking) and the legacy [`ConnectedPositionStrategy`].
//! - **Styles**: exact versus flexible placement, `top`/`bottom` and
//!   `left`/`right` selection, transform origins, panel classes.
//! - **Clipping**: [`ScrollingVisibility`] against scroll containers.
//! - **Events**: [`PositionChanges`], one [`ConnectedOverlayPositionChange`]
//!   per apply.
//!
//! # How it fits in the system
//! A host creates a strategy with an origin and a [`tether_core::ViewportRuler`],
//! attaches it to a [`tether_core::SharedOverlay`], and calls
//! [`FlexibleConnectedPositionStrategy::apply`] whenever layout may have
//! changed (open, scroll, explicit update). Viewport resizes go through
//! [`FlexibleConnectedPositionStrategy::handle_viewport_change`].

pub mod changes;
pub mod connected;
pub mod error;
pub mod options;
pub mod origin;
mod placement;
pub mod position;
pub mod scroll_clip;
pub mod strategy;
mod style;

pub use changes::{PositionChanges, Subscription};
pub use connected::ConnectedPositionStrategy;
pub use error::PositionError;
pub use options::PositionOptions;
pub use origin::FlexibleConnectedOrigin;
pub use placement::OverlayFit;
pub use position::{
    ConnectedOverlayPositionChange, ConnectionPositionPair, HorizontalConnectionPos,
    OriginConnectionPosition, OverlayConnectionPosition, VerticalConnectionPos,
};
pub use scroll_clip::{
    ScrollingVisibility, is_element_clipped_by_scrolling, is_element_scrolled_outside_view,
};
pub use strategy::{BOUNDING_BOX_CLASS, FlexibleConnectedPositionStrategy};
