#![forbid(unsafe_code)]

//! Core: geometry primitives and host interfaces for overlay positioning.
//!
//! # Role in Tether
//! `tether-core` is the boundary layer. It owns the value types that every
//! positioning computation works in (points, sizes, client rectangles,
//! direction) and the traits through which the engine talks to the host
//! that actually measures and styles elements.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`], [`geometry::ClientRect`].
//! - **Direction**: [`direction::Direction`] for `start`/`end` resolution.
//! - **Viewport oracle**: [`viewport::ViewportRuler`].
//! - **Element measurement**: [`element::BoundingRect`].
//! - **Overlay host**: [`overlay::OverlayRef`] and the style vocabulary in
//!   [`style`].
//!
//! # How it fits in the system
//! The positioning engine (`tether-overlay`) depends only on these traits, so
//! it can be driven by a browser binding, a native toolkit, or the fakes in
//! `tether-harness` without change. All geometry is in client (viewport)
//! space unless a doc comment says otherwise.

pub mod direction;
pub mod element;
pub mod geometry;
pub mod overlay;
pub mod style;
pub mod viewport;

pub use direction::Direction;
pub use element::{BoundingRect, ElementHandle};
pub use geometry::{ClientRect, Point, Size};
pub use overlay::{OverlayConfig, OverlayId, OverlayRef, SharedOverlay};
pub use style::{StyleDeclaration, StyleProperty, px};
pub use viewport::{ScrollPosition, ViewportRuler};
