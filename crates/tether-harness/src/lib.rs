#![forbid(unsafe_code)]

//! Harness: fakes and fixtures for exercising overlay positioning.
//!
//! # Role in Tether
//! The engine only talks to a host through the `tether-core` traits. This
//! crate provides hosts that live in memory: a resizable, scrollable
//! [`FakeViewport`], movable [`FakeElement`]s, and a [`FakeOverlay`] that
//! records every style, class, and transform origin written to it.
//!
//! [`Scenario`] wires the three together for the common "one origin, one
//! overlay, one viewport" test.

pub mod fakes;

use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{ClientRect, ElementHandle, SharedOverlay, Size, ViewportRuler};

pub use fakes::{FakeElement, FakeOverlay, FakeViewport, element_handle, overlay_handle};

/// One viewport, one origin element, one overlay.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub viewport: Rc<FakeViewport>,
    pub origin: Rc<FakeElement>,
    pub overlay: Rc<RefCell<FakeOverlay>>,
}

impl Scenario {
    /// `1024x768` viewport, origin at `origin`, overlay of `overlay` size.
    pub fn new(origin: ClientRect, overlay: Size) -> Self {
        Self::with_viewport(Size::new(1024.0, 768.0), origin, overlay)
    }

    pub fn with_viewport(viewport: Size, origin: ClientRect, overlay: Size) -> Self {
        Self {
            viewport: Rc::new(FakeViewport::new(viewport.width, viewport.height)),
            origin: Rc::new(FakeElement::new(origin)),
            overlay: Rc::new(RefCell::new(FakeOverlay::new(1, overlay.width, overlay.height))),
        }
    }

    pub fn ruler(&self) -> Rc<dyn ViewportRuler> {
        Rc::clone(&self.viewport) as Rc<dyn ViewportRuler>
    }

    pub fn origin_handle(&self) -> ElementHandle {
        element_handle(&self.origin)
    }

    pub fn overlay_handle(&self) -> SharedOverlay {
        overlay_handle(&self.overlay)
    }

    /// Final pane rect for exact placements.
    pub fn pane_rect(&self) -> Option<ClientRect> {
        self.overlay.borrow().exact_pane_rect(self.viewport.size())
    }
}
