#![forbid(unsafe_code)]

//! The overlay host interface.
//!
//! An overlay is rendered as two nested boxes:
//!
//! ```text
//! host (bounding box)      fixed-position wrapper, flex column
//! └── pane                 the floating surface the user sees
//!     └── descendants      may receive a transform origin
//! ```
//!
//! The host decides how these boxes exist (DOM nodes, native widgets,
//! test fakes). The positioning engine only measures the pane, writes
//! inline styles to both boxes, and toggles classes.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::ClientRect;
use crate::style::StyleDeclaration;

/// Stable identity of an overlay instance.
pub type OverlayId = u64;

/// Sizing limits declared on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OverlayConfig {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

/// Host-side handle to one overlay.
pub trait OverlayRef {
    fn id(&self) -> OverlayId;

    fn config(&self) -> OverlayConfig;

    /// Current rect of the pane. Read after the engine has reset its own
    /// position styles, so width/height are the natural size.
    fn pane_rect(&self) -> ClientRect;

    /// Rect of the container that holds all overlays. Under browser zoom its
    /// top/left can be negative; the default is a container at the origin.
    fn container_rect(&self) -> ClientRect {
        ClientRect::default()
    }

    fn apply_host_styles(&mut self, styles: &StyleDeclaration);

    fn apply_pane_styles(&mut self, styles: &StyleDeclaration);

    /// Set `transform-origin` on pane descendants matching `selector`.
    fn set_transform_origin(&mut self, selector: &str, value: &str);

    fn add_host_class(&mut self, class: &str);

    fn remove_host_class(&mut self, class: &str);

    fn add_pane_class(&mut self, class: &str);

    fn remove_pane_class(&mut self, class: &str);
}

/// Shared, single-threaded overlay handle.
pub type SharedOverlay = Rc<RefCell<dyn OverlayRef>>;
