#![forbid(unsafe_code)]

//! Clipping of elements by scrollable ancestors.
//!
//! Consumers such as autocomplete panels use these flags to close themselves
//! once their trigger scrolls out of view.
//!
//! # Semantics
//!
//! | Check | True when, for at least one container |
//! |-------|---------------------------------------|
//! | clipped | any edge of the element extends beyond the container |
//! | outside view | the element lies entirely beyond one container edge |
//!
//! An element that is outside the view is also clipped.

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tether_core::ClientRect;

bitflags! {
    /// How the origin and overlay relate to the registered scroll containers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ScrollingVisibility: u8 {
        const ORIGIN_CLIPPED = 1 << 0;
        const ORIGIN_OUTSIDE_VIEW = 1 << 1;
        const OVERLAY_CLIPPED = 1 << 2;
        const OVERLAY_OUTSIDE_VIEW = 1 << 3;
    }
}

impl ScrollingVisibility {
    /// Evaluate origin and overlay against every container.
    pub fn evaluate(origin: &ClientRect, overlay: &ClientRect, containers: &[ClientRect]) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::ORIGIN_CLIPPED, is_element_clipped_by_scrolling(origin, containers));
        flags.set(
            Self::ORIGIN_OUTSIDE_VIEW,
            is_element_scrolled_outside_view(origin, containers),
        );
        flags.set(Self::OVERLAY_CLIPPED, is_element_clipped_by_scrolling(overlay, containers));
        flags.set(
            Self::OVERLAY_OUTSIDE_VIEW,
            is_element_scrolled_outside_view(overlay, containers),
        );
        flags
    }

    #[inline]
    pub fn is_origin_clipped(self) -> bool {
        self.contains(Self::ORIGIN_CLIPPED)
    }

    #[inline]
    pub fn is_origin_outside_view(self) -> bool {
        self.contains(Self::ORIGIN_OUTSIDE_VIEW)
    }

    #[inline]
    pub fn is_overlay_clipped(self) -> bool {
        self.contains(Self::OVERLAY_CLIPPED)
    }

    #[inline]
    pub fn is_overlay_outside_view(self) -> bool {
        self.contains(Self::OVERLAY_OUTSIDE_VIEW)
    }
}

/// True when any edge of `element` extends beyond any container.
pub fn is_element_clipped_by_scrolling(element: &ClientRect, containers: &[ClientRect]) -> bool {
    containers.iter().any(|container| {
        element.top < container.top
            || element.bottom > container.bottom
            || element.left < container.left
            || element.right > container.right
    })
}

/// True when `element` lies entirely beyond an edge of any container.
pub fn is_element_scrolled_outside_view(element: &ClientRect, containers: &[ClientRect]) -> bool {
    containers.iter().any(|container| {
        element.bottom < container.top
            || element.top > container.bottom
            || element.right < container.left
            || element.left > container.right
    })
}
