#![forbid(unsafe_code)]

//! What an overlay is connected to.

use tether_core::{BoundingRect, ClientRect, ElementHandle, Point, Size};

/// The anchor of a connected overlay.
///
/// A live element is measured on every apply. A point (optionally with a
/// size) is used for virtual anchors such as a context-menu click.
#[derive(Clone)]
pub enum FlexibleConnectedOrigin {
    Element(ElementHandle),
    Point(Point),
    Rect { origin: Point, size: Size },
}

impl FlexibleConnectedOrigin {
    /// Current bounding rect of the origin.
    pub fn rect(&self) -> ClientRect {
        match self {
            Self::Element(element) => element.bounding_rect(),
            Self::Point(point) => ClientRect::from_point_size(*point, Size::default()),
            Self::Rect { origin, size } => ClientRect::from_point_size(*origin, *size),
        }
    }
}

impl BoundingRect for FlexibleConnectedOrigin {
    fn bounding_rect(&self) -> ClientRect {
        self.rect()
    }
}

impl std::fmt::Debug for FlexibleConnectedOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(element) => f
                .debug_tuple("Element")
                .field(&element.bounding_rect())
                .finish(),
            Self::Point(point) => f.debug_tuple("Point").field(point).finish(),
            Self::Rect { origin, size } => f
                .debug_struct("Rect")
                .field("origin", origin)
                .field("size", size)
                .finish(),
        }
    }
}

impl From<ElementHandle> for FlexibleConnectedOrigin {
    fn from(element: ElementHandle) -> Self {
        Self::Element(element)
    }
}

impl From<Point> for FlexibleConnectedOrigin {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl From<ClientRect> for FlexibleConnectedOrigin {
    fn from(rect: ClientRect) -> Self {
        Self::Rect {
            origin: rect.origin(),
            size: rect.size(),
        }
    }
}
