#![forbid(unsafe_code)]

//! In-memory stand-ins for the host.
//!
//! Each fake records what the engine did to it so tests can assert on
//! written styles and classes without a rendering backend.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tether_core::{
    BoundingRect, ClientRect, ElementHandle, OverlayConfig, OverlayId, OverlayRef,
    ScrollPosition, SharedOverlay, Size, StyleDeclaration, StyleProperty, ViewportRuler,
};

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Viewport of a fixed size that can be resized and scrolled.
#[derive(Debug)]
pub struct FakeViewport {
    size: Cell<Size>,
    scroll: Cell<ScrollPosition>,
}

impl FakeViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(Size::new(width, height)),
            scroll: Cell::new(ScrollPosition::default()),
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.size.set(Size::new(width, height));
    }

    pub fn scroll_to(&self, top: f64, left: f64) {
        self.scroll.set(ScrollPosition::new(top, left));
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }
}

impl ViewportRuler for FakeViewport {
    fn viewport_rect(&self) -> ClientRect {
        let size = self.size.get();
        let scroll = self.scroll.get();
        ClientRect::new(scroll.left, scroll.top, size.width, size.height)
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.scroll.get()
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Element whose rect tests move by hand.
#[derive(Debug)]
pub struct FakeElement {
    rect: Cell<ClientRect>,
}

impl FakeElement {
    pub fn new(rect: ClientRect) -> Self {
        Self {
            rect: Cell::new(rect),
        }
    }

    pub fn set_rect(&self, rect: ClientRect) {
        self.rect.set(rect);
    }

    /// Shift the element, as scrolling its container would.
    pub fn move_by(&self, dx: f64, dy: f64) {
        self.rect.set(self.rect.get().translate(dx, dy));
    }

    pub fn rect(&self) -> ClientRect {
        self.rect.get()
    }
}

impl BoundingRect for FakeElement {
    fn bounding_rect(&self) -> ClientRect {
        self.rect.get()
    }
}

/// Erase a fake element into the engine's handle type.
pub fn element_handle(element: &Rc<FakeElement>) -> ElementHandle {
    Rc::clone(element) as ElementHandle
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Overlay host that records every write.
///
/// The pane always measures at its natural size; the engine resets its own
/// styles before measuring, so this matches a real host.
#[derive(Debug, Default)]
pub struct FakeOverlay {
    id: OverlayId,
    config: OverlayConfig,
    natural_size: Size,
    container: ClientRect,
    host_styles: FxHashMap<StyleProperty, String>,
    pane_styles: FxHashMap<StyleProperty, String>,
    host_classes: Vec<String>,
    pane_classes: Vec<String>,
    transform_origins: FxHashMap<String, String>,
    pane_writes: usize,
}

impl FakeOverlay {
    pub fn new(id: OverlayId, width: f64, height: f64) -> Self {
        Self {
            id,
            natural_size: Size::new(width, height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Rect of the overlay container, e.g. negative under browser zoom.
    #[must_use]
    pub fn with_container(mut self, container: ClientRect) -> Self {
        self.container = container;
        self
    }

    pub fn set_natural_size(&mut self, width: f64, height: f64) {
        self.natural_size = Size::new(width, height);
    }

    pub fn pane_style(&self, property: StyleProperty) -> Option<&str> {
        self.pane_styles.get(&property).map(String::as_str)
    }

    pub fn host_style(&self, property: StyleProperty) -> Option<&str> {
        self.host_styles.get(&property).map(String::as_str)
    }

    /// Numeric value of a `px` pane style.
    pub fn pane_px(&self, property: StyleProperty) -> Option<f64> {
        self.pane_style(property).and_then(parse_px)
    }

    /// Numeric value of a `px` host style.
    pub fn host_px(&self, property: StyleProperty) -> Option<f64> {
        self.host_style(property).and_then(parse_px)
    }

    pub fn has_host_class(&self, class: &str) -> bool {
        self.host_classes.iter().any(|c| c == class)
    }

    pub fn has_pane_class(&self, class: &str) -> bool {
        self.pane_classes.iter().any(|c| c == class)
    }

    pub fn pane_classes(&self) -> &[String] {
        &self.pane_classes
    }

    pub fn transform_origin(&self, selector: &str) -> Option<&str> {
        self.transform_origins.get(selector).map(String::as_str)
    }

    /// Number of pane declarations applied so far.
    pub fn pane_writes(&self) -> usize {
        self.pane_writes
    }

    /// Where an exactly placed pane ends up inside a viewport of
    /// `viewport` size, resolving `bottom`/`right` back to coordinates.
    pub fn exact_pane_rect(&self, viewport: Size) -> Option<ClientRect> {
        let size = self.natural_size;
        let left = match self.pane_px(StyleProperty::Left) {
            Some(left) => left,
            None => viewport.width - self.pane_px(StyleProperty::Right)? - size.width,
        };
        let top = match self.pane_px(StyleProperty::Top) {
            Some(top) => top,
            None => viewport.height - self.pane_px(StyleProperty::Bottom)? - size.height,
        };
        Some(ClientRect::new(left, top, size.width, size.height))
    }

    /// Deterministic JSON view of everything written, for golden
    /// comparisons.
    pub fn snapshot(&self) -> serde_json::Value {
        fn sorted(map: &FxHashMap<StyleProperty, String>) -> BTreeMap<&'static str, &str> {
            map.iter().map(|(p, v)| (p.css_name(), v.as_str())).collect()
        }
        let origins: BTreeMap<&str, &str> = self
            .transform_origins
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        serde_json::json!({
            "id": self.id,
            "host": sorted(&self.host_styles),
            "pane": sorted(&self.pane_styles),
            "hostClasses": self.host_classes,
            "paneClasses": self.pane_classes,
            "transformOrigins": origins,
        })
    }

    fn write(map: &mut FxHashMap<StyleProperty, String>, styles: &StyleDeclaration) {
        for (property, value) in styles.iter() {
            if value.is_empty() {
                map.remove(&property);
            } else {
                map.insert(property, value.to_string());
            }
        }
    }
}

impl OverlayRef for FakeOverlay {
    fn id(&self) -> OverlayId {
        self.id
    }

    fn config(&self) -> OverlayConfig {
        self.config
    }

    fn pane_rect(&self) -> ClientRect {
        ClientRect::from_point_size(Default::default(), self.natural_size)
    }

    fn container_rect(&self) -> ClientRect {
        self.container
    }

    fn apply_host_styles(&mut self, styles: &StyleDeclaration) {
        Self::write(&mut self.host_styles, styles);
    }

    fn apply_pane_styles(&mut self, styles: &StyleDeclaration) {
        self.pane_writes += 1;
        Self::write(&mut self.pane_styles, styles);
    }

    fn set_transform_origin(&mut self, selector: &str, value: &str) {
        self.transform_origins
            .insert(selector.to_string(), value.to_string());
    }

    fn add_host_class(&mut self, class: &str) {
        if !self.has_host_class(class) {
            self.host_classes.push(class.to_string());
        }
    }

    fn remove_host_class(&mut self, class: &str) {
        self.host_classes.retain(|c| c != class);
    }

    fn add_pane_class(&mut self, class: &str) {
        if !self.has_pane_class(class) {
            self.pane_classes.push(class.to_string());
        }
    }

    fn remove_pane_class(&mut self, class: &str) {
        self.pane_classes.retain(|c| c != class);
    }
}

/// Erase a fake overlay into the engine's handle type.
pub fn overlay_handle(overlay: &Rc<RefCell<FakeOverlay>>) -> SharedOverlay {
    Rc::clone(overlay) as SharedOverlay
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_reports_scroll_in_document_space() {
        let vp = FakeViewport::new(800.0, 600.0);
        vp.scroll_to(100.0, 20.0);
        assert_eq!(vp.viewport_rect(), ClientRect::new(20.0, 100.0, 800.0, 600.0));
        assert_eq!(vp.client_rect(), ClientRect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn cleared_styles_are_removed() {
        let mut overlay = FakeOverlay::new(1, 60.0, 30.0);
        let mut styles = StyleDeclaration::new();
        styles.set(StyleProperty::Top, "10px");
        overlay.apply_pane_styles(&styles);
        assert_eq!(overlay.pane_px(StyleProperty::Top), Some(10.0));

        let mut clear = StyleDeclaration::new();
        clear.clear(StyleProperty::Top);
        overlay.apply_pane_styles(&clear);
        assert_eq!(overlay.pane_style(StyleProperty::Top), None);
        assert_eq!(overlay.pane_writes(), 2);
    }

    #[test]
    fn exact_rect_resolves_bottom_and_right() {
        let mut overlay = FakeOverlay::new(1, 60.0, 30.0);
        let mut styles = StyleDeclaration::new();
        styles
            .set(StyleProperty::Bottom, "100px")
            .set(StyleProperty::Right, "0px");
        overlay.apply_pane_styles(&styles);
        let rect = overlay.exact_pane_rect(Size::new(1024.0, 768.0)).unwrap();
        assert_eq!(rect, ClientRect::new(964.0, 638.0, 60.0, 30.0));
    }

    #[test]
    fn classes_behave_as_sets() {
        let mut overlay = FakeOverlay::new(1, 60.0, 30.0);
        overlay.add_pane_class("a");
        overlay.add_pane_class("a");
        assert_eq!(overlay.pane_classes(), &["a".to_string()]);
        overlay.remove_pane_class("a");
        assert!(!overlay.has_pane_class("a"));
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut overlay = FakeOverlay::new(7, 60.0, 30.0);
        let mut styles = StyleDeclaration::new();
        styles
            .set(StyleProperty::Top, "1px")
            .set(StyleProperty::Left, "2px");
        overlay.apply_pane_styles(&styles);
        let snap = overlay.snapshot();
        assert_eq!(snap["id"], 7);
        assert_eq!(snap["pane"]["left"], "2px");
        let keys: Vec<_> = snap["pane"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["left".to_string(), "top".to_string()]);
    }
}
