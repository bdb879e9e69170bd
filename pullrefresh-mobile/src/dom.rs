//! Scroll probe backed by the live DOM

use pullrefresh_common::probe::is_inner_scrollable;
use pullrefresh_common::{Overflow, ScrollNode, ScrollProbe};
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// Answers scroll questions for one mounted pull container
#[derive(Debug, Clone)]
pub struct DomProbe {
    container: Element,
}

impl DomProbe {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// The container as an event target fallback
    pub fn container_node(&self) -> Node {
        self.container.clone().into()
    }

    /// Viewport height, used to scale page-mode wheel deltas
    pub fn page_height(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.inner_height().ok())
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }
}

impl ScrollProbe for DomProbe {
    type Target = Node;

    fn page_scroll_top(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.scroll_y().ok())
            .unwrap_or(0.0)
    }

    fn is_inner_scrollable(&self, target: &Node) -> bool {
        is_inner_scrollable(&DomNode(target.clone()), &DomNode(self.container_node()))
    }
}

/// DOM node seen through the ancestor walk
struct DomNode(Node);

impl ScrollNode for DomNode {
    fn parent(&self) -> Option<Self> {
        self.0.parent_node().map(DomNode)
    }

    fn is_element(&self) -> bool {
        self.0.dyn_ref::<Element>().is_some()
    }

    fn is_same(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }

    fn overflow_y(&self) -> Option<Overflow> {
        let element = self.0.dyn_ref::<Element>()?;
        let style = web_sys::window()?.get_computed_style(element).ok()??;
        let value = style.get_property_value("overflow-y").ok()?;
        Overflow::from_css(&value)
    }

    fn scroll_top(&self) -> f64 {
        self.0
            .dyn_ref::<Element>()
            .map(|element| f64::from(element.scroll_top()))
            .unwrap_or(0.0)
    }
}
