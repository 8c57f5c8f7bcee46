//! Capability interface over "the current document".
//!
//! Every component reads geometry and mutates elements only through [`Page`], so
//! the same logic drives the live DOM ([`crate::dom::DomPage`]) and the in-memory
//! test page ([`crate::memory::MemoryPage`]). Mutators take `&self`: the DOM is
//! shared, interior-mutable state in both implementations.

use crate::error::Result;

/// Viewport-relative bounding box (what `getBoundingClientRect` reports).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom >= 0.0
    }
}

pub trait Page {
    type Node: Clone;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    // --- Window / document geometry ---
    fn scroll_y(&self) -> f64;
    /// `window.innerHeight`
    fn viewport_height(&self) -> f64;
    /// `documentElement.scrollHeight`
    fn scroll_height(&self) -> f64;
    /// `documentElement.clientHeight`
    fn client_height(&self) -> f64;
    fn scroll_to(&self, top: f64, smooth: bool);

    // --- Element geometry ---
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    // --- Element state ---
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn toggle_class(&self, node: &Self::Node, class: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    // --- Tree ---
    fn body(&self) -> Option<Self::Node>;
    /// Creates a `<tag>` element and appends it to the body.
    fn append_to_body(&self, tag: &str) -> Result<Self::Node>;
}
