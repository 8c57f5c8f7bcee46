//! Headless in-memory [`Page`].
//!
//! Elements carry an explicit document offset and height; the viewport-relative
//! rect is derived from the current scroll offset, so scrolling the page moves
//! every element the way a browser would. Selector support covers what the
//! enhancer queries: comma lists of compound selectors built from a tag name,
//! `.class`, `#id`, `[attr]`, `[attr="v"]` and `[attr^="v"]`.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::page::{Page, Rect};

pub type NodeId = usize;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub style: BTreeMap<String, String>,
    pub top: f64,
    pub height: f64,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Places the element `top` units from the document top, `height` tall.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }
}

#[derive(Debug)]
struct Inner {
    elements: Vec<Element>,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    scrolls: Vec<(f64, bool)>,
}

#[derive(Debug)]
pub struct MemoryPage {
    inner: RefCell<Inner>,
}

pub const BODY: NodeId = 0;

impl MemoryPage {
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            inner: RefCell::new(Inner {
                elements: vec![Element::new("body").at(0.0, document_height)],
                scroll_y: 0.0,
                viewport_height,
                document_height,
                scrolls: Vec::new(),
            }),
        }
    }

    pub fn push(&self, element: Element) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.elements.push(element);
        inner.elements.len() - 1
    }

    /// Jumps the viewport without recording a programmatic scroll.
    pub fn set_scroll(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y;
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.inner.borrow().elements[node].style.get(property).cloned()
    }

    /// Programmatic scrolls requested so far, as `(top, smooth)`.
    pub fn scrolls(&self) -> Vec<(f64, bool)> {
        self.inner.borrow().scrolls.clone()
    }

    fn with_el<R>(&self, node: &NodeId, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.inner.borrow_mut().elements[*node])
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let alternatives: Vec<Compound> = selector
            .split(',')
            .filter_map(Compound::parse)
            .collect();
        let inner = self.inner.borrow();
        inner
            .elements
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, el)| alternatives.iter().any(|c| c.matches(el)))
            .map(|(i, _)| i)
            .collect()
    }

    fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.inner.borrow().viewport_height
    }

    fn scroll_height(&self) -> f64 {
        self.inner.borrow().document_height
    }

    fn client_height(&self) -> f64 {
        self.inner.borrow().viewport_height
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        let mut inner = self.inner.borrow_mut();
        let max = (inner.document_height - inner.viewport_height).max(0.0);
        inner.scroll_y = top.clamp(0.0, max);
        inner.scrolls.push((top, smooth));
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.inner.borrow().elements[*node].top
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.inner.borrow().elements[*node].height
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let inner = self.inner.borrow();
        let el = &inner.elements[*node];
        let top = el.top - inner.scroll_y;
        Rect {
            top,
            bottom: top + el.height,
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.inner.borrow().elements[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_el(node, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.with_el(node, |el| {
            el.attributes.remove(name);
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.inner.borrow().elements[*node].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_el(node, |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_el(node, |el| el.classes.retain(|c| c != class));
    }

    fn toggle_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            self.remove_class(node, class);
        } else {
            self.add_class(node, class);
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.inner.borrow().elements[*node].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.with_el(node, |el| el.text = text.to_string());
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_el(node, |el| {
            el.style.insert(property.to_string(), value.to_string());
        });
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn append_to_body(&self, tag: &str) -> Result<NodeId> {
        Ok(self.push(Element::new(tag)))
    }
}

// --- Selector matching -------------------------------------------------------

#[derive(Debug, PartialEq)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    id: Option<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn parse(src: &str) -> Option<Self> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }
        let mut out = Compound::default();
        let mut rest = src;
        let tag_len = rest.find(['.', '#', '[']).unwrap_or(rest.len());
        if tag_len > 0 {
            out.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];
        while let Some(c) = rest.chars().next() {
            match c {
                '.' | '#' => {
                    let name_len = rest[1..].find(['.', '#', '[']).unwrap_or(rest.len() - 1);
                    let end = name_len + 1;
                    let name = rest[1..end].to_string();
                    if c == '.' {
                        out.classes.push(name);
                    } else {
                        out.id = Some(name);
                    }
                    rest = &rest[end..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    out.attrs.push(parse_attr(&rest[1..end]));
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }
        Some(out)
    }

    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != el.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attributes.get("id") != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.classes.contains(c))
            && self.attrs.iter().all(|a| match a {
                AttrTest::Present(n) => el.attributes.contains_key(n),
                AttrTest::Equals(n, v) => el.attributes.get(n) == Some(v),
                AttrTest::Prefix(n, v) => el.attributes.get(n).is_some_and(|x| x.starts_with(v)),
            })
    }
}

fn unquote(v: &str) -> String {
    v.trim().trim_matches(['"', '\'']).to_string()
}

fn parse_attr(body: &str) -> AttrTest {
    if let Some((name, value)) = body.split_once("^=") {
        AttrTest::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = body.split_once('=') {
        AttrTest::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrTest::Present(body.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_lists_and_attributes() {
        let page = MemoryPage::new(600.0, 2000.0);
        let a = page.push(Element::new("div").class("rule-card"));
        let b = page.push(Element::new("div").class("icon-card").class("wide"));
        let link = page.push(Element::new("a").attr("href", "#about"));
        let img = page.push(Element::new("img").attr("data-src", "x.png"));
        page.push(Element::new("a").attr("href", "/elsewhere"));

        assert_eq!(page.query_all(".rule-card, .icon-card"), vec![a, b]);
        assert_eq!(page.query_all("a[href^=\"#\"]"), vec![link]);
        assert_eq!(page.query_all("img[data-src]"), vec![img]);
        assert_eq!(page.query(".icon-card.wide"), Some(b));
        assert_eq!(page.query(".missing"), None);
    }

    #[test]
    fn id_selector_and_rect_follow_scroll() {
        let page = MemoryPage::new(600.0, 2000.0);
        let s = page.push(Element::new("section").id("about").at(800.0, 400.0));
        assert_eq!(page.query("#about"), Some(s));
        page.set_scroll(500.0);
        let expected = Rect {
            top: 300.0,
            bottom: 700.0,
        };
        assert_eq!(page.bounding_rect(&s), expected);
    }

    #[test]
    fn scroll_to_clamps_and_records() {
        let page = MemoryPage::new(600.0, 2000.0);
        page.scroll_to(5000.0, true);
        assert_eq!(page.scroll_y(), 1400.0);
        page.scroll_to(-20.0, false);
        assert_eq!(page.scroll_y(), 0.0);
        assert_eq!(page.scrolls(), vec![(5000.0, true), (-20.0, false)]);
    }

    #[test]
    fn toggle_class_flips() {
        let page = MemoryPage::new(600.0, 600.0);
        let n = page.push(Element::new("div"));
        page.toggle_class(&n, "active");
        assert!(page.has_class(&n, "active"));
        page.toggle_class(&n, "active");
        assert!(!page.has_class(&n, "active"));
    }
}
