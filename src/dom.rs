//! [`Page`] over the live browser document via `web-sys`.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window, window};

use crate::error::{EnhanceError, Result};
use crate::page::{Page, Rect};

#[derive(Clone)]
pub struct DomPage {
    win: Window,
    doc: Document,
}

impl DomPage {
    pub fn current() -> Result<Self> {
        let win = window().ok_or(EnhanceError::NoWindow)?;
        let doc = win.document().ok_or(EnhanceError::NoDocument)?;
        Ok(Self { win, doc })
    }

    pub fn window(&self) -> &Window {
        &self.win
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// `performance.now()`, or 0 when the Performance API is unavailable.
    pub fn now(&self) -> f64 {
        self.win.performance().map(|p| p.now()).unwrap_or(0.0)
    }
}

impl Page for DomPage {
    type Node = HtmlElement;

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.doc
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = self.doc.query_selector_all(selector) else {
            log::warn!("invalid selector {selector:?}");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn scroll_y(&self) -> f64 {
        self.win.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_height(&self) -> f64 {
        self.doc
            .document_element()
            .map_or(0.0, |el| el.scroll_height() as f64)
    }

    fn client_height(&self) -> f64 {
        self.doc
            .document_element()
            .map_or(0.0, |el| el.client_height() as f64)
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        let behavior = if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        };
        opts.set_behavior(behavior);
        self.win.scroll_to_with_scroll_to_options(&opts);
    }

    fn offset_top(&self, node: &HtmlElement) -> f64 {
        node.offset_top() as f64
    }

    fn offset_height(&self, node: &HtmlElement) -> f64 {
        node.offset_height() as f64
    }

    fn bounding_rect(&self, node: &HtmlElement) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect {
            top: r.top(),
            bottom: r.bottom(),
        }
    }

    fn attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::debug!("set_attribute {name}: {e:?}");
        }
    }

    fn remove_attribute(&self, node: &HtmlElement, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &HtmlElement, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn toggle_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().toggle(class);
    }

    fn text(&self, node: &HtmlElement) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &HtmlElement, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = node.style().set_property(property, value) {
            log::debug!("set_style {property}: {e:?}");
        }
    }

    fn body(&self) -> Option<HtmlElement> {
        self.doc.body()
    }

    fn append_to_body(&self, tag: &str) -> Result<HtmlElement> {
        let body = self.doc.body().ok_or(EnhanceError::NoBody)?;
        let el: HtmlElement = self
            .doc
            .create_element(tag)
            .map_err(EnhanceError::from_js)?
            .dyn_into()
            .map_err(|_| EnhanceError::Js(format!("<{tag}> is not an HTML element")))?;
        body.append_child(&el).map_err(EnhanceError::from_js)?;
        Ok(el)
    }
}
