//! Navigation: which section is current, the matching nav-link highlight, the
//! navbar's scrolled state, the hamburger menu and in-page anchor scrolling.

use crate::config::Selectors;
use crate::page::Page;

const ACTIVE: &str = "active";
const SCROLLED: &str = "scrolled";

/// A labeled region as laid out right now (never cached across ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBand {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

/// Returns the current section id, if any.
///
/// Each band is shifted up by `nav_height + lookahead`; a band is current when
/// `scroll_y` falls in `[top, top + height)`. When bands overlap the last one in
/// document order wins.
pub fn locate_section(
    scroll_y: f64,
    nav_height: f64,
    lookahead: f64,
    bands: &[SectionBand],
) -> Option<&str> {
    bands
        .iter()
        .rev()
        .find(|b| {
            let top = b.offset_top - nav_height - lookahead;
            scroll_y >= top && scroll_y < top + b.height
        })
        .map(|b| b.id.as_str())
}

/// Reads section geometry fresh from the page.
pub fn section_bands<P: Page>(page: &P, selector: &str) -> Vec<SectionBand> {
    page.query_all(selector)
        .iter()
        .map(|s| SectionBand {
            id: page.attribute(s, "id").unwrap_or_default(),
            offset_top: page.offset_top(s),
            height: page.offset_height(s),
        })
        .collect()
}

pub fn navbar_height<P: Page>(page: &P, selectors: &Selectors) -> f64 {
    page.query(&selectors.navbar)
        .map_or(0.0, |n| page.offset_height(&n))
}

/// Section Locator against the live page.
pub fn current_section<P: Page>(
    page: &P,
    selectors: &Selectors,
    lookahead: f64,
) -> Option<String> {
    let bands = section_bands(page, &selectors.sections);
    let nav_height = navbar_height(page, selectors);
    locate_section(page.scroll_y(), nav_height, lookahead, &bands)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Clears `active` from every nav link, then sets it on the link pointing at
/// `#current`. With no current section every link stays cleared.
pub fn highlight_nav<P: Page>(page: &P, selectors: &Selectors, current: Option<&str>) {
    let target = current.map(|id| format!("#{id}"));
    for link in page.query_all(&selectors.nav_links) {
        page.remove_class(&link, ACTIVE);
        if target.is_some() && page.attribute(&link, "href") == target {
            page.add_class(&link, ACTIVE);
        }
    }
}

/// Runs the locator and highlighter together; returns the current section.
pub fn highlight_active_section<P: Page>(
    page: &P,
    selectors: &Selectors,
    lookahead: f64,
) -> Option<String> {
    let current = current_section(page, selectors, lookahead);
    highlight_nav(page, selectors, current.as_deref());
    current
}

pub fn update_navbar<P: Page>(page: &P, selectors: &Selectors, threshold: f64) {
    let Some(navbar) = page.query(&selectors.navbar) else {
        log::trace!("no navbar; skipping scrolled state");
        return;
    };
    if page.scroll_y() > threshold {
        page.add_class(&navbar, SCROLLED);
    } else {
        page.remove_class(&navbar, SCROLLED);
    }
}

pub fn toggle_menu<P: Page>(page: &P, selectors: &Selectors) {
    for sel in [&selectors.hamburger, &selectors.nav_menu] {
        if let Some(el) = page.query(sel) {
            page.toggle_class(&el, ACTIVE);
        }
    }
}

pub fn close_menu<P: Page>(page: &P, selectors: &Selectors) {
    for sel in [&selectors.hamburger, &selectors.nav_menu] {
        if let Some(el) = page.query(sel) {
            page.remove_class(&el, ACTIVE);
        }
    }
}

/// Smoothly scrolls so the `href` target sits just under the navbar.
/// Returns false when `href` names no element, leaving the scroll untouched.
pub fn scroll_to_anchor<P: Page>(page: &P, selectors: &Selectors, href: &str) -> bool {
    if href.len() < 2 || !href.starts_with('#') {
        return false;
    }
    let Some(target) = page.query(href) else {
        log::debug!("anchor {href} has no target");
        return false;
    };
    let top = page.offset_top(&target) - navbar_height(page, selectors);
    page.scroll_to(top, true);
    true
}

pub fn scroll_to_top<P: Page>(page: &P) {
    page.scroll_to(0.0, true);
}
