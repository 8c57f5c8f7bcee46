//! One-way reveal of cards entering the viewport, plus deferred image loading.

use crate::page::Page;

pub const REVEAL: &str = "reveal";
pub const VISIBLE: &str = "active";

/// Tags every card with the base `reveal` class (hidden state).
pub fn prepare_cards<P: Page>(page: &P, selector: &str) -> usize {
    let cards = page.query_all(selector);
    for card in &cards {
        page.add_class(card, REVEAL);
    }
    cards.len()
}

/// Marks cards whose top is above `viewport_height - margin` as revealed.
/// The marker is never removed, so revealed is terminal. Returns how many
/// cards are revealed after this pass.
pub fn reveal_on_scroll<P: Page>(page: &P, selector: &str, margin: f64) -> usize {
    let threshold = page.viewport_height() - margin;
    let mut revealed = 0;
    for card in page.query_all(selector) {
        if page.bounding_rect(&card).top < threshold {
            page.add_class(&card, REVEAL);
            page.add_class(&card, VISIBLE);
        }
        if page.has_class(&card, VISIBLE) {
            revealed += 1;
        }
    }
    revealed
}

/// Swaps `data-src` into `src` for deferred images that intersect the viewport.
/// Each image loads once: dropping `data-src` removes it from later queries.
pub fn load_visible_images<P: Page>(page: &P, selector: &str) -> usize {
    let vh = page.viewport_height();
    let mut loaded = 0;
    for img in page.query_all(selector) {
        if !page.bounding_rect(&img).intersects_viewport(vh) {
            continue;
        }
        let Some(src) = page.attribute(&img, "data-src") else {
            continue;
        };
        page.set_attribute(&img, "src", &src);
        page.remove_attribute(&img, "data-src");
        loaded += 1;
    }
    if loaded > 0 {
        log::debug!("lazy-loaded {loaded} image(s)");
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryPage};

    const CARDS: &str = ".rule-card, .slam-card, .icon-card";

    fn page_with_cards() -> (MemoryPage, Vec<usize>) {
        let page = MemoryPage::new(800.0, 4000.0);
        let cards = [
            (200.0, "rule-card"),
            (640.0, "slam-card"),
            (660.0, "icon-card"),
            (2000.0, "rule-card"),
        ]
        .iter()
        .map(|(top, class)| page.push(Element::new("div").class(class).at(*top, 300.0)))
        .collect();
        (page, cards)
    }

    #[test]
    fn prepare_marks_hidden() {
        let (page, cards) = page_with_cards();
        assert_eq!(prepare_cards(&page, CARDS), 4);
        for c in &cards {
            assert!(page.has_class(c, REVEAL));
            assert!(!page.has_class(c, VISIBLE));
        }
    }

    #[test]
    fn reveal_uses_margin_strictly() {
        let (page, cards) = page_with_cards();
        // threshold = 800 - 150 = 650
        assert_eq!(reveal_on_scroll(&page, CARDS, 150.0), 2);
        assert!(page.has_class(&cards[0], VISIBLE));
        assert!(page.has_class(&cards[1], VISIBLE));
        assert!(!page.has_class(&cards[2], VISIBLE));
        assert!(!page.has_class(&cards[3], VISIBLE));
    }

    #[test]
    fn revealed_cards_never_revert() {
        let (page, cards) = page_with_cards();
        page.set_scroll(1800.0);
        assert_eq!(reveal_on_scroll(&page, CARDS, 150.0), 4);
        for y in [0.0, 3200.0, 50.0, 1000.0] {
            page.set_scroll(y);
            assert_eq!(reveal_on_scroll(&page, CARDS, 150.0), 4);
            assert!(cards.iter().all(|c| page.has_class(c, VISIBLE)));
        }
    }

    fn lazy_image(src: &str, top: f64) -> Element {
        Element::new("img").attr("data-src", src).at(top, 200.0)
    }

    #[test]
    fn images_load_once_when_visible() {
        let page = MemoryPage::new(800.0, 4000.0);
        let near = page.push(lazy_image("a.jpg", 100.0));
        let far = page.push(lazy_image("b.jpg", 3000.0));
        assert_eq!(load_visible_images(&page, "img[data-src]"), 1);
        assert_eq!(page.attribute(&near, "src").as_deref(), Some("a.jpg"));
        assert_eq!(page.attribute(&near, "data-src"), None);
        assert_eq!(page.attribute(&far, "src"), None);
        assert_eq!(load_visible_images(&page, "img[data-src]"), 0);
        page.set_scroll(2500.0);
        assert_eq!(load_visible_images(&page, "img[data-src]"), 1);
        assert_eq!(page.attribute(&far, "src").as_deref(), Some("b.jpg"));
    }
}
