// Integration tests (native) for the `court-glide` crate.
// These drive a full page session against the in-memory page, so they run
// under `cargo test` on the host without a browser.

use court_glide::counter::CounterPhase;
use court_glide::memory::{Element, MemoryPage, NodeId};
use court_glide::{EnhanceConfig, Page, PageSession};

struct Tennis {
    session: PageSession<MemoryPage>,
    links: Vec<NodeId>,
    cards: Vec<NodeId>,
    badge: NodeId,
}

fn section(page: &MemoryPage, id: &str, top: f64, height: f64) -> NodeId {
    let el = Element::new("section").class("section");
    page.push(el.id(id).at(top, height))
}

// home 0–800, about 800–1600, slams 1600–2400, icons 2400–3400; navbar 80 tall.
fn tennis_page() -> Tennis {
    let page = MemoryPage::new(700.0, 3400.0);
    page.push(Element::new("nav").class("navbar").at(0.0, 80.0));
    let links = ["#home", "#about", "#slams", "#icons"]
        .iter()
        .map(|h| page.push(Element::new("a").class("nav-link").attr("href", h)))
        .collect();
    section(&page, "home", 0.0, 800.0);
    section(&page, "about", 800.0, 800.0);
    section(&page, "slams", 1600.0, 800.0);
    let icons = section(&page, "icons", 2400.0, 1000.0);
    page.add_class(&icons, "icons-section");
    let cards = vec![
        page.push(Element::new("div").class("rule-card").at(900.0, 300.0)),
        page.push(Element::new("div").class("slam-card").at(1700.0, 300.0)),
        page.push(Element::new("div").class("icon-card").at(2500.0, 300.0)),
    ];
    let badge = page.push(Element::new("span").class("icon-badge").text("24"));
    page.push(Element::new("span").class("icon-badge").text("GOAT"));
    Tennis {
        session: PageSession::new(page, EnhanceConfig::default()),
        links,
        cards,
        badge,
    }
}

fn active_links(t: &Tennis) -> Vec<NodeId> {
    t.links
        .iter()
        .copied()
        .filter(|l| t.session.page().has_class(l, "active"))
        .collect()
}

#[test]
fn locator_follows_scroll_with_lookahead() {
    let mut t = tennis_page();
    t.session.on_load();
    // bands shift up by navbar (80) + lookahead (100): home [-180, 620), about [620, 1420)
    let mut now = 0.0;
    let stops = [
        (550.0, "home", 0),
        (750.0, "about", 1),
        (820.0, "about", 1),
        (1500.0, "slams", 2),
    ];
    for (y, id, link) in stops {
        t.session.page().set_scroll(y);
        now += 50.0;
        t.session.on_scroll(now);
        assert_eq!(t.session.current_section(), Some(id), "scroll {y}");
        assert_eq!(active_links(&t), vec![t.links[link]], "scroll {y}");
    }
}

#[test]
fn cards_reveal_and_stay_revealed() {
    let mut t = tennis_page();
    t.session.on_load();
    let page = t.session.page();
    for card in &t.cards {
        assert!(page.has_class(card, "reveal"));
        assert!(!page.has_class(card, "active"));
    }

    t.session.page().set_scroll(1400.0);
    t.session.on_scroll(0.0);
    let page = t.session.page();
    assert!(page.has_class(&t.cards[0], "active"));
    assert!(page.has_class(&t.cards[1], "active"));
    assert!(!page.has_class(&t.cards[2], "active"));

    t.session.page().set_scroll(0.0);
    t.session.on_scroll(100.0);
    let page = t.session.page();
    assert!(page.has_class(&t.cards[0], "active"));
    assert!(page.has_class(&t.cards[1], "active"));
}

#[test]
fn counter_ramps_once_to_target() {
    let mut t = tennis_page();
    t.session.on_load();
    t.session.page().set_scroll(2000.0);
    assert!(t.session.on_scroll(0.0).counters_started);
    assert_eq!(t.session.counter_phase(), CounterPhase::Running);

    let mut shown = Vec::new();
    while t.session.tick_counters() == CounterPhase::Running {
        shown.push(t.session.page().text(&t.badge));
        // scrolling away and back mid-run never restarts the ramp
        t.session.page().set_scroll(0.0);
        let now = shown.len() as f64 * 40.0;
        assert!(!t.session.on_scroll(now).counters_started);
        t.session.page().set_scroll(2000.0);
    }
    assert_eq!(t.session.page().text(&t.badge), "24 Grand Slams");
    assert!(shown.iter().all(|s| s.ends_with(" Grand Slams")));
    let badges = t.session.page().query_all(".icon-badge");
    assert_eq!(t.session.page().text(&badges[1]), "GOAT");
}

#[test]
fn progress_bar_spans_zero_to_hundred() {
    let mut t = tennis_page();
    t.session.on_load();
    let bar = *t.session.progress_bar().unwrap();
    assert_eq!(t.session.page().style(bar, "width").as_deref(), Some("0%"));
    t.session.page().set_scroll(3400.0 - 700.0);
    t.session.on_scroll(0.0);
    assert_eq!(t.session.page().style(bar, "width").as_deref(), Some("100%"));
}

#[test]
fn nav_click_scrolls_under_navbar() {
    let mut t = tennis_page();
    t.session.on_load();
    assert!(t.session.on_nav_link_click("#slams"));
    assert_eq!(t.session.page().scrolls(), vec![(1520.0, true)]);
    assert_eq!(t.session.page().scroll_y(), 1520.0);
    t.session.on_scroll(0.0);
    assert_eq!(t.session.current_section(), Some("slams"));
}
