//! Page-session context: owns every component and all state that lives for one
//! page load (current section, counter trigger, progress bar, debouncer).
//!
//! All browser signals funnel into one of the `on_*` methods; the session
//! decides which handlers run and in which order. Nothing here touches
//! `web-sys` directly, so a [`crate::memory::MemoryPage`] drives it in tests.

use crate::config::EnhanceConfig;
use crate::counter::{CounterAnimator, CounterPhase};
use crate::debounce::Debouncer;
use crate::nav;
use crate::page::Page;
use crate::progress::ProgressBar;
use crate::reveal;

/// What the event loop owner has to schedule after a scroll signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// The debounced handler group ran on this signal.
    pub dispatched: bool,
    /// The counter ramps just started; drive `tick_counters` on an interval.
    pub counters_started: bool,
    /// A signal was held back: (re)arm a `wait_ms` timer that calls `flush`.
    pub arm_flush: bool,
}

pub struct PageSession<P: Page> {
    page: P,
    config: EnhanceConfig,
    debouncer: Debouncer,
    counters: CounterAnimator<P::Node>,
    progress: Option<ProgressBar<P::Node>>,
    current: Option<String>,
    loaded: bool,
}

impl<P: Page> PageSession<P> {
    pub fn new(page: P, config: EnhanceConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.debounce),
            counters: CounterAnimator::new(config.counter.clone()),
            page,
            config,
            progress: None,
            current: None,
            loaded: false,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    pub fn current_section(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn counter_phase(&self) -> CounterPhase {
        self.counters.phase()
    }

    pub fn counter_step_ms(&self) -> f64 {
        self.counters.step_ms()
    }

    pub fn progress_bar(&self) -> Option<&P::Node> {
        self.progress.as_ref().map(ProgressBar::node)
    }

    /// Load-time setup. Runs once; later calls are ignored and return false.
    /// Returns true when the body fade-in has been started and
    /// [`Self::finish_fade_in`] should run after `fade_in_delay_ms`.
    pub fn on_load(&mut self) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;

        let cards = reveal::prepare_cards(&self.page, &self.config.selectors.cards);
        log::debug!("prepared {cards} revealable card(s)");

        self.refresh_sections();
        let sel = &self.config.selectors;
        nav::update_navbar(&self.page, sel, self.config.navbar_scrolled_offset);
        reveal::reveal_on_scroll(&self.page, &sel.cards, self.config.reveal_margin);
        reveal::load_visible_images(&self.page, &sel.lazy_images);

        match ProgressBar::create(&self.page) {
            Ok(bar) => {
                bar.update(&self.page);
                self.progress = Some(bar);
            }
            Err(e) => log::warn!("scroll progress bar unavailable: {e}"),
        }

        if let Some(logo) = self.page.query(&sel.logo) {
            self.page.set_style(&logo, "cursor", "pointer");
        }

        match self.page.body() {
            Some(body) => {
                self.page.set_style(&body, "opacity", "0");
                true
            }
            None => false,
        }
    }

    pub fn finish_fade_in(&self) {
        if let Some(body) = self.page.body() {
            self.page.set_style(&body, "transition", "opacity 0.5s ease");
            self.page.set_style(&body, "opacity", "1");
        }
    }

    /// Single scroll dispatcher. The progress bar tracks every signal; the
    /// layout-reading group runs when the debouncer admits the signal, and
    /// once more from [`Self::flush`] after a burst it held back.
    pub fn on_scroll(&mut self, now: f64) -> ScrollOutcome {
        if let Some(bar) = &self.progress {
            bar.update(&self.page);
        }
        let dispatched = self.debouncer.call(now);
        let counters_started = dispatched && self.run_scroll_group();
        ScrollOutcome {
            dispatched,
            counters_started,
            arm_flush: self.debouncer.has_pending(),
        }
    }

    /// The debounce timer expired; settles the page at the final position.
    pub fn flush(&mut self) -> ScrollOutcome {
        let dispatched = self.debouncer.flush();
        let counters_started = dispatched && self.run_scroll_group();
        ScrollOutcome {
            dispatched,
            counters_started,
            arm_flush: false,
        }
    }

    /// Ordered handler group: highlight, navbar, reveal, lazy images, counters.
    /// Returns true when the counters started on this pass.
    fn run_scroll_group(&mut self) -> bool {
        self.refresh_sections();
        let sel = &self.config.selectors;
        nav::update_navbar(&self.page, sel, self.config.navbar_scrolled_offset);
        reveal::reveal_on_scroll(&self.page, &sel.cards, self.config.reveal_margin);
        reveal::load_visible_images(&self.page, &sel.lazy_images);
        self.counters.check_visibility(&self.page, sel)
    }

    fn refresh_sections(&mut self) {
        let current = nav::highlight_active_section(
            &self.page,
            &self.config.selectors,
            self.config.section_lookahead,
        );
        if current != self.current {
            log::trace!("current section: {:?}", current);
            self.current = current;
        }
    }

    pub fn tick_counters(&mut self) -> CounterPhase {
        self.counters.tick(&self.page)
    }

    pub fn on_hamburger_click(&self) {
        nav::toggle_menu(&self.page, &self.config.selectors);
    }

    /// Nav link: close the mobile menu, then scroll to the link's section.
    pub fn on_nav_link_click(&self, href: &str) -> bool {
        nav::close_menu(&self.page, &self.config.selectors);
        nav::scroll_to_anchor(&self.page, &self.config.selectors, href)
    }

    pub fn on_anchor_click(&self, href: &str) -> bool {
        nav::scroll_to_anchor(&self.page, &self.config.selectors, href)
    }

    pub fn on_logo_click(&self) {
        nav::scroll_to_top(&self.page);
    }
}
