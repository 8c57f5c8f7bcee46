//! Browser event wiring: turns DOM signals into [`PageSession`] calls and owns
//! the timers the session asks for.
//!
//! One `scroll` listener, one ready handler, and one click listener per
//! anchor. Closures live for the whole page and are leaked with `forget`,
//! except the reusable debounce-flush callback which is kept in `FLUSH_CB`.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::config::EnhanceConfig;
use crate::counter::CounterPhase;
use crate::dom::DomPage;
use crate::error::{EnhanceError, Result};
use crate::page::Page;
use crate::session::{PageSession, ScrollOutcome};

thread_local! {
    static SESSION: RefCell<Option<PageSession<DomPage>>> = const { RefCell::new(None) };
    static COUNTER_INTERVAL: Cell<Option<i32>> = const { Cell::new(None) };
    static FLUSH_TIMEOUT: Cell<Option<i32>> = const { Cell::new(None) };
    static FLUSH_CB: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

fn with_session<R>(f: impl FnOnce(&mut PageSession<DomPage>) -> R) -> Option<R> {
    SESSION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            log::warn!("page session busy; dropping signal");
            None
        }
    })
}

/// Creates the page session and attaches every listener. A second call on the
/// same page is ignored.
pub fn install(config: EnhanceConfig) -> Result<()> {
    if SESSION.with(|cell| cell.borrow().is_some()) {
        log::warn!("page already enhanced");
        return Ok(());
    }
    let page = DomPage::current()?;
    SESSION.with(|cell| cell.replace(Some(PageSession::new(page.clone(), config))));

    install_flush_callback();
    wire_scroll(&page)?;

    if page.document().ready_state() == "loading" {
        let ready = Closure::once_into_js(move || {
            if let Err(e) = on_ready() {
                log::error!("page setup failed: {e}");
            }
        });
        page.document()
            .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
            .map_err(EnhanceError::from_js)?;
    } else {
        on_ready()?;
    }
    Ok(())
}

fn on_ready() -> Result<()> {
    let page = DomPage::current()?;
    wire_clicks(&page)?;
    let fade = with_session(|s| (s.on_load(), s.config().fade_in_delay_ms))
        .unwrap_or((false, 0));
    if let (true, delay) = fade {
        let finish = Closure::once_into_js(|| {
            with_session(|s| s.finish_fade_in());
        });
        let win = page.window();
        win.set_timeout_with_callback_and_timeout_and_arguments_0(finish.unchecked_ref(), delay)
            .map_err(EnhanceError::from_js)?;
    }
    log::info!("page enhanced");
    Ok(())
}

fn wire_scroll(page: &DomPage) -> Result<()> {
    let page_cb = page.clone();
    let closure = Closure::wrap(Box::new(move || {
        let now = page_cb.now();
        if let Some(outcome) = with_session(|s| s.on_scroll(now)) {
            follow_up(&page_cb, outcome);
        }
    }) as Box<dyn FnMut()>);
    page.window()
        .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        .map_err(EnhanceError::from_js)?;
    closure.forget();
    Ok(())
}

fn follow_up(page: &DomPage, outcome: ScrollOutcome) {
    if outcome.counters_started {
        start_counter_interval(page);
    }
    if outcome.arm_flush {
        arm_flush(page);
    }
}

fn install_flush_callback() {
    let closure = Closure::wrap(Box::new(move || {
        FLUSH_TIMEOUT.with(|t| t.set(None));
        let Ok(page) = DomPage::current() else {
            log::warn!("document gone before debounce flush");
            return;
        };
        if let Some(outcome) = with_session(|s| s.flush()) {
            follow_up(&page, outcome);
        }
    }) as Box<dyn FnMut()>);
    FLUSH_CB.with(|cb| cb.replace(Some(closure)));
}

/// Restarts the trailing-edge timer for the current burst.
fn arm_flush(page: &DomPage) {
    let wait = with_session(|s| s.config().debounce.wait_ms).unwrap_or(0.0);
    let win = page.window();
    if let Some(id) = FLUSH_TIMEOUT.with(|t| t.take()) {
        win.clear_timeout_with_handle(id);
    }
    FLUSH_CB.with(|cb| {
        if let Some(closure) = cb.borrow().as_ref() {
            let handler = closure.as_ref().unchecked_ref();
            let timeout = wait.round() as i32;
            match win.set_timeout_with_callback_and_timeout_and_arguments_0(handler, timeout) {
                Ok(id) => FLUSH_TIMEOUT.with(|t| t.set(Some(id))),
                Err(e) => log::warn!("debounce timer: {e:?}"),
            }
        }
    });
}

fn start_counter_interval(page: &DomPage) {
    if COUNTER_INTERVAL.with(|c| c.get()).is_some() {
        return;
    }
    let step_ms = with_session(|s| s.counter_step_ms()).unwrap_or(40.0);
    let win = page.window().clone();
    let closure = Closure::wrap(Box::new(move || {
        let phase = with_session(|s| s.tick_counters())
            .unwrap_or(CounterPhase::Running);
        if phase != CounterPhase::Running {
            if let Some(id) = COUNTER_INTERVAL.with(|c| c.take()) {
                win.clear_interval_with_handle(id);
            }
        }
    }) as Box<dyn FnMut()>);
    let handler = closure.as_ref().unchecked_ref();
    let timeout = step_ms.round() as i32;
    let w = page.window();
    match w.set_interval_with_callback_and_timeout_and_arguments_0(handler, timeout) {
        Ok(id) => COUNTER_INTERVAL.with(|c| c.set(Some(id))),
        Err(e) => log::warn!("counter interval: {e:?}"),
    }
    closure.forget();
}

enum ClickKind {
    Hamburger,
    NavLink,
    Anchor,
    Logo,
}

fn wire_clicks(page: &DomPage) -> Result<()> {
    let sel = with_session(|s| s.config().selectors.clone())
        .ok_or(EnhanceError::NoDocument)?;

    if let Some(burger) = page.query(&sel.hamburger) {
        listen_click(&burger, ClickKind::Hamburger)?;
    }
    for link in page.query_all(&sel.nav_links) {
        listen_click(&link, ClickKind::NavLink)?;
    }
    for anchor in page.query_all(&sel.anchors) {
        // nav links already scroll through their own listener
        if anchor.matches(&sel.nav_links).unwrap_or(false) {
            continue;
        }
        listen_click(&anchor, ClickKind::Anchor)?;
    }
    if let Some(logo) = page.query(&sel.logo) {
        listen_click(&logo, ClickKind::Logo)?;
    }
    Ok(())
}

fn listen_click(target: &Element, kind: ClickKind) -> Result<()> {
    let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
        let href = || {
            evt.current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("href"))
                .unwrap_or_default()
        };
        match kind {
            ClickKind::Hamburger => {
                with_session(|s| s.on_hamburger_click());
            }
            ClickKind::NavLink => {
                evt.prevent_default();
                let href = href();
                with_session(|s| s.on_nav_link_click(&href));
            }
            ClickKind::Anchor => {
                evt.prevent_default();
                let href = href();
                with_session(|s| s.on_anchor_click(&href));
            }
            ClickKind::Logo => {
                evt.prevent_default();
                with_session(|s| s.on_logo_click());
            }
        }
    }) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(EnhanceError::from_js)?;
    closure.forget();
    Ok(())
}
