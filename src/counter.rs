//! Stat counters: each badge ramps from 0 to the number it was authored with,
//! once per page load, the first time the counter region becomes visible.

use crate::config::{RampConfig, Selectors};
use crate::page::Page;

/// Leading-integer parse with `parseInt` rules: optional leading whitespace,
/// optional sign, then at least one digit; anything after the digits is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if neg { -value } else { value })
}

/// Ramp state for a single badge.
#[derive(Clone, Debug)]
pub struct Ramp<N> {
    pub node: N,
    pub target: i64,
    count: f64,
    increment: f64,
    done: bool,
}

impl<N> Ramp<N> {
    pub fn new(node: N, target: i64, steps: u32) -> Self {
        Self {
            node,
            target,
            count: 0.0,
            increment: target as f64 / steps.max(1) as f64,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    /// Advances one step and returns the text to display, or `None` once done.
    pub fn step(&mut self, suffix: &str) -> Option<String> {
        if self.done {
            return None;
        }
        self.count += self.increment;
        if self.count >= self.target as f64 {
            self.done = true;
            Some(format!("{}{suffix}", self.target))
        } else {
            Some(format!("{}{suffix}", self.count.floor() as i64))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

/// Owns the one-shot trigger and every badge ramp for the page session.
#[derive(Debug)]
pub struct CounterAnimator<N> {
    phase: CounterPhase,
    ramps: Vec<Ramp<N>>,
    config: RampConfig,
}

impl<N: Clone> CounterAnimator<N> {
    pub fn new(config: RampConfig) -> Self {
        Self {
            phase: CounterPhase::Idle,
            ramps: Vec::new(),
            config,
        }
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn ramps(&self) -> &[Ramp<N>] {
        &self.ramps
    }

    pub fn step_ms(&self) -> f64 {
        self.config.step_ms()
    }

    /// Starts the ramps if the counter region intersects the viewport and the
    /// animator has never started. Returns true only on the idle→running edge.
    pub fn check_visibility<P: Page<Node = N>>(
        &mut self,
        page: &P,
        selectors: &Selectors,
    ) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        let Some(region) = page.query(&selectors.counter_region) else {
            return false;
        };
        let rect = page.bounding_rect(&region);
        if !rect.intersects_viewport(page.viewport_height()) {
            return false;
        }
        self.start(page, &selectors.badges);
        true
    }

    fn start<P: Page<Node = N>>(&mut self, page: &P, badge_selector: &str) {
        self.ramps = page
            .query_all(badge_selector)
            .into_iter()
            .filter_map(|badge| {
                let target = parse_leading_int(&page.text(&badge));
                if target.is_none() {
                    log::debug!("badge text is not a number; skipping");
                }
                target.map(|t| Ramp::new(badge, t, self.config.steps))
            })
            .collect();
        log::info!("starting {} counter ramp(s)", self.ramps.len());
        self.phase = CounterPhase::Running;
    }

    /// Advances every unfinished ramp one step and writes its text.
    pub fn tick<P: Page<Node = N>>(&mut self, page: &P) -> CounterPhase {
        if self.phase != CounterPhase::Running {
            return self.phase;
        }
        for ramp in self.ramps.iter_mut() {
            if let Some(text) = ramp.step(&self.config.suffix) {
                page.set_text(&ramp.node, &text);
            }
        }
        if self.ramps.iter().all(Ramp::is_done) {
            self.phase = CounterPhase::Done;
        }
        self.phase
    }
}
