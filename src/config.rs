//! Page configuration. Defaults reproduce the stock tennis page; every trigger
//! margin and timing constant can be overridden from JS as a partial JSON object.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::{EnhanceError, Result};

/// CSS selectors for the elements the enhancer drives.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct Selectors {
    pub navbar: String,
    pub nav_menu: String,
    pub hamburger: String,
    pub nav_links: String,
    pub logo: String,
    pub sections: String,
    pub cards: String,
    pub counter_region: String,
    pub badges: String,
    pub lazy_images: String,
    pub anchors: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: ".navbar".into(),
            nav_menu: ".nav-menu".into(),
            hamburger: ".hamburger".into(),
            nav_links: ".nav-link".into(),
            logo: ".logo".into(),
            sections: ".section".into(),
            cards: ".rule-card, .slam-card, .icon-card".into(),
            counter_region: ".icons-section".into(),
            badges: ".icon-badge".into(),
            lazy_images: "img[data-src]".into(),
            anchors: "a[href^=\"#\"]".into(),
        }
    }
}

/// Counter ramp timing: `steps` increments spread over `duration_ms`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct RampConfig {
    pub duration_ms: f64,
    pub steps: u32,
    pub suffix: String,
}

impl RampConfig {
    pub fn step_ms(&self) -> f64 {
        self.duration_ms / self.steps as f64
    }
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            steps: 50,
            suffix: " Grand Slams".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct DebounceConfig {
    pub wait_ms: f64,
    /// Fire on the leading edge of a burst (true) or once it has quieted (false).
    pub immediate: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_ms: 10.0,
            immediate: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct EnhanceConfig {
    pub selectors: Selectors,
    /// Switch the highlighted section this far before it reaches the navbar.
    pub section_lookahead: f64,
    pub navbar_scrolled_offset: f64,
    /// Reveal cards once their top is this far above the viewport bottom.
    pub reveal_margin: f64,
    pub counter: RampConfig,
    pub debounce: DebounceConfig,
    pub fade_in_delay_ms: i32,
    pub log_level: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            section_lookahead: 100.0,
            navbar_scrolled_offset: 100.0,
            reveal_margin: 150.0,
            counter: RampConfig::default(),
            debounce: DebounceConfig::default(),
            fade_in_delay_ms: 100,
            log_level: "info".into(),
        }
    }
}

impl EnhanceConfig {
    /// Parses a (possibly partial) JSON object; absent fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: EnhanceConfig = serde_json::from_str(json)
            .map_err(|e| EnhanceError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.counter.steps == 0 {
            return Err(EnhanceError::Config("counter.steps must be > 0".into()));
        }
        if !(self.counter.duration_ms.is_finite() && self.counter.duration_ms >= 0.0) {
            return Err(EnhanceError::Config(
                "counter.duration_ms must be a non-negative number".into(),
            ));
        }
        if !(self.debounce.wait_ms.is_finite() && self.debounce.wait_ms >= 0.0) {
            return Err(EnhanceError::Config(
                "debounce.wait_ms must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_page() {
        let cfg = EnhanceConfig::default();
        assert_eq!(cfg.section_lookahead, 100.0);
        assert_eq!(cfg.reveal_margin, 150.0);
        assert_eq!(cfg.counter.step_ms(), 40.0);
        assert!(cfg.debounce.immediate);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let cfg = EnhanceConfig {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(cfg.level_filter(), log::LevelFilter::Info);
        let cfg = EnhanceConfig {
            log_level: "debug".into(),
            ..Default::default()
        };
        assert_eq!(cfg.level_filter(), log::LevelFilter::Debug);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{"reveal_margin": 80, "counter": {"steps": 10}}"#;
        let cfg = EnhanceConfig::from_json(json).unwrap();
        assert_eq!(cfg.reveal_margin, 80.0);
        assert_eq!(cfg.counter.steps, 10);
        assert_eq!(cfg.counter.duration_ms, 2000.0);
        assert_eq!(cfg.counter.suffix, " Grand Slams");
        assert_eq!(cfg.selectors.navbar, ".navbar");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn zero_steps_rejected() {
        let json = r#"{"counter": {"steps": 0}}"#;
        let err = EnhanceConfig::from_json(json).unwrap_err();
        assert!(matches!(err, EnhanceError::Config(_)));
        assert!(EnhanceConfig::from_json("not json").is_err());
    }
}
