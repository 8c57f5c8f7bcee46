//! Fixed bar across the top of the page whose width tracks scroll progress.

use crate::error::Result;
use crate::page::Page;

const BAR_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("height", "4px"),
    ("background", "linear-gradient(90deg, #fbbf24, #3b82f6)"),
    ("z-index", "9999"),
    ("width", "0%"),
    ("transition", "width 0.1s ease"),
];

/// Scroll fraction as a percentage in `[0, 100]`. A page that cannot scroll
/// reports 0.
pub fn scroll_percentage(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

pub struct ProgressBar<N> {
    bar: N,
}

impl<N: Clone> ProgressBar<N> {
    pub fn create<P: Page<Node = N>>(page: &P) -> Result<Self> {
        let bar = page.append_to_body("div")?;
        page.set_attribute(&bar, "class", "scroll-progress");
        for (prop, value) in BAR_STYLE {
            page.set_style(&bar, prop, value);
        }
        Ok(Self { bar })
    }

    pub fn node(&self) -> &N {
        &self.bar
    }

    pub fn update<P: Page<Node = N>>(&self, page: &P) -> f64 {
        let pct = scroll_percentage(page.scroll_y(), page.scroll_height(), page.client_height());
        page.set_style(&self.bar, "width", &format!("{pct}%"));
        pct
    }
}
