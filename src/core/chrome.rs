use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    Top,
    Scrolled,
}

impl NavbarStyle {
    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            NavbarStyle::Scrolled
        } else {
            NavbarStyle::Top
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NavbarStyle::Top => "rgba(10, 20, 26, 0.95)",
            NavbarStyle::Scrolled => "rgba(10, 20, 26, 0.98)",
        }
    }

    pub fn box_shadow(self) -> &'static str {
        match self {
            NavbarStyle::Top => "0 2px 20px rgba(0, 0, 0, 0.3)",
            NavbarStyle::Scrolled => "0 5px 20px rgba(0, 0, 0, 0.3)",
        }
    }
}

/// Element id targeted by an in-page link, if any. A bare `#` targets nothing.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that leaves room for the fixed navbar.
pub fn scroll_top_for(offset_top: f64, navbar_offset: f64) -> f64 {
    (offset_top - navbar_offset).max(0.0)
}

/// Elements that have faded in once stay visible.
#[derive(Debug, Clone)]
pub struct FadeIn {
    threshold: f64,
    revealed: HashSet<String>,
}

impl FadeIn {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: HashSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns true when this observation revealed the element for the first time.
    pub fn observe(&mut self, id: &str, intersecting: bool, ratio: f64) -> bool {
        if intersecting && ratio >= self.threshold {
            self.revealed.insert(id.to_string())
        } else {
            false
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Prev,
    Next,
    TogglePlay,
    Escape,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyCommand::Prev),
            "ArrowRight" => Some(KeyCommand::Next),
            " " => Some(KeyCommand::TogglePlay),
            "Escape" => Some(KeyCommand::Escape),
            _ => None,
        }
    }

    /// Space would otherwise scroll the page.
    pub fn prevents_default(self) -> bool {
        self == KeyCommand::TogglePlay
    }
}
