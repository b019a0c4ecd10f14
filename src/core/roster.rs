//! Character carousel over a category-filtered view of the full list.

use crate::core::timer::TimerDirective;
use std::time::Duration;

/// Reserved category tag that matches every character.
pub const ALL_CATEGORY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    All,
    Tag(String),
}

impl Category {
    pub fn parse(tag: &str) -> Self {
        if tag == ALL_CATEGORY {
            Category::All
        } else {
            Category::Tag(tag.to_string())
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Category::All => true,
            Category::Tag(t) => t == tag,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => ALL_CATEGORY,
            Category::Tag(t) => t,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CharacterCarousel {
    categories: Vec<String>,
    filter: Category,
    /// Full-list positions of the filtered view, in list order.
    filtered: Vec<usize>,
    current: usize,
    hovering: bool,
    period: Duration,
}

impl CharacterCarousel {
    /// `categories[i]` is the category tag of the i-th character.
    pub fn new(categories: Vec<String>, period: Duration) -> Self {
        let filtered = (0..categories.len()).collect();
        Self {
            categories,
            filter: Category::All,
            filtered,
            current: 0,
            hovering: false,
            period,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn filter(&self) -> &Category {
        &self.filter
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.categories
            .get(index)
            .map(|tag| self.filter.matches(tag))
            .unwrap_or(false)
    }

    pub fn is_active(&self, index: usize) -> bool {
        !self.is_empty() && index == self.current
    }

    /// Directive for the initial page load.
    pub fn start(&self) -> TimerDirective {
        self.autoplay_directive()
    }

    pub fn set_filter(&mut self, category: Category) -> TimerDirective {
        self.filtered = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, tag)| category.matches(tag))
            .map(|(i, _)| i)
            .collect();
        log::debug!(
            "character filter -> {} ({} items)",
            category.as_str(),
            self.filtered.len()
        );
        self.filter = category;

        if let Some(&first) = self.filtered.first() {
            if !self.filtered.contains(&self.current) {
                self.current = first;
            }
        }
        self.autoplay_directive()
    }

    pub fn next(&mut self) -> TimerDirective {
        self.step(Step::Next)
    }

    pub fn prev(&mut self) -> TimerDirective {
        self.step(Step::Prev)
    }

    fn step(&mut self, step: Step) -> TimerDirective {
        let len = self.filtered.len();
        if len == 0 {
            return TimerDirective::Unchanged;
        }
        let position = self.filtered.iter().position(|&i| i == self.current);
        let target = match (step, position) {
            (Step::Next, Some(p)) => (p + 1) % len,
            (Step::Prev, Some(p)) => (p + len - 1) % len,
            // off-filter after a thumbnail jump
            (Step::Next, None) => 0,
            (Step::Prev, None) => len - 1,
        };
        self.current = self.filtered[target];
        log::debug!("character -> {}", self.current);
        self.autoplay_directive()
    }

    /// Jumps straight to a full-list position, ignoring the active filter.
    pub fn select_thumbnail(&mut self, index: usize) -> TimerDirective {
        if index >= self.categories.len() {
            log::warn!("ignoring thumbnail {} of {}", index, self.categories.len());
            return TimerDirective::Unchanged;
        }
        self.current = index;
        self.autoplay_directive()
    }

    /// Timer callback.
    pub fn tick(&mut self) -> TimerDirective {
        self.next()
    }

    pub fn pointer_enter(&mut self) -> TimerDirective {
        self.hovering = true;
        TimerDirective::Cancel
    }

    pub fn pointer_leave(&mut self) -> TimerDirective {
        self.hovering = false;
        TimerDirective::Restart(self.period)
    }

    fn autoplay_directive(&self) -> TimerDirective {
        if self.hovering {
            TimerDirective::Unchanged
        } else {
            TimerDirective::Restart(self.period)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Prev,
}

/// Whether an element spanning `left..right` pokes out of a viewport of `viewport_width`.
pub fn needs_horizontal_scroll(left: f64, right: f64, viewport_width: f64) -> bool {
    left < 0.0 || right > viewport_width
}
