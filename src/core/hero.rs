//! Rotating hero slider.
//!
//! The carousel owns its index and play state; slide zones are derived from
//! them on every render and never stored.

use crate::core::timer::TimerDirective;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Active,
    Next,
    Prev,
    FarNext,
    FarPrev,
    Hidden,
}

impl DisplayZone {
    /// Class added to the slide element; hidden slides carry no zone class.
    pub fn css_class(self) -> &'static str {
        match self {
            DisplayZone::Active => "active",
            DisplayZone::Next => "next",
            DisplayZone::Prev => "prev",
            DisplayZone::FarNext => "far-next",
            DisplayZone::FarPrev => "far-prev",
            DisplayZone::Hidden => "",
        }
    }

    /// Buckets `position` relative to `current` over a ring of `total` slides.
    /// The first matching rule wins, so small rings never double-book a slide.
    pub fn classify(position: usize, current: usize, total: usize) -> Self {
        if total == 0 {
            return DisplayZone::Hidden;
        }
        let offset = (position % total + total - current % total) % total;
        if offset == 0 {
            DisplayZone::Active
        } else if offset == 1 {
            DisplayZone::Next
        } else if offset == total - 1 {
            DisplayZone::Prev
        } else if offset == 2 {
            DisplayZone::FarNext
        } else if offset == total - 2 {
            DisplayZone::FarPrev
        } else {
            DisplayZone::Hidden
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeroCarousel {
    current: usize,
    total: usize,
    playing: bool,
    period: Duration,
    gesture_threshold: f64,
}

impl HeroCarousel {
    /// A new carousel starts on the first slide, playing.
    pub fn new(total: usize, period: Duration, gesture_threshold: f64) -> Self {
        Self {
            current: 0,
            total,
            playing: true,
            period,
            gesture_threshold,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Directive for the initial page load.
    pub fn start(&self) -> TimerDirective {
        self.rotation_directive()
    }

    pub fn advance(&mut self, direction: Direction) -> TimerDirective {
        if self.total == 0 {
            return TimerDirective::Unchanged;
        }
        self.current = match direction {
            Direction::Forward => (self.current + 1) % self.total,
            Direction::Backward => (self.current + self.total - 1) % self.total,
        };
        log::debug!("hero slide -> {} ({:?})", self.current, direction);
        self.rotation_directive()
    }

    pub fn goto(&mut self, index: usize) -> TimerDirective {
        if index >= self.total {
            log::warn!("ignoring hero jump to {} of {}", index, self.total);
            return TimerDirective::Unchanged;
        }
        self.current = index;
        log::debug!("hero slide -> {} (jump)", self.current);
        self.rotation_directive()
    }

    /// Timer callback.
    pub fn tick(&mut self) -> TimerDirective {
        self.advance(Direction::Forward)
    }

    pub fn toggle_play(&mut self) -> TimerDirective {
        self.playing = !self.playing;
        log::debug!("hero rotation {}", if self.playing { "playing" } else { "paused" });
        if self.playing {
            TimerDirective::Restart(self.period)
        } else {
            TimerDirective::Cancel
        }
    }

    /// Wheel, swipe and drag all arrive here as one signed distance;
    /// positive means forward.
    pub fn on_gesture(&mut self, delta: f64) -> TimerDirective {
        if !(delta.abs() > self.gesture_threshold) {
            return TimerDirective::Unchanged;
        }
        if delta > 0.0 {
            self.advance(Direction::Forward)
        } else {
            self.advance(Direction::Backward)
        }
    }

    fn rotation_directive(&self) -> TimerDirective {
        if self.playing {
            TimerDirective::Restart(self.period)
        } else {
            TimerDirective::Unchanged
        }
    }

    pub fn zone_of(&self, position: usize) -> DisplayZone {
        DisplayZone::classify(position, self.current, self.total)
    }

    pub fn zones(&self) -> Vec<DisplayZone> {
        (0..self.total).map(|i| self.zone_of(i)).collect()
    }

    pub fn is_dot_active(&self, index: usize) -> bool {
        index == self.current
    }

    /// 1-based slide number padded to two digits, e.g. `03`.
    pub fn counter_label(&self) -> String {
        format!("{:02}", self.current + 1)
    }

    /// The progress bar only animates while rotating.
    pub fn progress_animating(&self) -> bool {
        self.playing
    }

    /// One-shot delay before the progress fill starts again; any pending kickoff is superseded.
    pub fn progress_kickoff(&self, delay: Duration) -> TimerDirective {
        if self.progress_animating() {
            TimerDirective::Restart(delay)
        } else {
            TimerDirective::Cancel
        }
    }
}

/// Tracks a pointer drag or touch swipe from press to release.
#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    start_x: Option<f64>,
    current_x: f64,
}

impl GestureTracker {
    pub fn press(&mut self, x: f64) {
        self.start_x = Some(x);
        self.current_x = x;
    }

    pub fn move_to(&mut self, x: f64) {
        if self.start_x.is_some() {
            self.current_x = x;
        }
    }

    /// Ends the gesture and yields `start - end`, or nothing without a press.
    pub fn release(&mut self) -> Option<f64> {
        self.start_x.take().map(|start| start - self.current_x)
    }

    /// Touch devices report the end position only on release.
    pub fn release_at(&mut self, x: f64) -> Option<f64> {
        self.move_to(x);
        self.release()
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn cursor(&self) -> &'static str {
        if self.is_dragging() {
            "grabbing"
        } else {
            "grab"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    fn carousel(total: usize) -> HeroCarousel {
        HeroCarousel::new(total, PERIOD, 50.0)
    }

    #[test]
    fn test_forward_cycle_returns_to_start() {
        for total in 1..=7 {
            let mut hero = carousel(total);
            hero.goto(total / 2);
            let start = hero.current();
            for _ in 0..total {
                hero.advance(Direction::Forward);
            }
            assert_eq!(hero.current(), start, "total = {}", total);
        }
    }

    #[test]
    fn test_forward_then_backward_is_identity() {
        let mut hero = carousel(5);
        for start in 0..5 {
            hero.goto(start);
            hero.advance(Direction::Forward);
            hero.advance(Direction::Backward);
            assert_eq!(hero.current(), start);
        }
    }

    #[test]
    fn test_backward_wraps_from_first_slide() {
        let mut hero = carousel(5);
        hero.advance(Direction::Backward);
        assert_eq!(hero.current(), 4);
        assert_eq!(hero.counter_label(), "05");
    }

    #[test]
    fn test_zone_table_for_five_slides() {
        let mut hero = carousel(5);
        hero.goto(2);
        assert_eq!(
            hero.zones(),
            vec![
                DisplayZone::FarPrev,
                DisplayZone::Prev,
                DisplayZone::Active,
                DisplayZone::Next,
                DisplayZone::FarNext,
            ]
        );
    }

    #[test]
    fn test_zone_table_wraps_around_the_ring() {
        let mut hero = carousel(7);
        hero.goto(0);
        assert_eq!(hero.zone_of(1), DisplayZone::Next);
        assert_eq!(hero.zone_of(2), DisplayZone::FarNext);
        assert_eq!(hero.zone_of(3), DisplayZone::Hidden);
        assert_eq!(hero.zone_of(4), DisplayZone::Hidden);
        assert_eq!(hero.zone_of(5), DisplayZone::FarPrev);
        assert_eq!(hero.zone_of(6), DisplayZone::Prev);
    }

    #[test]
    fn test_small_rings_have_exactly_one_active_slide() {
        for total in 1..=4 {
            for current in 0..total {
                let mut hero = carousel(total);
                hero.goto(current);
                let zones = hero.zones();
                let active = zones.iter().filter(|z| **z == DisplayZone::Active).count();
                assert_eq!(active, 1);
                assert_eq!(zones[current], DisplayZone::Active);
            }
        }

        let mut hero = carousel(3);
        hero.goto(0);
        assert_eq!(hero.zones(), vec![DisplayZone::Active, DisplayZone::Next, DisplayZone::Prev]);

        let hero = carousel(2);
        assert_eq!(hero.zones(), vec![DisplayZone::Active, DisplayZone::Next]);
    }

    #[test]
    fn test_navigation_restarts_timer_only_while_playing() {
        let mut hero = carousel(5);
        assert_eq!(hero.start(), TimerDirective::Restart(PERIOD));
        assert_eq!(hero.advance(Direction::Forward), TimerDirective::Restart(PERIOD));
        assert_eq!(hero.goto(3), TimerDirective::Restart(PERIOD));

        assert_eq!(hero.toggle_play(), TimerDirective::Cancel);
        assert!(!hero.progress_animating());
        assert_eq!(hero.advance(Direction::Forward), TimerDirective::Unchanged);
        assert_eq!(hero.current(), 4);

        assert_eq!(hero.toggle_play(), TimerDirective::Restart(PERIOD));
        assert!(hero.is_playing());
    }

    #[test]
    fn test_out_of_range_goto_is_ignored() {
        let mut hero = carousel(5);
        hero.goto(1);
        assert_eq!(hero.goto(5), TimerDirective::Unchanged);
        assert_eq!(hero.current(), 1);
    }

    #[test]
    fn test_gestures_respect_threshold() {
        let mut hero = carousel(5);
        assert_eq!(hero.on_gesture(50.0), TimerDirective::Unchanged);
        assert_eq!(hero.on_gesture(-49.0), TimerDirective::Unchanged);
        assert_eq!(hero.current(), 0);

        hero.on_gesture(120.0);
        assert_eq!(hero.current(), 1);
        hero.on_gesture(-51.0);
        assert_eq!(hero.current(), 0);
    }

    #[test]
    fn test_quick_slide_changes_keep_one_pending_kickoff() {
        use crate::core::timer::{TimerHandle, TimerSlot};
        use std::cell::Cell;
        use std::rc::Rc;

        struct Pending(Rc<Cell<i32>>);
        impl TimerHandle for Pending {
            fn cancel(self) {
                self.0.set(self.0.get() - 1);
            }
        }

        let pending = Rc::new(Cell::new(0));
        let arm = |period: Duration| {
            assert_eq!(period, Duration::from_millis(50));
            pending.set(pending.get() + 1);
            Some(Pending(pending.clone()))
        };
        let mut kickoff = TimerSlot::new();
        let mut hero = carousel(5);

        hero.advance(Direction::Forward);
        kickoff.apply(hero.progress_kickoff(Duration::from_millis(50)), arm);
        hero.advance(Direction::Forward);
        kickoff.apply(hero.progress_kickoff(Duration::from_millis(50)), arm);
        assert_eq!(pending.get(), 1);

        hero.toggle_play();
        kickoff.apply(hero.progress_kickoff(Duration::from_millis(50)), arm);
        assert_eq!(pending.get(), 0);
    }

    #[test]
    fn test_nan_never_moves_the_slide() {
        let mut hero = HeroCarousel::new(5, Duration::from_secs(5), f64::NAN);
        assert_eq!(hero.on_gesture(0.0), TimerDirective::Unchanged);
        assert_eq!(hero.on_gesture(500.0), TimerDirective::Unchanged);
        assert_eq!(hero.current(), 0);

        let mut hero = carousel(5);
        assert_eq!(hero.on_gesture(f64::NAN), TimerDirective::Unchanged);
        assert_eq!(hero.current(), 0);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut hero = carousel(0);
        assert_eq!(hero.advance(Direction::Forward), TimerDirective::Unchanged);
        assert_eq!(hero.goto(0), TimerDirective::Unchanged);
        assert!(hero.zones().is_empty());
    }

    #[test]
    fn test_gesture_tracker_drag() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.release(), None);

        tracker.move_to(10.0);
        assert!(!tracker.is_dragging());

        tracker.press(300.0);
        assert_eq!(tracker.cursor(), "grabbing");
        tracker.move_to(250.0);
        tracker.move_to(200.0);
        assert_eq!(tracker.release(), Some(100.0));
        assert_eq!(tracker.cursor(), "grab");
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn test_swipe_right_moves_backward() {
        let mut hero = carousel(5);
        let mut tracker = GestureTracker::default();
        tracker.press(100.0);
        let delta = tracker.release_at(220.0).unwrap_or(0.0);
        hero.on_gesture(delta);
        assert_eq!(hero.current(), 4);
    }
}
