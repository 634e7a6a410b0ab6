//! Paged carousel controller
//!
//! Paginates an ordered item list into fixed-size windows and serializes
//! page changes behind a transition lock. The render layer feeds navigation
//! intents in and reports back once the slide animation has finished:
//!
//! ```text
//!   Idle --Next/Previous--> Transitioning --TransitionComplete--> Idle
//! ```
//!
//! While `Transitioning`, navigation intents are ignored. Every accepted
//! input returns a [`CarouselView`] for the render layer to draw.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Lock phase of a carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A page change has been accepted and its animation is in flight
    Transitioning,
}

/// Direction of the last accepted page change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Sign applied to the viewport width when sliding a page in
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Inputs accepted by [`Carousel::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    TransitionComplete,
}

/// Snapshot handed to the render layer after a state change
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView<'a, T> {
    pub visible_items: &'a [T],
    pub page: usize,
    pub direction: Direction,
    pub locked: bool,
}

/// Paged carousel over a list of items
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    page_size: usize,
    page: usize,
    phase: Phase,
    direction: Direction,
    /// When the current lock was taken
    locked_at: Option<Instant>,
    /// Release a lock held longer than this
    timeout: Option<Duration>,
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Carousel<T> {
    /// Create an idle carousel on page 0 with the default page size
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            page_size: DEFAULT_PAGE_SIZE,
            page: 0,
            phase: Phase::Idle,
            direction: Direction::Forward,
            locked_at: None,
            timeout: None,
        }
    }

    /// Set the page size at construction (zero keeps the default)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Release stuck locks after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last reachable page, `None` when the list has no full page.
    ///
    /// Only full pages are counted, so trailing items past the last full
    /// page are never paged to.
    pub fn max_page(&self) -> Option<usize> {
        (self.items.len() / self.page_size).checked_sub(1)
    }

    /// Number of reachable pages (at least one)
    pub fn page_count(&self) -> usize {
        self.max_page().map_or(1, |m| m + 1)
    }

    /// Items on the current page, clipped to the end of the list
    pub fn current_window(&self) -> &[T] {
        let len = self.items.len();
        let start = self.page.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        &self.items[start..end]
    }

    /// Current state as seen by the render layer
    pub fn view(&self) -> CarouselView<'_, T> {
        CarouselView {
            visible_items: self.current_window(),
            page: self.page,
            direction: self.direction,
            locked: self.is_locked(),
        }
    }

    /// Signed horizontal offset a new page slides in from
    pub fn offset(&self, viewport_width: u16) -> i32 {
        self.direction.sign() * i32::from(viewport_width)
    }

    /// Feed one input into the state machine
    pub fn dispatch(&mut self, intent: Intent) -> Option<CarouselView<'_, T>> {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::TransitionComplete => self.on_transition_complete(),
        }
    }

    /// Advance one page, wrapping from the last page to the first
    pub fn next(&mut self) -> Option<CarouselView<'_, T>> {
        let max = self.navigable_max()?;
        self.page = if self.page >= max { 0 } else { self.page + 1 };
        self.begin(Direction::Forward);
        Some(self.view())
    }

    /// Go back one page, wrapping from the first page to the last
    pub fn previous(&mut self) -> Option<CarouselView<'_, T>> {
        let max = self.navigable_max()?;
        self.page = if self.page == 0 {
            max
        } else {
            (self.page - 1).min(max)
        };
        self.begin(Direction::Backward);
        Some(self.view())
    }

    /// Release the transition lock; ignored while idle
    pub fn on_transition_complete(&mut self) -> Option<CarouselView<'_, T>> {
        if self.phase != Phase::Transitioning {
            return None;
        }
        self.release();
        tracing::trace!(page = self.page, "carousel transition complete");
        Some(self.view())
    }

    /// Replace the items; always lands idle on page 0
    pub fn set_items(&mut self, items: Vec<T>) -> CarouselView<'_, T> {
        self.items = items;
        self.page = 0;
        self.direction = Direction::Forward;
        self.release();
        self.view()
    }

    /// Change the page size, keeping the current page in range.
    ///
    /// A zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> Option<CarouselView<'_, T>> {
        if page_size == 0 || page_size == self.page_size {
            return None;
        }
        self.page_size = page_size;
        self.page = self.page.min(self.max_page().unwrap_or(0));
        Some(self.view())
    }

    /// Force-release a lock held past the configured timeout.
    ///
    /// Returns the view when the lock was released.
    pub fn expire(&mut self, now: Instant) -> Option<CarouselView<'_, T>> {
        let timeout = self.timeout?;
        let started = self.locked_at?;
        if now.saturating_duration_since(started) < timeout {
            return None;
        }
        tracing::warn!(
            page = self.page,
            held_ms = now.saturating_duration_since(started).as_millis() as u64,
            "carousel transition lock expired without completion"
        );
        self.release();
        Some(self.view())
    }

    /// Max page if an intent may be accepted now
    fn navigable_max(&self) -> Option<usize> {
        if self.is_locked() {
            return None;
        }
        // A lone page has nowhere to slide to
        self.max_page().filter(|&m| m > 0)
    }

    fn begin(&mut self, direction: Direction) {
        self.direction = direction;
        self.phase = Phase::Transitioning;
        self.locked_at = Some(Instant::now());
        tracing::trace!(page = self.page, ?direction, "carousel transition started");
    }

    fn release(&mut self) {
        self.phase = Phase::Idle;
        self.locked_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel<usize> {
        Carousel::new((0..n).collect())
    }

    fn complete(c: &mut Carousel<usize>) {
        assert!(c.on_transition_complete().is_some());
    }

    #[test]
    fn test_max_page() {
        assert_eq!(carousel(0).max_page(), None);
        assert_eq!(carousel(5).max_page(), None);
        assert_eq!(carousel(6).max_page(), Some(0));
        assert_eq!(carousel(20).max_page(), Some(2));
        assert_eq!(carousel(20).page_count(), 3);
    }

    #[test]
    fn test_next_takes_lock() {
        let mut c = carousel(20);
        let view = c.next().unwrap();
        assert_eq!(view.page, 1);
        assert!(view.locked);
        assert_eq!(view.visible_items, &[6, 7, 8, 9, 10, 11]);
        assert_eq!(c.phase(), Phase::Transitioning);
    }

    #[test]
    fn test_previous_wraps_to_last_page() {
        let mut c = carousel(20);
        let view = c.previous().unwrap();
        assert_eq!(view.page, 2);
        assert_eq!(view.direction, Direction::Backward);
    }

    #[test]
    fn test_intents_ignored_while_locked() {
        let mut c = carousel(20);
        c.next();
        assert!(c.next().is_none());
        assert!(c.previous().is_none());
        assert_eq!(c.page(), 1);
        assert_eq!(c.direction(), Direction::Forward);
        assert!(c.is_locked());
    }

    #[test]
    fn test_complete_while_idle_is_ignored() {
        let mut c = carousel(20);
        assert!(c.on_transition_complete().is_none());
        assert_eq!(c.page(), 0);
    }

    #[test]
    fn test_dispatch_routes_intents() {
        let mut c = carousel(20);
        assert!(c.dispatch(Intent::Next).is_some());
        assert!(c.dispatch(Intent::Previous).is_none());
        assert!(c.dispatch(Intent::TransitionComplete).is_some());
        assert_eq!(c.page(), 1);
        assert!(!c.is_locked());
    }

    #[test]
    fn test_single_page_is_noop() {
        let mut c = carousel(6);
        assert!(c.next().is_none());
        assert!(c.previous().is_none());
        assert!(!c.is_locked());
        assert_eq!(c.current_window().len(), 6);
    }

    #[test]
    fn test_short_list_window() {
        let mut c = carousel(4);
        assert!(c.next().is_none());
        assert_eq!(c.current_window(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_offset_sign_follows_direction() {
        let mut c = carousel(20);
        assert_eq!(c.offset(80), 80);
        c.previous();
        assert_eq!(c.offset(80), -80);
    }

    #[test]
    fn test_set_page_size_clamps_page() {
        let mut c = carousel(20);
        c.previous();
        complete(&mut c);
        assert_eq!(c.page(), 2);
        c.set_page_size(10);
        assert_eq!(c.page(), 1);
        assert_eq!(c.current_window(), &[10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_set_page_size_zero_ignored() {
        let mut c = carousel(20);
        assert!(c.set_page_size(0).is_none());
        assert_eq!(c.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_set_items_releases_lock() {
        let mut c = carousel(20);
        c.next();
        let view = c.set_items((100..112).collect());
        assert!(!view.locked);
        assert_eq!(view.page, 0);
        assert_eq!(view.visible_items, &[100, 101, 102, 103, 104, 105]);
    }

    #[test]
    fn test_expire_releases_stale_lock() {
        let mut c = carousel(20).with_timeout(Duration::from_millis(50));
        c.next();
        assert!(c.is_locked());
        let later = Instant::now() + Duration::from_secs(1);
        assert!(c.expire(later).is_some());
        assert!(!c.is_locked());
        assert_eq!(c.page(), 1);
    }

    #[test]
    fn test_expire_without_timeout_keeps_lock() {
        let mut c = carousel(20);
        c.next();
        assert!(c.expire(Instant::now() + Duration::from_secs(3600)).is_none());
        assert!(c.is_locked());
    }
}
