// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page index state machine.
//!
//! [`Pager`] owns the current page, the page count and the boundary policy.
//! It answers navigation requests with a [`Transition`] or rejects them;
//! rejection is an ordinary outcome, not an error.
//!
//! The index is updated when a transition is *accepted*: [`Pager::current`]
//! reports the page being moved to while the motion is still in flight, and
//! [`Pager::settle`] only returns the machine to [`NavState::Idle`].

/// Number of pages needed for `slides` slides at `per_page` slides each.
///
/// `per_page` must be non-zero.
#[inline]
#[must_use]
pub const fn page_count(slides: usize, per_page: usize) -> usize {
    slides.div_ceil(per_page)
}

/// Direction of a boundary-crossing transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// From the last page to the first, moving forward.
    Forward,
    /// From the first page to the last, moving backward.
    Backward,
}

/// An accepted page change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Page the carousel was on.
    pub from: usize,
    /// Page the carousel is moving to.
    pub to: usize,
    /// Set when the transition crosses the loop seam.
    pub wrap: Option<Wrap>,
}

/// Navigation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavState {
    /// Resting on a page.
    Idle(usize),
    /// Moving between pages.
    Animating {
        /// Page the motion started from.
        from: usize,
        /// Page the motion converges to.
        to: usize,
    },
}

/// The carousel's page index and boundary policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    state: NavState,
    pages: usize,
    looping: bool,
}

impl Pager {
    /// Creates a pager resting on page 0.
    #[must_use]
    pub const fn new(pages: usize, looping: bool) -> Self {
        Self {
            state: NavState::Idle(0),
            pages,
            looping,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> NavState {
        self.state
    }

    /// The authoritative page: the resting page, or the target of the
    /// transition in flight.
    #[must_use]
    pub const fn current(&self) -> usize {
        match self.state {
            NavState::Idle(index) | NavState::Animating { to: index, .. } => index,
        }
    }

    /// Number of pages.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Whether navigation wraps at either end.
    #[must_use]
    pub const fn looping(&self) -> bool {
        self.looping
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.state, NavState::Animating { .. })
    }

    /// Whether a backward step is impossible.
    #[must_use]
    pub const fn is_prev_disabled(&self) -> bool {
        !self.looping && self.current() == 0
    }

    /// Whether a forward step is impossible.
    ///
    /// An empty pager reports both directions disabled.
    #[must_use]
    pub const fn is_next_disabled(&self) -> bool {
        !self.looping && self.current() + 1 >= self.pages
    }

    /// Requests a step to the next page.
    pub fn next(&mut self) -> Option<Transition> {
        let current = self.current();
        if self.pages == 0 {
            return None;
        }
        let candidate = if current + 1 == self.pages {
            0
        } else {
            current + 1
        };
        let wrap = (candidate < current).then_some(Wrap::Forward);
        self.accept(current, candidate, wrap)
    }

    /// Requests a step to the previous page.
    pub fn prev(&mut self) -> Option<Transition> {
        let current = self.current();
        if self.pages == 0 {
            return None;
        }
        let candidate = if current == 0 {
            self.pages - 1
        } else {
            current - 1
        };
        let wrap = (candidate > current).then_some(Wrap::Backward);
        self.accept(current, candidate, wrap)
    }

    /// Requests a direct jump to `target`.
    ///
    /// Jumps never wrap, whatever the distance. Requests for the current
    /// page or for a page that does not exist are rejected.
    pub fn go_to(&mut self, target: usize) -> Option<Transition> {
        let current = self.current();
        if target >= self.pages {
            return None;
        }
        self.accept(current, target, None)
    }

    fn accept(&mut self, from: usize, to: usize, wrap: Option<Wrap>) -> Option<Transition> {
        if to == from || (wrap.is_some() && !self.looping) {
            return None;
        }
        self.state = NavState::Animating { from, to };
        Some(Transition { from, to, wrap })
    }

    /// Marks the transition in flight as finished.
    pub fn settle(&mut self) {
        self.state = NavState::Idle(self.current());
    }

    /// Replaces page count and policy and rests on page 0.
    pub fn reset(&mut self, pages: usize, looping: bool) {
        *self = Self::new(pages, looping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(5, 2), 3);
        assert_eq!(page_count(6, 2), 3);
        assert_eq!(page_count(1, 4), 1);
        assert_eq!(page_count(0, 3), 0);
        for slides in 0..40 {
            for per_page in 1..7 {
                assert!(
                    page_count(slides, per_page) * per_page >= slides,
                    "{slides}/{per_page}"
                );
                assert!(page_count(slides, per_page) * per_page < slides + per_page);
            }
        }
    }

    #[test]
    fn clamped_next_stops_at_last_page() {
        let mut pager = Pager::new(page_count(5, 2), false);
        let mut visited = [0; 3];
        for slot in &mut visited {
            pager.next();
            pager.settle();
            *slot = pager.current();
        }
        assert_eq!(visited, [1, 2, 2]);
        assert!(pager.is_next_disabled());
        assert!(!pager.is_prev_disabled());
    }

    #[test]
    fn clamped_prev_is_rejected_at_first_page() {
        let mut pager = Pager::new(4, false);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.state(), NavState::Idle(0));
        assert!(pager.is_prev_disabled());
    }

    #[test]
    fn looping_wraps_both_ways() {
        let mut pager = Pager::new(3, true);
        assert_eq!(
            pager.prev(),
            Some(Transition {
                from: 0,
                to: 2,
                wrap: Some(Wrap::Backward)
            })
        );
        pager.settle();
        assert_eq!(
            pager.next(),
            Some(Transition {
                from: 2,
                to: 0,
                wrap: Some(Wrap::Forward)
            })
        );
        assert!(!pager.is_prev_disabled());
        assert!(!pager.is_next_disabled());
    }

    #[test]
    fn single_page_never_moves() {
        for looping in [false, true] {
            let mut pager = Pager::new(1, looping);
            assert_eq!(pager.next(), None, "looping={looping}");
            assert_eq!(pager.prev(), None, "looping={looping}");
        }
        let mut empty = Pager::new(0, true);
        assert_eq!(empty.next(), None);
        assert_eq!(empty.prev(), None);
        assert_eq!(empty.go_to(0), None);

        let clamped_empty = Pager::new(0, false);
        assert!(clamped_empty.is_prev_disabled(), "empty pager");
        assert!(clamped_empty.is_next_disabled(), "empty pager");
    }

    #[test]
    fn go_to_jumps_directly_and_ignores_current() {
        let mut pager = Pager::new(6, true);
        assert_eq!(pager.go_to(0), None, "already there");
        let jump = pager.go_to(5).unwrap();
        assert_eq!(jump.wrap, None, "jumps never wrap");
        assert_eq!(pager.current(), 5, "index updates at acceptance");
        assert!(pager.is_animating());
        assert_eq!(pager.go_to(5), None);
        assert_eq!(pager.go_to(6), None, "out of range");
    }

    #[test]
    fn retarget_while_animating_starts_from_target() {
        let mut pager = Pager::new(4, false);
        pager.next();
        let second = pager.next().unwrap();
        assert_eq!((second.from, second.to), (1, 2));
        pager.settle();
        assert_eq!(pager.state(), NavState::Idle(2));
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut pager = Pager::new(4, false);
        pager.go_to(3);
        pager.reset(2, true);
        assert_eq!(pager.state(), NavState::Idle(0));
        assert_eq!(pager.pages(), 2);
        assert!(pager.looping());
    }
}
