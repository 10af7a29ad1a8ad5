// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seamless wrap-around without duplicated slides.
//!
//! Jumping from the last page straight to the first would slide the track
//! back across every page. Instead, for the duration of a wrap, the group of
//! slides being wrapped *to* is drawn one full lap away from its natural
//! slot:
//!
//! ```text
//!   forward wrap (last → first), 3 pages of 2 slides, lap = 6 slides
//!
//!   natural:   [0 1][2 3][4 5]
//!   primed:          [2 3][4 5][0 1]      ← slides 0,1 shifted +6
//!   track:                 ^─────^        ← animates page 2 → page 3
//!   retract:   [0 1][2 3][4 5]            ← track snaps to page 0 in the
//!              ^                            same frame; nothing moves visibly
//! ```
//!
//! A backward wrap mirrors this: the last group is shifted one lap back and
//! the track animates from page 0 to page −1, then resolves to the last page.
//!
//! [`LoopIllusion`] tracks which group is displaced. Priming the same wrap
//! twice is a no-op, and every prime is undone by exactly one
//! [`retract`](LoopIllusion::retract).

use core::ops::Range;

use crate::index::{Wrap, page_count};

/// Page arithmetic for a slide collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageGeometry {
    /// Number of slides.
    pub slides: usize,
    /// Slides per page (non-zero).
    pub per_page: usize,
}

impl PageGeometry {
    /// Creates the geometry for `slides` slides at `per_page` per page.
    #[must_use]
    pub const fn new(slides: usize, per_page: usize) -> Self {
        Self { slides, per_page }
    }

    /// Number of pages.
    #[must_use]
    pub const fn pages(&self) -> usize {
        page_count(self.slides, self.per_page)
    }

    /// Slides belonging to `page`. The last group may be short.
    #[must_use]
    pub fn group(&self, page: usize) -> Range<usize> {
        let start = (page * self.per_page).min(self.slides);
        let end = (start + self.per_page).min(self.slides);
        start..end
    }

    /// Length of one virtual lap, in slide slots: `per_page × pages`.
    #[must_use]
    pub const fn lap(&self) -> usize {
        self.per_page * self.pages()
    }

    /// Track offset (in pages) the motion for `wrap` heads to while the
    /// illusion is primed.
    #[must_use]
    pub fn seam_target(&self, wrap: Wrap) -> f64 {
        match wrap {
            Wrap::Forward => self.pages() as f64,
            Wrap::Backward => -1.0,
        }
    }
}

/// A displaced slide group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Phantom {
    /// Which wrap the displacement serves.
    pub wrap: Wrap,
    /// Displaced slides.
    pub slides: Range<usize>,
    /// Displacement in slide slots.
    pub shift: i64,
}

/// Tracks the wrap-around displacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopIllusion {
    primed: Option<Phantom>,
}

impl LoopIllusion {
    /// Creates an illusion with nothing displaced.
    #[must_use]
    pub const fn new() -> Self {
        Self { primed: None }
    }

    /// The current displacement, if any.
    #[must_use]
    pub const fn primed(&self) -> Option<&Phantom> {
        self.primed.as_ref()
    }

    /// Displaces the first group one lap ahead.
    ///
    /// Returns the new displacement, or `None` if it was already in place.
    pub fn prime_forward(&mut self, geometry: PageGeometry) -> Option<Phantom> {
        self.prime(geometry, Wrap::Forward)
    }

    /// Displaces the last group one lap behind.
    ///
    /// Returns the new displacement, or `None` if it was already in place.
    pub fn prime_backward(&mut self, geometry: PageGeometry) -> Option<Phantom> {
        self.prime(geometry, Wrap::Backward)
    }

    /// Primes for `wrap`.
    pub fn prime(&mut self, geometry: PageGeometry, wrap: Wrap) -> Option<Phantom> {
        let pages = geometry.pages();
        if pages == 0 {
            return None;
        }
        let lap = i64::try_from(geometry.lap()).unwrap_or(i64::MAX);
        let phantom = match wrap {
            Wrap::Forward => Phantom {
                wrap,
                slides: geometry.group(0),
                shift: lap,
            },
            Wrap::Backward => Phantom {
                wrap,
                slides: geometry.group(pages - 1),
                shift: -lap,
            },
        };
        if self.primed.as_ref() == Some(&phantom) {
            return None;
        }
        debug_assert!(
            self.primed.is_none(),
            "a different wrap is still primed; retract it first"
        );
        log::trace!(
            "illusion primed {:?}: slides {:?} shifted {}",
            phantom.wrap,
            phantom.slides,
            phantom.shift
        );
        self.primed = Some(phantom.clone());
        Some(phantom)
    }

    /// Restores natural placement.
    ///
    /// Returns the displacement that was undone, or `None` if nothing was
    /// primed.
    pub fn retract(&mut self) -> Option<Phantom> {
        let phantom = self.primed.take()?;
        log::trace!("illusion retracted {:?}", phantom.wrap);
        Some(phantom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cover_partial_last_page() {
        let geometry = PageGeometry::new(5, 2);
        assert_eq!(geometry.pages(), 3);
        assert_eq!(geometry.group(0), 0..2);
        assert_eq!(geometry.group(2), 4..5);
        assert_eq!(geometry.group(7), 5..5, "past the end is empty");
        assert_eq!(geometry.lap(), 6);
    }

    #[test]
    fn forward_prime_moves_first_group_one_lap_ahead() {
        let geometry = PageGeometry::new(6, 2);
        let mut illusion = LoopIllusion::new();
        let phantom = illusion.prime_forward(geometry).unwrap();
        assert_eq!(phantom.slides, 0..2);
        assert_eq!(phantom.shift, 6);
        assert!((geometry.seam_target(Wrap::Forward) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn backward_prime_moves_last_group_one_lap_behind() {
        let geometry = PageGeometry::new(5, 2);
        let mut illusion = LoopIllusion::new();
        let phantom = illusion.prime_backward(geometry).unwrap();
        assert_eq!(phantom.slides, 4..5);
        assert_eq!(phantom.shift, -6);
        assert!((geometry.seam_target(Wrap::Backward) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn priming_and_retracting_are_idempotent_and_paired() {
        let geometry = PageGeometry::new(4, 1);
        let mut illusion = LoopIllusion::new();
        assert!(illusion.prime_forward(geometry).is_some());
        assert!(illusion.prime_forward(geometry).is_none(), "already primed");
        assert!(illusion.retract().is_some());
        assert!(illusion.retract().is_none(), "only one retract per prime");
        assert!(illusion.primed().is_none());
    }

    #[test]
    fn empty_collection_never_primes() {
        let mut illusion = LoopIllusion::new();
        assert!(illusion.prime_backward(PageGeometry::new(0, 3)).is_none());
    }
}
