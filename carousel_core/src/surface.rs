// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual surface contract.
//!
//! The carousel never touches rendering primitives. It accumulates
//! declarative [`SurfaceChanges`] (grid layout, track offset, per-slide
//! placement) and the host hands them to a [`VisualSurface`] implementation
//! (e.g. a DOM surface in a backend crate, or a recording double in tests).
//!
//! # Coordinates
//!
//! The track offset is measured in *pages*: offset `2.0` means the viewport
//! starts at the first slide of page 2. A surface converts pages to pixels as
//! `offset × (viewport width + spacing)`, since every page spans
//! `slides_per_page` slides and the same number of gaps.
//!
//! Slide placements are measured in whole *slides* relative to the slide's
//! natural grid slot: `Shifted { slides: 6 }` draws the slide six slots (and
//! six gaps) further along the track.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tick: FrameTick) {
//!     carousel.frame(&tick);
//!     let changes = carousel.take_changes();
//!     if !changes.is_empty() {
//!         surface.apply(&changes);
//!     }
//!     for event in carousel.drain_events() {
//!         hooks.dispatch(event);
//!     }
//! }
//! ```

use alloc::vec::Vec;

use crate::options::Options;
use crate::time::Duration;

/// Grid sizing for the track and its slides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Slides visible per page.
    pub slides_per_page: u32,
    /// Gap between adjacent slides, in pixels.
    pub spacing: f64,
    /// Duration of one page transition.
    pub transition: Duration,
}

impl GridLayout {
    /// Derives the layout from effective options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            slides_per_page: options.slides_per_page,
            spacing: options.spacing,
            transition: options.transition_speed,
        }
    }

    /// Fraction of the viewport width taken by one slide, ignoring gaps.
    #[must_use]
    pub fn slide_fraction(&self) -> f64 {
        1.0 / f64::from(self.slides_per_page.max(1))
    }

    /// Pixels each slide gives up so that `slides_per_page` slides and the
    /// gaps between them exactly fill the viewport.
    #[must_use]
    pub fn gap_share(&self) -> f64 {
        let per_page = f64::from(self.slides_per_page.max(1));
        self.spacing * (per_page - 1.0) / per_page
    }
}

/// Where a slide is drawn relative to its natural grid slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The slot the grid assigns to the slide.
    #[default]
    Natural,
    /// Displaced by a whole number of slide slots (negative is backwards).
    Shifted {
        /// Slide slots to move by.
        slides: i64,
    },
}

/// Incremental visual updates accumulated since the last
/// [`take_changes`](crate::carousel::Carousel::take_changes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceChanges {
    /// New grid layout, after a build.
    pub layout: Option<GridLayout>,
    /// When set, all slides return to [`Placement::Natural`] before
    /// `placements` are applied.
    pub reset_placements: bool,
    /// Per-slide placement changes, in the order they were made.
    pub placements: Vec<(usize, Placement)>,
    /// Latest track offset, in pages.
    pub track_offset: Option<f64>,
}

impl SurfaceChanges {
    /// Returns `true` if there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
            && !self.reset_placements
            && self.placements.is_empty()
            && self.track_offset.is_none()
    }

    /// Records a full rebuild: new layout, natural placements, track at
    /// `offset`. Earlier pending placement changes are dropped.
    pub(crate) fn rebuild(&mut self, layout: GridLayout, offset: f64) {
        self.layout = Some(layout);
        self.reset_placements = true;
        self.placements.clear();
        self.track_offset = Some(offset);
    }

    pub(crate) fn place(&mut self, slides: core::ops::Range<usize>, placement: Placement) {
        self.placements
            .extend(slides.map(|slide| (slide, placement)));
    }
}

/// Applies carousel visual intents to a concrete rendering tree.
pub trait VisualSurface {
    /// Applies `changes` in field order: layout, placement reset, per-slide
    /// placements, track offset.
    fn apply(&mut self, changes: &SurfaceChanges);
}
