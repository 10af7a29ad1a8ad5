// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic drivers and continuity grading for carousel tests.
//!
//! - [`ManualFrames`]: a tick source with a fixed cadence.
//! - [`RecordingSurface`]: a [`VisualSurface`] that remembers what it was
//!   told.
//! - [`Driver`]: owns a [`Carousel`], pumps its outboxes after every command
//!   and frame, and runs motions to completion.
//! - [`MotionReport`]: largest per-frame step and direction changes over a
//!   recorded run, with a [`ContinuityGrade`].

use std::collections::BTreeMap;

use carousel_core::carousel::Carousel;
use carousel_core::lifecycle::{AutoplayCommand, LifecycleEvent};
use carousel_core::surface::{GridLayout, Placement, SurfaceChanges, VisualSurface};
use carousel_core::time::{Duration, HostTime};
use carousel_core::timing::FrameTick;

/// Steps smaller than this count as standing still.
const STILL: f64 = 1e-9;

/// Frames a single [`Driver::settle`] may run before giving up.
const MAX_FRAMES: u32 = 10_000;

/// A manual tick source with a fixed frame cadence.
#[derive(Clone, Copy, Debug)]
pub struct ManualFrames {
    now: HostTime,
    cadence: Duration,
    frame_index: u64,
}

impl ManualFrames {
    /// Creates a source whose first tick fires at `start`.
    #[must_use]
    pub const fn new(start: HostTime, cadence: Duration) -> Self {
        Self {
            now: start,
            cadence,
            frame_index: 0,
        }
    }

    /// A 60 Hz source starting at time zero.
    #[must_use]
    pub const fn at_60hz() -> Self {
        Self::new(HostTime(0), Duration(16_667))
    }

    /// Time of the next tick.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Returns the next tick and moves the clock one cadence forward.
    pub fn tick(&mut self) -> FrameTick {
        let tick = FrameTick::new(self.now, self.frame_index);
        self.frame_index += 1;
        self.now = HostTime(self.now.ticks().saturating_add(self.cadence.ticks()));
        tick
    }

    /// Skips `gap` without producing a tick, as when the page is hidden.
    pub fn stall(&mut self, gap: Duration) {
        self.now = HostTime(self.now.ticks().saturating_add(gap.ticks()));
    }
}

/// A [`VisualSurface`] that records the state it was driven into.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    layout: Option<GridLayout>,
    shifted: BTreeMap<usize, i64>,
    offset: f64,
    offsets: Vec<f64>,
    batches: usize,
    layouts: usize,
}

impl RecordingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last applied layout.
    #[must_use]
    pub const fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    /// Current track offset, in pages.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Every track offset applied so far, in order.
    #[must_use]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Current placement of `slide`.
    #[must_use]
    pub fn placement(&self, slide: usize) -> Placement {
        self.shifted
            .get(&slide)
            .map_or(Placement::Natural, |&slides| Placement::Shifted { slides })
    }

    /// Slides currently out of their natural slot, as `(slide, shift)`.
    #[must_use]
    pub fn displaced(&self) -> Vec<(usize, i64)> {
        self.shifted.iter().map(|(&slide, &shift)| (slide, shift)).collect()
    }

    /// Number of non-empty change batches applied.
    #[must_use]
    pub const fn batches(&self) -> usize {
        self.batches
    }

    /// Number of layouts applied (one per build).
    #[must_use]
    pub const fn layouts(&self) -> usize {
        self.layouts
    }

    /// Forgets the recorded offset history.
    pub fn clear_history(&mut self) {
        self.offsets.clear();
    }
}

impl VisualSurface for RecordingSurface {
    fn apply(&mut self, changes: &SurfaceChanges) {
        if changes.is_empty() {
            return;
        }
        self.batches += 1;
        if let Some(layout) = changes.layout {
            self.layout = Some(layout);
            self.layouts += 1;
        }
        if changes.reset_placements {
            self.shifted.clear();
        }
        for &(slide, placement) in &changes.placements {
            match placement {
                Placement::Natural => {
                    self.shifted.remove(&slide);
                }
                Placement::Shifted { slides } => {
                    self.shifted.insert(slide, slides);
                }
            }
        }
        if let Some(offset) = changes.track_offset {
            self.offset = offset;
            self.offsets.push(offset);
        }
    }
}

/// How smoothly a run of offsets moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContinuityGrade {
    /// One direction, no step above the limit.
    Smooth,
    /// One direction, but at least one step above the limit.
    Stepped,
    /// The direction reversed.
    Reversed,
}

impl ContinuityGrade {
    /// Returns a short label for test output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Stepped => "stepped",
            Self::Reversed => "reversed",
        }
    }
}

/// Continuity summary of a run of track offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionReport {
    /// Number of offsets observed.
    pub frames: usize,
    /// Largest absolute step between consecutive offsets, in pages.
    pub max_step: f64,
    /// Number of times the direction of travel flipped.
    pub reversals: usize,
    /// Signed distance travelled, in pages.
    pub travel: f64,
}

impl MotionReport {
    /// Summarizes `offsets`.
    ///
    /// With `lap` set, offsets are positions on a loop of that many pages:
    /// `x` and `x + lap` are the same picture, and each step takes the short
    /// way round. This is how a looping carousel's track must be read while
    /// a wrap phantom stands in for the far end.
    #[must_use]
    pub fn from_offsets(offsets: &[f64], lap: Option<f64>) -> Self {
        let mut max_step = 0.0_f64;
        let mut reversals = 0;
        let mut travel = 0.0;
        let mut heading = 0.0_f64;
        for pair in offsets.windows(2) {
            let step = match lap {
                Some(lap) if lap > 0.0 => circular_step(pair[0], pair[1], lap),
                _ => pair[1] - pair[0],
            };
            travel += step;
            max_step = max_step.max(step.abs());
            if step.abs() < STILL {
                continue;
            }
            if heading != 0.0 && step.signum() != heading {
                reversals += 1;
            }
            heading = step.signum();
        }
        Self {
            frames: offsets.len(),
            max_step,
            reversals,
            travel,
        }
    }

    /// Grades the run against a per-frame step limit.
    #[must_use]
    pub fn grade(&self, step_limit: f64) -> ContinuityGrade {
        if self.reversals > 0 {
            ContinuityGrade::Reversed
        } else if self.max_step > step_limit {
            ContinuityGrade::Stepped
        } else {
            ContinuityGrade::Smooth
        }
    }
}

fn circular_step(from: f64, to: f64, lap: f64) -> f64 {
    let raw = (to - from).rem_euclid(lap);
    if raw > lap / 2.0 { raw - lap } else { raw }
}

/// Owns a carousel and plays the host's part deterministically.
///
/// After every command and frame the driver applies surface changes to its
/// [`RecordingSurface`] and collects lifecycle events and autoplay
/// instructions, in that order.
#[derive(Debug)]
pub struct Driver {
    carousel: Carousel,
    frames: ManualFrames,
    surface: RecordingSurface,
    events: Vec<LifecycleEvent>,
    autoplay: Vec<AutoplayCommand>,
}

impl Driver {
    /// Wraps `carousel` and flushes its construction outboxes.
    #[must_use]
    pub fn new(carousel: Carousel, frames: ManualFrames) -> Self {
        let mut driver = Self {
            carousel,
            frames,
            surface: RecordingSurface::new(),
            events: Vec::new(),
            autoplay: Vec::new(),
        };
        driver.flush();
        driver
    }

    /// The driven carousel.
    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// The recording surface.
    #[must_use]
    pub const fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// The tick source.
    #[must_use]
    pub const fn frames(&self) -> &ManualFrames {
        &self.frames
    }

    /// Lifecycle events collected so far.
    #[must_use]
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Takes the lifecycle events collected so far.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        core::mem::take(&mut self.events)
    }

    /// Autoplay instructions collected so far, in issue order.
    #[must_use]
    pub fn autoplay(&self) -> &[AutoplayCommand] {
        &self.autoplay
    }

    /// Runs `command` against the carousel and flushes its outboxes.
    pub fn command<R>(&mut self, command: impl FnOnce(&mut Carousel) -> R) -> R {
        let result = command(&mut self.carousel);
        self.flush();
        result
    }

    /// Forgets the surface's offset history.
    pub fn clear_history(&mut self) {
        self.surface.clear_history();
    }

    /// Delivers one frame. Returns `true` while the track is still moving.
    pub fn step(&mut self) -> bool {
        let tick = self.frames.tick();
        let moving = self.carousel.frame(&tick);
        self.flush();
        moving
    }

    /// Lets `gap` pass without a frame.
    pub fn stall(&mut self, gap: Duration) {
        self.frames.stall(gap);
    }

    /// Delivers `count` frames, stopping early once the track rests.
    pub fn step_n(&mut self, count: u32) {
        for _ in 0..count {
            if !self.step() {
                break;
            }
        }
    }

    /// Delivers frames until the track rests and reports the offsets it
    /// went through, including the one it rested at.
    ///
    /// # Panics
    ///
    /// Panics if the motion has not settled after a very large number of
    /// frames.
    pub fn settle(&mut self) -> MotionReport {
        let mut offsets = vec![self.carousel.track_offset()];
        let mut frames = 0;
        while self.carousel.is_animating() {
            self.step();
            offsets.push(self.surface.offset());
            frames += 1;
            assert!(frames < MAX_FRAMES, "motion never settled");
        }
        let lap = self.carousel.options().looping.then(|| self.lap());
        MotionReport::from_offsets(&offsets, lap)
    }

    fn lap(&self) -> f64 {
        self.carousel.page_count() as f64
    }

    fn flush(&mut self) {
        let changes = self.carousel.take_changes();
        self.surface.apply(&changes);
        self.events.extend(self.carousel.drain_events());
        if let Some(command) = self.carousel.take_autoplay() {
            self.autoplay.push(command);
        }
    }
}
