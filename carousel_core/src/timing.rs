// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks delivered by the environment.
//!
//! The carousel never schedules frames itself. A backend tick source (e.g.
//! `requestAnimationFrame`, or a manual source in tests) produces a
//! [`FrameTick`] for every frame opportunity and hands it to
//! [`Carousel::frame`](crate::carousel::Carousel::frame). Between ticks all
//! carousel state is quiescent.
//!
//! Ticks for a given motion must arrive with non-decreasing `now`; a tick
//! whose `now` precedes the motion's first sampled frame is treated as zero
//! elapsed time.

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time at which the frame callback fired.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for the given time and frame counter.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}
