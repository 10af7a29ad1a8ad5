// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle events and autoplay commands emitted by the carousel.
//!
//! The carousel decides *when* a hook fires; the host decides how. Events are
//! queued during a command and drained afterwards with
//! [`Carousel::drain_events`](crate::carousel::Carousel::drain_events), so a
//! hook can safely issue new commands without re-entering the one that
//! produced it.

use crate::time::Duration;

/// A named point in the carousel's life that hosts may hook into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The carousel finished its first build.
    Created,
    /// Layout and paging were (re)computed and the index reset to 0.
    Built,
    /// A viewport resize was processed, whether or not it rebuilt.
    Resized,
    /// A navigation was accepted.
    Moved {
        /// Page the carousel was on.
        from: usize,
        /// Page the carousel is moving to.
        to: usize,
    },
}

impl LifecycleEvent {
    /// Hook name, as used by host-side registries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Built => "built",
            Self::Resized => "resized",
            Self::Moved { .. } => "moved",
        }
    }
}

/// Instruction for the host's autoplay timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoplayCommand {
    /// (Re)start a repeating timer that calls `next()` every interval.
    Restart(Duration),
    /// Stop any pending timer.
    Clear,
}

/// Why a build happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildReason {
    /// Initial construction.
    Init,
    /// The selected breakpoint changed.
    Breakpoint,
    /// The slide collection was replaced.
    Slides,
}
