// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel engine.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine's instrumentation calls at each decision point. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Commands run without a sink in hand, so the carousel buffers
//! [`TraceEvent`]s in a [`TraceBuffer`] and the host flushes them with
//! [`Carousel::drain_trace`](crate::carousel::Carousel::drain_trace). Without
//! the `trace` feature the buffer stores nothing.
//!
//! # Crate features
//!
//! - `trace`: enables buffering and the `Tracer` method bodies.

#[cfg(feature = "trace")]
use alloc::vec::Vec;

use crate::index::Wrap;
use crate::lifecycle::BuildReason;
use crate::motion::MotionId;
use crate::options::BreakpointId;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which public command was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `next()`, including autoplay advances and left swipes.
    Next,
    /// `prev()`, including right swipes.
    Prev,
    /// `go_to(page)`.
    GoTo(usize),
}

/// Whether the wrap displacement was applied or undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IllusionAction {
    /// Slides were displaced one lap.
    Primed,
    /// Slides returned to their natural slots.
    Retracted,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for every navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEvent {
    /// The command.
    pub command: CommandKind,
    /// Page before the command.
    pub from: usize,
    /// Page after the command; `None` if it was rejected.
    pub to: Option<usize>,
}

/// Emitted when a track motion starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStartEvent {
    /// Generation of the motion.
    pub id: MotionId,
    /// Starting offset, in pages.
    pub from_offset: f64,
    /// Target offset, in pages (may lie past the seam during a wrap).
    pub to_offset: f64,
    /// Configured transition duration.
    pub duration: Duration,
}

/// Emitted when a track motion comes to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettleEvent {
    /// Generation of the motion.
    pub id: MotionId,
    /// Resting offset after seam normalisation, in pages.
    pub offset: f64,
    /// `false` if the motion was cancelled.
    pub completed: bool,
    /// Host time of the frame that finished it; `None` when cancelled.
    pub at: Option<HostTime>,
}

/// Emitted when the wrap displacement changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllusionEvent {
    /// Prime or retract.
    pub action: IllusionAction,
    /// Wrap being served.
    pub wrap: Wrap,
    /// First displaced slide.
    pub first_slide: usize,
    /// One past the last displaced slide.
    pub end_slide: usize,
    /// Displacement in slide slots.
    pub shift: i64,
}

/// Emitted after every build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildEvent {
    /// What triggered it.
    pub reason: BuildReason,
    /// Slide count.
    pub slides: usize,
    /// Page count.
    pub pages: usize,
    /// Effective slides per page.
    pub slides_per_page: u32,
    /// Selected breakpoint.
    pub breakpoint: BreakpointId,
}

/// Any buffered trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceEvent {
    /// A [`CommandEvent`].
    Command(CommandEvent),
    /// A [`MotionStartEvent`].
    MotionStart(MotionStartEvent),
    /// A [`MotionSettleEvent`].
    MotionSettle(MotionSettleEvent),
    /// An [`IllusionEvent`].
    Illusion(IllusionEvent),
    /// A [`BuildEvent`].
    Build(BuildEvent),
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the carousel engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every navigation command, accepted or not.
    fn on_command(&mut self, e: &CommandEvent) {
        _ = e;
    }

    /// Called when a track motion starts.
    fn on_motion_start(&mut self, e: &MotionStartEvent) {
        _ = e;
    }

    /// Called when a track motion completes or is cancelled.
    fn on_motion_settle(&mut self, e: &MotionSettleEvent) {
        _ = e;
    }

    /// Called when the wrap displacement is primed or retracted.
    fn on_illusion(&mut self, e: &IllusionEvent) {
        _ = e;
    }

    /// Called after every build.
    fn on_build(&mut self, e: &BuildEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Dispatches a buffered event to the matching sink method.
    #[inline]
    pub fn event(&mut self, e: &TraceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            match e {
                TraceEvent::Command(e) => s.on_command(e),
                TraceEvent::MotionStart(e) => s.on_motion_start(e),
                TraceEvent::MotionSettle(e) => s.on_motion_settle(e),
                TraceEvent::Illusion(e) => s.on_illusion(e),
                TraceEvent::Build(e) => s.on_build(e),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// TraceBuffer
// ---------------------------------------------------------------------------

/// Events recorded between flushes.
///
/// Stores nothing unless the `trace` feature is enabled.
#[derive(Clone, Debug, Default)]
pub struct TraceBuffer {
    #[cfg(feature = "trace")]
    events: Vec<TraceEvent>,
}

impl TraceBuffer {
    /// Records an event.
    #[inline]
    pub fn push(&mut self, e: TraceEvent) {
        #[cfg(feature = "trace")]
        self.events.push(e);
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        #[cfg(feature = "trace")]
        {
            self.events.len()
        }
        #[cfg(not(feature = "trace"))]
        {
            0
        }
    }

    /// Returns `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches every buffered event, oldest first, and empties the buffer.
    pub fn flush(&mut self, tracer: &mut Tracer<'_>) {
        #[cfg(feature = "trace")]
        for e in self.events.drain(..) {
            tracer.event(&e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = tracer;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> CommandEvent {
        CommandEvent {
            command: CommandKind::Next,
            from: 2,
            to: Some(0),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_command(&sample_command());
        sink.on_build(&BuildEvent {
            reason: BuildReason::Init,
            slides: 5,
            pages: 3,
            slides_per_page: 2,
            breakpoint: None,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.event(&TraceEvent::Command(sample_command()));
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn buffer_is_inert_without_feature() {
        let mut buffer = TraceBuffer::default();
        buffer.push(TraceEvent::Command(sample_command()));
        assert!(buffer.is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn buffer_flushes_in_order() {
        struct RecordingSink {
            commands: Vec<CommandKind>,
            builds: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_command(&mut self, e: &CommandEvent) {
                self.commands.push(e.command);
            }
            fn on_build(&mut self, _: &BuildEvent) {
                self.builds += 1;
            }
        }

        let mut buffer = TraceBuffer::default();
        buffer.push(TraceEvent::Command(sample_command()));
        buffer.push(TraceEvent::Command(CommandEvent {
            command: CommandKind::GoTo(1),
            from: 0,
            to: Some(1),
        }));
        assert_eq!(buffer.len(), 2);

        let mut sink = RecordingSink {
            commands: Vec::new(),
            builds: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        buffer.flush(&mut tracer);
        drop(tracer);
        assert!(buffer.is_empty());
        assert_eq!(sink.commands, &[CommandKind::Next, CommandKind::GoTo(1)]);
        assert_eq!(sink.builds, 0);
    }
}
