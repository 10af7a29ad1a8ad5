// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it sees,
//! stamped with the host time the caller last reported through
//! [`set_now`](RecorderSink::set_now). Carousel commands carry no time of
//! their own, so the stamp is whatever the host knew when it flushed the
//! trace buffer.

use carousel_core::time::HostTime;
use carousel_core::trace::{
    BuildEvent, CommandEvent, CommandKind, IllusionEvent, MotionSettleEvent, MotionStartEvent,
    TraceEvent, TraceSink,
};

/// One recorded event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recorded {
    /// Host time at which the event was flushed.
    pub at: HostTime,
    /// The event.
    pub event: TraceEvent,
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    now: HostTime,
    events: Vec<Recorded>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stamp applied to subsequent events.
    pub fn set_now(&mut self, now: HostTime) {
        self.now = now;
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Recorded] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Recorded> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Accepted commands, in order, as `(command, from, to)`.
    pub fn accepted(&self) -> impl Iterator<Item = (CommandKind, usize, usize)> + '_ {
        self.events.iter().filter_map(|r| match r.event {
            TraceEvent::Command(CommandEvent {
                command,
                from,
                to: Some(to),
            }) => Some((command, from, to)),
            _ => None,
        })
    }

    fn push(&mut self, event: TraceEvent) {
        self.events.push(Recorded {
            at: self.now,
            event,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_command(&mut self, e: &CommandEvent) {
        self.push(TraceEvent::Command(*e));
    }

    fn on_motion_start(&mut self, e: &MotionStartEvent) {
        self.push(TraceEvent::MotionStart(*e));
    }

    fn on_motion_settle(&mut self, e: &MotionSettleEvent) {
        // Completed motions know exactly when they ended.
        let at = e.at.unwrap_or(self.now);
        self.events.push(Recorded {
            at,
            event: TraceEvent::MotionSettle(*e),
        });
    }

    fn on_illusion(&mut self, e: &IllusionEvent) {
        self.push(TraceEvent::Illusion(*e));
    }

    fn on_build(&mut self, e: &BuildEvent) {
        self.push(TraceEvent::Build(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::motion::MotionId;
    use carousel_core::time::Duration;

    #[test]
    fn events_are_stamped_with_latest_time() {
        let mut rec = RecorderSink::new();
        rec.set_now(HostTime(5_000));
        rec.on_command(&CommandEvent {
            command: CommandKind::Next,
            from: 0,
            to: Some(1),
        });
        rec.on_motion_start(&MotionStartEvent {
            id: MotionId(1),
            from_offset: 0.0,
            to_offset: 1.0,
            duration: Duration::from_millis(650),
        });
        rec.set_now(HostTime(9_000));
        rec.on_motion_settle(&MotionSettleEvent {
            id: MotionId(1),
            offset: 1.0,
            completed: true,
            at: Some(HostTime(8_000)),
        });

        assert_eq!(rec.len(), 3);
        assert_eq!(rec.events()[0].at, HostTime(5_000));
        assert_eq!(rec.events()[2].at, HostTime(8_000), "settle carries its own time");
    }

    #[test]
    fn accepted_skips_rejections() {
        let mut rec = RecorderSink::new();
        rec.on_command(&CommandEvent {
            command: CommandKind::Prev,
            from: 0,
            to: None,
        });
        rec.on_command(&CommandEvent {
            command: CommandKind::GoTo(3),
            from: 0,
            to: Some(3),
        });
        let accepted: Vec<_> = rec.accepted().collect();
        assert_eq!(accepted, [(CommandKind::GoTo(3), 0, 3)]);

        rec.clear();
        assert!(rec.is_empty());
    }
}
