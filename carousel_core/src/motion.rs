// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based track interpolation.
//!
//! [`MotionClock`] animates a scalar offset (the track position, in pages)
//! from a start value to a target value over a fixed duration, eased with
//! [`ease_out_quint`]. It is an explicit state machine rather than a
//! self-rescheduling callback:
//!
//! ```text
//!            start()                     sample() at/after duration
//!   Idle ──────────────► Running ─────────────────────────────► Idle
//!     ▲                     │                                   (done sample)
//!     └──── cancel() ───────┘  (returns Settled with last offset)
//! ```
//!
//! The clock does not own a timer. The environment delivers frame ticks and
//! the owner calls [`sample`](MotionClock::sample) with each tick's time. The
//! first sample of a motion fixes its time origin, so a motion started
//! between frames always begins from zero elapsed time.
//!
//! Every [`start`](MotionClock::start) hands out a fresh [`MotionId`].
//! Samples and settlements carry the id of the motion they belong to, so the
//! owner can tell a superseded motion's completion from the current one.

use crate::time::{Duration, HostTime};

/// Quintic ease-out: `1 - (1 - t)^5`.
///
/// `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quint(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    let sq = inv * inv;
    1.0 - sq * sq * inv
}

/// Linear interpolation between `from` and `to` by an eased factor.
#[inline]
#[must_use]
fn mix(from: f64, to: f64, eased: f64) -> f64 {
    to * eased + from * (1.0 - eased)
}

/// Generation tag of one started motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MotionId(pub u64);

/// One interpolated frame of a running motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    /// Motion this sample belongs to.
    pub id: MotionId,
    /// Interpolated offset for this frame.
    pub offset: f64,
    /// Linear progress in `[0, 1]`, before easing.
    pub progress: f64,
    /// `true` on the final sample; the clock is idle afterwards.
    pub done: bool,
}

/// How a motion came to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settled {
    /// Motion that settled.
    pub id: MotionId,
    /// Resting offset: the target when completed, otherwise the last
    /// computed offset.
    pub offset: f64,
    /// `true` if the motion ran its full duration, `false` if cancelled.
    pub completed: bool,
}

/// Result of [`MotionClock::start`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct Started {
    /// Id of the motion just started.
    pub id: MotionId,
    /// The motion that was still running and got cancelled, if any.
    pub superseded: Option<Settled>,
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    id: MotionId,
    from: f64,
    to: f64,
    duration: Duration,
    origin: Option<HostTime>,
}

/// A cancellable eased interpolation driven by frame ticks.
#[derive(Clone, Debug, Default)]
pub struct MotionClock {
    running: Option<Motion>,
    generation: u64,
    last_offset: f64,
}

impl MotionClock {
    /// Creates an idle clock resting at offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a motion is in flight.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Id of the motion in flight, if any.
    #[must_use]
    pub fn current(&self) -> Option<MotionId> {
        self.running.map(|m| m.id)
    }

    /// Offset reported by the most recent sample (or start/cancel).
    #[must_use]
    pub const fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Target of the motion in flight, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.running.map(|m| m.to)
    }

    /// Starts a motion from `from` to `to` over `duration`.
    ///
    /// A motion already in flight is cancelled first and its settlement is
    /// returned in [`Started::superseded`] so the owner can run its
    /// completion path before the new motion's first frame.
    pub fn start(&mut self, from: f64, to: f64, duration: Duration) -> Started {
        let superseded = self.cancel();
        self.generation += 1;
        let id = MotionId(self.generation);
        self.running = Some(Motion {
            id,
            from,
            to,
            duration,
            origin: None,
        });
        self.last_offset = from;
        log::trace!("motion {} start {from:.3} -> {to:.3} over {duration:?}", id.0);
        Started { id, superseded }
    }

    /// Samples the running motion at `now`.
    ///
    /// Returns `None` when idle. The sample that reaches the full duration is
    /// flagged [`done`](MotionSample::done), reports exactly the target and
    /// leaves the clock idle.
    pub fn sample(&mut self, now: HostTime) -> Option<MotionSample> {
        let motion = self.running.as_mut()?;
        let origin = *motion.origin.get_or_insert(now);
        let elapsed = now.saturating_duration_since(origin);
        let done = elapsed >= motion.duration;
        let progress = elapsed.fraction_of(motion.duration);
        let offset = if done {
            motion.to
        } else {
            mix(motion.from, motion.to, ease_out_quint(progress))
        };
        let id = motion.id;
        self.last_offset = offset;
        if done {
            self.running = None;
        }
        Some(MotionSample {
            id,
            offset,
            progress,
            done,
        })
    }

    /// Stops the running motion.
    ///
    /// The settlement uses the last computed offset as the resting position,
    /// so a following [`start`](Self::start) continues from where the track
    /// visually was.
    pub fn cancel(&mut self) -> Option<Settled> {
        let motion = self.running.take()?;
        log::trace!("motion {} cancelled at {:.3}", motion.id.0, self.last_offset);
        Some(Settled {
            id: motion.id,
            offset: self.last_offset,
            completed: false,
        })
    }

    /// Stops the running motion without a settlement and parks the clock at
    /// `offset`.
    pub fn reset(&mut self, offset: f64) {
        self.running = None;
        self.last_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_endpoints_and_shape() {
        assert!(approx(ease_out_quint(0.0), 0.0));
        assert!(approx(ease_out_quint(1.0), 1.0));
        assert!(approx(ease_out_quint(0.5), 1.0 - 0.5_f64 * 0.5 * 0.5 * 0.5 * 0.5));
        assert!(ease_out_quint(0.2) > 0.2, "ease-out runs ahead of linear");
        assert!(approx(ease_out_quint(-1.0), 0.0));
        assert!(approx(ease_out_quint(3.0), 1.0));
    }

    #[test]
    fn first_sample_fixes_origin() {
        let mut clock = MotionClock::new();
        let started = clock.start(0.0, 1.0, Duration::from_millis(100));
        assert_eq!(started.superseded, None);

        let first = clock.sample(HostTime(5_000 * MS)).unwrap();
        assert!(approx(first.offset, 0.0), "zero elapsed at first frame");
        assert!(!first.done);

        let mid = clock.sample(HostTime(5_050 * MS)).unwrap();
        assert!(approx(mid.progress, 0.5));
        assert!(approx(mid.offset, ease_out_quint(0.5)));
    }

    #[test]
    fn completes_exactly_once_on_target() {
        let mut clock = MotionClock::new();
        let started = clock.start(2.0, 3.0, Duration::from_millis(100));
        clock.sample(HostTime(0));
        let last = clock.sample(HostTime(150 * MS)).unwrap();
        assert!(last.done);
        assert_eq!(last.id, started.id);
        assert!(approx(last.offset, 3.0));
        assert!(!clock.is_running());
        assert_eq!(clock.sample(HostTime(200 * MS)), None, "no frames after done");
        assert_eq!(clock.cancel(), None, "nothing left to cancel");
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut clock = MotionClock::new();
        let _ = clock.start(0.0, 4.0, Duration::ZERO);
        let only = clock.sample(HostTime(42)).unwrap();
        assert!(only.done);
        assert!(approx(only.offset, 4.0));
    }

    #[test]
    fn cancel_resolves_at_last_offset_and_restart_continues() {
        let mut clock = MotionClock::new();
        let first = clock.start(0.0, 1.0, Duration::from_millis(200));
        clock.sample(HostTime(0));
        let mid = clock.sample(HostTime(60 * MS)).unwrap();

        let second = clock.start(clock.last_offset(), 2.0, Duration::from_millis(200));
        let superseded = second.superseded.unwrap();
        assert_eq!(superseded.id, first.id);
        assert!(!superseded.completed);
        assert!(approx(superseded.offset, mid.offset));
        assert_ne!(second.id, first.id);

        let next = clock.sample(HostTime(61 * MS)).unwrap();
        assert!(
            approx(next.offset, mid.offset),
            "restart begins where the cancelled motion was"
        );
    }

    #[test]
    fn reset_drops_motion_without_settlement() {
        let mut clock = MotionClock::new();
        let _ = clock.start(1.0, 2.0, Duration::from_millis(100));
        clock.reset(0.0);
        assert!(!clock.is_running());
        assert!(approx(clock.last_offset(), 0.0));
        assert_eq!(clock.cancel(), None);
    }

    #[test]
    fn out_of_order_tick_counts_as_zero_elapsed() {
        let mut clock = MotionClock::new();
        let _ = clock.start(0.0, 1.0, Duration::from_millis(100));
        clock.sample(HostTime(1_000 * MS));
        let early = clock.sample(HostTime(900 * MS)).unwrap();
        assert!(approx(early.offset, 0.0));
    }
}
