// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe classification.
//!
//! [`classify`] turns a start/end pointer pair into a [`SwipeDirection`].
//! A swipe is recognised along one axis when the travel along that axis
//! reaches `threshold` while the perpendicular travel stays within
//! `restraint`. Gestures that qualify on both axes, or on neither, are not
//! swipes.
//!
//! Only coarse (touch) pointers swipe. Mouse drags are never classified, so
//! text selection and drag-and-drop inside slides keep working.
//!
//! [`GestureSession`] holds the start point of the interaction in progress
//! and drops it when the interaction ends.

use kurbo::Point;

/// Default minimum travel, in pixels, along the swipe axis.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 150.0;

/// Default maximum travel, in pixels, perpendicular to the swipe axis.
pub const DEFAULT_SWIPE_RESTRAINT: f64 = 100.0;

/// Distance limits for swipe recognition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeThresholds {
    /// Minimum travel along the swipe axis.
    pub threshold: f64,
    /// Maximum travel allowed on the perpendicular axis.
    pub restraint: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
            restraint: DEFAULT_SWIPE_RESTRAINT,
        }
    }
}

/// The kind of pointer that produced an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Touch screens and other imprecise pointers (`pointer: coarse`).
    Coarse,
    /// Mice, trackpads and pens (`pointer: fine`).
    Fine,
}

/// A recognised swipe direction.
///
/// Directions name the way the finger travelled: a `Left` swipe drags the
/// track left and reveals the next page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Finger travelled towards negative x.
    Left,
    /// Finger travelled towards positive x.
    Right,
    /// Finger travelled towards negative y.
    Up,
    /// Finger travelled towards positive y.
    Down,
}

impl SwipeDirection {
    /// Returns `true` for `Left` and `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Maps the swipe to a navigation step.
    ///
    /// Vertical swipes never navigate so page scrolling is left alone.
    #[must_use]
    pub const fn navigation(self) -> Option<Step> {
        match self {
            Self::Left => Some(Step::Next),
            Self::Right => Some(Step::Prev),
            Self::Up | Self::Down => None,
        }
    }
}

/// A single-page navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Advance one page.
    Next,
    /// Retreat one page.
    Prev,
}

/// Classifies the gesture from `start` to `end`.
///
/// Returns `None` when neither axis qualifies or when both do.
#[must_use]
pub fn classify(start: Point, end: Point, limits: SwipeThresholds) -> Option<SwipeDirection> {
    let dist = end - start;
    let (ax, ay) = (dist.x.abs(), dist.y.abs());

    let horizontal = ax >= limits.threshold && ay <= limits.restraint;
    let vertical = ay >= limits.threshold && ax <= limits.restraint;

    match (horizontal, vertical) {
        (true, false) if dist.x < 0.0 => Some(SwipeDirection::Left),
        (true, false) => Some(SwipeDirection::Right),
        (false, true) if dist.y < 0.0 => Some(SwipeDirection::Up),
        (false, true) => Some(SwipeDirection::Down),
        _ => None,
    }
}

/// Classifies a gesture, ignoring anything not produced by a coarse pointer.
#[must_use]
pub fn classify_pointer(
    pointer: PointerKind,
    start: Point,
    end: Point,
    limits: SwipeThresholds,
) -> Option<SwipeDirection> {
    match pointer {
        PointerKind::Coarse => classify(start, end, limits),
        PointerKind::Fine => None,
    }
}

/// Start point of the interaction in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSession {
    start: Option<Point>,
}

impl GestureSession {
    /// Records the start of a new interaction, replacing any stale one.
    ///
    /// Fine pointers are ignored.
    pub fn begin(&mut self, pointer: PointerKind, at: Point) {
        self.start = match pointer {
            PointerKind::Coarse => Some(at),
            PointerKind::Fine => None,
        };
    }

    /// Classifies the interaction so far without ending it.
    #[must_use]
    pub fn peek(&self, at: Point, limits: SwipeThresholds) -> Option<SwipeDirection> {
        self.start.and_then(|start| classify(start, at, limits))
    }

    /// Ends the interaction and classifies it. The start point is discarded.
    pub fn finish(&mut self, at: Point, limits: SwipeThresholds) -> Option<SwipeDirection> {
        self.start.take().and_then(|start| classify(start, at, limits))
    }

    /// Returns `true` while an interaction is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: SwipeThresholds = SwipeThresholds {
        threshold: 150.0,
        restraint: 100.0,
    };

    fn swipe(dx: f64, dy: f64) -> Option<SwipeDirection> {
        let start = Point::new(400.0, 300.0);
        classify(start, start + kurbo::Vec2::new(dx, dy), LIMITS)
    }

    #[test]
    fn horizontal_left_swipe_advances() {
        let dir = swipe(-200.0, 10.0);
        assert_eq!(dir, Some(SwipeDirection::Left));
        assert_eq!(dir.and_then(SwipeDirection::navigation), Some(Step::Next));
    }

    #[test]
    fn right_swipe_retreats() {
        assert_eq!(
            swipe(180.0, -40.0).and_then(SwipeDirection::navigation),
            Some(Step::Prev)
        );
    }

    #[test]
    fn vertical_swipes_do_not_navigate() {
        assert_eq!(swipe(5.0, -160.0), Some(SwipeDirection::Up));
        assert_eq!(swipe(5.0, 160.0), Some(SwipeDirection::Down));
        assert_eq!(SwipeDirection::Up.navigation(), None);
        assert_eq!(SwipeDirection::Down.navigation(), None);
    }

    #[test]
    fn short_or_diagonal_gestures_are_ignored() {
        assert_eq!(swipe(-149.0, 0.0), None, "below threshold");
        assert_eq!(swipe(-200.0, 120.0), None, "too much vertical travel");
        assert_eq!(swipe(0.0, 0.0), None);
    }

    #[test]
    fn ambiguous_gestures_are_ignored() {
        let wide = SwipeThresholds {
            threshold: 50.0,
            restraint: 200.0,
        };
        let start = Point::ORIGIN;
        assert_eq!(classify(start, Point::new(-120.0, 110.0), wide), None);
    }

    #[test]
    fn sign_flip_mirrors_direction() {
        let cases = [
            (-200.0, 10.0),
            (150.0, 100.0),
            (20.0, -300.0),
            (-149.9, 0.0),
            (90.0, 90.0),
        ];
        for (dx, dy) in cases {
            let original = swipe(dx, dy);
            let flipped_x = swipe(-dx, dy);
            let flipped_y = swipe(dx, -dy);
            assert_eq!(original.is_some(), flipped_x.is_some(), "dx={dx} dy={dy}");
            assert_eq!(original.is_some(), flipped_y.is_some(), "dx={dx} dy={dy}");
            match original {
                Some(SwipeDirection::Left) => {
                    assert_eq!(flipped_x, Some(SwipeDirection::Right));
                }
                Some(SwipeDirection::Right) => {
                    assert_eq!(flipped_x, Some(SwipeDirection::Left));
                }
                Some(SwipeDirection::Up) => assert_eq!(flipped_y, Some(SwipeDirection::Down)),
                Some(SwipeDirection::Down) => assert_eq!(flipped_y, Some(SwipeDirection::Up)),
                None => {}
            }
        }
    }

    #[test]
    fn fine_pointers_never_swipe() {
        let start = Point::new(300.0, 0.0);
        let end = Point::new(0.0, 0.0);
        assert_eq!(classify_pointer(PointerKind::Fine, start, end, LIMITS), None);
        assert_eq!(
            classify_pointer(PointerKind::Coarse, start, end, LIMITS),
            Some(SwipeDirection::Left)
        );

        let mut session = GestureSession::default();
        session.begin(PointerKind::Fine, start);
        assert!(!session.is_active());
        assert_eq!(session.finish(end, LIMITS), None);
    }

    #[test]
    fn session_discards_start_after_finish() {
        let mut session = GestureSession::default();
        session.begin(PointerKind::Coarse, Point::new(300.0, 0.0));
        assert_eq!(
            session.peek(Point::new(100.0, 0.0), LIMITS),
            Some(SwipeDirection::Left)
        );
        assert!(session.is_active(), "peek keeps the session open");
        assert_eq!(
            session.finish(Point::new(100.0, 0.0), LIMITS),
            Some(SwipeDirection::Left)
        );
        assert!(!session.is_active());
        assert_eq!(session.finish(Point::new(0.0, 0.0), LIMITS), None);
    }
}
