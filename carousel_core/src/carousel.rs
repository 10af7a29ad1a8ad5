// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine.
//!
//! [`Carousel`] composes option resolution, the page index, the motion clock
//! and the wrap illusion behind a small command surface. Commands never call
//! out to the host. Their effects are queued in four outboxes that the host
//! drains after each command or frame:
//!
//! | outbox                                    | contents                  |
//! |-------------------------------------------|---------------------------|
//! | [`take_changes`](Carousel::take_changes)  | [`SurfaceChanges`]        |
//! | [`drain_events`](Carousel::drain_events)  | [`LifecycleEvent`]s       |
//! | [`take_autoplay`](Carousel::take_autoplay)| latest [`AutoplayCommand`]|
//! | [`drain_trace`](Carousel::drain_trace)    | trace events              |
//!
//! # Wrap frames
//!
//! While a wrap phantom is primed, the same picture can be described in two
//! frames: the forward phantom at track offset `x` looks exactly like the
//! backward phantom at `x - pages`. When a command supersedes a wrap in
//! flight, the carousel keeps whichever frame puts the new target nearest,
//! swapping phantoms in the same change batch if needed, so the track never
//! jumps and never runs the long way round.

use alloc::vec::Vec;

use kurbo::Point;

use crate::gesture::{GestureSession, PointerKind, Step, SwipeDirection, classify_pointer};
use crate::illusion::{LoopIllusion, PageGeometry, Phantom};
use crate::index::{Pager, Transition, Wrap};
use crate::lifecycle::{AutoplayCommand, BuildReason, LifecycleEvent};
use crate::motion::{MotionClock, MotionId};
use crate::options::{BreakpointId, CarouselConfig, ConfigError, Options, resolve};
use crate::surface::{GridLayout, Placement, SurfaceChanges};
use crate::time::HostTime;
use crate::timing::FrameTick;
use crate::trace::{
    BuildEvent, CommandEvent, CommandKind, IllusionAction, IllusionEvent, MotionSettleEvent,
    MotionStartEvent, TraceBuffer, TraceEvent, Tracer,
};

/// Distances closer than this keep the current wrap frame.
const FRAME_EPSILON: f64 = 1e-9;

/// A carousel's motion and state engine.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    options: Options,
    breakpoint: BreakpointId,
    slides: usize,
    pager: Pager,
    clock: MotionClock,
    illusion: LoopIllusion,
    gesture: GestureSession,
    inert: bool,
    changes: SurfaceChanges,
    events: Vec<LifecycleEvent>,
    autoplay: Option<AutoplayCommand>,
    trace: TraceBuffer,
}

impl Carousel {
    /// Creates a carousel over `slide_count` slides for a viewport
    /// `viewport_width` pixels wide.
    ///
    /// The initial build is queued as surface changes followed by the
    /// [`Built`](LifecycleEvent::Built) and [`Created`](LifecycleEvent::Created)
    /// events.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base options or any breakpoint
    /// override would produce an unusable configuration.
    pub fn new(
        config: CarouselConfig,
        slide_count: usize,
        viewport_width: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolved = resolve(&config.options, &config.breakpoints, viewport_width);
        let mut carousel = Self {
            config,
            options: resolved.options,
            breakpoint: resolved.breakpoint,
            slides: slide_count,
            pager: Pager::new(0, resolved.options.looping),
            clock: MotionClock::new(),
            illusion: LoopIllusion::new(),
            gesture: GestureSession::default(),
            inert: false,
            changes: SurfaceChanges::default(),
            events: Vec::new(),
            autoplay: None,
            trace: TraceBuffer::default(),
        };
        carousel.build(BuildReason::Init);
        carousel.events.push(LifecycleEvent::Created);
        carousel.refresh_autoplay();
        Ok(carousel)
    }

    /// Creates a carousel that ignores every command.
    ///
    /// Hosts use this when the container or its slides cannot be found, so
    /// the rest of the page keeps working.
    #[must_use]
    pub fn inert() -> Self {
        let options = Options::default();
        Self {
            config: CarouselConfig::new(options),
            options,
            breakpoint: None,
            slides: 0,
            pager: Pager::new(0, false),
            clock: MotionClock::new(),
            illusion: LoopIllusion::new(),
            gesture: GestureSession::default(),
            inert: true,
            changes: SurfaceChanges::default(),
            events: Vec::new(),
            autoplay: None,
            trace: TraceBuffer::default(),
        }
    }

    // -- queries ------------------------------------------------------------

    /// The authoritative page. While a transition is in flight this is
    /// already its target.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.pager.current()
    }

    /// The page the track is heading to; equal to
    /// [`current_index`](Self::current_index).
    #[must_use]
    pub const fn pending_target(&self) -> usize {
        self.pager.current()
    }

    /// Number of pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.pager.pages()
    }

    /// Number of slides.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slides
    }

    /// Effective options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The configuration the carousel was created with.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Breakpoint the effective options were resolved from.
    #[must_use]
    pub const fn breakpoint(&self) -> BreakpointId {
        self.breakpoint
    }

    /// Whether the previous button should be disabled.
    #[must_use]
    pub const fn is_prev_disabled(&self) -> bool {
        self.inert || self.pager.is_prev_disabled()
    }

    /// Whether the next button should be disabled.
    #[must_use]
    pub const fn is_next_disabled(&self) -> bool {
        self.inert || self.pager.is_next_disabled()
    }

    /// Returns `true` while the track is moving.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    /// Returns `true` if the carousel ignores commands.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Instantaneous track offset, in pages.
    ///
    /// During a wrap this may lie outside `0..page_count`.
    #[must_use]
    pub const fn track_offset(&self) -> f64 {
        self.clock.last_offset()
    }

    /// The slide group currently displaced for a wrap, if any.
    #[must_use]
    pub const fn phantom(&self) -> Option<&Phantom> {
        self.illusion.primed()
    }

    // -- outboxes -----------------------------------------------------------

    /// Takes the visual changes accumulated since the last call.
    pub fn take_changes(&mut self) -> SurfaceChanges {
        core::mem::take(&mut self.changes)
    }

    /// Takes the lifecycle events fired since the last call, in firing
    /// order.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        core::mem::take(&mut self.events)
    }

    /// Takes the latest autoplay instruction, if one was issued since the
    /// last call. Earlier instructions are superseded by later ones.
    pub fn take_autoplay(&mut self) -> Option<AutoplayCommand> {
        self.autoplay.take()
    }

    /// Dispatches buffered trace events to `tracer`.
    ///
    /// Only records anything with the `trace` feature enabled.
    pub fn drain_trace(&mut self, tracer: &mut Tracer<'_>) {
        self.trace.flush(tracer);
    }

    // -- commands -----------------------------------------------------------

    /// Advances one page. Returns `false` if the step was rejected.
    pub fn next(&mut self) -> bool {
        self.navigate(CommandKind::Next)
    }

    /// Retreats one page. Returns `false` if the step was rejected.
    pub fn prev(&mut self) -> bool {
        self.navigate(CommandKind::Prev)
    }

    /// Jumps directly to `page`. Jumps never wrap.
    ///
    /// Returns `false` for the current page or a page that does not exist.
    pub fn go_to(&mut self, page: usize) -> bool {
        self.navigate(CommandKind::GoTo(page))
    }

    /// Processes a viewport resize.
    ///
    /// Rebuilds when the selected breakpoint changes (even if its values are
    /// identical to the previous one) and always fires
    /// [`Resized`](LifecycleEvent::Resized). Returns `true` if it rebuilt.
    pub fn reconfigure(&mut self, viewport_width: f64) -> bool {
        if self.inert {
            return false;
        }
        let resolved = resolve(
            &self.config.options,
            &self.config.breakpoints,
            viewport_width,
        );
        let rebuilt = resolved.breakpoint != self.breakpoint;
        if rebuilt {
            log::debug!(
                "breakpoint {:?} -> {:?} at width {viewport_width}",
                self.breakpoint,
                resolved.breakpoint
            );
            self.options = resolved.options;
            self.breakpoint = resolved.breakpoint;
            self.build(BuildReason::Breakpoint);
            self.refresh_autoplay();
        }
        self.events.push(LifecycleEvent::Resized);
        rebuilt
    }

    /// Replaces the slide collection with one of `slide_count` slides.
    ///
    /// Any motion is hard-cancelled and the carousel returns to page 0.
    /// Returns `false` only when inert.
    pub fn rebuild(&mut self, slide_count: usize) -> bool {
        if self.inert {
            return false;
        }
        self.slides = slide_count;
        self.build(BuildReason::Slides);
        self.refresh_autoplay();
        true
    }

    /// Classifies a finished gesture and navigates on horizontal swipes.
    ///
    /// Returns `true` if a navigation was accepted.
    pub fn on_gesture_end(&mut self, start: Point, end: Point, pointer: PointerKind) -> bool {
        let direction = classify_pointer(pointer, start, end, self.config.swipe);
        self.swipe(direction)
    }

    /// Starts tracking an interaction at `at`.
    pub fn gesture_start(&mut self, at: Point, pointer: PointerKind) {
        if self.inert {
            return;
        }
        self.gesture.begin(pointer, at);
    }

    /// Updates the interaction in progress.
    ///
    /// Returns `true` when the gesture is already a horizontal swipe and the
    /// host should suppress native scrolling.
    pub fn gesture_move(&mut self, at: Point, pointer: PointerKind) -> bool {
        if pointer == PointerKind::Fine {
            return false;
        }
        self.gesture
            .peek(at, self.config.swipe)
            .is_some_and(SwipeDirection::is_horizontal)
    }

    /// Ends the interaction in progress at `at` and navigates on horizontal
    /// swipes.
    ///
    /// Returns `true` if a navigation was accepted.
    pub fn gesture_end(&mut self, at: Point) -> bool {
        let direction = self.gesture.finish(at, self.config.swipe);
        self.swipe(direction)
    }

    /// Advances the running motion to the tick's time.
    ///
    /// Returns `true` while the track is still moving after this frame.
    pub fn frame(&mut self, tick: &FrameTick) -> bool {
        let Some(sample) = self.clock.sample(tick.now) else {
            return false;
        };
        self.changes.track_offset = Some(sample.offset);
        if sample.done {
            self.finish(sample.id, tick.now);
        }
        !sample.done
    }

    /// Stops all motion and makes the carousel inert.
    ///
    /// The track is left resting on the current page with every slide in
    /// its natural slot, and autoplay is cleared.
    pub fn dispose(&mut self) {
        if self.inert {
            return;
        }
        let rest = self.rest_offset();
        self.clock.reset(rest);
        self.retract_illusion();
        self.pager.settle();
        self.changes.track_offset = Some(rest);
        self.gesture = GestureSession::default();
        self.autoplay = Some(AutoplayCommand::Clear);
        self.inert = true;
        log::debug!("carousel disposed on page {}", self.pager.current());
    }

    // -- internals ----------------------------------------------------------

    fn per_page(&self) -> usize {
        usize::try_from(self.options.slides_per_page).unwrap_or(usize::MAX)
    }

    fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.slides, self.per_page())
    }

    fn rest_offset(&self) -> f64 {
        self.pager.current() as f64
    }

    fn build(&mut self, reason: BuildReason) {
        let geometry = self.geometry();
        self.clock.reset(0.0);
        self.illusion = LoopIllusion::new();
        self.gesture = GestureSession::default();
        self.pager.reset(geometry.pages(), self.options.looping);
        self.changes
            .rebuild(GridLayout::from_options(&self.options), 0.0);
        self.events.push(LifecycleEvent::Built);
        self.trace.push(TraceEvent::Build(BuildEvent {
            reason,
            slides: self.slides,
            pages: geometry.pages(),
            slides_per_page: self.options.slides_per_page,
            breakpoint: self.breakpoint,
        }));
        log::debug!(
            "built ({reason:?}): {} slides, {} pages of {}",
            self.slides,
            geometry.pages(),
            self.options.slides_per_page
        );
    }

    fn refresh_autoplay(&mut self) {
        self.autoplay = Some(if self.options.autoplay && self.pager.pages() > 1 {
            AutoplayCommand::Restart(self.options.autoplay_speed)
        } else {
            AutoplayCommand::Clear
        });
    }

    fn swipe(&mut self, direction: Option<SwipeDirection>) -> bool {
        match direction.and_then(SwipeDirection::navigation) {
            Some(Step::Next) => self.next(),
            Some(Step::Prev) => self.prev(),
            None => false,
        }
    }

    fn navigate(&mut self, command: CommandKind) -> bool {
        if self.inert {
            return false;
        }
        let from = self.pager.current();
        let transition = match command {
            CommandKind::Next => self.pager.next(),
            CommandKind::Prev => self.pager.prev(),
            CommandKind::GoTo(page) => self.pager.go_to(page),
        };
        self.trace.push(TraceEvent::Command(CommandEvent {
            command,
            from,
            to: transition.map(|t| t.to),
        }));
        let Some(transition) = transition else {
            log::trace!("{command:?} rejected on page {from}");
            return false;
        };
        log::debug!("{command:?}: page {} -> {}", transition.from, transition.to);
        self.begin(transition);
        self.events.push(LifecycleEvent::Moved {
            from: transition.from,
            to: transition.to,
        });
        self.refresh_autoplay();
        true
    }

    /// Starts the motion for an accepted transition.
    fn begin(&mut self, transition: Transition) {
        if let Some(settled) = self.clock.cancel() {
            self.trace.push(TraceEvent::MotionSettle(MotionSettleEvent {
                id: settled.id,
                offset: settled.offset,
                completed: false,
                at: None,
            }));
        }
        let geometry = self.geometry();
        let offset = self.clock.last_offset();
        let (from, to) = match self.illusion.primed().map(|p| p.wrap) {
            Some(primed) => self.reframe(geometry, primed, offset, transition.to),
            None => match transition.wrap {
                Some(wrap) => {
                    self.prime_illusion(geometry, wrap);
                    (offset, geometry.seam_target(wrap))
                }
                None => (offset, transition.to as f64),
            },
        };
        let duration = self.options.transition_speed;
        let started = self.clock.start(from, to, duration);
        self.trace.push(TraceEvent::MotionStart(MotionStartEvent {
            id: started.id,
            from_offset: from,
            to_offset: to,
            duration,
        }));
    }

    /// Picks the wrap frame from which `page` is nearest, swapping phantoms
    /// if the other frame wins. Returns the motion's start and target.
    fn reframe(
        &mut self,
        geometry: PageGeometry,
        primed: Wrap,
        offset: f64,
        page: usize,
    ) -> (f64, f64) {
        let pages = geometry.pages() as f64;
        let (other, other_offset) = match primed {
            Wrap::Forward => (Wrap::Backward, offset - pages),
            Wrap::Backward => (Wrap::Forward, offset + pages),
        };
        let here = nearest_slot(geometry, primed, offset, page);
        let there = nearest_slot(geometry, other, other_offset, page);
        if (there - other_offset).abs() + FRAME_EPSILON < (here - offset).abs() {
            self.retract_illusion();
            self.prime_illusion(geometry, other);
            self.clock.reset(other_offset);
            self.changes.track_offset = Some(other_offset);
            (other_offset, there)
        } else {
            (offset, here)
        }
    }

    /// Completion path of the motion `id`.
    fn finish(&mut self, id: MotionId, at: HostTime) {
        let rest = self.rest_offset();
        self.retract_illusion();
        self.clock.reset(rest);
        self.changes.track_offset = Some(rest);
        self.pager.settle();
        self.trace.push(TraceEvent::MotionSettle(MotionSettleEvent {
            id,
            offset: rest,
            completed: true,
            at: Some(at),
        }));
    }

    fn prime_illusion(&mut self, geometry: PageGeometry, wrap: Wrap) {
        if let Some(phantom) = self.illusion.prime(geometry, wrap) {
            self.changes.place(
                phantom.slides.clone(),
                Placement::Shifted {
                    slides: phantom.shift,
                },
            );
            self.trace
                .push(illusion_event(IllusionAction::Primed, &phantom));
        }
    }

    fn retract_illusion(&mut self) {
        if let Some(phantom) = self.illusion.retract() {
            self.changes
                .place(phantom.slides.clone(), Placement::Natural);
            self.trace
                .push(illusion_event(IllusionAction::Retracted, &phantom));
        }
    }
}

/// The slot for `page` nearest to `offset` in the frame where `primed` is
/// displaced: the natural slot, or the seam slot if the phantom is `page`.
fn nearest_slot(geometry: PageGeometry, primed: Wrap, offset: f64, page: usize) -> f64 {
    let natural = page as f64;
    let serves = match primed {
        Wrap::Forward => page == 0,
        Wrap::Backward => page + 1 == geometry.pages(),
    };
    if !serves {
        return natural;
    }
    let seam = geometry.seam_target(primed);
    if (seam - offset).abs() < (natural - offset).abs() {
        seam
    } else {
        natural
    }
}

fn illusion_event(action: IllusionAction, phantom: &Phantom) -> TraceEvent {
    TraceEvent::Illusion(IllusionEvent {
        action,
        wrap: phantom.wrap,
        first_slide: phantom.slides.start,
        end_slide: phantom.slides.end,
        shift: phantom.shift,
    })
}
