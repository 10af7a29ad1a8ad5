// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrap-around transitions and the phantom that hides the seam.

use carousel_core::carousel::Carousel;
use carousel_core::options::{CarouselConfig, Options};
use carousel_core::trace::{IllusionAction, TraceEvent, Tracer};
use carousel_debug::recorder::RecorderSink;
use carousel_harness::{ContinuityGrade, Driver, ManualFrames, MotionReport};

fn looping(slides: usize, per_page: u32) -> Driver {
    let options = Options {
        looping: true,
        slides_per_page: per_page,
        ..Options::default()
    };
    let carousel = Carousel::new(CarouselConfig::new(options), slides, 1024.0).unwrap();
    Driver::new(carousel, ManualFrames::at_60hz())
}

fn record(d: &mut Driver, rec: &mut RecorderSink) {
    rec.set_now(d.frames().now());
    d.command(|c| c.drain_trace(&mut Tracer::new(rec)));
}

fn labels(rec: &RecorderSink) -> Vec<&'static str> {
    rec.events()
        .iter()
        .map(|r| match r.event {
            TraceEvent::Command(_) => "command",
            TraceEvent::MotionStart(_) => "start",
            TraceEvent::MotionSettle(e) if e.completed => "done",
            TraceEvent::MotionSettle(_) => "cancelled",
            TraceEvent::Illusion(e) if e.action == IllusionAction::Primed => "primed",
            TraceEvent::Illusion(_) => "retracted",
            TraceEvent::Build(_) => "build",
        })
        .collect()
}

#[test]
fn forward_wrap_primes_first_and_retracts_once() {
    let mut d = looping(3, 1);
    let mut rec = RecorderSink::new();
    d.command(|c| c.go_to(2));
    d.settle();
    record(&mut d, &mut rec);
    rec.clear();

    assert!(d.command(Carousel::next));
    assert_eq!(d.carousel().current_index(), 0);
    assert_eq!(
        d.surface().displaced(),
        [(0, 3)],
        "first slide parked one lap ahead before the first frame"
    );

    let report = d.settle();
    assert!(d.surface().displaced().is_empty(), "phantom retracted");
    assert!(d.surface().offset().abs() < 1e-9, "track rests on page 0");
    assert_eq!(report.grade(0.25), ContinuityGrade::Smooth, "{report:?}");
    assert!((report.travel - 1.0).abs() < 1e-9, "travel {}", report.travel);

    record(&mut d, &mut rec);
    assert_eq!(labels(&rec), ["command", "primed", "start", "retracted", "done"]);
}

#[test]
fn backward_wrap_lands_on_last_page() {
    let mut d = looping(3, 1);
    assert!(d.command(Carousel::prev));
    assert_eq!(d.carousel().current_index(), 2);
    assert_eq!(d.surface().displaced(), [(2, -3)]);

    let report = d.settle();
    assert!(d.surface().displaced().is_empty());
    assert!((d.surface().offset() - 2.0).abs() < 1e-9);
    assert_eq!(report.reversals, 0);
    assert!((report.travel + 1.0).abs() < 1e-9, "travel {}", report.travel);
}

#[test]
fn partial_last_page_phantoms() {
    // 5 slides, 2 per page: groups [0, 1], [2, 3], [4]; one lap is 6 slots.
    let mut d = looping(5, 2);
    d.command(Carousel::prev);
    assert_eq!(d.surface().displaced(), [(4, -6)]);
    d.settle();

    d.command(Carousel::next);
    assert_eq!(d.surface().displaced(), [(0, 6), (1, 6)]);
    d.settle();
    assert!(d.surface().displaced().is_empty());
    assert_eq!(d.carousel().current_index(), 0);
}

#[test]
fn advancing_through_a_wrap_keeps_moving_forward() {
    let mut d = looping(3, 1);
    d.command(|c| c.go_to(2));
    d.settle();
    d.clear_history();

    d.command(Carousel::next);
    d.step_n(10);
    assert!(d.carousel().is_animating());
    d.command(Carousel::next);
    assert_eq!(d.carousel().current_index(), 1);
    assert_eq!(
        d.surface().displaced(),
        [(2, -3)],
        "the backward frame puts page 1 closer"
    );
    d.settle();
    assert!(d.surface().displaced().is_empty());
    assert!((d.surface().offset() - 1.0).abs() < 1e-9);

    let whole = MotionReport::from_offsets(d.surface().offsets(), Some(3.0));
    assert_eq!(whole.grade(0.25), ContinuityGrade::Smooth, "{whole:?}");
    assert!((whole.travel - 2.0).abs() < 1e-9, "travel {}", whole.travel);
}

#[test]
fn turning_back_during_a_wrap_reverses_once() {
    let mut d = looping(3, 1);
    d.command(|c| c.go_to(2));
    d.settle();
    d.clear_history();

    d.command(Carousel::next);
    d.step_n(10);
    d.command(Carousel::prev);
    assert_eq!(d.carousel().current_index(), 2);
    assert_eq!(d.surface().displaced(), [(0, 3)], "frame kept");
    let back = d.settle();
    assert_eq!(back.reversals, 0, "{back:?}");
    assert!(back.travel < 0.0);
    assert!((d.surface().offset() - 2.0).abs() < 1e-9);
    assert!(d.surface().displaced().is_empty());

    let whole = MotionReport::from_offsets(d.surface().offsets(), Some(3.0));
    assert_eq!(whole.reversals, 1, "{whole:?}");
    assert!(whole.travel.abs() < 1e-9, "came back to where it started");
}
