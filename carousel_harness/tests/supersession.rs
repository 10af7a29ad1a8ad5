// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commands that arrive while the track is still moving.

use carousel_core::carousel::Carousel;
use carousel_core::options::{CarouselConfig, Options};
use carousel_core::time::Duration;
use carousel_core::trace::{TraceEvent, Tracer};
use carousel_debug::recorder::RecorderSink;
use carousel_harness::{Driver, ManualFrames, MotionReport};

fn driver(slides: usize) -> Driver {
    let carousel = Carousel::new(CarouselConfig::new(Options::default()), slides, 1024.0).unwrap();
    Driver::new(carousel, ManualFrames::at_60hz())
}

#[test]
fn new_motion_starts_where_the_old_one_stopped() {
    let mut d = driver(4);
    let mut rec = RecorderSink::new();

    d.command(|c| c.go_to(3));
    d.step_n(6);
    let stopped_at = d.surface().offset();
    assert!(stopped_at > 0.0 && stopped_at < 3.0, "mid-flight at {stopped_at}");

    d.command(|c| c.go_to(1));
    assert!(
        (d.carousel().track_offset() - stopped_at).abs() < 1e-12,
        "no jump at supersession"
    );
    let report = d.settle();
    assert_eq!(report.reversals, 0, "{report:?}");
    assert!((d.surface().offset() - 1.0).abs() < 1e-9);

    d.command(|c| c.drain_trace(&mut Tracer::new(&mut rec)));
    let cancelled = rec.events().iter().find_map(|r| match r.event {
        TraceEvent::MotionSettle(e) if !e.completed => Some(e),
        _ => None,
    });
    let restarted = rec
        .events()
        .iter()
        .filter_map(|r| match r.event {
            TraceEvent::MotionStart(e) => Some(e),
            _ => None,
        })
        .nth(1);
    let (cancelled, restarted) = (cancelled.unwrap(), restarted.unwrap());
    assert_eq!(cancelled.offset, restarted.from_offset);
    assert_eq!(restarted.to_offset, 1.0);
}

#[test]
fn rapid_commands_never_jump() {
    let mut d = driver(6);
    d.clear_history();
    for page in [3, 1, 5, 0, 4] {
        d.command(|c| c.go_to(page));
        d.step_n(4);
    }
    d.settle();
    assert_eq!(d.carousel().current_index(), 4);

    let whole = MotionReport::from_offsets(d.surface().offsets(), None);
    assert!(whole.max_step < 1.0, "largest step {}", whole.max_step);
    assert!((d.surface().offset() - 4.0).abs() < 1e-9);
}

#[test]
fn long_frame_gaps_finish_the_motion() {
    let mut d = driver(3);
    d.command(Carousel::next);
    assert!(d.step(), "first frame only fixes the origin");
    d.stall(Duration::from_millis(2_000));
    assert!(!d.step(), "the whole duration elapsed in one gap");
    assert!((d.surface().offset() - 1.0).abs() < 1e-9);
    assert!(!d.carousel().is_animating());
}
