// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer. Motions become
//! duration slices on their own track; everything else is an instant.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use carousel_core::time::HostTime;
use carousel_core::trace::{IllusionAction, TraceEvent};

use crate::recorder::Recorded;

/// Thread id for instants.
const TID_EVENTS: u32 = 0;
/// Thread id for motion slices.
const TID_MOTION: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn export(recorded: &[Recorded], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = recorded.iter().map(to_json).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_json(recorded: &Recorded) -> Value {
    let ts = host_us(recorded.at);
    match recorded.event {
        TraceEvent::Command(e) => json!({
            "ph": "i",
            "name": format!("{:?}", e.command),
            "cat": "Command",
            "ts": ts,
            "pid": 0,
            "tid": TID_EVENTS,
            "s": "t",
            "args": {
                "from": e.from,
                "to": e.to,
                "accepted": e.to.is_some(),
            }
        }),
        TraceEvent::MotionStart(e) => json!({
            "ph": "B",
            "name": "Motion",
            "cat": "Motion",
            "ts": ts,
            "pid": 0,
            "tid": TID_MOTION,
            "args": {
                "id": e.id.0,
                "from": e.from_offset,
                "to": e.to_offset,
                "duration_ms": e.duration.as_millis(),
            }
        }),
        TraceEvent::MotionSettle(e) => json!({
            "ph": "E",
            "name": "Motion",
            "cat": "Motion",
            "ts": ts,
            "pid": 0,
            "tid": TID_MOTION,
            "args": {
                "id": e.id.0,
                "offset": e.offset,
                "completed": e.completed,
            }
        }),
        TraceEvent::Illusion(e) => json!({
            "ph": "i",
            "name": match e.action {
                IllusionAction::Primed => "IllusionPrimed",
                IllusionAction::Retracted => "IllusionRetracted",
            },
            "cat": "Illusion",
            "ts": ts,
            "pid": 0,
            "tid": TID_EVENTS,
            "s": "t",
            "args": {
                "wrap": format!("{:?}", e.wrap),
                "first_slide": e.first_slide,
                "end_slide": e.end_slide,
                "shift": e.shift,
            }
        }),
        TraceEvent::Build(e) => json!({
            "ph": "i",
            "name": "Build",
            "cat": "Build",
            "ts": ts,
            "pid": 0,
            "tid": TID_EVENTS,
            "s": "p",
            "args": {
                "reason": format!("{:?}", e.reason),
                "slides": e.slides,
                "pages": e.pages,
                "slides_per_page": e.slides_per_page,
                "breakpoint": e.breakpoint,
            }
        }),
    }
}

fn host_us(t: HostTime) -> u64 {
    t.ticks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use carousel_core::motion::MotionId;
    use carousel_core::time::Duration;
    use carousel_core::trace::{
        CommandEvent, CommandKind, MotionSettleEvent, MotionStartEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.set_now(HostTime(1_000));
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
        rec.on_motion_settle(&MotionSettleEvent {
            id: MotionId(1),
            offset: 1.0,
            completed: true,
            at: Some(HostTime(651_000)),
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Next");
        assert_eq!(parsed[0]["args"]["accepted"], true);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["ts"], 1_000);

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["ts"], 651_000);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
