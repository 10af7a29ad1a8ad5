// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use carousel_core::index::Wrap;
use carousel_core::lifecycle::BuildReason;
use carousel_core::trace::{
    BuildEvent, CommandEvent, CommandKind, IllusionAction, IllusionEvent, MotionSettleEvent,
    MotionStartEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn command_name(command: CommandKind) -> String {
    match command {
        CommandKind::Next => "next".to_owned(),
        CommandKind::Prev => "prev".to_owned(),
        CommandKind::GoTo(page) => format!("go_to({page})"),
    }
}

fn wrap_name(wrap: Wrap) -> &'static str {
    match wrap {
        Wrap::Forward => "forward",
        Wrap::Backward => "backward",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_command(&mut self, e: &CommandEvent) {
        let name = command_name(e.command);
        let _ = match e.to {
            Some(to) => writeln!(self.writer, "[command] {name} {} -> {to}", e.from),
            None => writeln!(self.writer, "[command] {name} rejected on {}", e.from),
        };
    }

    fn on_motion_start(&mut self, e: &MotionStartEvent) {
        let _ = writeln!(
            self.writer,
            "[motion:start] #{} {:.3} -> {:.3} over {}ms",
            e.id.0,
            e.from_offset,
            e.to_offset,
            e.duration.as_millis(),
        );
    }

    fn on_motion_settle(&mut self, e: &MotionSettleEvent) {
        let how = if e.completed { "done" } else { "cancelled" };
        let _ = match e.at {
            Some(at) => writeln!(
                self.writer,
                "[motion:settle] #{} {how} at {:.3} ({:.1}ms)",
                e.id.0,
                e.offset,
                at.ticks() as f64 / 1000.0,
            ),
            None => writeln!(
                self.writer,
                "[motion:settle] #{} {how} at {:.3}",
                e.id.0, e.offset,
            ),
        };
    }

    fn on_illusion(&mut self, e: &IllusionEvent) {
        let action = match e.action {
            IllusionAction::Primed => "primed",
            IllusionAction::Retracted => "retracted",
        };
        let _ = writeln!(
            self.writer,
            "[illusion] {action} {} slides {}..{} shift={}",
            wrap_name(e.wrap),
            e.first_slide,
            e.end_slide,
            e.shift,
        );
    }

    fn on_build(&mut self, e: &BuildEvent) {
        let reason = match e.reason {
            BuildReason::Init => "init",
            BuildReason::Breakpoint => "breakpoint",
            BuildReason::Slides => "slides",
        };
        let _ = writeln!(
            self.writer,
            "[build] {reason} slides={} pages={} per_page={} breakpoint={:?}",
            e.slides, e.pages, e.slides_per_page, e.breakpoint,
        );
    }
}
