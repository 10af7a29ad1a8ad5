// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for carousel
//! diagnostics.
//!
//! This crate provides [`TraceSink`](carousel_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`recorder::RecorderSink`]: in-memory recording, stamped with host time.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a
//!   recording.
//!
//! Sinks only see events when `carousel_core` is built with its `trace`
//! feature, which this crate enables.

pub mod chrome;
pub mod pretty;
pub mod recorder;
