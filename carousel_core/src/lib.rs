// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion and state engine for paged, looping, breakpoint-aware carousels.
//!
//! `carousel_core` decides *what* a carousel shows and *when* it moves. It
//! never touches a rendering tree, timer or input device: the host feeds it
//! commands and frame ticks and applies what comes back. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   host command / gesture / resize
//!       │
//!       ▼
//!   Carousel ──► resolve() ──► Pager ──► LoopIllusion ──► MotionClock
//!       │                                                     ▲
//!       │                FrameTick ──► Carousel::frame() ─────┘
//!       ▼
//!   SurfaceChanges ──► VisualSurface::apply()
//!   LifecycleEvent / AutoplayCommand ──► host hooks and timer
//! ```
//!
//! **[`options`]**: Typed options, breakpoint overrides and the
//! mobile-first resolver.
//!
//! **[`index`]**: The page index state machine and its boundary policy.
//!
//! **[`motion`]**: Eased, cancellable, generation-tagged interpolation of
//! the track offset.
//!
//! **[`illusion`]**: Seamless wrap-around by displacing one slide group a
//! full lap.
//!
//! **[`gesture`]**: Swipe classification for coarse pointers.
//!
//! **[`carousel`]**: [`Carousel`](carousel::Carousel), the composition
//! root, and its queued outboxes.
//!
//! **[`surface`]**: The [`VisualSurface`](surface::VisualSurface) trait
//! that backends implement to apply [`SurfaceChanges`](surface::SurfaceChanges).
//!
//! **[`lifecycle`]**: Hook events and autoplay timer instructions.
//!
//! **[`time`]** / **[`timing`]**: Host time in microseconds and frame
//! ticks.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! engine instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Buffers trace events and enables
//!   `Tracer` method bodies (one branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod carousel;
pub mod gesture;
pub mod illusion;
pub mod index;
pub mod lifecycle;
pub mod motion;
pub mod options;
pub mod surface;
pub mod time;
pub mod timing;
pub mod trace;
