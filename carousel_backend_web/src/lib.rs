// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for `carousel_core`.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomSurface`]: applies surface changes as inline CSS
//! - [`IntervalTimer`]: `setInterval` autoplay timer
//! - [`Listener`]: owned DOM event subscriptions
//! - [`WebCarousel`]: a carousel mounted on a container element

#![no_std]

extern crate alloc;

mod listener;
mod mount;
mod raf;
mod surface;
mod timer;

pub use carousel_core::surface::VisualSurface;
pub use listener::Listener;
pub use mount::{DEFAULT_SLIDES_SELECTOR, Hook, WebCarousel};
pub use raf::RafLoop;
pub use surface::DomSurface;
pub use timer::IntervalTimer;

use carousel_core::gesture::PointerKind;
use carousel_core::time::HostTime;

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Returns `true` if the primary pointer is coarse (a touch screen).
#[must_use]
pub fn pointer_is_coarse() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// The primary pointer's kind, as the gesture classifier needs it.
#[must_use]
pub fn pointer_kind() -> PointerKind {
    if pointer_is_coarse() {
        PointerKind::Coarse
    } else {
        PointerKind::Fine
    }
}

/// Window width in CSS pixels, as `min-width` media queries see it.
#[must_use]
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}
