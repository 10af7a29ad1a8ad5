// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setInterval` autoplay timer.

use alloc::boxed::Box;
use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use carousel_core::lifecycle::AutoplayCommand;
use carousel_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(handler: &JsValue, timeout: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

/// A repeating timer that follows [`AutoplayCommand`]s.
///
/// The JS closure is created once and reused for every restart; dropping the
/// timer clears any pending interval.
pub struct IntervalTimer {
    closure: Closure<dyn FnMut()>,
    id: Cell<Option<i32>>,
}

impl IntervalTimer {
    /// Creates a stopped timer that calls `callback` on every interval.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            closure: Closure::wrap(Box::new(callback) as Box<dyn FnMut()>),
            id: Cell::new(None),
        }
    }

    /// Clears any pending interval and starts a new one.
    pub fn restart(&self, interval: Duration) {
        self.clear();
        let ms = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        let id = set_interval(self.closure.as_ref().unchecked_ref(), ms);
        self.id.set(Some(id));
    }

    /// Clears the pending interval, if any.
    pub fn clear(&self) {
        if let Some(id) = self.id.take() {
            clear_interval(id);
        }
    }

    /// Follows an autoplay instruction from the carousel.
    pub fn apply(&self, command: AutoplayCommand) {
        match command {
            AutoplayCommand::Restart(interval) => self.restart(interval),
            AutoplayCommand::Clear => self.clear(),
        }
    }

    /// Returns `true` while an interval is pending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.clear();
    }
}

impl core::fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("id", &self.id.get())
            .finish_non_exhaustive()
    }
}
