// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting a carousel on live markup.
//!
//! [`WebCarousel`] wires a [`Carousel`] to a container element: it owns the
//! DOM surface, the autoplay timer, the frame loop and every event listener
//! it registers. All of them go away together on
//! [`dispose`](WebCarousel::dispose) or drop; nothing is left on `window`.
//!
//! Every stimulus (touch, resize, timer, frame, or a call on the handle)
//! runs one carousel command and then flushes its outboxes: surface changes
//! go to the [`DomSurface`], autoplay instructions to the [`IntervalTimer`]
//! and lifecycle events to the host's hook. A hook may issue further
//! commands; their effects are flushed in the same pass.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use carousel_core::carousel::Carousel;
use carousel_core::lifecycle::LifecycleEvent;
use carousel_core::options::CarouselConfig;
use carousel_core::surface::VisualSurface;
use kurbo::Point;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, TouchEvent};

use crate::listener::Listener;
use crate::raf::RafLoop;
use crate::surface::DomSurface;
use crate::timer::IntervalTimer;
use crate::{pointer_kind, viewport_width};

/// Selector used to find slides inside the container by default.
pub const DEFAULT_SLIDES_SELECTOR: &str = ".js-carousel__slide";

/// Receives lifecycle events in firing order.
///
/// The carousel is passed in so the hook can query it or issue commands.
pub type Hook = Box<dyn FnMut(LifecycleEvent, &mut Carousel)>;

struct Mounted {
    carousel: Carousel,
    surface: DomSurface,
    timer: IntervalTimer,
    raf: RafLoop,
    hook: Hook,
}

impl Mounted {
    /// Flushes every outbox until the hook stops producing events.
    fn pump(&mut self) {
        loop {
            let changes = self.carousel.take_changes();
            if !changes.is_empty() {
                self.surface.apply(&changes);
            }
            if let Some(command) = self.carousel.take_autoplay() {
                self.timer.apply(command);
            }
            let events = self.carousel.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                (self.hook)(event, &mut self.carousel);
            }
        }
        if self.carousel.is_animating() {
            self.raf.start();
        }
    }
}

/// Runs `f` on the carousel and flushes the results.
///
/// Returns `None` if the carousel is already busy, which only happens if a
/// browser callback fires while another one is still running.
fn dispatch<R>(shared: &RefCell<Mounted>, f: impl FnOnce(&mut Carousel) -> R) -> Option<R> {
    let Ok(mut mounted) = shared.try_borrow_mut() else {
        log::warn!("carousel busy; stimulus dropped");
        return None;
    };
    let result = f(&mut mounted.carousel);
    mounted.pump();
    Some(result)
}

fn dispatch_weak<R>(
    weak: &Weak<RefCell<Mounted>>,
    f: impl FnOnce(&mut Carousel) -> R,
) -> Option<R> {
    weak.upgrade().and_then(|shared| dispatch(&shared, f))
}

/// A carousel mounted on a container element.
pub struct WebCarousel {
    shared: Option<Rc<RefCell<Mounted>>>,
    slides_selector: String,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for WebCarousel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebCarousel")
            .field("inert", &self.shared.is_none())
            .field("slides_selector", &self.slides_selector)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WebCarousel {
    /// Mounts a carousel on the element matching `selector`, with slides
    /// found by [`DEFAULT_SLIDES_SELECTOR`].
    ///
    /// See [`mount_with_slides`](Self::mount_with_slides).
    ///
    /// # Errors
    ///
    /// As for [`mount_with_slides`](Self::mount_with_slides).
    pub fn mount(
        selector: &str,
        config: CarouselConfig,
        hook: impl FnMut(LifecycleEvent, &mut Carousel) + 'static,
    ) -> Result<Self, JsValue> {
        Self::mount_with_slides(selector, DEFAULT_SLIDES_SELECTOR, config, hook)
    }

    /// Mounts a carousel on the element matching `selector`, whose slides
    /// match `slides_selector`.
    ///
    /// If no element matches `selector` the handle is inert: every command
    /// is a no-op and nothing is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, if a selector is
    /// malformed, or if a listener cannot be registered.
    pub fn mount_with_slides(
        selector: &str,
        slides_selector: &str,
        config: CarouselConfig,
        hook: impl FnMut(LifecycleEvent, &mut Carousel) + 'static,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(track) = document
            .query_selector(selector)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("no carousel container matches {selector:?}; staying inert");
            return Ok(Self {
                shared: None,
                slides_selector: slides_selector.to_string(),
                listeners: Vec::new(),
            });
        };

        let slides = query_slides(&track, slides_selector)?;
        let carousel = Carousel::new(config, slides.len(), viewport_width())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let hook: Hook = Box::new(hook);

        let shared = Rc::new_cyclic(|weak: &Weak<RefCell<Mounted>>| {
            let on_frame = weak.clone();
            let on_interval = weak.clone();
            RefCell::new(Mounted {
                carousel,
                surface: DomSurface::new(track.clone(), slides),
                timer: IntervalTimer::new(move || {
                    dispatch_weak(&on_interval, Carousel::next);
                }),
                raf: RafLoop::new(move |tick| {
                    dispatch_weak(&on_frame, |c| c.frame(&tick)).unwrap_or(false)
                }),
                hook,
            })
        });
        dispatch(&shared, |_| ());

        let listeners = attach(&window, &track, &Rc::downgrade(&shared))?;
        log::debug!("carousel mounted on {selector:?}");
        Ok(Self {
            shared: Some(shared),
            slides_selector: slides_selector.to_string(),
            listeners,
        })
    }

    /// Returns `true` if the handle was mounted without a container or has
    /// been disposed.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.shared.is_none()
    }

    /// Runs `f` with read access to the carousel.
    ///
    /// Returns `None` when inert.
    pub fn with_carousel<R>(&self, f: impl FnOnce(&Carousel) -> R) -> Option<R> {
        let shared = self.shared.as_ref()?;
        let mounted = shared.try_borrow().ok()?;
        Some(f(&mounted.carousel))
    }

    fn command(&self, f: impl FnOnce(&mut Carousel) -> bool) -> bool {
        self.shared
            .as_ref()
            .and_then(|shared| dispatch(shared, f))
            .unwrap_or(false)
    }

    /// Advances one page. Returns `false` if the step was rejected.
    pub fn next(&self) -> bool {
        self.command(Carousel::next)
    }

    /// Retreats one page. Returns `false` if the step was rejected.
    pub fn prev(&self) -> bool {
        self.command(Carousel::prev)
    }

    /// Jumps to `page`. Returns `false` if the jump was rejected.
    pub fn go_to(&self, page: usize) -> bool {
        self.command(|c| c.go_to(page))
    }

    /// Re-reads the slide elements from the container and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns an error if the slides selector is malformed.
    pub fn rebuild(&self) -> Result<bool, JsValue> {
        let Some(shared) = &self.shared else {
            return Ok(false);
        };
        let Ok(mut mounted) = shared.try_borrow_mut() else {
            return Err(JsValue::from_str("carousel busy"));
        };
        let slides = query_slides(mounted.surface.track(), &self.slides_selector)?;
        let count = slides.len();
        mounted.surface.set_slides(slides);
        let rebuilt = mounted.carousel.rebuild(count);
        mounted.pump();
        Ok(rebuilt)
    }

    /// The current page, or 0 when inert.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.with_carousel(Carousel::current_index).unwrap_or(0)
    }

    /// The number of pages, or 0 when inert.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.with_carousel(Carousel::page_count).unwrap_or(0)
    }

    /// Whether the previous button should be disabled.
    #[must_use]
    pub fn is_prev_disabled(&self) -> bool {
        self.with_carousel(Carousel::is_prev_disabled)
            .unwrap_or(true)
    }

    /// Whether the next button should be disabled.
    #[must_use]
    pub fn is_next_disabled(&self) -> bool {
        self.with_carousel(Carousel::is_next_disabled)
            .unwrap_or(true)
    }

    /// The slide elements, in order.
    #[must_use]
    pub fn slides(&self) -> Vec<HtmlElement> {
        self.shared
            .as_ref()
            .and_then(|shared| shared.try_borrow().ok())
            .map(|mounted| mounted.surface.slides().to_vec())
            .unwrap_or_default()
    }

    /// Tears the carousel down: removes every listener, stops the frame
    /// loop and autoplay, and clears the inline styles it wrote.
    ///
    /// The handle is inert afterwards. Calling this twice is harmless.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        let Some(shared) = self.shared.take() else {
            return;
        };
        let Ok(mut mounted) = shared.try_borrow_mut() else {
            log::warn!("carousel disposed while busy; listeners removed");
            return;
        };
        mounted.carousel.dispose();
        mounted.pump();
        mounted.raf.stop();
        mounted.timer.clear();
        mounted.surface.clear();
        log::debug!("carousel unmounted");
    }
}

impl Drop for WebCarousel {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn query_slides(track: &HtmlElement, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = track.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn touch_point(event: &Event) -> Option<Point> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(Point::new(
        f64::from(touch.page_x()),
        f64::from(touch.page_y()),
    ))
}

/// Registers resize and touch listeners.
fn attach(
    window: &web_sys::Window,
    track: &HtmlElement,
    weak: &Weak<RefCell<Mounted>>,
) -> Result<Vec<Listener>, JsValue> {
    let window: &EventTarget = window.as_ref();
    let track: &EventTarget = track.as_ref();
    let mut listeners = Vec::with_capacity(5);

    for event in ["resize", "orientationchange"] {
        let weak = weak.clone();
        listeners.push(Listener::new(window, event, true, move |_| {
            dispatch_weak(&weak, |c| c.reconfigure(viewport_width()));
        })?);
    }

    let start = weak.clone();
    listeners.push(Listener::new(track, "touchstart", true, move |event| {
        if let Some(at) = touch_point(&event) {
            dispatch_weak(&start, |c| c.gesture_start(at, pointer_kind()));
        }
    })?);

    // Not passive: a horizontal swipe must be able to cancel scrolling.
    let moving = weak.clone();
    listeners.push(Listener::new(track, "touchmove", false, move |event| {
        let Some(at) = touch_point(&event) else {
            return;
        };
        let suppress = dispatch_weak(&moving, |c| c.gesture_move(at, pointer_kind()));
        if suppress == Some(true) && event.cancelable() {
            event.prevent_default();
        }
    })?);

    let end = weak.clone();
    listeners.push(Listener::new(track, "touchend", true, move |event| {
        if let Some(at) = touch_point(&event) {
            dispatch_weak(&end, |c| c.gesture_end(at));
        }
    })?);

    Ok(listeners)
}
