// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel options and breakpoint resolution.
//!
//! [`Options`] is the effective configuration the engine runs with. A
//! [`Breakpoints`] table maps minimum viewport widths to partial
//! [`Overrides`] of the base options. [`resolve`] picks the override whose
//! threshold is the greatest one not exceeding the viewport width
//! ("mobile-first cascade") and overlays it on the base.
//!
//! The carousel compares the *identity* of the selected breakpoint between
//! resolutions, not the resulting values: moving from one breakpoint to
//! another with identical fields still rebuilds.
//!
//! # Defaults
//!
//! | field              | default  |
//! |--------------------|----------|
//! | `looping`          | `false`  |
//! | `autoplay`         | `false`  |
//! | `autoplay_speed`   | 3000 ms  |
//! | `transition_speed` | 650 ms   |
//! | `slides_per_page`  | 1        |
//! | `spacing`          | 0 px     |

use alloc::collections::BTreeMap;

use crate::gesture::SwipeThresholds;
use crate::time::Duration;

/// Identity of the breakpoint an [`Options`] value was resolved from.
///
/// `None` means no threshold qualified and the base options are in effect.
pub type BreakpointId = Option<u32>;

/// Effective carousel configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Whether navigation wraps around at either end.
    pub looping: bool,
    /// Whether the carousel advances on its own.
    pub autoplay: bool,
    /// Interval between autoplay advances.
    pub autoplay_speed: Duration,
    /// Duration of one page transition.
    pub transition_speed: Duration,
    /// Number of slides shown (and advanced) per page. Must be at least 1.
    pub slides_per_page: u32,
    /// Gap between adjacent slides, in pixels. Must be finite and `>= 0`.
    pub spacing: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            looping: false,
            autoplay: false,
            autoplay_speed: Duration::from_millis(3000),
            transition_speed: Duration::from_millis(650),
            slides_per_page: 1,
            spacing: 0.0,
        }
    }
}

impl Options {
    /// A looping, autoplaying single-slide configuration (hero banners).
    #[must_use]
    pub fn slideshow() -> Self {
        Self {
            looping: true,
            autoplay: true,
            ..Self::default()
        }
    }

    /// Returns these options with every field present in `overrides`
    /// replaced.
    #[must_use]
    pub fn overlay(self, overrides: &Overrides) -> Self {
        Self {
            looping: overrides.looping.unwrap_or(self.looping),
            autoplay: overrides.autoplay.unwrap_or(self.autoplay),
            autoplay_speed: overrides.autoplay_speed.unwrap_or(self.autoplay_speed),
            transition_speed: overrides.transition_speed.unwrap_or(self.transition_speed),
            slides_per_page: overrides.slides_per_page.unwrap_or(self.slides_per_page),
            spacing: overrides.spacing.unwrap_or(self.spacing),
        }
    }

    /// Checks the options for values that would make the paging math
    /// meaningless.
    ///
    /// `breakpoint` is only used to label the error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    pub fn validate(&self, breakpoint: BreakpointId) -> Result<(), ConfigError> {
        if self.slides_per_page == 0 {
            return Err(ConfigError::ZeroSlidesPerPage { breakpoint });
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigError::InvalidSpacing {
                breakpoint,
                spacing: self.spacing,
            });
        }
        if self.autoplay_speed.is_zero() {
            return Err(ConfigError::ZeroAutoplaySpeed { breakpoint });
        }
        Ok(())
    }
}

/// A partial [`Options`] value attached to a breakpoint.
///
/// Unset fields fall through to the base options.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Overrides [`Options::looping`].
    pub looping: Option<bool>,
    /// Overrides [`Options::autoplay`].
    pub autoplay: Option<bool>,
    /// Overrides [`Options::autoplay_speed`].
    pub autoplay_speed: Option<Duration>,
    /// Overrides [`Options::transition_speed`].
    pub transition_speed: Option<Duration>,
    /// Overrides [`Options::slides_per_page`].
    pub slides_per_page: Option<u32>,
    /// Overrides [`Options::spacing`].
    pub spacing: Option<f64>,
}

impl Overrides {
    /// Sets the looping override.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    /// Sets the autoplay override.
    #[must_use]
    pub const fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    /// Sets the autoplay interval override.
    #[must_use]
    pub const fn with_autoplay_speed(mut self, speed: Duration) -> Self {
        self.autoplay_speed = Some(speed);
        self
    }

    /// Sets the transition duration override.
    #[must_use]
    pub const fn with_transition_speed(mut self, speed: Duration) -> Self {
        self.transition_speed = Some(speed);
        self
    }

    /// Sets the slides-per-page override.
    #[must_use]
    pub const fn with_slides_per_page(mut self, slides: u32) -> Self {
        self.slides_per_page = Some(slides);
        self
    }

    /// Sets the spacing override, in pixels.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

/// Minimum-width thresholds (in pixels) mapped to option overrides.
pub type Breakpoints = BTreeMap<u32, Overrides>;

/// The outcome of [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved {
    /// Base options overlaid with the selected override.
    pub options: Options,
    /// Threshold of the selected override, or `None` for the base options.
    pub breakpoint: BreakpointId,
}

/// Resolves the effective options for a viewport width.
///
/// Thresholds are scanned from largest to smallest and the first one
/// `<= viewport_width` wins. If none qualifies the base options are returned
/// unchanged.
#[must_use]
pub fn resolve(base: &Options, breakpoints: &Breakpoints, viewport_width: f64) -> Resolved {
    let selected = breakpoints
        .iter()
        .rev()
        .find(|&(&threshold, _)| f64::from(threshold) <= viewport_width);

    match selected {
        Some((&threshold, overrides)) => Resolved {
            options: base.overlay(overrides),
            breakpoint: Some(threshold),
        },
        None => Resolved {
            options: *base,
            breakpoint: None,
        },
    }
}

/// Everything needed to construct a carousel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselConfig {
    /// Base options, in effect below the smallest breakpoint.
    pub options: Options,
    /// Breakpoint overrides keyed by minimum viewport width.
    pub breakpoints: Breakpoints,
    /// Swipe recognition thresholds.
    pub swipe: SwipeThresholds,
}

impl CarouselConfig {
    /// Creates a configuration with the given base options and no
    /// breakpoints.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Adds (or replaces) a breakpoint override.
    #[must_use]
    pub fn with_breakpoint(mut self, min_width: u32, overrides: Overrides) -> Self {
        self.breakpoints.insert(min_width, overrides);
        self
    }

    /// Validates the base options and the result of overlaying every
    /// breakpoint on them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, base options first, then
    /// breakpoints in ascending threshold order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options.validate(None)?;
        for (&threshold, overrides) in &self.breakpoints {
            self.options
                .overlay(overrides)
                .validate(Some(threshold))?;
        }
        Ok(())
    }
}

/// Configuration that cannot drive the carousel.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `slides_per_page` was zero.
    #[error("slides_per_page must be at least 1 (breakpoint {breakpoint:?})")]
    ZeroSlidesPerPage {
        /// Breakpoint the value came from; `None` for the base options.
        breakpoint: BreakpointId,
    },
    /// `spacing` was negative or not finite.
    #[error("spacing must be a finite, non-negative pixel value, got {spacing} (breakpoint {breakpoint:?})")]
    InvalidSpacing {
        /// Breakpoint the value came from; `None` for the base options.
        breakpoint: BreakpointId,
        /// The rejected value.
        spacing: f64,
    },
    /// `autoplay_speed` was zero.
    #[error("autoplay_speed must be non-zero (breakpoint {breakpoint:?})")]
    ZeroAutoplaySpeed {
        /// Breakpoint the value came from; `None` for the base options.
        breakpoint: BreakpointId,
    },
}
