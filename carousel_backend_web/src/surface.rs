// Copyright 2026 the Subduction Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM surface.
//!
//! Translates [`SurfaceChanges`] into inline CSS on the carousel's track and
//! slide elements. The track is a single-row CSS grid whose auto columns are
//! sized so that `slides_per_page` slides and their gaps fill the viewport;
//! the track itself is moved with `left`, and displaced slides are moved with
//! their own `left`, which for a grid item resolves against its grid area.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use carousel_core::surface::{GridLayout, Placement, SurfaceChanges, VisualSurface};
use web_sys::HtmlElement;

/// Inline properties the surface writes on the track.
const TRACK_PROPERTIES: [&str; 6] = [
    "display",
    "grid-auto-flow",
    "grid-auto-columns",
    "gap",
    "position",
    "left",
];

/// Inline properties the surface writes on slides.
const SLIDE_PROPERTIES: [&str; 2] = ["position", "left"];

/// Applies carousel surface changes to live DOM elements.
pub struct DomSurface {
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    spacing: f64,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("track", &"HtmlElement")
            .field("slides_len", &self.slides.len())
            .field("spacing", &self.spacing)
            .finish()
    }
}

impl DomSurface {
    /// Creates a surface over `track` and its `slides`, in order.
    #[must_use]
    pub fn new(track: HtmlElement, slides: Vec<HtmlElement>) -> Self {
        Self {
            track,
            slides,
            spacing: 0.0,
        }
    }

    /// Returns the track element.
    #[must_use]
    pub fn track(&self) -> &HtmlElement {
        &self.track
    }

    /// Returns the slide elements, in order.
    #[must_use]
    pub fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    /// Replaces the slide elements, clearing styles on the old ones.
    pub fn set_slides(&mut self, slides: Vec<HtmlElement>) {
        for slide in &self.slides {
            clear_properties(slide, &SLIDE_PROPERTIES);
        }
        self.slides = slides;
    }

    /// Removes every inline property the surface has written.
    pub fn clear(&mut self) {
        clear_properties(&self.track, &TRACK_PROPERTIES);
        for slide in &self.slides {
            clear_properties(slide, &SLIDE_PROPERTIES);
        }
    }

    fn apply_layout(&mut self, layout: &GridLayout) {
        self.spacing = layout.spacing;
        let s = self.track.style();
        let _ = s.set_property("display", "grid");
        let _ = s.set_property("grid-auto-flow", "column");
        let _ = s.set_property("position", "relative");
        let _ = s.set_property(
            "grid-auto-columns",
            &format!(
                "calc({}% - {}px)",
                layout.slide_fraction() * 100.0,
                layout.gap_share()
            ),
        );
        let _ = s.set_property("gap", &format!("{}px", layout.spacing));
        for slide in &self.slides {
            let _ = slide.style().set_property("position", "relative");
        }
    }

    fn place(&self, slide: usize, placement: Placement) {
        let Some(el) = self.slides.get(slide) else {
            log::warn!("placement for missing slide {slide}");
            return;
        };
        let _ = match placement {
            Placement::Natural => el.style().remove_property("left").map(drop),
            Placement::Shifted { slides } => el
                .style()
                .set_property("left", &shift_css(slides as f64, self.spacing)),
        };
    }
}

impl VisualSurface for DomSurface {
    fn apply(&mut self, changes: &SurfaceChanges) {
        // 1. Layout
        if let Some(layout) = &changes.layout {
            self.apply_layout(layout);
        }

        // 2. Placement reset
        if changes.reset_placements {
            for slide in &self.slides {
                let _ = slide.style().remove_property("left");
            }
        }

        // 3. Per-slide placements
        for &(slide, placement) in &changes.placements {
            self.place(slide, placement);
        }

        // 4. Track offset
        if let Some(offset) = changes.track_offset {
            let _ = self
                .track
                .style()
                .set_property("left", &shift_css(-offset, self.spacing));
        }
    }
}

/// `left` value moving an element by `units` of its reference width plus
/// one gap per unit.
fn shift_css(units: f64, spacing: f64) -> String {
    format!("calc({}% + {}px)", units * 100.0, units * spacing)
}

fn clear_properties(el: &HtmlElement, properties: &[&str]) {
    let s = el.style();
    for property in properties {
        let _ = s.remove_property(property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_includes_one_gap_per_unit() {
        assert_eq!(shift_css(2.0, 10.0), "calc(200% + 20px)");
        assert_eq!(shift_css(-1.5, 8.0), "calc(-150% + -12px)");
        assert_eq!(shift_css(0.0, 30.0), "calc(0% + 0px)");
    }
}
