//! Which tile holds keyboard focus, and the zoom controller of every tile.
//!
//! A tile only counts as focused while the launcher window itself has OS
//! focus. Switching away from the window is focus loss for the focused tile
//! and switching back is focus gain.

use crate::zoom::{FocusZoom, ZoomEvent, ZoomTiming};
use log::debug;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TileFocus {
    timing: ZoomTiming,
    focus: Option<usize>,
    /// One controller per tile, index-aligned with the catalog.
    zooms: Vec<FocusZoom>,
    window_focused: bool,
}

impl TileFocus {
    pub fn new(timing: ZoomTiming, len: usize) -> Self {
        Self {
            timing,
            focus: None,
            zooms: vec![FocusZoom::new(timing); len],
            window_focused: true,
        }
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn zoom(&self, index: usize) -> Option<&FocusZoom> {
        self.zooms.get(index)
    }

    pub fn zooms(&self) -> impl Iterator<Item = (usize, &FocusZoom)> {
        self.zooms.iter().enumerate()
    }

    /// Start over for a catalog of `len` tiles. Every overlay is dropped and
    /// no tile keeps focus.
    pub fn rebuild(&mut self, len: usize) {
        self.zooms.iter_mut().for_each(FocusZoom::reset);
        self.zooms.resize(len, FocusZoom::new(self.timing));
        self.focus = None;
    }

    /// Move focus to `index`. The old tile loses focus before the new one
    /// gains it, and the new one only gains it while the window is focused.
    /// Returns whether focus moved.
    pub fn set_focus(&mut self, index: usize, now: Instant) -> bool {
        if self.focus == Some(index) || index >= self.zooms.len() {
            return false;
        }
        if let Some(old) = self.focus
            && let Some(zoom) = self.zooms.get_mut(old)
        {
            zoom.focus_lost(now);
        }
        if self.window_focused {
            self.zooms[index].focus_gained(now);
        }
        self.focus = Some(index);
        true
    }

    pub fn set_window_focused(&mut self, focused: bool, now: Instant) {
        if self.window_focused == focused {
            return;
        }
        self.window_focused = focused;
        let Some(zoom) = self.focus.and_then(|i| self.zooms.get_mut(i)) else {
            return;
        };
        if focused {
            zoom.focus_gained(now);
        } else {
            zoom.focus_lost(now);
        }
    }

    /// Advance every busy tile. `has_cover` is asked for tiles whose debounce
    /// fires.
    pub fn tick(&mut self, now: Instant, has_cover: impl Fn(usize) -> bool) {
        for (index, zoom) in self.zooms.iter_mut().enumerate() {
            if zoom.is_idle() {
                continue;
            }
            let has_focus = self.window_focused && self.focus == Some(index);
            match zoom.tick(now, has_focus, has_cover(index)) {
                ZoomEvent::Opened => debug!("Overlay opened for tile {index}"),
                ZoomEvent::Discarded => debug!("Overlay discarded for tile {index}"),
                ZoomEvent::Skipped | ZoomEvent::Unchanged => {}
            }
        }
    }

    /// Earliest [`FocusZoom::next_deadline`] over all tiles.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.zooms
            .iter()
            .filter_map(|zoom| zoom.next_deadline(now))
            .min()
    }
}
