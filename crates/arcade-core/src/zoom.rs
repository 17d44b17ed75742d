//! Focus-driven cover zoom.
//!
//! Every grid tile owns one [`FocusZoom`]. When the tile gains keyboard focus
//! a debounce timer starts. If focus is still there when the timer fires, an
//! enlarged copy of the cover (the overlay) grows out of the tile with a glow
//! around it. Losing focus either cancels the pending timer, in which case the
//! overlay is never created, or shrinks the overlay back onto the tile and
//! discards it.
//!
//! Flicking the cursor across many tiles therefore never creates overlays for
//! the tiles that were only passed over.
//!
//! The controller keeps no clock of its own. The frontend passes `Instant`s in
//! and asks [`FocusZoom::next_deadline`] when it needs to wake up again.

use crate::anim::{Easing, Rect, Tween};
use std::time::{Duration, Instant};

/// Timing and size parameters shared by all tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTiming {
    /// Delay between focus gain and overlay creation.
    pub debounce: Duration,
    /// Grow animation length.
    pub zoom_in: Duration,
    /// Shrink animation length.
    pub zoom_out: Duration,
    /// Overlay size relative to the tile at full zoom.
    pub grow: f32,
    /// Glow blur radius at full zoom, in pixels.
    pub glow_radius: f32,
}

impl Default for ZoomTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            zoom_in: Duration::from_millis(150),
            zoom_out: Duration::from_millis(100),
            grow: 1.30,
            glow_radius: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pending {
        due: Instant,
    },
    Open {
        tween: Tween,
    },
    Closing {
        tween: Tween,
        from_amount: f32,
        from_glow: f32,
    },
}

/// What a [`FocusZoom::tick`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomEvent {
    Unchanged,
    /// The debounce fired and the overlay now exists.
    Opened,
    /// The debounce fired but the tile lost focus or has no cover.
    Skipped,
    /// The shrink animation finished and the overlay is gone.
    Discarded,
}

/// Where and how to paint the overlay for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub rect: Rect,
    /// Glow blur radius in pixels.
    pub glow: f32,
    /// 0.0 at tile size, 1.0 at full zoom.
    pub amount: f32,
    pub closing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusZoom {
    timing: ZoomTiming,
    phase: Phase,
}

impl Default for FocusZoom {
    fn default() -> Self {
        Self::new(ZoomTiming::default())
    }
}

impl FocusZoom {
    pub fn new(timing: ZoomTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
        }
    }

    /// Start the debounce. A tile that is still shrinking its previous
    /// overlay drops it so it never owns two.
    ///
    /// A debounce that is already pending keeps its original due time; it is
    /// not restarted.
    pub fn focus_gained(&mut self, now: Instant) {
        match self.phase {
            Phase::Idle | Phase::Closing { .. } => {
                self.phase = Phase::Pending {
                    due: now + self.timing.debounce,
                };
            }
            Phase::Pending { .. } | Phase::Open { .. } => {}
        }
    }

    /// Cancel a pending debounce, or start shrinking an open overlay from
    /// wherever its grow animation currently is.
    pub fn focus_lost(&mut self, now: Instant) {
        match self.phase {
            Phase::Pending { .. } => self.phase = Phase::Idle,
            Phase::Open { tween } => {
                self.phase = Phase::Closing {
                    tween: Tween::new(now, self.timing.zoom_out, Easing::InQuad),
                    from_amount: tween.progress(now),
                    from_glow: self.open_glow(&tween, now),
                };
            }
            Phase::Idle | Phase::Closing { .. } => {}
        }
    }

    /// Advance timers. `has_focus` and `has_cover` are re-checked when the
    /// debounce fires; the overlay opens only if both still hold.
    pub fn tick(&mut self, now: Instant, has_focus: bool, has_cover: bool) -> ZoomEvent {
        match self.phase {
            Phase::Pending { due } if now >= due => {
                if has_focus && has_cover {
                    self.phase = Phase::Open {
                        tween: Tween::new(now, self.timing.zoom_in, Easing::OutCubic),
                    };
                    ZoomEvent::Opened
                } else {
                    self.phase = Phase::Idle;
                    ZoomEvent::Skipped
                }
            }
            Phase::Closing { tween, .. } if tween.is_finished(now) => {
                self.phase = Phase::Idle;
                ZoomEvent::Discarded
            }
            _ => ZoomEvent::Unchanged,
        }
    }

    /// Drop everything immediately, as when the catalog is reloaded.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    pub fn has_overlay(&self) -> bool {
        matches!(self.phase, Phase::Open { .. } | Phase::Closing { .. })
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing { .. })
    }

    /// Overlay geometry for a tile currently placed at `anchor`.
    ///
    /// The anchor is passed on every frame so the overlay follows the tile
    /// when the grid scrolls.
    pub fn overlay(&self, now: Instant, anchor: Rect) -> Option<OverlayFrame> {
        let (amount, glow, closing) = match self.phase {
            Phase::Idle | Phase::Pending { .. } => return None,
            Phase::Open { tween } => (tween.progress(now), self.open_glow(&tween, now), false),
            Phase::Closing {
                tween,
                from_amount,
                from_glow,
            } => {
                let remaining = 1.0 - tween.progress(now);
                (from_amount * remaining, from_glow * remaining, true)
            }
        };

        let full = anchor.scaled_about_center(self.timing.grow);
        Some(OverlayFrame {
            rect: anchor.lerp(&full, amount),
            glow,
            amount,
            closing,
        })
    }

    /// When the frontend should next call [`tick`](Self::tick) or repaint.
    /// `None` means nothing will change without new input.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pending { due } => Some(due),
            Phase::Open { tween } => (!tween.is_finished(now)).then_some(now),
            Phase::Closing { .. } => Some(now),
        }
    }

    // Glow grows linearly with time rather than following the size easing.
    fn open_glow(&self, tween: &Tween, now: Instant) -> f32 {
        self.timing.glow_radius * tween.elapsed_fraction(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: Rect = Rect::new(20.0, 20.0, 200.0, 262.0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn debounce_fires_only_after_delay() {
        let t0 = Instant::now();
        let mut zoom = FocusZoom::default();
        zoom.focus_gained(t0);

        assert_eq!(zoom.tick(t0 + ms(99), true, true), ZoomEvent::Unchanged);
        assert!(zoom.is_pending());
        assert_eq!(zoom.tick(t0 + ms(100), true, true), ZoomEvent::Opened);
        assert!(zoom.has_overlay());
    }

    #[test]
    fn refocusing_does_not_restart_the_timer() {
        let t0 = Instant::now();
        let mut zoom = FocusZoom::default();
        zoom.focus_gained(t0);
        zoom.focus_gained(t0 + ms(80));
        assert_eq!(zoom.next_deadline(t0 + ms(80)), Some(t0 + ms(100)));
    }

    #[test]
    fn overlay_follows_anchor() {
        let t0 = Instant::now();
        let mut zoom = FocusZoom::default();
        zoom.focus_gained(t0);
        zoom.tick(t0 + ms(100), true, true);

        let moved = Rect::new(20.0, -80.0, 200.0, 262.0);
        let frame = zoom.overlay(t0 + ms(500), moved).unwrap();
        assert_eq!(frame.rect.center(), moved.center());
    }

    #[test]
    fn regaining_focus_while_closing_drops_the_old_overlay() {
        let t0 = Instant::now();
        let mut zoom = FocusZoom::default();
        zoom.focus_gained(t0);
        zoom.tick(t0 + ms(100), true, true);
        zoom.focus_lost(t0 + ms(400));
        assert!(zoom.is_closing());

        zoom.focus_gained(t0 + ms(420));
        assert!(zoom.is_pending());
        assert!(zoom.overlay(t0 + ms(420), TILE).is_none());
    }
}
