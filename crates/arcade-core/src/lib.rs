//! Toolkit-independent logic for the arcade launcher.
//!
//! This crate owns everything the launcher decides: which games exist, where
//! keyboard focus may move, when a cover overlay opens or closes, and how a
//! game is started. The desktop frontend lives in a separate crate and only
//! paints what this crate reports.

/// Easing curves, tweens and a plain rectangle type.
pub mod anim;

/// Game records and the JSON catalog they are loaded from.
pub mod catalog;

/// Tile focus and OS window focus bookkeeping.
pub mod focus;

/// Grid geometry and arrow-key navigation.
pub mod grid;

/// Fire-and-forget process launching.
pub mod launch;

/// Per-tile debounce and overlay zoom state machine.
pub mod zoom;

pub use anim::{Easing, Rect, Tween};
pub use catalog::{Catalog, CatalogError, GameRecord, LaunchTarget};
pub use focus::TileFocus;
pub use grid::{Direction, GridLayout};
pub use launch::{LaunchError, Spawner, SystemSpawner};
pub use zoom::{FocusZoom, OverlayFrame, ZoomEvent, ZoomTiming};
