use crate::background::{Background, FALLBACK_FILL};
use crate::covers::CoverCache;
#[cfg(not(target_os = "android"))]
use crate::gamepad::Gamepads;
use crate::keybinds::{Action, KeyBindings};
use crate::ui::{
    grid_view::{GridResponse, GridView},
    overlay,
};
use crate::ui_config::UiConfig;
use arcade_core::{
    catalog::Catalog,
    focus::TileFocus,
    grid::GridLayout,
    launch::{self, SystemSpawner},
};
use eframe::egui::{self, Color32, CornerRadius, LayerId, Margin, Modifiers};
use log::{debug, error, info};
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[cfg(not(target_os = "android"))]
const GAMEPAD_POLL: Duration = Duration::from_millis(16);

pub struct LauncherApp {
    config: UiConfig,
    keybinds: KeyBindings,
    catalog_path: PathBuf,
    catalog: Catalog,
    covers: CoverCache,
    background: Option<Background>,
    started: Instant,
    tiles: TileFocus,
    scroll_to_focus: bool,
    spawner: SystemSpawner,
    #[cfg(not(target_os = "android"))]
    gamepads: Option<Gamepads>,
}

fn read_catalog(path: &Path, base_dir: &Path) -> Option<Catalog> {
    match Catalog::load_from_file(path, base_dir) {
        Ok(catalog) => Some(catalog),
        Err(e) if e.is_not_found() => {
            error!("Catalog file {} not found", path.display());
            None
        }
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

impl LauncherApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: UiConfig, keybinds: KeyBindings) -> Self {
        let ctx = &cc.egui_ctx;
        ctx.set_visuals(egui::Visuals::dark());
        ctx.style_mut(|style| {
            style.visuals.override_text_color = Some(crate::ui::grid_view::TEXT_COLOR);
        });

        let catalog_path = config.catalog_path();
        let base_dir = config.base_dir();
        let catalog =
            read_catalog(&catalog_path, &base_dir).unwrap_or_else(|| Catalog::empty(&base_dir));
        let background = Background::load(ctx, &config.background_path());
        let tiles = TileFocus::new(config.zoom_timing(), 0);

        let mut app = Self {
            config,
            keybinds,
            catalog_path,
            catalog: Catalog::empty(&base_dir),
            covers: CoverCache::default(),
            background,
            started: Instant::now(),
            tiles,
            scroll_to_focus: false,
            spawner: SystemSpawner::default(),
            #[cfg(not(target_os = "android"))]
            gamepads: Gamepads::new(),
        };
        app.set_catalog(ctx, catalog, Instant::now());
        app
    }

    fn grid(&self) -> GridLayout {
        GridLayout::new(self.config.columns, self.catalog.len())
    }

    fn set_catalog(&mut self, ctx: &egui::Context, catalog: Catalog, now: Instant) {
        self.covers = CoverCache::load(ctx, &catalog);
        self.tiles.rebuild(catalog.len());
        self.catalog = catalog;
        if !self.catalog.is_empty() {
            self.set_focus(0, now);
        }
    }

    fn reload(&mut self, ctx: &egui::Context, path: PathBuf, now: Instant) {
        let base_dir = self.config.base_dir();
        if let Some(catalog) = read_catalog(&path, &base_dir) {
            self.catalog_path = path;
            self.set_catalog(ctx, catalog, now);
        }
    }

    fn set_focus(&mut self, index: usize, now: Instant) {
        if self.tiles.set_focus(index, now) {
            self.scroll_to_focus = true;
        }
    }

    fn launch(&mut self, index: usize) {
        let Some(game) = self.catalog.get(index) else {
            return;
        };
        match launch::launch(game, &mut self.spawner) {
            Ok(target) => debug!("Tile {index} launched as {target:?}"),
            Err(e) => debug!("Tile {index} not launched: {e}"),
        }
    }

    fn key_actions(&self, ctx: &egui::Context) -> Vec<Action> {
        ctx.input_mut(|input| {
            self.keybinds
                .iter()
                .filter(|&(key, action)| {
                    let modifiers = if action == Action::OpenCatalog {
                        Modifiers::COMMAND
                    } else {
                        Modifiers::NONE
                    };
                    input.consume_key(modifiers, key)
                })
                .map(|(_, action)| action)
                .collect()
        })
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action, now: Instant) {
        match action {
            Action::Move(dir) => match self.tiles.focus() {
                Some(current) => {
                    if let Some(next) = self.grid().step(current, dir) {
                        self.set_focus(next, now);
                    }
                }
                None if !self.catalog.is_empty() => self.set_focus(0, now),
                None => {}
            },
            Action::Launch => {
                if let Some(index) = self.tiles.focus() {
                    self.launch(index);
                }
            }
            Action::Reload => {
                info!("Reloading {}", self.catalog_path.display());
                self.reload(ctx, self.catalog_path.clone(), now);
            }
            Action::OpenCatalog => {
                let picked = FileDialog::new()
                    .add_filter("Game list", &["json"])
                    .set_directory(self.config.base_dir())
                    .pick_file();
                if let Some(path) = picked {
                    self.reload(ctx, path, now);
                }
            }
            Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn paint_overlays(&self, ctx: &egui::Context, grid: &GridResponse, now: Instant) {
        let painter = overlay::overlay_painter(ctx);
        let mut frames: Vec<_> = self
            .tiles
            .zooms()
            .filter_map(|(index, zoom)| {
                let anchor = grid.tiles.get(index)?;
                let cover = self.covers.get(index)?;
                let frame = zoom.overlay(now, overlay::from_egui(*anchor))?;
                Some((cover, frame))
            })
            .collect();

        // Shrinking overlays go underneath the one that is growing.
        frames.sort_by_key(|(_, frame)| !frame.closing);
        for (cover, frame) in frames {
            overlay::paint(&painter, cover, &frame);
        }
    }

    fn paint_background(&self, ctx: &egui::Context, now: Instant) -> Option<Duration> {
        let painter = ctx.layer_painter(LayerId::background());
        let screen = ctx.screen_rect();
        match &self.background {
            Some(bg) => bg.paint(&painter, screen, now - self.started),
            None => {
                painter.rect_filled(screen, CornerRadius::ZERO, FALLBACK_FILL);
                None
            }
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant, background: Option<Duration>) {
        let zooms = self
            .tiles
            .next_deadline(now)
            .map(|deadline| deadline.saturating_duration_since(now));

        #[cfg(not(target_os = "android"))]
        let poll = self
            .gamepads
            .as_ref()
            .is_some_and(Gamepads::any_connected)
            .then_some(GAMEPAD_POLL);
        #[cfg(target_os = "android")]
        let poll = None;

        match repaint_wait(zooms, background, poll) {
            Some(d) if d.is_zero() => ctx.request_repaint(),
            Some(d) => ctx.request_repaint_after(d),
            None => {}
        }
    }
}

/// Shortest of the pending waits. `None` means the app can sleep until the
/// next input event.
fn repaint_wait(
    zooms: Option<Duration>,
    background: Option<Duration>,
    gamepad_poll: Option<Duration>,
) -> Option<Duration> {
    [zooms, background, gamepad_poll].into_iter().flatten().min()
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let focused = ctx.input(|i| i.focused);
        self.tiles.set_window_focused(focused, now);
        self.spawner.reap();

        let mut actions = self.key_actions(ctx);
        #[cfg(not(target_os = "android"))]
        if let Some(pads) = self.gamepads.as_mut() {
            actions.extend(pads.poll());
        }
        for action in actions {
            self.apply(ctx, action, now);
        }

        let covers = &self.covers;
        self.tiles.tick(now, |index| covers.has_cover(index));
        let background = self.paint_background(ctx, now);

        let panel = egui::Frame::new()
            .fill(Color32::from_black_alpha(51))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(Margin::same(20));

        let scroll_to = self.scroll_to_focus.then_some(self.tiles.focus()).flatten();
        let grid = egui::CentralPanel::default()
            .frame(panel)
            .show(ctx, |ui| {
                GridView {
                    catalog: &self.catalog,
                    covers: &self.covers,
                    columns: self.config.columns,
                    focus: self.tiles.focus(),
                    scroll_to,
                }
                .show(ui)
            })
            .inner;
        self.scroll_to_focus = false;

        if let Some(index) = grid.clicked {
            self.set_focus(index, now);
            self.scroll_to_focus = false;
            self.launch(index);
        }

        self.paint_overlays(ctx, &grid, now);
        self.schedule_repaint(ctx, now, background);
    }
}
