use log::{debug, info};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// One entry of `games.json`.
///
/// Only `name` is required. Empty strings are treated the same as missing
/// fields, so `"path": ""` does not count as a launch target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub emulator: Option<PathBuf>,
    #[serde(default)]
    pub rom: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Run an executable with no arguments.
    Direct { program: PathBuf },
    /// Run `emulator rom`.
    Emulated { emulator: PathBuf, rom: PathBuf },
}

fn present(path: &Option<PathBuf>) -> Option<&PathBuf> {
    path.as_ref().filter(|p| !p.as_os_str().is_empty())
}

impl GameRecord {
    /// A direct `path` wins over an emulator/ROM pair. Returns `None` when
    /// neither is complete.
    pub fn launch_target(&self) -> Option<LaunchTarget> {
        if let Some(program) = present(&self.path) {
            return Some(LaunchTarget::Direct {
                program: program.clone(),
            });
        }

        match (present(&self.emulator), present(&self.rom)) {
            (Some(emulator), Some(rom)) => Some(LaunchTarget::Emulated {
                emulator: emulator.clone(),
                rom: rom.clone(),
            }),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&Path> {
        present(&self.image).map(PathBuf::as_path)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// True when the catalog file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// The ordered list of games shown in the grid.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<GameRecord>,
    base_dir: PathBuf,
}

impl Catalog {
    pub fn new(games: Vec<GameRecord>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            games,
            base_dir: base_dir.into(),
        }
    }

    pub fn empty(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(Vec::new(), base_dir)
    }

    /// Load a JSON array of records. Relative cover paths are later resolved
    /// against `base_dir`.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let games: Vec<GameRecord> =
            serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded {} games from {}", games.len(), path.display());
        Ok(Self::new(games, base_dir))
    }

    pub fn from_json_str(text: &str, base_dir: impl Into<PathBuf>) -> serde_json::Result<Self> {
        let games: Vec<GameRecord> = serde_json::from_str(text)?;
        Ok(Self::new(games, base_dir))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GameRecord> {
        self.games.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute (or base-relative) location of the cover for `index`.
    pub fn cover_path(&self, index: usize) -> Option<PathBuf> {
        let image = self.games.get(index)?.image()?;
        let resolved = if image.is_absolute() {
            image.to_path_buf()
        } else {
            self.base_dir.join(image)
        };
        debug!("Cover for #{index} resolves to {}", resolved.display());
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_path_wins_over_emulator() {
        let game = GameRecord {
            name: "Both".into(),
            path: Some("/bin/game".into()),
            emulator: Some("/bin/emu".into()),
            rom: Some("rom.bin".into()),
            ..Default::default()
        };
        assert_eq!(
            game.launch_target(),
            Some(LaunchTarget::Direct {
                program: "/bin/game".into()
            })
        );
    }

    #[test]
    fn empty_path_falls_back_to_emulator_pair() {
        let game = GameRecord {
            name: "Blank".into(),
            path: Some(PathBuf::new()),
            emulator: Some("mame".into()),
            rom: Some("pacman.zip".into()),
            ..Default::default()
        };
        assert_eq!(
            game.launch_target(),
            Some(LaunchTarget::Emulated {
                emulator: "mame".into(),
                rom: "pacman.zip".into()
            })
        );
    }

    #[test]
    fn half_an_emulator_pair_is_not_a_target() {
        let game = GameRecord {
            name: "Emu only".into(),
            emulator: Some("mame".into()),
            ..Default::default()
        };
        assert_eq!(game.launch_target(), None);

        let game = GameRecord {
            name: "Rom only".into(),
            rom: Some("pacman.zip".into()),
            ..Default::default()
        };
        assert_eq!(game.launch_target(), None);
    }

    #[test]
    fn cover_paths_resolve_against_base_dir() {
        let catalog = Catalog::from_json_str(
            r#"[{"name": "A", "image": "covers/a.png"}, {"name": "B"}, {"name": "C", "image": ""}]"#,
            "/opt/arcade",
        )
        .unwrap();

        assert_eq!(
            catalog.cover_path(0),
            Some(PathBuf::from("/opt/arcade/covers/a.png"))
        );
        assert_eq!(catalog.cover_path(1), None);
        assert_eq!(catalog.cover_path(2), None);
        assert_eq!(catalog.cover_path(3), None);
    }
}
