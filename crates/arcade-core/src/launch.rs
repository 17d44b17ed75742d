use crate::catalog::{GameRecord, LaunchTarget};
use log::{debug, error, info, warn};
use std::{
    ffi::OsStr,
    io,
    path::Path,
    process::{Child, Command, Stdio},
};
use thiserror::Error;

/// Starts external programs. The launcher never waits on what it starts.
pub trait Spawner {
    fn spawn(&mut self, program: &Path, args: &[&OsStr]) -> io::Result<()>;
}

/// Spawns real processes with inherited stdio.
///
/// Children are kept only until they exit. [`reap`](Self::reap) collects the
/// finished ones without blocking; it runs before every spawn and the
/// frontend also calls it once per frame.
#[derive(Debug, Default)]
pub struct SystemSpawner {
    children: Vec<Child>,
}

impl SystemSpawner {
    pub fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("pid {} exited ({status})", child.id());
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Lost track of pid {}: {e}", child.id());
                false
            }
        });
    }

    /// Children started by this spawner that have not been reaped yet.
    pub fn running(&self) -> usize {
        self.children.len()
    }
}

impl Spawner for SystemSpawner {
    fn spawn(&mut self, program: &Path, args: &[&OsStr]) -> io::Result<()> {
        self.reap();
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()?;
        info!("Started {} (pid {})", program.display(), child.id());
        self.children.push(child);
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("no path or emulator/ROM pair for {name}")]
    NoTarget { name: String },

    #[error("failed to launch {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Start `game` once. Failures are logged here and also returned.
pub fn launch(game: &GameRecord, spawner: &mut dyn Spawner) -> Result<LaunchTarget, LaunchError> {
    info!("Launching {}...", game.name);

    let Some(target) = game.launch_target() else {
        let err = LaunchError::NoTarget {
            name: game.name.clone(),
        };
        warn!("{err}");
        return Err(err);
    };

    let result = match &target {
        LaunchTarget::Direct { program } => spawner.spawn(program, &[]),
        LaunchTarget::Emulated { emulator, rom } => spawner.spawn(emulator, &[rom.as_os_str()]),
    };

    result.map(|()| target).map_err(|source| {
        let err = LaunchError::Spawn {
            name: game.name.clone(),
            source,
        };
        error!("{err}");
        err
    })
}
