use arcade_core::catalog::{GameRecord, LaunchTarget};
use arcade_core::launch::{LaunchError, Spawner, launch};
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct RecordingSpawner {
    calls: Vec<(PathBuf, Vec<OsString>)>,
    fail: bool,
}

impl Spawner for RecordingSpawner {
    fn spawn(&mut self, program: &Path, args: &[&OsStr]) -> io::Result<()> {
        self.calls.push((
            program.to_path_buf(),
            args.iter().map(|a| a.to_os_string()).collect(),
        ));
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        } else {
            Ok(())
        }
    }
}

fn game(path: Option<&str>, emulator: Option<&str>, rom: Option<&str>) -> GameRecord {
    GameRecord {
        name: "Test Game".into(),
        image: None,
        path: path.map(PathBuf::from),
        emulator: emulator.map(PathBuf::from),
        rom: rom.map(PathBuf::from),
    }
}

#[test]
fn direct_path_spawns_without_arguments() {
    let mut spawner = RecordingSpawner::default();
    let target = launch(&game(Some("/games/doom"), None, None), &mut spawner).unwrap();

    assert_eq!(
        target,
        LaunchTarget::Direct {
            program: "/games/doom".into()
        }
    );
    assert_eq!(spawner.calls, vec![(PathBuf::from("/games/doom"), vec![])]);
}

#[test]
fn emulator_pair_passes_rom_as_only_argument() {
    let mut spawner = RecordingSpawner::default();
    launch(
        &game(None, Some("/usr/bin/mame"), Some("roms/galaga.zip")),
        &mut spawner,
    )
    .unwrap();

    assert_eq!(
        spawner.calls,
        vec![(
            PathBuf::from("/usr/bin/mame"),
            vec![OsString::from("roms/galaga.zip")]
        )]
    );
}

#[test]
fn incomplete_record_never_spawns() {
    let cases = [
        game(None, None, None),
        game(None, Some("/usr/bin/mame"), None),
        game(None, None, Some("roms/galaga.zip")),
        game(Some(""), Some(""), Some("roms/galaga.zip")),
    ];

    for record in &cases {
        let mut spawner = RecordingSpawner::default();
        let err = launch(record, &mut spawner).unwrap_err();
        assert!(matches!(err, LaunchError::NoTarget { .. }));
        assert!(spawner.calls.is_empty());
    }
}

#[test]
fn spawn_failure_is_reported_once() {
    let mut spawner = RecordingSpawner {
        fail: true,
        ..Default::default()
    };
    let err = launch(&game(Some("/missing"), None, None), &mut spawner).unwrap_err();

    assert!(matches!(err, LaunchError::Spawn { .. }));
    assert_eq!(spawner.calls.len(), 1);
}

// Counts processes whose parent is this test binary and whose state is Z.
#[cfg(target_os = "linux")]
fn zombie_children() -> usize {
    let me = std::process::id().to_string();
    std::fs::read_dir("/proc")
        .unwrap()
        .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
        .filter(|stat| {
            // "pid (comm) state ppid ...", where comm may contain spaces.
            let Some((_, rest)) = stat.rsplit_once(')') else {
                return false;
            };
            let mut fields = rest.split_whitespace();
            fields.next() == Some("Z") && fields.next() == Some(me.as_str())
        })
        .count()
}

#[cfg(target_os = "linux")]
#[test]
fn finished_games_do_not_linger_as_zombies() {
    use arcade_core::launch::SystemSpawner;
    use std::time::{Duration, Instant};

    let mut spawner = SystemSpawner::default();
    for _ in 0..5 {
        launch(&game(Some("/bin/true"), None, None), &mut spawner).unwrap();
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        std::thread::sleep(Duration::from_millis(20));
        spawner.reap();
        if spawner.running() == 0 || Instant::now() >= deadline {
            break;
        }
    }

    assert_eq!(spawner.running(), 0);
    assert_eq!(zombie_children(), 0);
}
