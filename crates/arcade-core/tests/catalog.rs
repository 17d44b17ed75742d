use arcade_core::catalog::{Catalog, CatalogError, LaunchTarget};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_records_in_file_order() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    let json = data.join("games.json");
    fs::write(
        &json,
        r#"[
            {"name": "Doom", "image": "covers/doom.png", "path": "C:/Games/doom.exe"},
            {"name": "Galaga", "image": "covers/galaga.jpg", "emulator": "mame", "rom": "galaga.zip", "year": 1981},
            {"name": "Broken"}
        ]"#,
    )
    .unwrap();

    let catalog = Catalog::load_from_file(&json, dir.path()).unwrap();
    assert_eq!(catalog.len(), 3);

    let names: Vec<_> = catalog.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Doom", "Galaga", "Broken"]);

    assert!(matches!(
        catalog.get(1).unwrap().launch_target(),
        Some(LaunchTarget::Emulated { .. })
    ));
    assert_eq!(catalog.get(2).unwrap().launch_target(), None);
    assert_eq!(
        catalog.cover_path(0),
        Some(dir.path().join("covers/doom.png"))
    );
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempdir().unwrap();
    let err = Catalog::load_from_file(dir.path().join("games.json"), dir.path()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("games.json");
    fs::write(&json, r#"{"name": "not a list"}"#).unwrap();

    let err = Catalog::load_from_file(&json, dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
    assert!(!err.is_not_found());
}
