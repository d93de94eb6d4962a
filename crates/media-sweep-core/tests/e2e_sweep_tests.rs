use std::fs;
use std::path::Path;
use tempfile::tempdir;

use media_sweep_core::storage::models::CatalogItem;
use media_sweep_core::storage::Database;
use media_sweep_core::{
    preflight, AppConfig, ConfirmationGateway, FsChecker, ReconcileEngine, RunMode, RunOutcome,
    SilentReporter,
};

/// Create a catalog file the way the media server would, seeded with three
/// eligible rows pointing into `media_root`. Only `alpha` and `pilot` get
/// real files; `beta` is a dead entry.
fn create_catalog(db_path: &Path, media_root: &Path) {
    fs::create_dir_all(media_root.join("movies")).unwrap();
    fs::create_dir_all(media_root.join("tv")).unwrap();

    let alpha = media_root.join("movies/alpha.mkv");
    let beta = media_root.join("movies/beta.mkv");
    let pilot = media_root.join("tv/pilot.mkv");
    fs::write(&alpha, b"alpha").unwrap();
    fs::write(&pilot, b"pilot").unwrap();

    let conn = rusqlite::Connection::open(db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE media_item (
            id        TEXT PRIMARY KEY,
            item_type TEXT NOT NULL,
            name      TEXT,
            path      TEXT
        );",
    )
    .unwrap();

    let insert = |id: &str, item_type: &str, name: &str, path: &Path| {
        conn.execute(
            "INSERT INTO media_item (id, item_type, name, path) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, item_type, name, path.to_str().unwrap()],
        )
        .unwrap();
    };
    insert("m1", "video.Movie", "Alpha", &alpha);
    insert("m2", "video.Movie", "Beta", &beta);
    insert("e1", "video.Episode", "Pilot", &pilot);
}

fn engine() -> ReconcileEngine {
    ReconcileEngine::new(AppConfig {
        concurrency: 2,
        ..AppConfig::default()
    })
}

struct Always(bool);

impl ConfirmationGateway for Always {
    fn confirm_deletion(&self, _plan: &[CatalogItem]) -> bool {
        self.0
    }
}

fn item_count(db_path: &Path) -> i64 {
    let conn = rusqlite::Connection::open(db_path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM media_item", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_full_sweep_removes_dead_rows() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    create_catalog(&db_path, &tmp.path().join("media"));

    let db = Database::open(db_path.to_str().unwrap()).unwrap();
    let outcome = engine()
        .run(&db, &FsChecker, RunMode::Apply, &Always(true), &SilentReporter)
        .unwrap();

    match outcome {
        RunOutcome::Applied { found, outcomes } => {
            assert_eq!(found, 2);
            assert_eq!(outcomes.len(), 1);
            assert_eq!(outcomes[0].item.id, "m2");
            assert!(outcomes[0].deleted);
        }
        other => panic!("Expected Applied, got {:?}", other),
    }

    drop(db);
    assert_eq!(item_count(&db_path), 2);
}

#[test]
fn test_dry_run_leaves_catalog_untouched() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    create_catalog(&db_path, &tmp.path().join("media"));

    let db = Database::open(db_path.to_str().unwrap()).unwrap();
    let outcome = engine()
        .run(&db, &FsChecker, RunMode::Dry, &Always(true), &SilentReporter)
        .unwrap();

    match outcome {
        RunOutcome::PlanReported { found, missing } => {
            assert_eq!(found, 2);
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].id, "m2");
        }
        other => panic!("Expected PlanReported, got {:?}", other),
    }

    drop(db);
    assert_eq!(item_count(&db_path), 3);
}

#[test]
fn test_declining_leaves_catalog_untouched() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    create_catalog(&db_path, &tmp.path().join("media"));

    let db = Database::open(db_path.to_str().unwrap()).unwrap();
    let outcome = engine()
        .run(&db, &FsChecker, RunMode::Apply, &Always(false), &SilentReporter)
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Aborted { missing: 1 }));
    drop(db);
    assert_eq!(item_count(&db_path), 3);
}

#[test]
fn test_all_present_when_every_file_exists() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    let media_root = tmp.path().join("media");
    create_catalog(&db_path, &media_root);
    // Backfill the dead entry so everything is present
    fs::write(media_root.join("movies/beta.mkv"), b"beta").unwrap();

    let db = Database::open(db_path.to_str().unwrap()).unwrap();
    let outcome = engine()
        .run(&db, &FsChecker, RunMode::Apply, &Always(true), &SilentReporter)
        .unwrap();

    assert!(matches!(outcome, RunOutcome::AllPresent { checked: 3 }));
}

#[test]
fn test_snapshot_copies_catalog() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    create_catalog(&db_path, &tmp.path().join("media"));

    let snap_dir = tmp.path().join("snapshots");
    let dest =
        preflight::snapshot_catalog(db_path.to_str().unwrap(), snap_dir.to_str().unwrap())
            .unwrap();

    assert!(dest.exists());
    assert_eq!(
        fs::metadata(&dest).unwrap().len(),
        fs::metadata(&db_path).unwrap().len()
    );
}

#[test]
fn test_catalog_in_use_detects_writer() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("catalog.db");
    create_catalog(&db_path, &tmp.path().join("media"));
    let db_path_str = db_path.to_str().unwrap();

    assert!(!preflight::catalog_in_use(db_path_str).unwrap());

    // Simulate the media server holding a write lock
    let server = rusqlite::Connection::open(&db_path).unwrap();
    server.execute_batch("BEGIN IMMEDIATE;").unwrap();
    assert!(preflight::catalog_in_use(db_path_str).unwrap());

    server.execute_batch("ROLLBACK;").unwrap();
    assert!(!preflight::catalog_in_use(db_path_str).unwrap());
}
