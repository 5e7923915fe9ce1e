use std::cell::RefCell;
use std::rc::Rc;

use rusqlite::Connection;
use warung_core::db::migrate::{MigrateError, MigrationRegistry, MigrationRunner};
use warung_core::open_db_in_memory;

/// Shared log of migration invocations, in execution order.
type InvocationLog = Rc<RefCell<Vec<String>>>;

fn tracking_registry(ids: &[&str], log: &InvocationLog) -> MigrationRegistry {
    let mut registry = MigrationRegistry::new();
    for id in ids {
        let id_owned = id.to_string();
        let log = Rc::clone(log);
        registry.register(id_owned.clone(), move |_conn| {
            log.borrow_mut().push(id_owned.clone());
            Ok(())
        });
    }
    registry
}

fn history_rows(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM migration_history ORDER BY migration_id ASC;")
        .unwrap();
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    rows
}

fn insert_history(conn: &Connection, id: &str) {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migration_history (
            migration_id TEXT PRIMARY KEY NOT NULL
        );",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO migration_history (migration_id) VALUES (?1);",
        [id],
    )
    .unwrap();
}

#[test]
fn fresh_database_applies_all_migrations_in_lexicographic_order() {
    let mut conn = open_db_in_memory().unwrap();
    let log: InvocationLog = Rc::default();

    // Registered out of order on purpose; execution order must not care.
    let registry = tracking_registry(&["0002_add_col", "0001_init"], &log);
    let report = MigrationRunner::new(registry).run(&mut conn).unwrap();

    assert_eq!(report.applied, vec!["0001_init", "0002_add_col"]);
    assert_eq!(report.resume_marker, None);
    assert!(!report.resume_marker_unmatched);
    assert_eq!(*log.borrow(), vec!["0001_init", "0002_add_col"]);
    assert_eq!(history_rows(&conn), vec!["0001_init", "0002_add_col"]);
}

#[test]
fn resumes_after_recorded_marker_without_rerunning_it() {
    let mut conn = open_db_in_memory().unwrap();
    insert_history(&conn, "0001_init");

    let log: InvocationLog = Rc::default();
    let registry = tracking_registry(&["0001_init", "0002_add_col", "0003_index"], &log);
    let report = MigrationRunner::new(registry).run(&mut conn).unwrap();

    assert_eq!(report.resume_marker.as_deref(), Some("0001_init"));
    assert_eq!(report.applied, vec!["0002_add_col", "0003_index"]);
    assert_eq!(*log.borrow(), vec!["0002_add_col", "0003_index"]);
    assert_eq!(
        history_rows(&conn),
        vec!["0001_init", "0002_add_col", "0003_index"]
    );
}

#[test]
fn unmatched_resume_marker_applies_nothing() {
    // Documented failure mode: a marker unknown to the registry keeps the
    // whole pass in skip mode.
    let mut conn = open_db_in_memory().unwrap();
    insert_history(&conn, "999_missing");

    let log: InvocationLog = Rc::default();
    let registry = tracking_registry(&["0001_init", "0002_add_col"], &log);
    let report = MigrationRunner::new(registry).run(&mut conn).unwrap();

    assert!(report.applied.is_empty());
    assert!(report.resume_marker_unmatched);
    assert_eq!(report.resume_marker.as_deref(), Some("999_missing"));
    assert!(log.borrow().is_empty());
    assert_eq!(history_rows(&conn), vec!["999_missing"]);
}

#[test]
fn second_run_is_a_noop() {
    let mut conn = open_db_in_memory().unwrap();
    let log: InvocationLog = Rc::default();

    let first = tracking_registry(&["0001_init", "0002_add_col"], &log);
    MigrationRunner::new(first).run(&mut conn).unwrap();

    let second = tracking_registry(&["0001_init", "0002_add_col"], &log);
    let report = MigrationRunner::new(second).run(&mut conn).unwrap();

    assert!(report.applied.is_empty());
    assert!(!report.resume_marker_unmatched);
    // Each migration ran exactly once across both runs.
    assert_eq!(*log.borrow(), vec!["0001_init", "0002_add_col"]);
    assert_eq!(history_rows(&conn), vec!["0001_init", "0002_add_col"]);
}

#[test]
fn failing_migration_rolls_back_the_whole_run() {
    let mut conn = open_db_in_memory().unwrap();

    let mut registry = MigrationRegistry::new();
    registry.register_sql("0001_ok", "CREATE TABLE run_artifact (id INTEGER PRIMARY KEY);");
    registry.register_sql("0002_boom", "INSERT INTO does_not_exist VALUES (1);");

    let err = MigrationRunner::new(registry).run(&mut conn).unwrap_err();
    match err {
        MigrateError::Failed { id, .. } => assert_eq!(id, "0002_boom"),
        other => panic!("unexpected error: {other}"),
    }

    // The outer transaction discards the earlier success of the same run.
    assert!(history_rows(&conn).is_empty());
    let artifact_exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'run_artifact'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(artifact_exists, 0);
}

#[test]
fn empty_registry_is_a_noop_but_ensures_history_table() {
    let mut conn = open_db_in_memory().unwrap();

    let report = MigrationRunner::new(MigrationRegistry::new())
        .run(&mut conn)
        .unwrap();

    assert!(report.applied.is_empty());
    assert!(history_rows(&conn).is_empty());
}

#[test]
fn last_registration_for_duplicate_id_wins_silently() {
    let mut conn = open_db_in_memory().unwrap();
    let log: InvocationLog = Rc::default();

    let mut registry = MigrationRegistry::new();
    {
        let log = Rc::clone(&log);
        registry.register("0001_init", move |_conn| {
            log.borrow_mut().push("first".to_string());
            Ok(())
        });
    }
    {
        let log = Rc::clone(&log);
        registry.register("0001_init", move |_conn| {
            log.borrow_mut().push("second".to_string());
            Ok(())
        });
    }

    let report = MigrationRunner::new(registry).run(&mut conn).unwrap();
    assert_eq!(report.applied, vec!["0001_init"]);
    assert_eq!(*log.borrow(), vec!["second"]);
}

#[test]
fn migration_sees_its_own_transactional_scope() {
    // A migration writes through the handed-in scope and the history row
    // lands in the same scope, so both commit together.
    let mut conn = open_db_in_memory().unwrap();

    let mut registry = MigrationRegistry::new();
    registry.register("0001_seed", |scope| {
        scope.execute_batch(
            "CREATE TABLE seed_target (id INTEGER PRIMARY KEY, value TEXT NOT NULL);
             INSERT INTO seed_target (value) VALUES ('a');",
        )?;
        Ok(())
    });

    MigrationRunner::new(registry).run(&mut conn).unwrap();

    let seeded: i64 = conn
        .query_row("SELECT COUNT(*) FROM seed_target;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(seeded, 1);
    assert_eq!(history_rows(&conn), vec!["0001_seed"]);
}

#[test]
fn history_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warung.db");

    {
        let mut conn = warung_core::open_db(&db_path).unwrap();
        let log: InvocationLog = Rc::default();
        let registry = tracking_registry(&["0001_init"], &log);
        MigrationRunner::new(registry).run(&mut conn).unwrap();
    }

    let mut conn = warung_core::open_db(&db_path).unwrap();
    let log: InvocationLog = Rc::default();
    let registry = tracking_registry(&["0001_init", "0002_add_col"], &log);
    let report = MigrationRunner::new(registry).run(&mut conn).unwrap();

    assert_eq!(report.resume_marker.as_deref(), Some("0001_init"));
    assert_eq!(report.applied, vec!["0002_add_col"]);
    assert_eq!(*log.borrow(), vec!["0002_add_col"]);
}

#[test]
fn baseline_registry_seeds_lookup_tables() {
    let mut conn = open_db_in_memory().unwrap();

    let report = MigrationRunner::new(warung_core::baseline_registry())
        .run(&mut conn)
        .unwrap();
    assert_eq!(
        report.applied,
        vec!["0001_app_settings", "0002_payment_methods"]
    );

    let methods: i64 = conn
        .query_row("SELECT COUNT(*) FROM payment_methods;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(methods, 3);

    // Re-running the shipped catalog must be a no-op.
    let rerun = MigrationRunner::new(warung_core::baseline_registry())
        .run(&mut conn)
        .unwrap();
    assert!(rerun.applied.is_empty());
}
