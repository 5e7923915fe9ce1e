use rusqlite::Connection;
use warung_core::{ensure_entity_tables, open_db_in_memory, ENTITY_TABLES};

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn column_names(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn creates_all_entity_tables_on_fresh_database() {
    let conn = open_db_in_memory().unwrap();

    let report = ensure_entity_tables(&conn);

    assert!(report.is_clean());
    assert_eq!(report.created.len(), ENTITY_TABLES.len());
    for table in ENTITY_TABLES {
        assert_table_exists(&conn, table.name);
    }
}

#[test]
fn second_pass_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    ensure_entity_tables(&conn);

    let report = ensure_entity_tables(&conn);

    assert!(report.is_clean());
    assert!(report.created.is_empty());
    assert!(report.added_columns.is_empty());
}

#[test]
fn adds_missing_columns_to_existing_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE supplier (
            id TEXT PRIMARY KEY NOT NULL,
            nama TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();

    let report = ensure_entity_tables(&conn);

    assert!(report.is_clean());
    assert!(report
        .added_columns
        .iter()
        .any(|column| column == "supplier.telepon"));

    let columns = column_names(&conn, "supplier");
    for expected in ["id", "nama", "alamat", "telepon", "created_at", "updated_at"] {
        assert!(
            columns.iter().any(|name| name == expected),
            "missing column supplier.{expected}"
        );
    }
}

#[test]
fn existing_rows_survive_column_additions() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE supplier (
            id TEXT PRIMARY KEY NOT NULL,
            nama TEXT NOT NULL DEFAULT ''
        );
        INSERT INTO supplier (id, nama) VALUES ('s-1', 'Grosir Jaya');",
    )
    .unwrap();

    ensure_entity_tables(&conn);

    let (nama, telepon): (String, String) = conn
        .query_row(
            "SELECT nama, telepon FROM supplier WHERE id = 's-1';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(nama, "Grosir Jaya");
    assert_eq!(telepon, "");
}
