use surrealdb::types::SurrealValue;
use whub_database::*;

#[derive(Debug, SurrealValue)]
struct MigrationRow {
    key: String,
    version: String,
    checksum: String,
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");

    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn builtin_migrations_are_recorded() {
    let db = Database::builder()
        .url("mem://")
        .session("migration_ns", "migration_db")
        .init()
        .await
        .expect("connect to mem://");

    let rows = db
        .query("SELECT key, version, checksum FROM migration ORDER BY key")
        .await
        .expect("query migration table")
        .take::<Vec<MigrationRow>>(0)
        .expect("parse migration rows");

    assert_eq!(rows.len(), 2, "both builtin migrations should be recorded");
    assert_eq!(rows[0].key, "audit");
    assert_eq!(rows[1].key, "waitlist");
    for row in &rows {
        assert_eq!(row.version, "0001");
        assert_eq!(row.checksum.len(), 16, "checksums are 64-bit hex");
    }
}
