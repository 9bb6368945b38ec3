use crate::error::DatabaseError;
use fxhash::FxHashMap;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Schema migrations shipped with the binary, applied in order.
///
/// Each script runs inside a single transaction together with the statement
/// recording it in the `migration` table, so a migration is either fully
/// applied and recorded or not at all.
fn builtin_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            "waitlist",
            "0001",
            "DEFINE TABLE waiting_list SCHEMALESS;",
        ),
        Migration::new(
            "audit",
            "0001",
            "DEFINE TABLE removal SCHEMALESS;
             DEFINE INDEX removal_waitlist ON removal FIELDS waitlist_id;",
        ),
    ]
}

#[derive(Debug)]
pub(crate) struct Migration {
    pub key: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub(crate) const fn new(key: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { key, version, script }
    }

    /// Stable checksum of the script text.
    fn checksum(&self) -> String {
        format!("{:016x}", fxhash::hash64(self.script))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            key: self.key.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub key: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in builtin_migrations() {
            if let Some(applied) =
                applied_migrations.get(&format!("{}:{}", migration.key, migration.version))
            {
                ensure_checksum_match(&migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ key: $key, version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        let response = self
            .db
            .query(&query)
            .bind(("key", migration.key))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await?;

        response.check().map_err(|e| DatabaseError::Migration {
            message: format!(
                "Script execution failed at {}:{}: {e}",
                migration.key, migration.version
            ),
        })?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT key, version, checksum FROM migration")
            .await?
            .take::<Vec<AppliedMigration>>(0)?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.key, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    if existing != migration.checksum() {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {}:{} (expected {}, got {})",
                migration.key,
                migration.version,
                existing,
                migration.checksum()
            ),
        });
    }
    Ok(())
}
