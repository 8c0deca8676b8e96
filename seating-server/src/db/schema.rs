//! Schema registration
//!
//! Runs once while the state is composed. Every statement uses
//! `IF NOT EXISTS`, so registering against an existing database is a no-op.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::repository::RepoResult;

const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS zone SCHEMALESS;
DEFINE INDEX IF NOT EXISTS zone_event_name ON TABLE zone FIELDS event_id, name_key UNIQUE;
DEFINE INDEX IF NOT EXISTS zone_event ON TABLE zone FIELDS event_id;

DEFINE TABLE IF NOT EXISTS zone_placement SCHEMALESS;
DEFINE INDEX IF NOT EXISTS zone_placement_event_zone ON TABLE zone_placement FIELDS event_id, zone_id UNIQUE;

DEFINE TABLE IF NOT EXISTS seat SCHEMALESS;
DEFINE INDEX IF NOT EXISTS seat_event_zone_label ON TABLE seat FIELDS event_id, zone_id, label UNIQUE;
DEFINE INDEX IF NOT EXISTS seat_event_zone ON TABLE seat FIELDS event_id, zone_id;

DEFINE TABLE IF NOT EXISTS venue SCHEMALESS;

DEFINE TABLE IF NOT EXISTS audit_log SCHEMALESS;
DEFINE INDEX IF NOT EXISTS audit_log_sequence ON TABLE audit_log FIELDS sequence UNIQUE;
"#;

/// Register tables and unique indexes
pub async fn register(db: &Surreal<Db>) -> RepoResult<()> {
    db.query(SCHEMA).await?.check()?;
    tracing::info!("Inventory schema registered");
    Ok(())
}
