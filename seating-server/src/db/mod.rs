//! Database Module
//!
//! Embedded SurrealDB (RocksDB on disk, in-memory for tests), schema
//! registration, and the repositories behind the store contracts.

pub mod memory;
pub mod repository;
pub mod schema;

use std::path::Path;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at `path` and register the schema
    pub async fn open(path: &Path, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!(path = %path.display(), "Database connection established (RocksDB)");
        Self::prepare(db, namespace, database).await
    }

    /// Open a throw-away in-memory database and register the schema
    pub async fn open_in_memory(namespace: &str, database: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db, namespace, database).await
    }

    async fn prepare(db: Surreal<Db>, namespace: &str, database: &str) -> Result<Self, AppError> {
        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        schema::register(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to register schema: {e}")))?;

        Ok(Self { db })
    }
}
