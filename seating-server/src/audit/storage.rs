//! 审计日志 SurrealDB 存储层
//!
//! Append-only: entries are never updated or deleted. Each entry carries the
//! SHA256 of its predecessor, so any edit breaks the chain.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::types::{AuditAction, AuditEntry, AuditLevel, AuditRecord};

const GENESIS_HASH: &str = "genesis";

const ENTRY_FIELDS: &str =
    "sequence, timestamp, entity_id, level, action, message, prev_hash, curr_hash";

#[derive(Debug, Error)]
pub enum AuditStorageError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for AuditStorageError {
    fn from(err: surrealdb::Error) -> Self {
        AuditStorageError::Database(err.to_string())
    }
}

pub type AuditStorageResult<T> = Result<T, AuditStorageError>;

#[derive(Debug, serde::Deserialize)]
struct LastEntry {
    sequence: u64,
    curr_hash: String,
}

#[derive(Clone)]
pub struct AuditStorage {
    db: Surreal<Db>,
    /// 序列化 append，防止 sequence 冲突
    append_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AuditStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            append_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Append one record at the end of the chain
    pub async fn append(&self, record: AuditRecord) -> AuditStorageResult<AuditEntry> {
        let _guard = self.append_lock.lock().await;

        let last: Vec<LastEntry> = self
            .db
            .query("SELECT sequence, curr_hash FROM audit_log ORDER BY sequence DESC LIMIT 1")
            .await?
            .take(0)?;
        let (sequence, prev_hash) = match last.into_iter().next() {
            Some(last) => (last.sequence + 1, last.curr_hash),
            None => (1, GENESIS_HASH.to_string()),
        };

        let timestamp = shared::util::now_millis();
        let curr_hash = compute_hash(
            &prev_hash,
            sequence,
            timestamp,
            &record.entity_id,
            record.level,
            record.action,
            &record.message,
        );
        let entry = AuditEntry {
            sequence,
            timestamp,
            entity_id: record.entity_id,
            level: record.level,
            action: record.action,
            message: record.message,
            prev_hash,
            curr_hash,
        };

        // bind 需要 'static，传 owned
        self.db
            .query("INSERT INTO audit_log $data RETURN NONE")
            .bind(("data", entry.clone()))
            .await?
            .check()?;
        Ok(entry)
    }

    /// Last `count` entries, newest first
    pub async fn query_last(&self, count: usize) -> AuditStorageResult<Vec<AuditEntry>> {
        let entries: Vec<AuditEntry> = self
            .db
            .query(format!(
                "SELECT {ENTRY_FIELDS} FROM audit_log ORDER BY sequence DESC LIMIT $limit"
            ))
            .bind(("limit", count as i64))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Walk the whole chain; returns the first sequence whose hash does not verify
    pub async fn verify_chain(&self) -> AuditStorageResult<Option<u64>> {
        let entries: Vec<AuditEntry> = self
            .db
            .query(format!("SELECT {ENTRY_FIELDS} FROM audit_log ORDER BY sequence ASC"))
            .await?
            .take(0)?;

        let mut expected_prev = GENESIS_HASH.to_string();
        for e in entries {
            let recomputed = compute_hash(
                &e.prev_hash,
                e.sequence,
                e.timestamp,
                &e.entity_id,
                e.level,
                e.action,
                &e.message,
            );
            if e.prev_hash != expected_prev || recomputed != e.curr_hash {
                return Ok(Some(e.sequence));
            }
            expected_prev = e.curr_hash;
        }
        Ok(None)
    }
}

/// 变长字段用 `\x00` 分隔，定长字段用 LE 字节
fn compute_hash(
    prev_hash: &str,
    sequence: u64,
    timestamp: i64,
    entity_id: &str,
    level: AuditLevel,
    action: AuditAction,
    message: &str,
) -> String {
    let level = match level {
        AuditLevel::Info => "info",
        AuditLevel::Warning => "warning",
        AuditLevel::Error => "error",
    };

    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(b"\x00");
    hasher.update(sequence.to_le_bytes());
    hasher.update(timestamp.to_le_bytes());
    for field in [entity_id, level, action.as_str(), message] {
        hasher.update(field.as_bytes());
        hasher.update(b"\x00");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn record(entity_id: &str, action: AuditAction) -> AuditRecord {
        AuditRecord {
            entity_id: entity_id.into(),
            level: AuditLevel::Info,
            action,
            message: format!("{action} {entity_id}"),
        }
    }

    #[test]
    fn test_hash_separates_fields() {
        let a = compute_hash("genesis", 1, 0, "ab", AuditLevel::Info, AuditAction::ZoneCreated, "c");
        let b = compute_hash("genesis", 1, 0, "a", AuditLevel::Info, AuditAction::ZoneCreated, "bc");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn test_append_links_entries() {
        let service = DbService::open_in_memory("test", "audit").await.unwrap();
        let storage = AuditStorage::new(service.db.clone());

        let first = storage.append(record("z1", AuditAction::ZoneCreated)).await.unwrap();
        let second = storage.append(record("z1", AuditAction::ZoneDeleted)).await.unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(first.prev_hash, GENESIS_HASH);
        assert_eq!(second.sequence, 2);
        assert_eq!(second.prev_hash, first.curr_hash);

        let last = storage.query_last(10).await.unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].action, AuditAction::ZoneDeleted);
        assert_eq!(storage.verify_chain().await.unwrap(), None);
    }
}
