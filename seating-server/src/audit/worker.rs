//! 审计日志后台 Worker
//!
//! Drains the audit channel into [`AuditStorage`]. Stops once every sender
//! has been dropped.

use tokio::sync::mpsc;

use super::storage::AuditStorage;
use super::types::AuditRecord;

pub struct AuditWorker {
    storage: AuditStorage,
}

impl AuditWorker {
    pub fn new(storage: AuditStorage) -> Self {
        Self { storage }
    }

    pub async fn run(self, mut rx: mpsc::Receiver<AuditRecord>) {
        tracing::info!("Audit log worker started");

        while let Some(record) = rx.recv().await {
            let entity_id = record.entity_id.clone();
            let action = record.action;
            match self.storage.append(record).await {
                Ok(entry) => {
                    tracing::debug!(
                        sequence = entry.sequence,
                        action = %entry.action,
                        entity_id = %entry.entity_id,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        entity_id = %entity_id,
                        action = %action,
                        error = %e,
                        "Failed to write audit entry"
                    );
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}
