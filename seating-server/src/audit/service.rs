//! 审计日志服务
//!
//! Lifecycle managers only see the [`AuditSink`] contract. The channel-backed
//! [`AuditService`] never blocks the caller: a full or closed channel drops
//! the record and logs a warning.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::types::{AuditAction, AuditLevel, AuditRecord};

/// Fire-and-forget audit contract
pub trait AuditSink: Send + Sync {
    fn record(&self, entity_id: &str, level: AuditLevel, action: AuditAction, message: String);
}

/// Sink used when auditing is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _entity_id: &str, _level: AuditLevel, _action: AuditAction, _message: String) {}
}

/// Channel-backed audit sink
///
/// Records are drained by [`super::AuditWorker`]. [`AuditService::close`]
/// releases the sender so the worker finishes even while managers holding
/// this sink are still alive.
#[derive(Debug)]
pub struct AuditService {
    tx: RwLock<Option<mpsc::Sender<AuditRecord>>>,
}

impl AuditService {
    pub fn new(buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditRecord>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (
            Arc::new(Self {
                tx: RwLock::new(Some(tx)),
            }),
            rx,
        )
    }

    /// Stop accepting records; already queued ones are still drained
    pub fn close(&self) {
        if self.tx.write().take().is_some() {
            tracing::debug!("Audit channel closed");
        }
    }
}

impl AuditSink for AuditService {
    fn record(&self, entity_id: &str, level: AuditLevel, action: AuditAction, message: String) {
        let record = AuditRecord {
            entity_id: entity_id.to_string(),
            level,
            action,
            message,
        };
        let guard = self.tx.read();
        let Some(tx) = guard.as_ref() else {
            tracing::warn!(
                entity_id = %record.entity_id,
                action = %record.action,
                "Audit service closed, record dropped"
            );
            return;
        };
        match tx.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(
                    entity_id = %dropped.entity_id,
                    action = %dropped.action,
                    "Audit channel full, record dropped"
                );
            }
            Err(TrySendError::Closed(dropped)) => {
                tracing::warn!(
                    entity_id = %dropped.entity_id,
                    action = %dropped.action,
                    "Audit channel closed, record dropped"
                );
            }
        }
    }
}
