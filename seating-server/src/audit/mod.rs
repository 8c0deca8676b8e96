//! 审计日志模块
//!
//! ```text
//! lifecycle manager
//!   └─ AuditSink::record() → mpsc (try_send) → AuditWorker → SurrealDB (audit_log)
//!
//! SHA256 哈希链: genesis → entry₁ → entry₂ → ... → entryₙ
//! ```
//!
//! Auditing never decides the outcome of an inventory operation: a dropped
//! or failed record is logged and forgotten.

pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use service::{AuditService, AuditSink, NoopAuditSink};
pub use storage::{AuditStorage, AuditStorageError};
pub use types::{AuditAction, AuditEntry, AuditLevel, AuditRecord};
pub use worker::AuditWorker;
