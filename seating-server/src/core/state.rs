use std::sync::Arc;
use std::time::Duration;

use shared::error::AppError;
use tokio::task::JoinHandle;

use crate::audit::{AuditService, AuditSink, AuditStorage, AuditWorker, NoopAuditSink};
use crate::core::Config;
use crate::db::DbService;
use crate::inventory::{
    InventoryStores, SeatLifecycleManager, ZoneLifecycleManager, ZoneQueryService,
};

/// Time given to the audit worker to flush on shutdown
const AUDIT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// 服务状态 - 持有所有服务的共享引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 |
/// | zones | 分区生命周期 |
/// | seats | 座位生命周期 |
/// | queries | 分区查询 |
pub struct InventoryState {
    pub config: Config,
    pub db: DbService,
    pub zones: Arc<ZoneLifecycleManager>,
    pub seats: Arc<SeatLifecycleManager>,
    pub queries: Arc<ZoneQueryService>,
    audit: Option<AuditHandle>,
}

/// Running audit pipeline: the sender side and the worker draining it
struct AuditHandle {
    service: Arc<AuditService>,
    worker: JoinHandle<()>,
}

impl InventoryState {
    /// Open the on-disk database under `work_dir` and compose the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db = DbService::open(
            &config.database_path(),
            &config.database_namespace,
            &config.database_name,
        )
        .await?;
        Ok(Self::compose(config, db))
    }

    /// Same composition over an in-memory database
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db = DbService::open_in_memory(&config.database_namespace, &config.database_name).await?;
        Ok(Self::compose(config, db))
    }

    fn compose(config: &Config, db: DbService) -> Self {
        let stores = InventoryStores::surreal(db.db.clone());

        let (audit, handle): (Arc<dyn AuditSink>, Option<AuditHandle>) =
            if config.enable_audit_log {
                let (service, rx) = AuditService::new(config.audit_buffer_size);
                let worker = AuditWorker::new(AuditStorage::new(db.db.clone()));
                let sink: Arc<dyn AuditSink> = service.clone();
                let handle = AuditHandle {
                    service,
                    worker: tokio::spawn(worker.run(rx)),
                };
                (sink, Some(handle))
            } else {
                tracing::info!("Audit log disabled");
                let sink: Arc<dyn AuditSink> = Arc::new(NoopAuditSink);
                (sink, None)
            };

        let zones = ZoneLifecycleManager::new(stores.clone())
            .with_audit(audit.clone())
            .with_default_color(config.default_zone_color.clone());
        let seats = SeatLifecycleManager::new(stores.clone()).with_audit(audit);
        let queries = ZoneQueryService::new(stores);

        Self {
            config: config.clone(),
            db,
            zones: Arc::new(zones),
            seats: Arc::new(seats),
            queries: Arc::new(queries),
            audit: handle,
        }
    }

    /// Close the audit channel and wait for the worker to drain it
    ///
    /// Managers cloned out of the state keep working afterwards; their audit
    /// records are dropped with a warning.
    pub async fn shutdown(self) {
        let Some(AuditHandle { service, worker }) = self.audit else {
            return;
        };
        service.close();

        match tokio::time::timeout(AUDIT_FLUSH_TIMEOUT, worker).await {
            Ok(Ok(())) => tracing::info!("Audit worker stopped"),
            Ok(Err(e)) => tracing::error!(error = %e, "Audit worker panicked"),
            Err(_) => tracing::warn!("Audit worker did not stop in time"),
        }
    }
}
