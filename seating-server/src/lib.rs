//! Seating Server - 活动分区与座位库存
//!
//! # 模块结构
//!
//! ```text
//! seating-server/src/
//! ├── core/          # 配置、服务组装
//! ├── db/            # SurrealDB 存储层 + 内存实现
//! ├── inventory/     # 分区/座位生命周期与查询
//! ├── audit/         # 审计日志 (哈希链)
//! └── utils/         # 日志、输入校验
//! ```

pub mod audit;
pub mod core;
pub mod db;
pub mod inventory;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, InventoryState};
pub use inventory::{
    InventoryError, InventoryResult, InventoryStores, SeatLifecycleManager, ZoneLifecycleManager,
    ZoneQueryService,
};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Install the logger described by `config`
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}
