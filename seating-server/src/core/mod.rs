//! 核心模块 - 配置与服务组装

pub mod config;
pub mod state;

pub use config::Config;
pub use state::InventoryState;
