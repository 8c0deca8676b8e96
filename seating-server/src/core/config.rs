use std::path::PathBuf;

use crate::inventory::zone_lifecycle::DEFAULT_ZONE_COLOR;

/// 服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | DATABASE_NAMESPACE | seating | SurrealDB namespace |
/// | DATABASE_NAME | inventory | SurrealDB database |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (none) | 日志目录，设置后按天滚动写文件 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | DEFAULT_ZONE_COLOR | #CCCCCC | 新分区默认颜色 |
/// | AUDIT_BUFFER_SIZE | 1024 | 审计通道容量 |
/// | ENABLE_AUDIT_LOG | true | 是否启用审计日志 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/var/lib/seating LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_namespace: String,
    pub database_name: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// Placement color when a zone is created without one
    pub default_zone_color: String,
    pub audit_buffer_size: usize,
    pub enable_audit_log: bool,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or(defaults.work_dir),
            database_namespace: std::env::var("DATABASE_NAMESPACE")
                .unwrap_or(defaults.database_namespace),
            database_name: std::env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_json),
            default_zone_color: std::env::var("DEFAULT_ZONE_COLOR")
                .ok()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.default_zone_color),
            audit_buffer_size: std::env::var("AUDIT_BUFFER_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.audit_buffer_size),
            enable_audit_log: std::env::var("ENABLE_AUDIT_LOG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_audit_log),
        }
    }

    /// work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("inventory.db")
    }

    /// 创建工作目录结构
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(dir) = &self.log_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "./data".into(),
            database_namespace: "seating".into(),
            database_name: "inventory".into(),
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            default_zone_color: DEFAULT_ZONE_COLOR.into(),
            audit_buffer_size: 1024,
            enable_audit_log: true,
        }
    }
}
