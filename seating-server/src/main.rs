use seating_server::{Config, InventoryState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env → 配置 → 日志
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }
    setup_environment(&config);

    tracing::info!(work_dir = %config.work_dir, "Seating server starting...");

    // 2. 数据库 + 服务
    let state = InventoryState::initialize(&config).await?;
    tracing::info!("Inventory services ready");

    // 3. 等待退出信号
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    state.shutdown().await;

    Ok(())
}
