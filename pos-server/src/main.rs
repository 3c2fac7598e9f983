use pos_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 初始化日志 (生产环境 JSON + 滚动文件)
    config.ensure_work_dirs()?;
    let log_dir = config.log_dir();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        Some(log_dir.as_path()),
    );

    // 打印横幅
    print_banner();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "POS server starting..."
    );

    // 4. 初始化服务器状态 (数据库、首次启动数据、通知总线)
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
