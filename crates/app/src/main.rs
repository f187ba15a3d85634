use std::sync::Arc;

use tandem_analytics::service::SeriesService;
use tandem_api::server::{AppState, start_server};
use tandem_store::series::SqliteSeriesStore;
use tracing::info;

mod logging;
mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 SeriesService。
///
/// # Logic
/// 1. 加载分层配置并初始化全局日志。
/// 2. 实例化基础设施层 (SQLite 序列存储)。
/// 3. 构造应用服务层 (SeriesService)。
/// 4. 启动 HTTP 网关，收到 Ctrl-C 后优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load()?;
    let _log_guard = logging::init(&config.logging)?;
    info!("Tandem starting...");

    // 2. 实例化基础设施层
    let store = Arc::new(
        SqliteSeriesStore::open(&config.database.path, config.database.max_connections).await?,
    );
    info!("Series store opened at {}", config.database.path);

    // 3. 构造应用服务层 (注入 Core Trait 抽象)
    let series_service = SeriesService::new(store, config.analytics.clone());
    let state = AppState {
        series_service,
        catalog: Arc::new(config.catalog.clone()),
    };

    // 4. 启动网关
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    start_server(state, &bind_addr).await?;
    info!("Shutdown complete. Exiting...");

    Ok(())
}
