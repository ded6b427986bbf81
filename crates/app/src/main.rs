use std::sync::Arc;

use ibov_api::server::{AppState, start_server};
use ibov_core::dataset::query::QueryEngine;
use ibov_feed::gateway::QuoteGateway;
use ibov_feed::yahoo::YahooQuoteProvider;
use ibov_store::table_store::TableStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置与数据表、实例化行情源，并把它们注入 API 服务。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载分层配置。
/// 3. 加载两张静态数据表，失败即中止启动。
/// 4. 实例化 Yahoo 行情源与报价网关。
/// 5. 构造 AppState 并启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();
    info!("Ibovespa API starting...");

    // 2. 加载配置
    let config = settings::load_config()?;

    // 3. 加载数据表
    let store = TableStore::load(&config.data).map_err(|e| {
        error!("Failed to load datasets: {}", e);
        e
    })?;

    // 4. 实例化行情源
    let provider = Arc::new(YahooQuoteProvider::new(&config.feed)?);
    let quotes = Arc::new(QuoteGateway::new(provider, config.feed.market_suffix.clone()));

    // 5. 启动服务
    let state = AppState {
        fundamentals: QueryEngine::new(store.fundamentals),
        indicators: QueryEngine::new(store.indicators),
        quotes,
    };
    start_server(state, &config.server.bind_addr()).await
}
