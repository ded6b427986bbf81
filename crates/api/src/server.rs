//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use axum::http::header;
use ibov_core::dataset::query::QueryEngine;
use ibov_feed::gateway::QuoteGateway;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::{fundamentals, index, indicators, quote};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 两个查询引擎持有的数据表在启动前加载完毕，之后只读，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 基本面数据查询引擎
    pub fundamentals: QueryEngine,
    /// 指标数据查询引擎 (投影附带 IBOV)
    pub indicators: QueryEngine,
    /// 实时报价网关
    pub quotes: Arc<QuoteGateway>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ibovespa 数据分析 API",
        version = "0.1.0",
        description = "Ibovespa 成分公司基本面、衍生指标与实时报价的只读 API。",
        license(name = "MIT")
    ),
    tags(
        (name = "概览 (Root)", description = "欢迎信息"),
        (name = "基本面 (Fundamentals)", description = "公司基本面数据查询"),
        (name = "指标 (Indicators)", description = "衍生指标查询，按列查询附带 IBOV 基准"),
        (name = "报价 (Quote)", description = "单只股票的即时报价")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树。
///
/// # Logic
/// 1. 注册全部只读路由并自动收集 OpenAPI 文档。
/// 2. 挂载 Swagger UI。
/// 3. 未匹配的路径统一返回 HTML 404 页面。
/// 4. 应用请求追踪与 CORS (允许所有来源，允许 `Content-Type` 头)。
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(index::welcome))
        .routes(routes!(fundamentals::list_fundamentals))
        .routes(routes!(fundamentals::get_company_fundamentals))
        .routes(routes!(fundamentals::query_fundamentals))
        .routes(routes!(indicators::list_indicators))
        .routes(routes!(indicators::get_company_indicators))
        .routes(routes!(indicators::query_indicators))
        .routes(routes!(indicators::get_company_indicator))
        .routes(routes!(quote::get_quote))
        .with_state(state)
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE]);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .fallback(index::page_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 构建路由并绑定端口启动 HTTP 服务，收到 Ctrl-C 后优雅退出。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:81"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Ibovespa API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received. Exiting..."),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
