//! # 根路径与兜底路由

use axum::http::StatusCode;
use axum::response::Html;

/// 未匹配任何路由时的固定页面
pub const PAGE_NOT_FOUND_HTML: &str = "<h1>A página não existe...</h1>";

/// 欢迎信息
#[utoipa::path(
    get,
    path = "/",
    tag = "概览 (Root)",
    responses(
        (status = 200, description = "欢迎信息", body = String, content_type = "text/plain")
    )
)]
pub async fn welcome() -> &'static str {
    "Essa é a API de Análise de Dados do Ibovespa. Seja bem-vindo!"
}

/// 兜底 404 页面 (HTML)，与数据未找到的纯文本响应刻意区分。
pub async fn page_not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(PAGE_NOT_FOUND_HTML))
}
