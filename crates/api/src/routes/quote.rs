//! # 实时报价路由控制器

use axum::Json;
use axum::extract::{Path, State};
use ibov_core::quote::entity::QuoteResult;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::ApiErrorResponse;

/// 查询单只股票的即时报价
///
/// 代码会自动拼接 B3 市场后缀后向行情源查询；ROE、P/VPA、VPA 缺失时为 null。
#[utoipa::path(
    get,
    path = "/api/v1/acao/{ticker}",
    tag = "报价 (Quote)",
    params(
        ("ticker" = String, Path, description = "B3 股票代码，不含 .SA 后缀")
    ),
    responses(
        (status = 200, description = "即时报价", body = QuoteResult),
        (status = 400, description = "行情源调用失败或缺少必需字段", body = ApiErrorResponse)
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<QuoteResult>, ApiError> {
    match state.quotes.fetch_quote(&ticker).await {
        Ok(quote) => Ok(Json(quote)),
        Err(err) => {
            tracing::warn!("Quote lookup for {} failed: {}", ticker, err);
            Err(err.into())
        }
    }
}
