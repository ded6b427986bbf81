//! # 指标数据路由控制器
//!
//! 实现 `/api/indicadores` 与 `/api/v1/indicadores` 路径下的只读接口。
//! 按列查询时结果总是附带 `IBOV` 基准列。

use axum::Json;
use axum::extract::{Path, Query, State};
use ibov_core::dataset::entity::Record;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::ColumnQuery;

/// 获取全部指标数据
#[utoipa::path(
    get,
    path = "/api/indicadores",
    tag = "指标 (Indicators)",
    responses(
        (status = 200, description = "全部数据行", body = Vec<Record>)
    )
)]
pub async fn list_indicators(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.indicators.all())
}

/// 获取指定公司的全部指标数据
#[utoipa::path(
    get,
    path = "/api/v1/indicadores/{empresa}",
    tag = "指标 (Indicators)",
    params(
        ("empresa" = String, Path, description = "公司代码，大小写敏感")
    ),
    responses(
        (status = 200, description = "该公司的全部数据行", body = Vec<Record>),
        (status = 404, description = "公司不存在", body = String, content_type = "text/plain")
    )
)]
pub async fn get_company_indicators(
    State(state): State<AppState>,
    Path(empresa): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.indicators.by_entity(&empresa)?))
}

/// 按查询参数获取指定公司的单列指标
///
/// 每行投影为 `{Data, <coluna>, IBOV}`。
#[utoipa::path(
    get,
    path = "/api/v1/indicadores",
    tag = "指标 (Indicators)",
    params(
        ("empresa" = String, Query, description = "公司代码"),
        ("coluna" = String, Query, description = "列名")
    ),
    responses(
        (status = 200, description = "投影后的数据行", body = Vec<Record>),
        (status = 400, description = "缺少 empresa 或 coluna 参数", body = String, content_type = "text/plain"),
        (status = 404, description = "公司或列不存在", body = String, content_type = "text/plain")
    )
)]
pub async fn query_indicators(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let (empresa, coluna) = ColumnQuery::from_pairs(pairs).require()?;
    Ok(Json(state.indicators.by_entity_and_column(&empresa, &coluna)?))
}

/// 按路径段获取指定公司的单列指标
#[utoipa::path(
    get,
    path = "/api/v1/indicadores/{empresa}/{coluna}",
    tag = "指标 (Indicators)",
    params(
        ("empresa" = String, Path, description = "公司代码"),
        ("coluna" = String, Path, description = "列名")
    ),
    responses(
        (status = 200, description = "投影后的数据行", body = Vec<Record>),
        (status = 404, description = "公司或列不存在", body = String, content_type = "text/plain")
    )
)]
pub async fn get_company_indicator(
    State(state): State<AppState>,
    Path((empresa, coluna)): Path<(String, String)>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.indicators.by_entity_column_fixed(&empresa, &coluna)?))
}
