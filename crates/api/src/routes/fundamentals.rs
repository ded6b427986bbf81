//! # 基本面数据路由控制器
//!
//! 实现 `/api/dados` 与 `/api/v1/dados` 路径下的只读接口。

use axum::Json;
use axum::extract::{Path, Query, State};
use ibov_core::dataset::entity::Record;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::ColumnQuery;

/// 获取全部基本面数据
///
/// 按文件顺序返回整张表，不分页。
#[utoipa::path(
    get,
    path = "/api/dados",
    tag = "基本面 (Fundamentals)",
    responses(
        (status = 200, description = "全部数据行", body = Vec<Record>)
    )
)]
pub async fn list_fundamentals(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.fundamentals.all())
}

/// 获取指定公司的全部基本面数据
#[utoipa::path(
    get,
    path = "/api/v1/dados/{empresa}",
    tag = "基本面 (Fundamentals)",
    params(
        ("empresa" = String, Path, description = "公司代码，大小写敏感")
    ),
    responses(
        (status = 200, description = "该公司的全部数据行", body = Vec<Record>),
        (status = 404, description = "公司不存在", body = String, content_type = "text/plain")
    )
)]
pub async fn get_company_fundamentals(
    State(state): State<AppState>,
    Path(empresa): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.fundamentals.by_entity(&empresa)?))
}

/// 获取指定公司在指定列上的时间序列
///
/// 每行投影为 `{Data, <coluna>}`。
#[utoipa::path(
    get,
    path = "/api/v1/dados",
    tag = "基本面 (Fundamentals)",
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
pub async fn query_fundamentals(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let (empresa, coluna) = ColumnQuery::from_pairs(pairs).require()?;
    Ok(Json(state.fundamentals.by_entity_and_column(&empresa, &coluna)?))
}
