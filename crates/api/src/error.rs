//! # API 统一错误处理
//!
//! 将查询与报价错误统一映射到 HTTP 状态码与响应体。
//! 数据未找到与参数缺失返回纯文本，报价失败返回 JSON。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ibov_core::dataset::error::QueryError;
use ibov_core::quote::error::QuoteError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 公司或列未找到 (404, 纯文本)
    #[error("{0}")]
    NotFound(String),

    /// 缺少必需的查询参数 (400, 纯文本)
    #[error("{0}")]
    BadRequest(String),

    /// 行情源调用失败 (400, JSON)
    #[error("{0}")]
    Upstream(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Upstream(msg) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorResponse::from_msg(msg))).into_response()
            }
        }
    }
}

/// 从 `QueryError` 转换
impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

/// 从 `QuoteError` 转换
impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}
