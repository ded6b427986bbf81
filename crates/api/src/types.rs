//! # DTO (Data Transfer Object) 层
//!
//! 查询参数与错误响应体。数据行直接使用领域层的 `Record`，报价使用 `QuoteResult`。

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// `empresa` + `coluna` 查询参数
///
/// 两个参数都是必需的，但缺失时需要返回自定义的 400 文本，因此这里声明为 `Option`。
/// 同名参数重复出现时取第一个值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnQuery {
    pub empresa: Option<String>,
    pub coluna: Option<String>,
}

impl ColumnQuery {
    /// 从原始的 `(key, value)` 序列构建，未知参数忽略。
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "empresa" => &mut query.empresa,
                "coluna" => &mut query.coluna,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// 取出两个必需参数，任一缺失返回 `ApiError::BadRequest`。
    pub fn require(self) -> Result<(String, String), ApiError> {
        match (self.empresa, self.coluna) {
            (Some(empresa), Some(coluna)) => Ok((empresa, coluna)),
            _ => Err(ApiError::BadRequest(
                "Parâmetros \"empresa\" e \"coluna\" devem ser fornecidos na query string."
                    .to_string(),
            )),
        }
    }
}

/// 报价失败时的 JSON 响应体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "Missing required field: currentPrice")]
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
