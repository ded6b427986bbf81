use thiserror::Error;

/// # Summary
/// 报价查询错误，对外统一映射为 400 + `{"error": ...}`。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    // 网络层错误或非 2xx 响应
    #[error("Network error: {0}")]
    Network(String),
    // 响应体无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    // 行情源在响应中声明的错误 (例如代码不存在)
    #[error("Provider error: {0}")]
    Provider(String),
    // 必需字段缺失，整次查询视为失败
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
