use async_trait::async_trait;

use crate::quote::entity::QuoteInfo;
use crate::quote::error::QuoteError;

/// # Summary
/// 外部行情源端口，按完整代码 (已含市场后缀) 获取基本信息记录。
///
/// # Invariants
/// - 每次调用都直接访问行情源，实现方不得缓存查询结果。
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// # Summary
    /// 获取单只证券的基本信息。
    ///
    /// # Arguments
    /// * `symbol`: 行情源识别的代码，例如 `PETR4.SA`。
    ///
    /// # Returns
    /// 成功返回字段可能缺失的 `QuoteInfo`，调用本身失败返回 `QuoteError`。
    async fn fetch_info(&self, symbol: &str) -> Result<QuoteInfo, QuoteError>;
}
