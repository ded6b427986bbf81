use std::sync::Arc;

use ibov_core::quote::entity::QuoteResult;
use ibov_core::quote::error::QuoteError;
use ibov_core::quote::port::QuoteProvider;
use tracing::debug;

/// # Summary
/// 报价网关：把用户输入的代码转换为行情源代码，并整理行情源记录。
///
/// # Invariants
/// - 每次调用恰好访问一次行情源，不重试、不缓存。
#[derive(Clone)]
pub struct QuoteGateway {
    provider: Arc<dyn QuoteProvider>,
    market_suffix: String,
}

impl QuoteGateway {
    pub fn new(provider: Arc<dyn QuoteProvider>, market_suffix: impl Into<String>) -> Self {
        Self {
            provider,
            market_suffix: market_suffix.into(),
        }
    }

    /// # Summary
    /// 查询单只股票的即时报价。
    ///
    /// # Logic
    /// 1. 在 `ticker` 后拼接市场后缀 (如 `.SA`)。
    /// 2. 调用行情源获取基本信息。
    /// 3. 校验必需字段并构建 QuoteResult，`ticker` 保留原始输入。
    ///
    /// # Arguments
    /// * `ticker`: 用户输入的股票代码，例如 `PETR4`。
    pub async fn fetch_quote(&self, ticker: &str) -> Result<QuoteResult, QuoteError> {
        let symbol = format!("{}{}", ticker, self.market_suffix);
        debug!("Fetching quote for {}", symbol);
        let info = self.provider.fetch_info(&symbol).await?;
        QuoteResult::from_info(ticker, info)
    }
}
