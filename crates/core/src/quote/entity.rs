use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::quote::error::QuoteError;

/// # Summary
/// 行情源返回的原始基本信息记录。
///
/// # Invariants
/// - 行情源可能省略其中任意字段，因此全部为 `Option`；是否必需由 `QuoteResult` 判定。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInfo {
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub market_cap: Option<i64>,
    pub trailing_pe: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub price_to_book: Option<f64>,
    pub book_value: Option<f64>,
}

/// # Summary
/// 单只股票的即时报价，每次请求构建，序列化后即丢弃。
///
/// # Invariants
/// - `ticker` 为用户输入的原始代码 (不含市场后缀)。
/// - 可选字段缺失时序列化为 `null` 而不是省略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteResult {
    /// 股票代码
    #[schema(example = "PETR4")]
    pub ticker: String,
    /// 当前价格
    #[serde(rename = "preco_atual")]
    #[schema(example = 38.12)]
    pub current_price: f64,
    /// 前收盘价
    #[serde(rename = "preco_anterior")]
    #[schema(example = 37.9)]
    pub previous_close: f64,
    /// 市值
    #[serde(rename = "capitalizacao_mercado")]
    #[schema(example = 497_000_000_000_i64)]
    pub market_cap: i64,
    /// 市盈率 (TTM)
    #[serde(rename = "relacao_preco_lucro")]
    #[schema(example = 4.1)]
    pub trailing_pe: f64,
    /// 净资产收益率
    #[serde(rename = "roe")]
    pub return_on_equity: Option<f64>,
    /// 市净率
    #[serde(rename = "p_vpa")]
    pub price_to_book: Option<f64>,
    /// 每股净资产
    #[serde(rename = "vpa")]
    pub book_value: Option<f64>,
}

impl QuoteResult {
    /// # Summary
    /// 由行情源原始记录构建报价结果。
    ///
    /// # Logic
    /// 1. 当前价、前收盘价、市值、市盈率任一缺失即整体失败。
    /// 2. ROE、市净率、每股净资产缺失时保留为 None。
    ///
    /// # Arguments
    /// * `ticker`: 不含市场后缀的原始代码。
    /// * `info`: 行情源返回的记录。
    pub fn from_info(ticker: impl Into<String>, info: QuoteInfo) -> Result<Self, QuoteError> {
        Ok(Self {
            ticker: ticker.into(),
            current_price: info
                .current_price
                .ok_or(QuoteError::MissingField("currentPrice"))?,
            previous_close: info
                .previous_close
                .ok_or(QuoteError::MissingField("previousClose"))?,
            market_cap: info.market_cap.ok_or(QuoteError::MissingField("marketCap"))?,
            trailing_pe: info
                .trailing_pe
                .ok_or(QuoteError::MissingField("trailingPE"))?,
            return_on_equity: info.return_on_equity,
            price_to_book: info.price_to_book,
            book_value: info.book_value,
        })
    }
}
