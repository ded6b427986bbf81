use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ibov_core::config::FeedConfig;
use ibov_core::quote::entity::QuoteInfo;
use ibov_core::quote::error::QuoteError;
use ibov_core::quote::port::QuoteProvider;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// quoteSummary 接口需要的模块
const SUMMARY_MODULES: &str = "financialData,summaryDetail,defaultKeyStatistics";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// # Summary
/// Yahoo Finance 报价提供者实现。
///
/// # Invariants
/// - 使用带 Cookie 存储的 `reqwest` 异步客户端进行通讯。
/// - crumb 是会话凭证而非查询结果：获取一次后复用，收到 401 时作废，下一次请求重新获取。
#[derive(Clone)]
pub struct YahooQuoteProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    base_url: String,
    cookie_url: String,
    crumb: Arc<RwLock<Option<String>>>,
}

impl YahooQuoteProvider {
    /// # Summary
    /// 创建一个新的 YahooQuoteProvider 实例。
    ///
    /// # Logic
    /// 1. 确保 rustls 加密后端已安装，按配置设置超时。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 开启 Cookie 存储，crumb 与会话 Cookie 绑定。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 返回初始化后的 YahooQuoteProvider，客户端构建失败返回 `QuoteError::Network`。
    pub fn new(config: &FeedConfig) -> Result<Self, QuoteError> {
        ensure_crypto_provider();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie_url: config.cookie_url.clone(),
            crumb: Arc::new(RwLock::new(None)),
        })
    }

    /// 构造 quoteSummary 地址，代码作为单个路径段编码，`/`、`?`、`#` 不会改变请求目标。
    fn summary_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&format!("{}/v10/finance/quoteSummary", self.base_url))
            .map_err(|e| QuoteError::Network(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| QuoteError::Network(format!("invalid base url: {}", self.base_url)))?
            .push(symbol);
        Ok(url)
    }

    async fn crumb(&self) -> Result<String, QuoteError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }
        let fresh = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// # Summary
    /// 建立会话并获取 crumb。
    ///
    /// # Logic
    /// 1. 访问 Cookie 入口，仅为写入会话 Cookie，响应状态不重要。
    /// 2. 请求 `/v1/test/getcrumb`，返回体即 crumb 文本。
    async fn fetch_crumb(&self) -> Result<String, QuoteError> {
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            warn!("Yahoo cookie bootstrap failed: {}", e);
        }

        let resp = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QuoteError::Network(format!(
                "crumb request failed: HTTP {}",
                resp.status()
            )));
        }

        let crumb = resp
            .text()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?
            .trim()
            .to_string();
        if crumb.is_empty() {
            return Err(QuoteError::Provider("empty crumb".into()));
        }
        Ok(crumb)
    }
}

/// reqwest 以 `rustls-no-provider` 构建，需要进程级的 rustls 加密后端。
fn ensure_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        debug!("rustls crypto provider installed concurrently");
    }
}

/// # Summary
/// Yahoo quoteSummary 响应顶层结构。
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryBody,
}

#[derive(Deserialize, Debug)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
    error: Option<SummaryError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct SummaryError {
    description: String,
}

/// # Summary
/// 单个证券的模块集合，未请求或不可用的模块缺省为 None。
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    financial_data: Option<FinancialData>,
    summary_detail: Option<SummaryDetail>,
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<YahooValue<f64>>,
    return_on_equity: Option<YahooValue<f64>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    previous_close: Option<YahooValue<f64>>,
    market_cap: Option<YahooValue<serde_json::Number>>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<YahooValue<f64>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    price_to_book: Option<YahooValue<f64>>,
    book_value: Option<YahooValue<f64>>,
}

/// # Summary
/// Yahoo 数值字段，形如 `{"raw": 1.5, "fmt": "1.50"}`；不可用时为 `{}`。
#[derive(Deserialize, Debug)]
struct YahooValue<T> {
    raw: Option<T>,
}

fn raw<T>(value: Option<YahooValue<T>>) -> Option<T> {
    value.and_then(|v| v.raw)
}

/// 市值有时以浮点形式给出 (如 `4.97E11`)，按整数部分取值。
fn whole_number(value: Option<YahooValue<serde_json::Number>>) -> Option<i64> {
    let number = raw(value)?;
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| format!("{:.0}", f.trunc()).parse().ok())
    })
}

/// # Summary
/// 解析 quoteSummary 响应体。
///
/// # Logic
/// 1. 响应声明了 error 时返回 `QuoteError::Provider`。
/// 2. 取第一条 result，逐字段提取 `raw` 值；缺失字段保留为 None。
///
/// # Returns
/// 成功返回 QuoteInfo，响应体格式不符返回 `QuoteError::Parse`。
pub fn parse_quote_summary(body: &str) -> Result<QuoteInfo, QuoteError> {
    let resp: SummaryResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    if let Some(err) = resp.quote_summary.error {
        return Err(QuoteError::Provider(err.description));
    }

    let result = resp
        .quote_summary
        .result
        .and_then(|mut results| results.pop())
        .ok_or_else(|| QuoteError::Provider("empty quoteSummary result".into()))?;

    let (current_price, return_on_equity) = match result.financial_data {
        Some(data) => (raw(data.current_price), raw(data.return_on_equity)),
        None => (None, None),
    };
    let (previous_close, market_cap, trailing_pe) = match result.summary_detail {
        Some(detail) => (
            raw(detail.previous_close),
            whole_number(detail.market_cap),
            raw(detail.trailing_pe),
        ),
        None => (None, None, None),
    };
    let (price_to_book, book_value) = match result.default_key_statistics {
        Some(stats) => (raw(stats.price_to_book), raw(stats.book_value)),
        None => (None, None),
    };

    Ok(QuoteInfo {
        current_price,
        previous_close,
        market_cap,
        trailing_pe,
        return_on_equity,
        price_to_book,
        book_value,
    })
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    /// # Summary
    /// 从 Yahoo Finance 获取单只证券的基本信息。
    ///
    /// # Logic
    /// 1. 取得 (或复用) 会话 crumb。
    /// 2. 请求 quoteSummary 接口，单次调用，不重试。
    /// 3. 非 2xx 响应优先返回行情源给出的错误描述，否则返回 HTTP 状态；401 时作废 crumb。
    /// 4. 解析响应体为 QuoteInfo。
    ///
    /// # Arguments
    /// * `symbol`: 含市场后缀的代码。
    async fn fetch_info(&self, symbol: &str) -> Result<QuoteInfo, QuoteError> {
        let crumb = self.crumb().await?;
        let url = self.summary_url(symbol)?;
        debug!("Requesting Yahoo quoteSummary for {}", symbol);

        let resp = self
            .client
            .get(url)
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())])
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            *self.crumb.write().await = None;
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !status.is_success() {
            return match parse_quote_summary(&body) {
                Err(QuoteError::Provider(description)) => Err(QuoteError::Provider(description)),
                _ => Err(QuoteError::Network(format!("HTTP {}", status))),
            };
        }

        parse_quote_summary(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{"quoteSummary":{"result":[{
        "financialData":{"currentPrice":{"raw":38.12,"fmt":"38.12"},"returnOnEquity":{"raw":0.31,"fmt":"31.00%"}},
        "summaryDetail":{"previousClose":{"raw":37.9,"fmt":"37.90"},"marketCap":{"raw":497000000000,"fmt":"497B"},"trailingPE":{"raw":4.1,"fmt":"4.10"}},
        "defaultKeyStatistics":{"priceToBook":{"raw":1.2,"fmt":"1.20"},"bookValue":{"raw":31.5,"fmt":"31.50"}}
    }],"error":null}}"#;

    #[test]
    fn test_parse_full_summary() {
        let info = parse_quote_summary(FULL).unwrap();
        assert_eq!(
            info,
            QuoteInfo {
                current_price: Some(38.12),
                previous_close: Some(37.9),
                market_cap: Some(497_000_000_000),
                trailing_pe: Some(4.1),
                return_on_equity: Some(0.31),
                price_to_book: Some(1.2),
                book_value: Some(31.5),
            }
        );
    }

    #[test]
    fn test_parse_missing_and_empty_fields() {
        let body = r#"{"quoteSummary":{"result":[{
            "financialData":{"currentPrice":{"raw":10.0},"returnOnEquity":{}},
            "summaryDetail":{"previousClose":{"raw":9.5},"marketCap":{"raw":1000}}
        }],"error":null}}"#;
        let info = parse_quote_summary(body).unwrap();
        assert_eq!(info.current_price, Some(10.0));
        assert_eq!(info.return_on_equity, None);
        assert_eq!(info.trailing_pe, None);
        assert_eq!(info.price_to_book, None);
        assert_eq!(info.book_value, None);
    }

    #[test]
    fn test_parse_provider_error() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found for symbol: XXXX.SA"}}}"#;
        assert_eq!(
            parse_quote_summary(body).unwrap_err(),
            QuoteError::Provider("Quote not found for symbol: XXXX.SA".to_string())
        );
    }

    #[test]
    fn test_parse_float_market_cap() {
        let body = r#"{"quoteSummary":{"result":[{
            "summaryDetail":{"marketCap":{"raw":4.97E11,"fmt":"497B"}}
        }],"error":null}}"#;
        let info = parse_quote_summary(body).unwrap();
        assert_eq!(info.market_cap, Some(497_000_000_000));
    }

    #[test]
    fn test_summary_url_encodes_symbol() {
        let provider = YahooQuoteProvider::new(&FeedConfig {
            base_url: "https://query2.finance.yahoo.com/".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            market_suffix: ".SA".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let url = provider.summary_url("VALE3/../PETR4.SA").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/VALE3%2F..%2FPETR4.SA"
        );
        let url = provider.summary_url("PETR4.SA#?x=1").unwrap();
        assert_eq!(url.path_segments().unwrap().last(), Some("PETR4.SA%23%3Fx=1"));
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_quote_summary("<html>").unwrap_err(),
            QuoteError::Parse(_)
        ));
    }
}
