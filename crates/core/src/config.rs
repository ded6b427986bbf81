use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// 监听地址，形如 `0.0.0.0:81`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 两张静态数据表的文件位置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub fundamentals_path: String,
    pub indicators_path: String,
}

/// 外部行情源 (Yahoo Finance) 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    // 用于换取 crumb 的会话 Cookie 入口
    pub cookie_url: String,
    // B3 市场后缀，拼接在用户输入的 ticker 之后
    pub market_suffix: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 81,
            },
            data: DataConfig {
                fundamentals_path: "fundamentos_empresas.csv".to_string(),
                indicators_path: "fundamentos_empresas_indicadores.csv".to_string(),
            },
            feed: FeedConfig {
                base_url: "https://query2.finance.yahoo.com".to_string(),
                cookie_url: "https://fc.yahoo.com".to_string(),
                market_suffix: ".SA".to_string(),
                timeout_secs: 10,
            },
        }
    }
}
