//! 分层配置加载：内置默认值 → 配置文件 → 环境变量。

use config::{Config, ConfigError, Environment, File};
use ibov_core::config::AppConfig;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "IBOV_CONFIG";
/// 未指定时尝试读取的配置文件 (可不存在)
pub const DEFAULT_CONFIG_FILE: &str = "ibov.toml";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加 `IBOV_CONFIG` 指向的文件，未设置时叠加 `ibov.toml`，文件缺失不报错。
/// 3. 叠加 `IBOV__SECTION__KEY` 形式的环境变量，例如 `IBOV__SERVER__PORT=8080`。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    load_from(&path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix("IBOV")
        .separator("__")
        .try_parsing(true)
}

fn load_from(path: &str, env: Environment) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(path).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()
}
