use std::sync::Arc;

use ibov_core::config::DataConfig;
use ibov_core::dataset::entity::{Table, TableSchema};
use ibov_core::dataset::error::LoadError;
use tracing::info;

use crate::csv_table::load_table;

/// # Summary
/// 进程内的两张静态数据表。
///
/// # Invariants
/// - 启动时一次性加载，之后只读，生命周期与进程等同。
#[derive(Debug, Clone)]
pub struct TableStore {
    /// 基本面数据表
    pub fundamentals: Arc<Table>,
    /// 指标数据表 (含 IBOV 基准列)
    pub indicators: Arc<Table>,
}

impl TableStore {
    /// # Summary
    /// 按配置加载两张数据表。
    ///
    /// # Logic
    /// 1. 以基本面 Schema 加载 `fundamentals_path`。
    /// 2. 以指标 Schema 加载 `indicators_path`。
    /// 3. 任一失败立即返回错误，调用方应中止启动。
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let fundamentals = load_table(&config.fundamentals_path, &TableSchema::fundamentals())?;
        info!(
            "Loaded fundamentals table from {}: {} rows, {} columns",
            config.fundamentals_path,
            fundamentals.len(),
            fundamentals.columns().len()
        );

        let indicators = load_table(&config.indicators_path, &TableSchema::indicators())?;
        info!(
            "Loaded indicators table from {}: {} rows, {} columns",
            config.indicators_path,
            indicators.len(),
            indicators.columns().len()
        );

        Ok(Self {
            fundamentals: Arc::new(fundamentals),
            indicators: Arc::new(indicators),
        })
    }
}
