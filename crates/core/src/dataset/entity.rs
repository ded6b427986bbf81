use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeMap;
use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema};
use utoipa::openapi::RefOr;

use crate::dataset::error::LoadError;

/// 公司标识列
pub const ENTITY_COLUMN: &str = "Empresa";
/// 日期列，任何投影结果都包含它
pub const DATE_COLUMN: &str = "Data";
/// 指标表的基准列 (Ibovespa 指数)
pub const BENCHMARK_COLUMN: &str = "IBOV";

/// # Summary
/// 数据表中的单个单元格值。
///
/// # Invariants
/// - 序列化为 JSON 的 null / number / string；非有限浮点数输出为 null。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// 文本单元格的内容，其它类型返回 None。
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// # Summary
/// 数据表的结构约定：公司列、日期列，以及投影时必须附带的固定列。
///
/// # Invariants
/// - 按此 Schema 构建的 `Table` 一定包含这里列出的全部列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub entity_column: String,
    pub date_column: String,
    pub pinned_columns: Vec<String>,
}

impl TableSchema {
    /// 基本面数据表：无固定附加列。
    pub fn fundamentals() -> Self {
        Self {
            entity_column: ENTITY_COLUMN.to_string(),
            date_column: DATE_COLUMN.to_string(),
            pinned_columns: Vec::new(),
        }
    }

    /// 指标数据表：投影时总是附带 `IBOV` 基准列。
    pub fn indicators() -> Self {
        Self {
            pinned_columns: vec![BENCHMARK_COLUMN.to_string()],
            ..Self::fundamentals()
        }
    }
}

/// # Summary
/// 启动时加载、之后只读的内存数据表。
///
/// # Invariants
/// - 列集合在构建后固定不变，每行单元格数等于列数。
/// - 行顺序与源文件顺序一致。
#[derive(Debug)]
pub struct Table {
    columns: Vec<Arc<str>>,
    rows: Vec<Vec<Cell>>,
    entity_idx: usize,
    date_idx: usize,
    pinned_idx: Vec<usize>,
}

impl Table {
    /// # Summary
    /// 按 Schema 校验并构建数据表。
    ///
    /// # Logic
    /// 1. 在表头中定位公司列、日期列与固定附加列，缺失即报错。
    /// 2. 校验每行宽度与表头一致。
    ///
    /// # Arguments
    /// * `schema`: 列约定。
    /// * `columns`: 表头 (有序)。
    /// * `rows`: 行数据 (有序)。
    ///
    /// # Returns
    /// 成功返回 Table，否则返回 LoadError。
    pub fn new(
        schema: &TableSchema,
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, LoadError> {
        let locate = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let entity_idx = locate(&schema.entity_column)?;
        let date_idx = locate(&schema.date_column)?;
        let pinned_idx = schema
            .pinned_columns
            .iter()
            .map(|name| locate(name))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(LoadError::RowWidth {
                row: row + 1,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        Ok(Self {
            columns: columns.into_iter().map(Arc::from).collect(),
            rows,
            entity_idx,
            date_idx,
            pinned_idx,
        })
    }

    pub fn columns(&self) -> &[Arc<str>] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_ref() == name)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn entity_idx(&self) -> usize {
        self.entity_idx
    }

    pub(crate) fn date_idx(&self) -> usize {
        self.date_idx
    }

    pub(crate) fn pinned_idx(&self) -> &[usize] {
        &self.pinned_idx
    }
}

/// # Summary
/// 查询结果中的一行 (可能经过列投影)。
///
/// # Invariants
/// - 序列化为 JSON 对象，键顺序即列顺序。
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(Arc<str>, Cell)>,
}

impl Record {
    pub(crate) fn new(fields: Vec<(Arc<str>, Cell)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name.as_ref() == column)
            .map(|(_, cell)| cell)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_ref())
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, cell) in &self.fields {
            map.serialize_entry(name.as_ref(), cell)?;
        }
        map.end()
    }
}

// 列集合在加载时才确定，文档中只能描述为自由对象
impl utoipa::PartialSchema for Record {
    fn schema() -> RefOr<Schema> {
        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .description(Some("数据表的一行，键为列名"))
                .additional_properties(Some(AdditionalProperties::<Schema>::FreeForm(true)))
                .build(),
        ))
    }
}

impl utoipa::ToSchema for Record {}
