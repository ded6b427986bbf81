use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ibov_core::dataset::entity::{Cell, Table, TableSchema};
use ibov_core::dataset::error::LoadError;

/// 字段分隔符
const DELIMITER: u8 = b';';

/// 视为缺失值的文本标记
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 单列推断出的值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// # Summary
/// 从文件系统加载一张 `;` 分隔的数据表。
///
/// # Arguments
/// * `path`: 文件路径。
/// * `schema`: 该表必须满足的列约定。
///
/// # Returns
/// 成功返回 Table；文件缺失或格式错误返回 LoadError。
pub fn load_table(path: impl AsRef<Path>, schema: &TableSchema) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| LoadError::Io(format!("cannot open '{}': {}", path.display(), e)))?;
    load_table_from_reader(file, schema)
}

/// # Summary
/// 从任意字节流解析数据表。
///
/// # Logic
/// 1. 读取表头，去除 BOM，重名列改写为 `name.1`、`name.2`…
/// 2. 逐行读取；短行补空值，长行报错。
/// 3. 逐列推断类型：全为整数则为整数列 (含缺失值时升为浮点列)，全为数值则为浮点列，否则为文本列。
/// 4. 按 Schema 构建 Table。
pub fn load_table_from_reader<R: Read>(reader: R, schema: &TableSchema) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    let columns = dedupe_columns(headers.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        if record.len() > width {
            return Err(LoadError::RowWidth {
                row: i + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| (!NA_TOKENS.contains(&field)).then(|| field.to_string()))
            .collect();
        row.resize(width, None);
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|idx| infer_kind(raw_rows.iter().map(|row| row.get(idx).and_then(Option::as_deref))))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(kinds.iter())
                .map(|(value, kind)| to_cell(value, *kind))
                .collect()
        })
        .collect();

    Table::new(schema, columns, rows)
}

fn dedupe_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for (i, name) in names.enumerate() {
        let name = if i == 0 {
            name.trim_start_matches('\u{feff}')
        } else {
            name
        };
        let mut candidate = name.to_string();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

fn infer_kind<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut has_null = false;
    let mut all_int = true;
    let mut all_float = true;

    for value in values {
        match value {
            None => has_null = true,
            Some(v) => {
                let v = v.trim();
                if all_int && v.parse::<i64>().is_err() {
                    all_int = false;
                }
                if v.parse::<f64>().is_err() {
                    all_float = false;
                    break;
                }
            }
        }
    }

    match (all_int, all_float) {
        (true, _) if !has_null => ColumnKind::Integer,
        (_, true) => ColumnKind::Float,
        _ => ColumnKind::Text,
    }
}

fn to_cell(value: Option<String>, kind: ColumnKind) -> Cell {
    let Some(value) = value else {
        return Cell::Null;
    };
    match kind {
        ColumnKind::Integer => value
            .trim()
            .parse()
            .map(Cell::Integer)
            .unwrap_or(Cell::Text(value)),
        ColumnKind::Float => value
            .trim()
            .parse()
            .map(Cell::Float)
            .unwrap_or(Cell::Text(value)),
        ColumnKind::Text => Cell::Text(value),
    }
}
