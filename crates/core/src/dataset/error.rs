use thiserror::Error;

/// # Summary
/// 数据表加载错误，发生在进程启动阶段。
///
/// # Invariants
/// - 任一变体出现都意味着服务无法启动。
#[derive(Error, Debug)]
pub enum LoadError {
    // 文件无法打开或读取
    #[error("I/O error: {0}")]
    Io(String),
    // 分隔符文件格式错误
    #[error("Malformed table: {0}")]
    Malformed(String),
    // Schema 要求的列在表头中不存在
    #[error("Required column \"{0}\" is missing")]
    MissingColumn(String),
    // 某行字段数与表头不一致
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// # Summary
/// 查询错误，两种情况对外都映射为 404，仅提示信息不同。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Empresa \"{0}\" não encontrada.")]
    EntityNotFound(String),
    #[error("Coluna \"{0}\" não encontrada.")]
    ColumnNotFound(String),
}
