use std::sync::Arc;

use crate::dataset::entity::{Cell, Record, Table};
use crate::dataset::error::QueryError;

/// # Summary
/// 单张数据表上的只读查询引擎。
///
/// # Invariants
/// - 表在构建时注入，之后不会被修改，可被任意多个请求并发读取。
/// - 公司名采用大小写敏感的精确匹配，列名同样不做模糊匹配。
#[derive(Debug, Clone)]
pub struct QueryEngine {
    table: Arc<Table>,
}

impl QueryEngine {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table }
    }

    /// 返回全部行与全部列，保持文件顺序。
    pub fn all(&self) -> Vec<Record> {
        let indices: Vec<usize> = (0..self.table.columns().len()).collect();
        self.table
            .rows()
            .iter()
            .map(|row| self.project(row, &indices))
            .collect()
    }

    /// # Summary
    /// 返回指定公司的全部行。
    ///
    /// # Returns
    /// 没有匹配行时返回 `QueryError::EntityNotFound`。
    pub fn by_entity(&self, entity: &str) -> Result<Vec<Record>, QueryError> {
        let indices: Vec<usize> = (0..self.table.columns().len()).collect();
        let rows = self.matching_rows(entity)?;
        Ok(rows.map(|row| self.project(row, &indices)).collect())
    }

    /// # Summary
    /// 返回指定公司在指定列上的时间序列。
    ///
    /// # Logic
    /// 1. 按公司过滤，无匹配行则 EntityNotFound。
    /// 2. 校验列存在于表的列集合中，否则 ColumnNotFound。
    /// 3. 将每行投影为 `{Data, column, ...固定列}`，保持行顺序；重复列只输出一次。
    ///
    /// # Arguments
    /// * `entity`: 公司标识。
    /// * `column`: 请求的列名。
    pub fn by_entity_and_column(
        &self,
        entity: &str,
        column: &str,
    ) -> Result<Vec<Record>, QueryError> {
        let rows = self.matching_rows(entity)?;
        let column_idx = self
            .table
            .column_index(column)
            .ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))?;

        let mut indices = vec![self.table.date_idx()];
        for idx in std::iter::once(column_idx).chain(self.table.pinned_idx().iter().copied()) {
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }

        Ok(rows.map(|row| self.project(row, &indices)).collect())
    }

    /// 路径段形式的公司/列查询 (`/{empresa}/{coluna}`)，语义与 `by_entity_and_column` 完全一致。
    pub fn by_entity_column_fixed(
        &self,
        entity: &str,
        column: &str,
    ) -> Result<Vec<Record>, QueryError> {
        self.by_entity_and_column(entity, column)
    }

    fn matching_rows<'a>(
        &'a self,
        entity: &'a str,
    ) -> Result<impl Iterator<Item = &'a Vec<Cell>> + 'a, QueryError> {
        let entity_idx = self.table.entity_idx();
        let is_match = move |row: &&Vec<Cell>| {
            row.get(entity_idx).and_then(|cell| cell.as_text()) == Some(entity)
        };

        if !self.table.rows().iter().any(|row| is_match(&row)) {
            return Err(QueryError::EntityNotFound(entity.to_string()));
        }
        Ok(self.table.rows().iter().filter(is_match))
    }

    fn project(&self, row: &[Cell], indices: &[usize]) -> Record {
        let columns = self.table.columns();
        Record::new(
            indices
                .iter()
                .filter_map(|&idx| Some((columns.get(idx)?.clone(), row.get(idx)?.clone())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::entity::TableSchema;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn fundamentals() -> QueryEngine {
        let columns = ["Empresa", "Data", "ROE", "LPA"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec![text("PETR4"), text("2023-01-01"), Cell::Float(0.15), Cell::Float(1.2)],
            vec![text("VALE3"), text("2023-01-01"), Cell::Float(0.22), Cell::Null],
            vec![text("PETR4"), text("2023-02-01"), Cell::Float(0.17), Cell::Float(1.4)],
        ];
        let table = Table::new(&TableSchema::fundamentals(), columns, rows).unwrap();
        QueryEngine::new(Arc::new(table))
    }

    fn indicators() -> QueryEngine {
        let columns = ["Empresa", "Data", "PL", "IBOV"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec![text("VALE3"), text("2023-01-01"), Cell::Float(5.1), Cell::Integer(110000)],
            vec![text("VALE3"), text("2023-02-01"), Cell::Float(5.4), Cell::Integer(112000)],
        ];
        let table = Table::new(&TableSchema::indicators(), columns, rows).unwrap();
        QueryEngine::new(Arc::new(table))
    }

    #[test]
    fn test_all_returns_every_row_in_order() {
        let records = fundamentals().all();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].get("Empresa"), Some(&text("VALE3")));
        assert_eq!(
            records[0].column_names().collect::<Vec<_>>(),
            vec!["Empresa", "Data", "ROE", "LPA"]
        );
    }

    #[test]
    fn test_by_entity_filters_exact_match() {
        let engine = fundamentals();
        let records = engine.by_entity("PETR4").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.get("Empresa") == Some(&text("PETR4"))));

        assert_eq!(
            engine.by_entity("petr4").unwrap_err(),
            QueryError::EntityNotFound("petr4".to_string())
        );
        assert_eq!(
            engine.by_entity("PETR").unwrap_err(),
            QueryError::EntityNotFound("PETR".to_string())
        );
    }

    #[test]
    fn test_projection_to_date_and_column() {
        let records = fundamentals().by_entity_and_column("PETR4", "ROE").unwrap();
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(
            json,
            r#"[{"Data":"2023-01-01","ROE":0.15},{"Data":"2023-02-01","ROE":0.17}]"#
        );
    }

    #[test]
    fn test_entity_checked_before_column() {
        let engine = fundamentals();
        assert_eq!(
            engine.by_entity_and_column("UNKNOWN", "NOPE").unwrap_err(),
            QueryError::EntityNotFound("UNKNOWN".to_string())
        );
        assert_eq!(
            engine.by_entity_and_column("PETR4", "NOPE").unwrap_err(),
            QueryError::ColumnNotFound("NOPE".to_string())
        );
        assert_eq!(
            engine.by_entity_and_column("PETR4", "roe").unwrap_err(),
            QueryError::ColumnNotFound("roe".to_string())
        );
    }

    #[test]
    fn test_indicators_always_include_benchmark() {
        let engine = indicators();
        let records = engine.by_entity_column_fixed("VALE3", "PL").unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.column_names().collect::<Vec<_>>(), vec!["Data", "PL", "IBOV"]);
        }
        assert_eq!(records[1].get("IBOV"), Some(&Cell::Integer(112000)));

        // 请求基准列本身时不重复输出
        let records = engine.by_entity_and_column("VALE3", "IBOV").unwrap();
        assert_eq!(records[0].column_names().collect::<Vec<_>>(), vec!["Data", "IBOV"]);
    }
}
