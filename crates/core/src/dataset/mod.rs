//! 静态财务数据表：实体、错误与只读查询引擎。

pub mod entity;
pub mod error;
pub mod query;
