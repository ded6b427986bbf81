//! # `ibov-store` - 静态数据表加载
//!
//! 在进程启动时把两份 `;` 分隔的 UTF-8 数据文件读入内存，
//! 产出只读的 `Table`。加载失败即启动失败。

pub mod csv_table;
pub mod table_store;
