//! # `ibov-core` - 领域模型与端口
//!
//! 定义静态数据表 (`dataset`) 与实时报价 (`quote`) 两个领域的实体、错误与端口，
//! 以及全局配置结构。本 crate 不做任何 I/O，具体实现位于 `ibov-store` 与 `ibov-feed`。

pub mod config;
pub mod dataset;
pub mod quote;
