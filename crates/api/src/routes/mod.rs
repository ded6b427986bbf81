//! 路由控制器，按资源划分。

pub mod fundamentals;
pub mod index;
pub mod indicators;
pub mod quote;
