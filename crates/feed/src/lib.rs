//! # `ibov-feed` - 实时报价网关
//!
//! `yahoo` 模块实现 `QuoteProvider` 端口，`gateway` 模块负责拼接市场后缀
//! 并把行情源记录整理为对外的 `QuoteResult`。

pub mod gateway;
pub mod yahoo;
