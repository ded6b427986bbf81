//! # `ibov-api` - HTTP API 网关
//!
//! 本 crate 是 Ibovespa 数据分析 API 的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端看板或浏览器的 HTTP 请求
//! - 调用 `QueryEngine` 过滤两张静态数据表，或调用 `QuoteGateway` 查询实时报价
//! - 将查询结果与错误统一转换为 HTTP 状态码与响应体

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
