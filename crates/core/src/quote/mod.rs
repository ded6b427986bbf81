//! 实时报价：外部行情源返回的原始记录、对外输出的报价结果与行情源端口。

pub mod entity;
pub mod error;
pub mod port;
