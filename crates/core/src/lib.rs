//! # `tandem-core` - 领域核心
//!
//! 定义时间序列、相关性轨迹等领域实体，存储端口 (Port) 以及全局配置。
//! 本 crate 不包含任何 I/O 实现，具体适配器位于 `tandem-store`。

pub mod catalog;
pub mod common;
pub mod config;
pub mod series;
pub mod store;
