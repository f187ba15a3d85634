//! # `tandem-api` - HTTP API 网关
//!
//! 本 crate 是 Tandem 序列相关性服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自浏览器图表前端的 HTTP 请求
//! - 调用下层 `SeriesService` 完成价格、相关性与新闻查询
//! - 将领域模型转换为列式 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
