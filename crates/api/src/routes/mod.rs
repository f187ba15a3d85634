//! # 路由控制器
//!
//! 所有 Handler 都挂载在 `/api/stocks` 之下。

pub mod catalog;
pub mod news;
pub mod series;
