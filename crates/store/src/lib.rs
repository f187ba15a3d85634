//! # `tandem-store` - 序列存储适配器
//!
//! 基于 `sqlx` + SQLite 实现 `SeriesStore` 端口：
//! 将 `$name` 命名占位符改写为 SQLite 编号参数，执行查询并把结果行解码为 `Row`。

pub mod params;
pub mod series;
