//! # `tandem-analytics` - 序列检索与滚动相关性
//!
//! 组件自底向上：
//! - `validator`: 股票代码校验
//! - `retriever`: 有界序列检索与完整性校验
//! - `correlation`: 日期对齐与滑动窗口皮尔逊相关系数
//! - `news`: 新闻列表查询
//! - `service`: 编排层，任何失败都降级为空结果

pub mod correlation;
pub mod news;
pub mod queries;
pub mod retriever;
pub mod service;
pub mod validator;
