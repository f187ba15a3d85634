use crate::store::error::StoreError;
use thiserror::Error;

/// # Summary
/// 序列检索与相关性分析域的错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 价格与相关性链路上的所有错误都在服务层被转换为空响应，不会透传给调用方。
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// 标识符列表为空，或包含存储中不存在的股票代码
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// 检索结果为空，或边界行违反了请求的日期/身份约束
    #[error("Empty or misaligned series: {0}")]
    EmptyOrMisaligned(String),
    /// 两条序列的日期轴不一致 (严格对齐策略下)
    #[error("Series {left} and {right} do not share a date axis")]
    Misaligned { left: String, right: String },
    /// 请求参数非法
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// 底层存储错误
    #[error(transparent)]
    Store(#[from] StoreError),
}
