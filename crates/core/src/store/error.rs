use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理数据库连接、查询执行与结果解码失败等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 对核心层不透明，仅用于日志与降级判断。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 数据库操作失败
    #[error("Database error: {0}")]
    Database(String),
    /// 查询文本或参数非法 (例如引用了未绑定的占位符)
    #[error("Query error: {0}")]
    Query(String),
    /// 结果列无法解码
    #[error("Decode error: {0}")]
    Decode(String),
    /// 初始化存储失败
    #[error("Initialization error: {0}")]
    InitError(String),
}
