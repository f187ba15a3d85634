use super::error::StoreError;
use crate::common::DATE_FORMAT;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// # Summary
/// 与存储交换的标量值，对应 SQLite 的四种基本存储类型。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// 文本值的借用视图，其他类型返回 None
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

/// 日期统一以 `YYYY-MM-DD` 文本形式绑定，与存储中的 TEXT 列按字典序比较一致
impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Text(value.format(DATE_FORMAT).to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// 查询结果行：列名 -> 值
pub type Row = BTreeMap<String, SqlValue>;

/// # Summary
/// 参数化查询：带 `$name` 命名占位符的 SQL 文本与具名参数列表。
///
/// # Invariants
/// - 标识符与日期只能通过参数绑定进入查询，绝不拼接到 SQL 文本中。
/// - 参数名唯一，重复绑定同名参数时以最后一次为准。
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: String,
    params: Vec<(String, SqlValue)>,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// # Summary
    /// 绑定一个具名参数 (不带 `$` 前缀)。
    ///
    /// # Arguments
    /// * `name`: 参数名，例如 `symbol` 对应 SQL 中的 `$symbol`。
    /// * `value`: 参数值。
    ///
    /// # Returns
    /// 绑定后的查询 (builder 风格)。
    pub fn bind(mut self, name: &str, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name.to_string(), value)),
        }
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    /// 按名称查找参数值
    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// # Summary
/// 序列数据存储接口 (外部协作者)，唯一的操作是执行参数化查询。
///
/// # Invariants
/// - 实现者只读，不得修改源序列。
/// - 查询失败一律以 `StoreError` 返回，不得 panic。
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// # Summary
    /// 执行参数化查询并返回全部结果行。
    ///
    /// # Logic
    /// 1. 将 `$name` 占位符映射为底层驱动的参数形式。
    /// 2. 按参数表绑定取值并执行。
    /// 3. 将每一行解码为 `Row`。
    ///
    /// # Arguments
    /// * `query`: 待执行的参数化查询。
    ///
    /// # Returns
    /// 成功返回结果行列表 (可能为空)，失败返回 `StoreError`。
    async fn run_query(&self, query: &Query) -> Result<Vec<Row>, StoreError>;
}
