use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Arguments, Column, Row as _, SqlitePool, TypeInfo, ValueRef};
use std::path::Path;
use std::str::FromStr;
use tandem_core::store::error::StoreError;
use tandem_core::store::port::{Query, Row, SeriesStore, SqlValue};
use tracing::debug;

use crate::params::to_positional;

/// 源序列表结构，字段名沿用上游数据集的大写列名
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS STOCK_TRADES (
    SYMBOL TEXT NOT NULL,
    TRADE_DATE TEXT NOT NULL,
    OPEN_PRICE TEXT,
    HIGH_PRICE TEXT,
    LOW_PRICE TEXT,
    CLOSE_PRICE TEXT NOT NULL,
    VOLUME INTEGER
);

CREATE INDEX IF NOT EXISTS IDX_STOCK_TRADES_SYMBOL_DATE
    ON STOCK_TRADES (SYMBOL, TRADE_DATE);

CREATE TABLE IF NOT EXISTS CURRENCY_RATES (
    CURRENCY TEXT NOT NULL,
    TRADE_DATE TEXT NOT NULL,
    VALUE TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS IDX_CURRENCY_RATES_CURRENCY_DATE
    ON CURRENCY_RATES (CURRENCY, TRADE_DATE);

CREATE TABLE IF NOT EXISTS NEWS (
    NEWS_DATE TEXT,
    NEWS_SRC TEXT,
    NEWS_URL TEXT,
    NEWS_TITLE TEXT NOT NULL,
    NEWS_TEXT TEXT
);
"#;

/// SeriesStore 的 SQLite 实现。
///
/// # Summary
/// 在单个 SQLite 数据库中保存股票成交、汇率与新闻三张源表，
/// 对外只暴露参数化只读查询。
///
/// # Invariants
/// * 表结构在存储实例创建时以幂等 DDL 初始化。
/// * 所有查询均通过共享的 `SqlitePool` 执行，参数一律绑定，不拼接文本。
pub struct SqliteSeriesStore {
    pool: SqlitePool,
}

impl SqliteSeriesStore {
    /// 打开 (必要时创建) 指定路径的数据库文件。
    ///
    /// # Logic
    /// 1. 确保父目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 建立连接池并初始化表结构。
    ///
    /// # Arguments
    /// * `path` - 数据库文件路径。
    /// * `max_connections` - 连接池上限。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或初始化错误。
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::InitError(e.to_string()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        debug!("Opened series store at {}", path.display());
        Self::with_pool(pool).await
    }

    /// 创建仅存在于内存中的数据库 (测试用)。
    ///
    /// 内存库随连接销毁，因此连接池固定为单连接且不回收。
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;
        Ok(Self { pool })
    }

    /// 底层连接池，供数据导入与测试写入源表
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_value<'q>(args: &mut SqliteArguments<'q>, value: &SqlValue) -> Result<(), StoreError> {
    let result = match value {
        SqlValue::Null => args.add(None::<String>),
        SqlValue::Integer(v) => args.add(*v),
        SqlValue::Real(v) => args.add(*v),
        SqlValue::Text(v) => args.add(v.clone()),
    };
    result.map_err(|e| StoreError::Query(e.to_string()))
}

/// # Summary
/// 将一行 SQLite 结果解码为 `Row`。
///
/// # Logic
/// 以每个单元格的实际存储类型 (而非列声明类型) 决定解码目标，
/// 因此同一列中混存的 TEXT / REAL 值都能被正确读取。
fn decode_row(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut decoded = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let raw = row
            .try_get_raw(idx)
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let storage = if raw.is_null() {
            "NULL".to_string()
        } else {
            raw.type_info().name().to_string()
        };

        let value = match storage.as_str() {
            "NULL" => SqlValue::Null,
            "INTEGER" => SqlValue::Integer(
                row.try_get::<i64, _>(idx)
                    .map_err(|e| StoreError::Decode(e.to_string()))?,
            ),
            "REAL" => SqlValue::Real(
                row.try_get::<f64, _>(idx)
                    .map_err(|e| StoreError::Decode(e.to_string()))?,
            ),
            "TEXT" => SqlValue::Text(
                row.try_get::<String, _>(idx)
                    .map_err(|e| StoreError::Decode(e.to_string()))?,
            ),
            other => {
                return Err(StoreError::Decode(format!(
                    "unsupported storage class {} in column {}",
                    other,
                    column.name()
                )));
            }
        };
        decoded.insert(column.name().to_string(), value);
    }
    Ok(decoded)
}

#[async_trait]
impl SeriesStore for SqliteSeriesStore {
    /// # Summary
    /// 执行参数化查询。
    ///
    /// # Logic
    /// 1. 将 `$name` 占位符改写为 `?N`。
    /// 2. 按编号顺序绑定参数并执行。
    /// 3. 逐行解码。
    ///
    /// # Arguments
    /// * `query` - 参数化查询。
    ///
    /// # Returns
    /// * `Result<Vec<Row>, StoreError>`
    async fn run_query(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let positional = to_positional(query)?;
        debug!(
            sql = %positional.sql,
            params = positional.values.len(),
            "Executing series query"
        );

        let mut args = SqliteArguments::default();
        for value in &positional.values {
            bind_value(&mut args, value)?;
        }

        let rows = sqlx::query_with(&positional.sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter().map(decode_row).collect()
    }
}
