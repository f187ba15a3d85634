use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tandem_core::common::{DATE_FORMAT, DateBound, SeriesKind};
use tandem_core::series::entity::{SeriesPoint, TimeSeries};
use tandem_core::series::error::AnalyticsError;
use tandem_core::store::port::{Row, SeriesStore, SqlValue};
use tracing::debug;

use crate::queries::SeriesShape;

/// # Summary
/// 有界时间序列检索器。
///
/// # Invariants
/// - 返回的序列非空、首行标识符与请求一致、首日不早于起点、末日不晚于终点。
/// - 区间内部的缺口不做检查，原样透传。
pub struct SeriesRetriever {
    store: Arc<dyn SeriesStore>,
}

impl SeriesRetriever {
    pub fn new(store: Arc<dyn SeriesStore>) -> Self {
        Self { store }
    }

    /// 获取股票收盘价序列
    pub async fn get_stock_series(
        &self,
        symbol: &str,
        bound: DateBound,
    ) -> Result<TimeSeries, AnalyticsError> {
        self.get_series(SeriesKind::Stock, symbol, bound).await
    }

    /// 获取货币汇率序列
    pub async fn get_currency_series(
        &self,
        currency: &str,
        bound: DateBound,
    ) -> Result<TimeSeries, AnalyticsError> {
        self.get_series(SeriesKind::Currency, currency, bound).await
    }

    /// # Summary
    /// 按序列类型检索并校验。
    ///
    /// # Logic
    /// 1. 根据类型选择查询形态并绑定标识符与日期边界。
    /// 2. 执行查询。
    /// 3. 校验边界行并解析为 `TimeSeries`。
    ///
    /// # Arguments
    /// * `kind`: 股票或货币。
    /// * `identifier`: 代码。
    /// * `bound`: 闭区间日期边界。
    ///
    /// # Returns
    /// 校验失败返回 `EmptyOrMisaligned`，存储失败返回 `Store`。
    pub async fn get_series(
        &self,
        kind: SeriesKind,
        identifier: &str,
        bound: DateBound,
    ) -> Result<TimeSeries, AnalyticsError> {
        let shape = SeriesShape::of(kind);
        let rows = self.store.run_query(&shape.query(identifier, bound)).await?;
        debug!("Fetched {} {} rows for {}", rows.len(), kind, identifier);
        verify(&rows, &shape, identifier, bound)
    }
}

/// # Summary
/// 校验检索结果并转换为时间序列。
///
/// # Logic
/// 1. 结果为空则失败。
/// 2. 首行标识符必须与请求一致。
/// 3. 首行日期不早于起点，末行日期不晚于终点。
/// 4. 逐行解析日期与数值，最后由 `TimeSeries::new` 检查日期严格递增。
pub(crate) fn verify(
    rows: &[Row],
    shape: &SeriesShape,
    identifier: &str,
    bound: DateBound,
) -> Result<TimeSeries, AnalyticsError> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(misaligned(identifier, "no rows in range"));
    };

    let first_id = first.get(shape.id_column).and_then(SqlValue::as_text);
    if first_id != Some(identifier) {
        return Err(misaligned(
            identifier,
            &format!("first row belongs to {:?}", first_id),
        ));
    }

    let first_date = row_date(first, shape, identifier)?;
    if first_date < bound.start {
        return Err(misaligned(
            identifier,
            &format!("first date {} precedes {}", first_date, bound.start),
        ));
    }
    let last_date = row_date(last, shape, identifier)?;
    if last_date > bound.end {
        return Err(misaligned(
            identifier,
            &format!("last date {} exceeds {}", last_date, bound.end),
        ));
    }

    let points = rows
        .iter()
        .map(|row| {
            Ok(SeriesPoint {
                date: row_date(row, shape, identifier)?,
                value: row_value(row, shape, identifier)?,
            })
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;

    TimeSeries::new(identifier, points)
}

fn misaligned(identifier: &str, reason: &str) -> AnalyticsError {
    AnalyticsError::EmptyOrMisaligned(format!("{}: {}", identifier, reason))
}

fn row_date(row: &Row, shape: &SeriesShape, identifier: &str) -> Result<NaiveDate, AnalyticsError> {
    row.get(shape.date_column)
        .and_then(SqlValue::as_text)
        .and_then(parse_date)
        .ok_or_else(|| misaligned(identifier, &format!("unreadable {}", shape.date_column)))
}

fn row_value(row: &Row, shape: &SeriesShape, identifier: &str) -> Result<f64, AnalyticsError> {
    row.get(shape.value_column)
        .and_then(parse_value)
        .ok_or_else(|| misaligned(identifier, &format!("unreadable {}", shape.value_column)))
}

/// 解析 `YYYY-MM-DD`，允许带时间部分的存储格式 (只取日期前缀)
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// 将存储中的文本/十进制/整数值转换为浮点数
pub(crate) fn parse_value(value: &SqlValue) -> Option<f64> {
    match value {
        SqlValue::Real(v) => Some(*v),
        SqlValue::Integer(v) => Decimal::from(*v).to_f64(),
        SqlValue::Text(text) => {
            let text = text.trim();
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
                .and_then(|d| d.to_f64())
        }
        SqlValue::Null => None,
    }
}
