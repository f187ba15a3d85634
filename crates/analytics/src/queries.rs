//! 核心链路使用的三种查询形态，以及新闻列表查询。
//! 所有标识符、日期与条数都以命名参数绑定。

use chrono::NaiveDate;
use tandem_core::common::{DateBound, SeriesKind};
use tandem_core::store::port::Query;

pub const KNOWN_SYMBOLS: &str = "SELECT DISTINCT SYMBOL FROM STOCK_TRADES";

pub const STOCK_PRICES: &str = "SELECT DISTINCT SYMBOL, TRADE_DATE, CLOSE_PRICE FROM STOCK_TRADES \
     WHERE (\"SYMBOL\" = $symbol AND TRADE_DATE >= $startDate AND TRADE_DATE <= $endDate) \
     ORDER BY TRADE_DATE";

pub const CURRENCY_RATES: &str = "SELECT CURRENCY, TRADE_DATE, VALUE FROM CURRENCY_RATES \
     WHERE (\"CURRENCY\" = $currency AND TRADE_DATE >= $startDate AND TRADE_DATE <= $endDate) \
     ORDER BY TRADE_DATE";

pub const NEWS: &str = "SELECT MIN(NEWS_DATE) AS NEWS_DATE, MIN(NEWS_SRC) AS NEWS_SRC, \
     MIN(NEWS_URL) AS NEWS_URL, NEWS_TITLE, MIN(NEWS_TEXT) AS NEWS_TEXT \
     FROM NEWS \
     WHERE ($startDate IS NULL OR NEWS_DATE >= $startDate) \
     AND ($endDate IS NULL OR NEWS_DATE <= $endDate) \
     GROUP BY NEWS_TITLE \
     ORDER BY NEWS_DATE DESC, NEWS_TITLE DESC \
     LIMIT $max";

// 新闻时间戳以纳秒精度文本存储，日期边界补齐到与之可比较的形式
const NEWS_START_SUFFIX: &str = " 00:00:00.000000000";
const NEWS_END_SUFFIX: &str = " 05:40:00.000000000";

/// # Summary
/// 某一序列类型的查询形态：SQL、标识符参数名与结果列名。
#[derive(Debug, Clone, Copy)]
pub struct SeriesShape {
    pub sql: &'static str,
    pub id_param: &'static str,
    pub id_column: &'static str,
    pub date_column: &'static str,
    pub value_column: &'static str,
}

impl SeriesShape {
    pub fn of(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Stock => Self {
                sql: STOCK_PRICES,
                id_param: "symbol",
                id_column: "SYMBOL",
                date_column: "TRADE_DATE",
                value_column: "CLOSE_PRICE",
            },
            SeriesKind::Currency => Self {
                sql: CURRENCY_RATES,
                id_param: "currency",
                id_column: "CURRENCY",
                date_column: "TRADE_DATE",
                value_column: "VALUE",
            },
        }
    }

    /// 构造带边界的检索查询
    pub fn query(&self, identifier: &str, bound: DateBound) -> Query {
        Query::new(self.sql)
            .bind(self.id_param, identifier)
            .bind("startDate", bound.start)
            .bind("endDate", bound.end)
    }
}

pub fn known_symbols() -> Query {
    Query::new(KNOWN_SYMBOLS)
}

pub fn news(start: Option<NaiveDate>, end: Option<NaiveDate>, max: u32) -> Query {
    Query::new(NEWS)
        .bind("startDate", start.map(|d| format!("{}{}", d, NEWS_START_SUFFIX)))
        .bind("endDate", end.map(|d| format!("{}{}", d, NEWS_END_SUFFIX)))
        .bind("max", i64::from(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::store::port::SqlValue;

    #[test]
    fn test_series_query_binds_bounds_as_text() {
        let bound = DateBound::new(
            NaiveDate::from_ymd_opt(2016, 7, 7).unwrap(),
            NaiveDate::from_ymd_opt(2017, 7, 19).unwrap(),
        )
        .unwrap();
        let query = SeriesShape::of(SeriesKind::Currency).query("DEXJPUS", bound);
        assert_eq!(query.param("currency"), Some(&SqlValue::from("DEXJPUS")));
        assert_eq!(query.param("startDate"), Some(&SqlValue::from("2016-07-07")));
        assert_eq!(query.param("endDate"), Some(&SqlValue::from("2017-07-19")));
        assert!(!query.sql().contains("DEXJPUS"));
    }

    #[test]
    fn test_news_query_uses_null_for_open_bounds() {
        let query = news(NaiveDate::from_ymd_opt(2017, 3, 1), None, 6);
        assert_eq!(
            query.param("startDate"),
            Some(&SqlValue::from("2017-03-01 00:00:00.000000000"))
        );
        assert_eq!(query.param("endDate"), Some(&SqlValue::Null));
        assert_eq!(query.param("max"), Some(&SqlValue::Integer(6)));
    }
}
