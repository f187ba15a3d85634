#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tandem_analytics::queries;
use tandem_core::store::error::StoreError;
use tandem_core::store::port::{Query, Row, SeriesStore, SqlValue};

/// # Summary
/// 为测试提供的内存序列存储，按 SQL 文本识别查询形态并记录每次调用。
#[derive(Default)]
pub struct MockStore {
    // 股票代码 -> (日期, 收盘价文本)
    stocks: BTreeMap<String, Vec<(String, String)>>,
    // 货币代码 -> (日期, 汇率文本)
    currencies: BTreeMap<String, Vec<(String, String)>>,
    // 已执行的查询文本
    executed: Mutex<Vec<String>>,
    // 命中该 SQL 时返回存储错误
    fail_on: Option<&'static str>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(mut self, symbol: &str, rows: Vec<(String, f64)>) -> Self {
        self.stocks.insert(
            symbol.to_string(),
            rows.into_iter().map(|(d, v)| (d, v.to_string())).collect(),
        );
        self
    }

    pub fn with_currency(mut self, code: &str, rows: Vec<(String, f64)>) -> Self {
        self.currencies.insert(
            code.to_string(),
            rows.into_iter().map(|(d, v)| (d, v.to_string())).collect(),
        );
        self
    }

    pub fn failing_on(mut self, sql: &'static str) -> Self {
        self.fail_on = Some(sql);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn count(&self, sql: &str) -> usize {
        self.executed().iter().filter(|s| s.as_str() == sql).count()
    }

    fn ranged(
        table: &BTreeMap<String, Vec<(String, String)>>,
        query: &Query,
        id_param: &str,
        id_column: &str,
        value_column: &str,
    ) -> Vec<Row> {
        let text = |name: &str| {
            query
                .param(name)
                .and_then(SqlValue::as_text)
                .unwrap_or_default()
                .to_string()
        };
        let id = text(id_param);
        let (start, end) = (text("startDate"), text("endDate"));
        let mut rows: Vec<Row> = table
            .get(&id)
            .map(|points| {
                points
                    .iter()
                    .filter(|(d, _)| *d >= start && *d <= end)
                    .map(|(d, v)| {
                        let mut row = Row::new();
                        row.insert(id_column.to_string(), SqlValue::from(id.as_str()));
                        row.insert("TRADE_DATE".to_string(), SqlValue::from(d.as_str()));
                        row.insert(value_column.to_string(), SqlValue::from(v.as_str()));
                        row
                    })
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by(|a, b| {
            a["TRADE_DATE"]
                .as_text()
                .cmp(&b["TRADE_DATE"].as_text())
        });
        rows
    }
}

#[async_trait]
impl SeriesStore for MockStore {
    async fn run_query(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        self.executed.lock().unwrap().push(query.sql().to_string());
        if self.fail_on == Some(query.sql()) {
            return Err(StoreError::Database("connection reset".to_string()));
        }

        match query.sql() {
            queries::KNOWN_SYMBOLS => Ok(self
                .stocks
                .keys()
                .map(|s| {
                    let mut row = Row::new();
                    row.insert("SYMBOL".to_string(), SqlValue::from(s.as_str()));
                    row
                })
                .collect()),
            queries::STOCK_PRICES => Ok(Self::ranged(
                &self.stocks,
                query,
                "symbol",
                "SYMBOL",
                "CLOSE_PRICE",
            )),
            queries::CURRENCY_RATES => Ok(Self::ranged(
                &self.currencies,
                query,
                "currency",
                "CURRENCY",
                "VALUE",
            )),
            other => Err(StoreError::Query(format!("unexpected query {}", other))),
        }
    }
}

pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 8, 1).unwrap() + Days::new(offset)
}

/// 从 2016-08-01 起连续 `n` 天的日期与数值
pub fn daily(n: u64, value: impl Fn(u64) -> f64) -> Vec<(String, f64)> {
    (0..n).map(|i| (day(i).to_string(), value(i))).collect()
}

pub fn wave(i: u64) -> f64 {
    100.0 + ((i * 7) % 13) as f64 + (i % 5) as f64 * 0.5
}

pub fn other_wave(i: u64) -> f64 {
    20.0 + ((i * 3) % 11) as f64 - (i % 4) as f64 * 0.25
}
