use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// 存储层与对外接口统一使用的日期文本格式 (ISO 8601 日期部分)。
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// # Summary
/// 闭区间日期边界，用于限定一次序列检索的范围。
///
/// # Invariants
/// - `start <= end`，通过 `DateBound::new` 构造时强制校验。
/// - 从配置反序列化得到的实例需经 `AnalyticsConfig::validate` 校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBound {
    // 起始日期 (包含)
    pub start: NaiveDate,
    // 截止日期 (包含)
    pub end: NaiveDate,
}

impl DateBound {
    /// # Summary
    /// 构造一个日期边界。
    ///
    /// # Arguments
    /// * `start`: 起始日期 (包含)。
    /// * `end`: 截止日期 (包含)。
    ///
    /// # Returns
    /// `start > end` 时返回 `ConfigError::InvalidBound`。
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        let bound = Self { start, end };
        bound.check()?;
        Ok(bound)
    }

    pub(crate) fn check(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::InvalidBound {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// # Summary
/// 序列类型，决定检索时使用的查询形态与取值列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    // 股票收盘价
    Stock,
    // 货币汇率
    Currency,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Stock => write!(f, "stock"),
            SeriesKind::Currency => write!(f, "currency"),
        }
    }
}

/// # Summary
/// 相关性计算的配对类型。
///
/// # Invariants
/// - 第一个标识符始终是股票代码；第二个标识符的含义由枚举值决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationKind {
    // 股票 vs 股票
    StockStock,
    // 股票 vs 货币
    StockCurrency,
}

impl CorrelationKind {
    /// 第二条序列的类型
    pub fn second_kind(&self) -> SeriesKind {
        match self {
            CorrelationKind::StockStock => SeriesKind::Stock,
            CorrelationKind::StockCurrency => SeriesKind::Currency,
        }
    }
}

impl std::fmt::Display for CorrelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationKind::StockStock => write!(f, "stock-stock"),
            CorrelationKind::StockCurrency => write!(f, "stock-currency"),
        }
    }
}
