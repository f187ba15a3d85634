use crate::common::CorrelationKind;
use crate::series::error::AnalyticsError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单个观测点：日期与数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// # Summary
/// 单个标识符在某一日期区间内的有序观测序列。
///
/// # Invariants
/// - 非空。
/// - 日期严格递增且唯一。
/// - 构造后只读。
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    identifier: String,
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// # Summary
    /// 构造时间序列并校验不变量。
    ///
    /// # Logic
    /// 1. 拒绝空序列。
    /// 2. 逐对检查日期严格递增 (同时保证唯一)。
    ///
    /// # Arguments
    /// * `identifier`: 股票代码或货币代码。
    /// * `points`: 已按日期升序排列的观测点。
    ///
    /// # Returns
    /// 违反不变量时返回 `AnalyticsError::EmptyOrMisaligned`。
    pub fn new(identifier: impl Into<String>, points: Vec<SeriesPoint>) -> Result<Self, AnalyticsError> {
        let identifier = identifier.into();
        if points.is_empty() {
            return Err(AnalyticsError::EmptyOrMisaligned(format!(
                "{} has no observations",
                identifier
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(AnalyticsError::EmptyOrMisaligned(format!(
                "{} dates not strictly ascending at {} -> {}",
                identifier, pair[0].date, pair[1].date
            )));
        }
        Ok(Self { identifier, points })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 相关性轨迹中的一个点，`date` 为窗口之后紧邻观测值的日期
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub coefficient: f64,
}

/// # Summary
/// 滑动窗口相关性轨迹，每个合法窗口位置一个系数。
///
/// # Invariants
/// - 日期严格递增。
/// - 系数取值 `[-1, 1]`，无定义时为 `NaN`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationTrace {
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationTrace {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.coefficient)
    }
}

/// # Summary
/// 价格序列查询的结果，失败时 `points` 为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<SeriesPoint>,
}

impl PriceSeries {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }
}

impl From<TimeSeries> for PriceSeries {
    fn from(series: TimeSeries) -> Self {
        Self {
            symbol: series.identifier,
            points: series.points,
        }
    }
}

/// # Summary
/// 一次相关性请求的结果，失败时 `trace` 为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub id_a: String,
    pub id_b: String,
    pub kind: CorrelationKind,
    pub trace: CorrelationTrace,
}

impl CorrelationReport {
    pub fn empty(id_a: impl Into<String>, id_b: impl Into<String>, kind: CorrelationKind) -> Self {
        Self {
            id_a: id_a.into(),
            id_b: id_b.into(),
            kind,
            trace: CorrelationTrace::empty(),
        }
    }
}

/// 新闻条目，除标题外的字段均可能缺失
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub title: String,
    pub text: Option<String>,
}

/// # Summary
/// 新闻列表查询条件。
///
/// # Invariants
/// - `max` 已由调用方裁剪到配置允许的范围内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub max: u32,
}
