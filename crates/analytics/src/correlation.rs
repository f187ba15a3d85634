//! 滚动皮尔逊相关系数。
//!
//! `correlate` 只按位置对齐两条数值序列；日期对齐由 `AlignedPair` 在进入引擎前完成。

use chrono::NaiveDate;
use tandem_core::config::AlignmentPolicy;
use tandem_core::series::entity::{CorrelationPoint, CorrelationTrace, TimeSeries};
use tandem_core::series::error::AnalyticsError;
use tracing::warn;

/// # Summary
/// 两条序列在公共日期轴上的合并结果。
///
/// # Invariants
/// - `dates`、`left`、`right` 长度相同，且 `dates` 严格递增。
/// - 下标 `i` 在三者中指向同一交易日。
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    dates: Vec<NaiveDate>,
    left: Vec<f64>,
    right: Vec<f64>,
    dropped: usize,
}

impl AlignedPair {
    /// # Summary
    /// 将两条按日期升序的序列合并到公共日期轴。
    ///
    /// # Logic
    /// 1. 双指针遍历两条序列，只保留双方都存在的日期。
    /// 2. 统计两侧被丢弃的行数。
    /// 3. 严格策略下任何丢弃都视为错误；交集策略下记录 warn 日志后继续。
    ///
    /// # Arguments
    /// * `left`: 第一条序列 (其日期轴决定输出轨迹的日期)。
    /// * `right`: 第二条序列。
    /// * `policy`: 日期轴不一致时的处理策略。
    ///
    /// # Returns
    /// 严格策略下日期轴不一致返回 `AnalyticsError::Misaligned`。
    pub fn align(
        left: &TimeSeries,
        right: &TimeSeries,
        policy: AlignmentPolicy,
    ) -> Result<Self, AnalyticsError> {
        let capacity = left.len().min(right.len());
        let mut dates = Vec::with_capacity(capacity);
        let mut left_values = Vec::with_capacity(capacity);
        let mut right_values = Vec::with_capacity(capacity);

        let mut lhs = left.points().iter().peekable();
        let mut rhs = right.points().iter().peekable();
        while let (Some(l), Some(r)) = (lhs.peek(), rhs.peek()) {
            match l.date.cmp(&r.date) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    dates.push(l.date);
                    left_values.push(l.value);
                    right_values.push(r.value);
                    lhs.next();
                    rhs.next();
                }
            }
        }

        let dropped = (left.len() - dates.len()) + (right.len() - dates.len());
        if dropped > 0 {
            if policy == AlignmentPolicy::Strict {
                return Err(AnalyticsError::Misaligned {
                    left: left.identifier().to_string(),
                    right: right.identifier().to_string(),
                });
            }
            warn!(
                left = left.identifier(),
                right = right.identifier(),
                left_rows = left.len(),
                right_rows = right.len(),
                common = dates.len(),
                "Date axes diverge, correlating on common dates only"
            );
        }

        Ok(Self {
            dates,
            left: left_values,
            right: right_values,
            dropped,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn left(&self) -> &[f64] {
        &self.left
    }

    pub fn right(&self) -> &[f64] {
        &self.right
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// 合并时两侧共丢弃的行数
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// # Summary
/// 在对齐后的序列上计算滚动相关性轨迹。
///
/// # Logic
/// 1. 调用 `correlate` 得到每个窗口位置的系数。
/// 2. 第 `k` 个系数对应窗口 `[k, k + window)`，以其后紧邻的日期 `dates[k + window]` 作为键。
pub fn rolling_correlation(pair: &AlignedPair, window: usize) -> CorrelationTrace {
    let coefficients = correlate(&pair.left, &pair.right, window);
    let points = pair
        .dates
        .iter()
        .skip(window)
        .zip(coefficients)
        .map(|(date, coefficient)| CorrelationPoint {
            date: *date,
            coefficient,
        })
        .collect();
    CorrelationTrace { points }
}

/// # Summary
/// 滑动窗口皮尔逊相关系数 (纯函数)。
///
/// # Logic
/// 对 `i` 属于 `window..len`，取两条序列的尾随切片 `[i - window, i)` 计算相关系数。
///
/// # Arguments
/// * `a`, `b`: 等长且按位置对齐的数值序列。
/// * `window`: 窗口长度。
///
/// # Returns
/// 长度为 `max(0, len - window)` 的系数序列；窗口方差为零时对应位置为 `NaN`。
///
/// # Panics
/// debug 构建下两条序列长度不等时断言失败；release 构建下按较短一侧的长度截断。
pub fn correlate(a: &[f64], b: &[f64], window: usize) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len(), "correlate requires equal-length series");
    let len = a.len().min(b.len());
    (window..len)
        .map(|i| pearson(&a[i - window..i], &b[i - window..i]))
        .collect()
}

/// # Summary
/// 两个等长样本的皮尔逊积矩相关系数。
///
/// # Logic
/// 1. 两遍算法：先求均值，再累加离差积与离差平方和。
/// 2. 任一侧为常数序列 (方差为零) 时返回 `NaN`。
/// 3. 结果截断到 `[-1, 1]` 以吸收浮点舍入。
///
/// 样本标准差与总体标准差的归一化因子在比值中约去，因此此处不做 `n - 1` 修正。
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return f64::NAN;
    }
    let count = match u32::try_from(n) {
        Ok(c) => f64::from(c),
        Err(_) => return f64::NAN,
    };

    let mean_x = x[..n].iter().sum::<f64>() / count;
    let mean_y = y[..n].iter().sum::<f64>() / count;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x[..n].iter().zip(&y[..n]) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (cov / denominator).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
