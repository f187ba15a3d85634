use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::common::DateBound;

/// 相关性窗口的最小长度，少于两个观测值时皮尔逊系数无定义
pub const MIN_CORRELATION_WINDOW: usize = 2;

/// # Summary
/// 配置校验错误。
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// 日期区间起点晚于终点
    #[error("Invalid date bound: {start} > {end}")]
    InvalidBound { start: NaiveDate, end: NaiveDate },
    /// 相关性窗口过短
    #[error("Correlation window must be at least {MIN_CORRELATION_WINDOW}, got {0}")]
    WindowTooShort(usize),
    /// 相关性区间必须覆盖主展示区间的起点
    #[error("Correlation bound must start on or before the primary bound ({correlation} > {primary})")]
    HistoryTooShort {
        correlation: NaiveDate,
        primary: NaiveDate,
    },
    /// 其他非法取值
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    // SQLite 数据库文件路径
    pub path: String,
    pub max_connections: u32,
}

/// # Summary
/// 两条序列日期轴不一致时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    // 取公共日期的交集，丢弃的行记录 warn 日志
    Intersect,
    // 任何偏差都视为数据质量错误
    Strict,
}

/// # Summary
/// 检索与相关性计算的部署级常量。
///
/// # Invariants
/// - `window >= MIN_CORRELATION_WINDOW`。
/// - `correlation.start <= primary.start`，保证首个窗口之前有足够历史。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    // 滑动窗口长度 (观测值个数)
    pub window: usize,
    // 价格展示区间
    pub primary: DateBound,
    // 相关性计算区间 (起点更早)
    pub correlation: DateBound,
    pub alignment: AlignmentPolicy,
    pub news_default_limit: u32,
    pub news_max_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    // EnvFilter 语法，RUST_LOG 存在时以其为准
    pub level: String,
    // 滚动日志目录，为空则只输出到 stdout
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl AnalyticsConfig {
    /// # Summary
    /// 校验配置的一致性。
    ///
    /// # Logic
    /// 1. 检查两个日期区间各自合法。
    /// 2. 检查窗口长度与历史区间。
    /// 3. 检查新闻条数上限。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.primary.check()?;
        self.correlation.check()?;
        if self.window < MIN_CORRELATION_WINDOW {
            return Err(ConfigError::WindowTooShort(self.window));
        }
        if self.correlation.start > self.primary.start {
            return Err(ConfigError::HistoryTooShort {
                correlation: self.correlation.start,
                primary: self.primary.start,
            });
        }
        if self.news_default_limit == 0 || self.news_default_limit > self.news_max_limit {
            return Err(ConfigError::InvalidValue {
                field: "analytics.news_default_limit",
                reason: format!(
                    "must be within 1..={}, got {}",
                    self.news_max_limit, self.news_default_limit
                ),
            });
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be positive".to_string(),
            });
        }
        self.analytics.validate()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        let primary_end = fixed_date(2017, 7, 19);
        Self {
            window: 50,
            primary: DateBound {
                start: fixed_date(2016, 9, 1),
                end: primary_end,
            },
            correlation: DateBound {
                start: fixed_date(2016, 7, 7),
                end: primary_end,
            },
            alignment: AlignmentPolicy::Intersect,
            news_default_limit: 6,
            news_max_limit: 100,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: "data/tandem.db".to_string(),
                max_connections: 5,
            },
            analytics: AnalyticsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                file_prefix: "tandem.log".to_string(),
            },
            catalog: Catalog::default(),
        }
    }
}

fn fixed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.analytics.window, 50);
        assert_eq!(config.analytics.primary.start.to_string(), "2016-09-01");
        assert_eq!(config.analytics.correlation.start.to_string(), "2016-07-07");
        assert_eq!(config.analytics.alignment, AlignmentPolicy::Intersect);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_window() {
        let mut analytics = AnalyticsConfig::default();
        analytics.window = 1;
        assert_eq!(analytics.validate(), Err(ConfigError::WindowTooShort(1)));
    }

    #[test]
    fn test_validate_rejects_late_history() {
        let mut analytics = AnalyticsConfig::default();
        analytics.correlation.start = fixed_date(2016, 10, 1);
        assert!(matches!(
            analytics.validate(),
            Err(ConfigError::HistoryTooShort { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_reversed_bound() {
        let mut analytics = AnalyticsConfig::default();
        analytics.primary.end = fixed_date(2016, 1, 1);
        assert!(matches!(
            analytics.validate(),
            Err(ConfigError::InvalidBound { .. })
        ));
    }

    #[test]
    fn test_config_serde_roundtrip_keeps_dates_as_text() {
        let json = serde_json::to_value(AnalyticsConfig::default()).unwrap();
        assert_eq!(json["primary"]["start"], "2016-09-01");
        assert_eq!(json["alignment"], "intersect");
    }
}
