//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的列式结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tandem_core::catalog::Catalog;
use tandem_core::common::DATE_FORMAT;
use tandem_core::series::entity::{CorrelationReport, CorrelationTrace, NewsItem, PriceSeries};
use utoipa::ToSchema;

// ============================================================
//  序列相关 DTO
// ============================================================

/// 价格序列 DTO，日期与价格按下标一一对应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceSeriesResponse {
    /// 股票代码
    #[schema(example = "F")]
    pub stock: String,
    /// 交易日 (YYYY-MM-DD)
    #[schema(example = json!(["2016-09-01", "2016-09-02"]))]
    pub dates: Vec<String>,
    /// 收盘价
    #[schema(example = json!([12.76, 12.81]))]
    pub prices: Vec<f64>,
}

impl From<PriceSeries> for PriceSeriesResponse {
    fn from(series: PriceSeries) -> Self {
        let (dates, prices) = series
            .points
            .iter()
            .map(|p| (p.date.format(DATE_FORMAT).to_string(), p.value))
            .unzip();
        Self {
            stock: series.symbol,
            dates,
            prices,
        }
    }
}

/// 股票对相关性 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockCorrelationResponse {
    #[schema(example = "F")]
    pub stock1: String,
    #[schema(example = "TSLA")]
    pub stock2: String,
    pub dates: Vec<String>,
    /// 相关系数，窗口内任一侧方差为零时为 null
    pub correlations: Vec<Option<f64>>,
}

impl From<CorrelationReport> for StockCorrelationResponse {
    fn from(report: CorrelationReport) -> Self {
        let (dates, correlations) = columns(&report.trace);
        Self {
            stock1: report.id_a,
            stock2: report.id_b,
            dates,
            correlations,
        }
    }
}

/// 股票-货币相关性 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyCorrelationResponse {
    #[schema(example = "F")]
    pub stock: String,
    #[schema(example = "DEXJPUS")]
    pub currency: String,
    pub dates: Vec<String>,
    /// 相关系数，窗口内任一侧方差为零时为 null
    pub correlations: Vec<Option<f64>>,
}

impl From<CorrelationReport> for CurrencyCorrelationResponse {
    fn from(report: CorrelationReport) -> Self {
        let (dates, correlations) = columns(&report.trace);
        Self {
            stock: report.id_a,
            currency: report.id_b,
            dates,
            correlations,
        }
    }
}

// NaN 在 JSON 中没有表示，显式转为 null
fn columns(trace: &CorrelationTrace) -> (Vec<String>, Vec<Option<f64>>) {
    let dates = trace
        .dates()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();
    let correlations = trace
        .coefficients()
        .map(|c| (!c.is_nan()).then_some(c))
        .collect();
    (dates, correlations)
}

// ============================================================
//  目录与新闻 DTO
// ============================================================

/// 标的目录 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    /// 行业分组 -> 股票代码列表
    #[schema(example = json!({"Auto": ["F", "TSLA"]}))]
    pub categories: BTreeMap<String, Vec<String>>,
    /// 股票代码 -> 显示名称
    #[schema(example = json!({"F": "Ford"}))]
    pub name: BTreeMap<String, String>,
}

impl From<&Catalog> for CatalogResponse {
    fn from(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories.clone(),
            name: catalog.names.clone(),
        }
    }
}

/// 新闻条目 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsItemResponse {
    #[schema(example = "2017-07-18 09:00:00.000000000")]
    pub date: Option<String>,
    #[schema(example = "Reuters")]
    pub source: Option<String>,
    pub url: Option<String>,
    #[schema(example = "Ford beats estimates")]
    pub title: String,
    pub text: Option<String>,
}

impl From<NewsItem> for NewsItemResponse {
    fn from(item: NewsItem) -> Self {
        Self {
            date: item.date,
            source: item.source,
            url: item.url,
            title: item.title,
            text: item.text,
        }
    }
}

// ============================================================
//  通用响应
// ============================================================

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
