//! # 价格与相关性路由控制器
//!
//! 这三个接口在任何失败情况下都返回 200 与空数组，失败原因只记录在服务端日志中。

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tandem_core::common::CorrelationKind;
use tracing::debug;
use utoipa::IntoParams;

use crate::server::AppState;
use crate::types::{CurrencyCorrelationResponse, PriceSeriesResponse, StockCorrelationResponse};

/// 缺省的参数按空字符串处理，由校验器拒绝后返回空数组，而不是提取器的 400
#[derive(Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct StockPairQuery {
    /// 第一个股票代码
    pub stock1: String,
    /// 第二个股票代码
    pub stock2: String,
}

#[derive(Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct StockCurrencyQuery {
    /// 股票代码
    pub stock: String,
    /// 货币代码，例如 DEXJPUS
    pub currency: String,
}

/// 获取股票价格序列
///
/// 主展示区间内的每日收盘价。
#[utoipa::path(
    get,
    path = "/api/stocks/price/{stock}",
    tag = "序列 (Series)",
    params(
        ("stock" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "价格序列，失败时为空数组", body = PriceSeriesResponse)
    )
)]
pub async fn get_price(
    State(state): State<AppState>,
    Path(stock): Path<String>,
) -> Json<PriceSeriesResponse> {
    debug!("GET price {}", stock);
    let series = state.series_service.fetch_price_series(&stock).await;
    Json(series.into())
}

/// 计算两只股票的滚动相关性
#[utoipa::path(
    get,
    path = "/api/stocks/corr/stocks",
    tag = "序列 (Series)",
    params(StockPairQuery),
    responses(
        (status = 200, description = "相关性轨迹，失败时为空数组", body = StockCorrelationResponse)
    )
)]
pub async fn get_stock_correlation(
    State(state): State<AppState>,
    Query(query): Query<StockPairQuery>,
) -> Json<StockCorrelationResponse> {
    debug!("GET corr {} vs {}", query.stock1, query.stock2);
    let report = state
        .series_service
        .fetch_correlation(&query.stock1, &query.stock2, CorrelationKind::StockStock)
        .await;
    Json(report.into())
}

/// 计算股票与汇率的滚动相关性
#[utoipa::path(
    get,
    path = "/api/stocks/corr/curr",
    tag = "序列 (Series)",
    params(StockCurrencyQuery),
    responses(
        (status = 200, description = "相关性轨迹，失败时为空数组", body = CurrencyCorrelationResponse)
    )
)]
pub async fn get_currency_correlation(
    State(state): State<AppState>,
    Query(query): Query<StockCurrencyQuery>,
) -> Json<CurrencyCorrelationResponse> {
    debug!("GET corr {} vs {}", query.stock, query.currency);
    let report = state
        .series_service
        .fetch_correlation(&query.stock, &query.currency, CorrelationKind::StockCurrency)
        .await;
    Json(report.into())
}
