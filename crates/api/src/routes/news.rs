//! # 新闻路由控制器

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::Deserialize;
use tandem_core::common::DATE_FORMAT;
use tandem_core::series::entity::NewsQuery;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::NewsItemResponse;

/// 参数以原始文本接收，解析失败统一返回 `ApiErrorResponse`
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NewsParams {
    /// 起始日期 (YYYY-MM-DD)，包含当日
    pub start_date: Option<String>,
    /// 结束日期 (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// 返回条数上限
    pub max: Option<String>,
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{} must be YYYY-MM-DD, got {:?}", field, v))),
    }
}

fn parse_max(value: Option<&str>, default: u32) -> Result<u32, ApiError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|max| *max > 0)
            .ok_or_else(|| ApiError::BadRequest(format!("max must be a positive integer, got {:?}", v))),
    }
}

/// 查询新闻列表
///
/// 同标题只保留一条，按日期倒序、标题倒序排列。
#[utoipa::path(
    get,
    path = "/api/stocks/news",
    tag = "新闻 (News)",
    params(NewsParams),
    responses(
        (status = 200, description = "新闻列表", body = Vec<NewsItemResponse>),
        (status = 400, description = "参数非法", body = crate::types::ApiErrorResponse),
        (status = 500, description = "存储错误", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Vec<NewsItemResponse>>, ApiError> {
    let query = NewsQuery {
        start: parse_date("startDate", params.start_date.as_deref())?,
        end: parse_date("endDate", params.end_date.as_deref())?,
        max: parse_max(
            params.max.as_deref(),
            state.series_service.config().news_default_limit,
        )?,
    };

    let items = state.series_service.list_news(query).await?;
    Ok(Json(items.into_iter().map(NewsItemResponse::from).collect()))
}
