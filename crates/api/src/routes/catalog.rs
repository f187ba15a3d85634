//! # 标的目录路由控制器
//!
//! 返回前端下拉框使用的行业分组、股票名称与货币标签。

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;

use crate::server::AppState;
use crate::types::CatalogResponse;

/// 获取股票目录
///
/// 按行业分组的股票代码与显示名称。
#[utoipa::path(
    get,
    path = "/api/stocks",
    tag = "目录 (Catalog)",
    responses(
        (status = 200, description = "目录获取成功", body = CatalogResponse)
    )
)]
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from(state.catalog.as_ref()))
}

/// 获取货币标签
#[utoipa::path(
    get,
    path = "/api/stocks/currencies",
    tag = "目录 (Catalog)",
    responses(
        (status = 200, description = "货币代码 -> 显示标签", body = BTreeMap<String, String>)
    )
)]
pub async fn get_currencies(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.catalog.currencies.clone())
}
