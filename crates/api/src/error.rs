//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tandem_core::series::error::AnalyticsError;
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 下层业务错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "服务器内部错误".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `AnalyticsError` 转换
impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match &err {
            AnalyticsError::InvalidQuery(msg) | AnalyticsError::InvalidIdentifier(msg) => {
                ApiError::BadRequest(msg.clone())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::store::error::StoreError;

    #[test]
    fn test_analytics_error_mapping() {
        let bad = ApiError::from(AnalyticsError::InvalidQuery("max".into()));
        assert!(matches!(bad, ApiError::BadRequest(_)));

        let misaligned = ApiError::from(AnalyticsError::EmptyOrMisaligned("F".into()));
        assert!(matches!(misaligned, ApiError::Internal(_)));

        let internal = ApiError::from(AnalyticsError::Store(StoreError::Database("x".into())));
        assert!(matches!(internal, ApiError::Internal(_)));
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
