use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finfeed_providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Provider(#[from] ProviderError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Provider(e) => {
                let status = match e {
                    ProviderError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
                    ProviderError::MissingCredential { .. } => StatusCode::UNAUTHORIZED,
                    ProviderError::EmptyData => StatusCode::NOT_FOUND,
                    ProviderError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                    ProviderError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    ProviderError::Provider { .. } | ProviderError::Network(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, e.to_string())
            }
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(ProviderError::InvalidQuery("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ProviderError::MissingCredential {
                    provider: "FMP".into(),
                    key: "fmp_api_key".into(),
                }),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::from(ProviderError::EmptyData), StatusCode::NOT_FOUND),
            (
                ApiError::from(ProviderError::RateLimited {
                    provider: "FMP".into(),
                }),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ApiError::from(ProviderError::Timeout {
                    provider: "FMP".into(),
                }),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::from(ProviderError::Provider {
                    provider: "FMP".into(),
                    message: "HTTP 500".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
