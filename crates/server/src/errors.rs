use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Transport-shaped error: `{error, message, details?}` plus a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
    allow: Option<&'static [&'static str]>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into(), details: None, allow: None }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 400 listing every field reason that failed.
    pub fn validation(reasons: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_failed", "missing required fields")
            .with_details(json!(reasons))
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "resource not found")
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_path", message)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_json", message)
    }

    /// 405 advertising the allowed verbs both in the `Allow` header and in `details`.
    pub fn method_not_allowed(method: &Method, allowed: &'static [&'static str]) -> Self {
        let mut err = Self::new(StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", "method not allowed")
            .with_details(json!({ "method": method.as_str(), "allow": allowed }));
        err.allow = Some(allowed);
        err
    }

    /// 500 with a fixed message; the cause is logged, never sent.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "unexpected error")
    }

    pub fn status(&self) -> StatusCode { self.status }

    pub fn code(&self) -> &'static str { self.code }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(reasons) => ApiError::validation(reasons),
            ServiceError::NotFound(_) => ApiError::not_found(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, status = self.status.as_u16(), "request failed with server error");
        }
        let mut body = json!({ "error": self.code, "message": self.message });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        let mut res = (self.status, Json(body)).into_response();
        if let Some(allowed) = self.allow {
            if let Ok(v) = HeaderValue::from_str(&allowed.join(", ")) {
                res.headers_mut().insert(header::ALLOW, v);
            }
        }
        res
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let v: ApiError = ServiceError::Validation(vec!["name is required".into()]).into();
        assert_eq!(v.status(), StatusCode::BAD_REQUEST);
        assert_eq!(v.code(), "validation_failed");

        let nf: ApiError = ServiceError::not_found("user").into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        assert_eq!(nf.code(), "not_found");
    }

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let res = ApiError::method_not_allowed(&Method::PUT, &["GET", "DELETE"]).into_response();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "GET, DELETE");
    }

    #[test]
    fn internal_error_hides_cause() {
        let res = ApiError::internal().into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().get(header::ALLOW).is_none());
    }
}
