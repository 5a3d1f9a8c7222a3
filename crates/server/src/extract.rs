//! Request extractors answering with the JSON error envelope.
//!
//! `StrictJson` differs from `axum::Json`: it ignores the content type, caps the
//! body at the configured size, rejects trailing content after the value and
//! reports every failure as an `invalid_json` envelope. Unknown fields are
//! rejected by the target types via `#[serde(deny_unknown_fields)]`.
//!
//! `PathParams` wraps `axum::extract::Path` so undecodable segments come back
//! as `invalid_path` instead of axum's plain-text rejection.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use crate::state::AppState;

pub struct StrictJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for StrictJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let limit = state.max_body_bytes;
        let bytes = axum::body::to_bytes(req.into_body(), limit)
            .await
            .map_err(|_| ApiError::invalid_json(format!("request body is unreadable or larger than {limit} bytes")))?;
        decode_strict(&bytes).map(StrictJson)
    }
}

pub struct PathParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => Err(ApiError::invalid_path(rejection.body_text())),
        }
    }
}

/// Decode exactly one JSON value from `bytes`.
pub fn decode_strict<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(|e| ApiError::invalid_json(e.to_string()))?;
    de.end()
        .map_err(|_| ApiError::invalid_json("unexpected extra JSON content"))?;
    Ok(value)
}
