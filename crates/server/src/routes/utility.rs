//! Stateless helper endpoints: health, clock, echo and integer arithmetic.

use axum::{extract::Query, routing::{get, post}, Json, Router};
use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use common::types::{ArithmeticResult, Clock, Health};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::extract::StrictJson;
use crate::routes::reject_method;
use crate::state::AppState;

const GET_ONLY: &[&str] = &["GET"];
const POST_ONLY: &[&str] = &["POST"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operands {
    #[serde(default)]
    pub a: Option<i64>,
    #[serde(default)]
    pub b: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EchoQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Echo {
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health).fallback(reject_method(GET_ONLY)))
        .route("/time", get(time).fallback(reject_method(GET_ONLY)))
        .route("/echo", get(echo).fallback(reject_method(GET_ONLY)))
        .route("/sum", post(sum).fallback(reject_method(POST_ONLY)))
        .route("/mul", post(mul).fallback(reject_method(POST_ONLY)))
}

#[utoipa::path(get, path = "/health", tag = "utility", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/time", tag = "utility", responses((status = 200, description = "Current UTC time")))]
pub async fn time() -> Json<Clock> {
    Json(Clock { time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true) })
}

#[utoipa::path(
    get, path = "/echo", tag = "utility",
    params(("name" = String, Query, description = "Value to echo back")),
    responses((status = 200, description = "Echoed name"), (status = 400, description = "Missing name"))
)]
pub async fn echo(Query(q): Query<EchoQuery>) -> Result<Json<Echo>, ApiError> {
    let name = q.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::validation(vec!["name is required".into()]));
    }
    Ok(Json(Echo { name: name.to_string() }))
}

#[utoipa::path(
    post, path = "/sum", tag = "utility",
    request_body = crate::openapi::OperandsDoc,
    responses((status = 200, description = "a + b"), (status = 400, description = "Missing operand or overflow"))
)]
pub async fn sum(StrictJson(ops): StrictJson<Operands>) -> Result<Json<ArithmeticResult>, ApiError> {
    let (a, b) = require_operands(&ops)?;
    let result = a.checked_add(b).ok_or_else(out_of_range)?;
    Ok(Json(ArithmeticResult { result }))
}

#[utoipa::path(
    post, path = "/mul", tag = "utility",
    request_body = crate::openapi::OperandsDoc,
    responses((status = 200, description = "a * b"), (status = 400, description = "Missing operand or overflow"))
)]
pub async fn mul(StrictJson(ops): StrictJson<Operands>) -> Result<Json<ArithmeticResult>, ApiError> {
    let (a, b) = require_operands(&ops)?;
    let result = a.checked_mul(b).ok_or_else(out_of_range)?;
    Ok(Json(ArithmeticResult { result }))
}

fn require_operands(ops: &Operands) -> Result<(i64, i64), ApiError> {
    match (ops.a, ops.b) {
        (Some(a), Some(b)) => Ok((a, b)),
        (a, b) => {
            let mut missing = Vec::new();
            if a.is_none() { missing.push("a is required".to_string()); }
            if b.is_none() { missing.push("b is required".to_string()); }
            Err(ApiError::validation(missing))
        }
    }
}

fn out_of_range() -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "validation_failed", "result out of range")
}
