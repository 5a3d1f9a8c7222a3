use std::any::Any;
use std::future::{ready, Ready};

use axum::{
    http::{header, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::types::Banner;
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod users;
pub mod utility;

const ROUTE_HINTS: &[&str] = &[
    "GET /health",
    "GET /time",
    "GET /echo?name=",
    "POST /sum",
    "POST /mul",
    "GET /users",
    "POST /users",
    "GET /users/{id}",
    "DELETE /users/{id}",
    "GET /users/{id}/profile",
    "GET /users/{id}/orders/{orderId}",
];

pub async fn banner() -> Json<Banner> {
    Json(Banner {
        service: "user-router",
        version: env!("CARGO_PKG_VERSION"),
        routes: ROUTE_HINTS,
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Any path no route matched. Under `/users/` the id segment is checked first.
async fn not_found(uri: Uri) -> ApiError {
    if let Err(e) = users::check_unrouted_path(uri.path()) {
        return e;
    }
    ApiError::not_found().with_details(json!({ "path": uri.path() }))
}

/// axum stamps `Allow` on anything a method fallback returns; keep it on 405 only.
async fn strip_stray_allow(mut res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        res.headers_mut().remove(header::ALLOW);
    }
    res
}

/// Method-router fallback answering 405 with the given allowed verbs.
pub(crate) fn reject_method(
    allowed: &'static [&'static str],
) -> impl Fn(Method) -> Ready<ApiError> + Clone + Send + Sync + 'static {
    move |method: Method| ready(ApiError::method_not_allowed(&method, allowed))
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    error!(event = "handler_panic", "handler panicked");
    ApiError::internal().into_response()
}

/// Build the full application router: banner, users resource, utility endpoints.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let root = Router::new()
        .route("/", get(banner).fallback(reject_method(&["GET"])))
        .route("/openapi.json", get(openapi_json).fallback(reject_method(&["GET"])));

    root.merge(users::router())
        .merge(utility::router())
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::map_response(strip_stray_allow))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
