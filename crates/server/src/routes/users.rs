use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use models::user::{User, UserId};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::extract::{PathParams, StrictJson};
use crate::routes::reject_method;
use crate::state::AppState;

pub const COLLECTION_METHODS: &[&str] = &["GET", "POST"];
pub const MEMBER_METHODS: &[&str] = &["GET", "DELETE"];
pub const READ_ONLY: &[&str] = &["GET"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub items: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub deleted: bool,
    pub id: UserId,
}

#[derive(Debug, Serialize)]
pub struct ProfileStub {
    pub id: UserId,
    pub profile: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStub {
    pub id: UserId,
    pub order_id: String,
}

/// Routes of the users resource; state is attached by the caller.
pub fn router() -> Router<AppState> {
    let member = get(get_user).delete(delete_user).fallback(member_method_not_allowed);
    let profile = get(get_profile).fallback(profile_method_not_allowed);
    let order = get(get_order).fallback(order_method_not_allowed);

    // a trailing slash addresses the same resource
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).fallback(reject_method(COLLECTION_METHODS)),
        )
        .route("/users/", any(missing_user_id))
        .route("/users/:id", member.clone())
        .route("/users/:id/", member)
        .route("/users/:id/profile", profile.clone())
        .route("/users/:id/profile/", profile)
        .route("/users/:id/orders/:order_id", order.clone())
        .route("/users/:id/orders/:order_id/", order)
}

/// Validate the id segment of a `/users/...` path that no route matched.
pub(crate) fn check_unrouted_path(path: &str) -> Result<(), ApiError> {
    match path.strip_prefix("/users/") {
        Some(rest) => {
            let id = rest.trim_matches('/').split('/').next().unwrap_or_default();
            parse_user_id(id).map(|_| ())
        }
        None => Ok(()),
    }
}

/// Parse a `{id}` path segment: surrounding whitespace is ignored, zero and negatives are rejected.
pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::invalid_path("user id is required"));
    }
    match raw.parse::<UserId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid_path("user id must be a positive integer")),
    }
}

fn parse_order_id(raw: &str) -> Result<String, ApiError> {
    let order_id = raw.trim();
    if order_id.is_empty() {
        return Err(ApiError::invalid_path("orderId is required"));
    }
    Ok(order_id.to_string())
}

#[utoipa::path(get, path = "/users", tag = "users", responses((status = 200, description = "All users with a count")))]
pub async fn list_users(State(state): State<AppState>) -> Json<UserList> {
    let items = state.users.list_users().await;
    let count = items.len();
    Json(UserList { items, count })
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation failed or invalid JSON", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    StrictJson(input): StrictJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let name = input.name.unwrap_or_default();
    let created = state.users.create_user(&name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::UserDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathParams(raw_id): PathParams<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    let user = state.users.get_user(id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParams(raw_id): PathParams<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    state.users.delete_user(id).await?;
    Ok(Json(DeleteAck { deleted: true, id }))
}

#[utoipa::path(
    get, path = "/users/{id}/profile", tag = "users",
    params(("id" = u64, Path, description = "User id")),
    responses((status = 200, description = "Profile marker"), (status = 404, description = "Not found"))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    PathParams(raw_id): PathParams<String>,
) -> Result<Json<ProfileStub>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    state.users.get_user(id).await?;
    Ok(Json(ProfileStub { id, profile: true }))
}

#[utoipa::path(
    get, path = "/users/{id}/orders/{orderId}", tag = "users",
    params(
        ("id" = u64, Path, description = "User id"),
        ("orderId" = String, Path, description = "Order reference, not looked up")
    ),
    responses((status = 200, description = "Id pair"), (status = 404, description = "User not found"))
)]
pub async fn get_order(
    State(state): State<AppState>,
    PathParams((raw_id, raw_order)): PathParams<(String, String)>,
) -> Result<Json<OrderStub>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    let order_id = parse_order_id(&raw_order)?;
    state.users.get_user(id).await?;
    Ok(Json(OrderStub { id, order_id }))
}

async fn missing_user_id() -> ApiError {
    ApiError::invalid_path("user id is required")
}

// On id-bearing routes a malformed id wins over a wrong verb.

async fn member_method_not_allowed(method: Method, PathParams(raw_id): PathParams<String>) -> ApiError {
    match parse_user_id(&raw_id) {
        Ok(_) => ApiError::method_not_allowed(&method, MEMBER_METHODS),
        Err(e) => e,
    }
}

async fn profile_method_not_allowed(method: Method, PathParams(raw_id): PathParams<String>) -> ApiError {
    match parse_user_id(&raw_id) {
        Ok(_) => ApiError::method_not_allowed(&method, READ_ONLY),
        Err(e) => e,
    }
}

async fn order_method_not_allowed(
    method: Method,
    PathParams((raw_id, _)): PathParams<(String, String)>,
) -> ApiError {
    match parse_user_id(&raw_id) {
        Ok(_) => ApiError::method_not_allowed(&method, READ_ONLY),
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_id_accepts_positive_integers() {
        assert_eq!(parse_user_id("1").unwrap(), 1);
        assert_eq!(parse_user_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_user_id_rejects_everything_else() {
        for raw in ["abc", "0", "-3", "1.5", "12abc"] {
            let err = parse_user_id(raw).unwrap_err();
            assert_eq!(err.code(), "invalid_path", "input {raw:?}");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(parse_user_id("  ").unwrap_err().code(), "invalid_path");
    }

    #[test]
    fn order_id_is_trimmed_and_required() {
        assert_eq!(parse_order_id(" A-17 ").unwrap(), "A-17");
        assert!(parse_order_id("   ").is_err());
    }

    #[test]
    fn unrouted_paths_still_check_the_id() {
        assert!(check_unrouted_path("/users/7/settings").is_ok());
        assert!(check_unrouted_path("/nope").is_ok());
        let err = check_unrouted_path("/users/abc/settings").unwrap_err();
        assert_eq!(err.code(), "invalid_path");
        assert_eq!(check_unrouted_path("/users/0/a/b/").unwrap_err().code(), "invalid_path");
    }
}
