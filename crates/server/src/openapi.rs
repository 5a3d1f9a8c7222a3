use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: u64,
    pub name: String,
    /// RFC 3339, UTC
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateUserRequestDoc { pub name: String }

#[derive(ToSchema)]
pub struct OperandsDoc { pub a: i64, pub b: i64 }

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    /// One of `validation_failed`, `not_found`, `invalid_json`, `invalid_path`, `method_not_allowed`, `internal_error`
    pub error: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::users::list_users,
        crate::routes::users::create_user,
        crate::routes::users::get_user,
        crate::routes::users::delete_user,
        crate::routes::users::get_profile,
        crate::routes::users::get_order,
        crate::routes::utility::health,
        crate::routes::utility::time,
        crate::routes::utility::echo,
        crate::routes::utility::sum,
        crate::routes::utility::mul,
    ),
    components(
        schemas(
            UserDoc,
            CreateUserRequestDoc,
            OperandsDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "users"),
        (name = "utility")
    )
)]
pub struct ApiDoc;
