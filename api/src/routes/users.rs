//! User management handlers
//!
//! Mounted twice: under `/api/v1/users` and under `/api/v1/admin/users`.
//! Which roles may reach each handler is decided by the `JwtAuth` wrapper at
//! registration time, not here.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use validator::Validate;

use ag_core::domain::entities::token::AuthUser;
use ag_core::repositories::{RevocationStore, UserRepository};
use ag_shared::types::ApiResponse;

use crate::dto::user::CreateUserRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response, Language};
use crate::middleware::auth::CurrentUser;
use crate::routes::AppState;

/// Response of `GET /api/v1/admin/users/my-id`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub user_id: i64,
}

/// Handler for POST /api/v1/users and POST /api/v1/admin/users
///
/// ## Errors
/// - 400 Bad Request: Invalid email, empty username, short password or unknown role
/// - 409 Conflict: Email already registered
pub async fn create<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors, Language::from_request(&req));
    }

    let body = body.into_inner();
    let role = body.parsed_role();

    match state
        .user_service
        .create(&body.email, &body.username, &body.password, role)
        .await
    {
        Ok(profile) => HttpResponse::Created().json(ApiResponse::success(profile).with_status(201)),
        Err(error) => handle_domain_error(error, &req),
    }
}

/// Handler for GET /api/v1/users and GET /api/v1/admin/users
pub async fn find_all<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    user: CurrentUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    tracing::debug!(requested_by = %user.0.username, "Listing users");

    match state.user_service.find_all().await {
        Ok(users) => HttpResponse::Ok().json(ApiResponse::success(users)),
        Err(error) => handle_domain_error(error, &req),
    }
}

/// Handler for GET /api/v1/users/{id}
///
/// ## Errors
/// - 404 Not Found: No user with this id
pub async fn find_one<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    match state.user_service.find_one(path.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(profile)),
        Err(error) => handle_domain_error(error, &req),
    }
}

/// Handler for DELETE /api/v1/users/{id} and DELETE /api/v1/admin/users/{id}
///
/// ## Errors
/// - 404 Not Found: No user with this id
pub async fn remove<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    let id = path.into_inner();

    match state.user_service.remove(id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(UserIdResponse { user_id: id })),
        Err(error) => handle_domain_error(error, &req),
    }
}

/// Handler for GET /api/v1/admin/users/me
pub async fn me(user: CurrentUser) -> HttpResponse {
    let user: AuthUser = user.0;
    HttpResponse::Ok().json(ApiResponse::success(user))
}

/// Handler for GET /api/v1/admin/users/my-id
pub async fn my_id(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserIdResponse {
        user_id: user.0.user_id,
    }))
}
