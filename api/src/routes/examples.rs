//! Endpoints demonstrating the guards and the current-user extractors

use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use ag_core::domain::entities::user::Role;
use ag_shared::types::ApiResponse;

use crate::middleware::auth::CurrentUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentityView {
    user_id: i64,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    role: Role,
}

#[derive(Debug, Serialize)]
struct GreetingResponse {
    message: String,
    user: IdentityView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleAccessResponse {
    message: String,
    access_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoResponse {
    user_id: i64,
    email: String,
    request_time: DateTime<Utc>,
}

/// GET /api/v1/auth-examples/authenticated: any authenticated identity
pub async fn authenticated(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(GreetingResponse {
        message: "You are authenticated".to_string(),
        user: IdentityView {
            user_id: user.user_id,
            username: user.username,
            email: Some(user.email),
            role: user.role,
        },
    }))
}

/// GET /api/v1/auth-examples/admin-only
pub async fn admin_only(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(GreetingResponse {
        message: "You have administrator access".to_string(),
        user: IdentityView {
            user_id: user.user_id,
            username: user.username,
            email: None,
            role: user.role,
        },
    }))
}

/// GET /api/v1/auth-examples/admin-or-editor
pub async fn admin_or_editor(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(RoleAccessResponse {
        message: format!("Accessed with role {}", user.role),
        access_time: Utc::now(),
    }))
}

/// GET /api/v1/auth-examples/user-info
pub async fn user_info(CurrentUser(user): CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserInfoResponse {
        user_id: user.user_id,
        email: user.email,
        request_time: Utc::now(),
    }))
}
