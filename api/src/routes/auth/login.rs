use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ag_core::repositories::{RevocationStore, UserRepository};
use ag_shared::types::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error_with_lang, validation_error_response, Language};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "token": "eyJ...",
///         "user": { "id": 1, "email": "alice@example.com", "username": "alice", "role": "user" },
///         "expiresIn": 86400
///     },
///     "message": "success",
///     "timestamp": 1700000000000,
///     "statusCode": 200
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email or wrong password (same body for both)
pub async fn login<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    let lang = Language::from_request(&req);

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors, lang);
    }

    match state.auth_service.login(&body.email, &body.password).await {
        Ok(response) => HttpResponse::Ok().json(ApiResponse::success(response)),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
