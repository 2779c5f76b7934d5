use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};

use ag_core::errors::AuthError;
use ag_core::repositories::{RevocationStore, UserRepository};
use ag_core::services::guard::extract_bearer_token;
use ag_shared::types::ApiResponse;

use crate::handlers::error::{auth_error_response, Language};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented bearer token. The token is not validated first:
/// logging out an already revoked, expired or undecodable token still
/// succeeds, as does a logout while the revocation store is unreachable.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "data": { "message": "Logged out successfully" }, ... }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No `Authorization` header, or not a `Bearer` credential
pub async fn logout<U, S>(req: HttpRequest, state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    let lang = Language::from_request(&req);

    let header = match req.headers().get(AUTHORIZATION).map(|value| value.to_str()) {
        None => None,
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => return auth_error_response(&AuthError::CredentialMalformed, lang),
    };

    let token = match extract_bearer_token(header) {
        Ok(token) => token,
        Err(error) => return auth_error_response(&error, lang),
    };

    let response = state.auth_service.logout(token).await;
    HttpResponse::Ok().json(ApiResponse::success(response))
}
