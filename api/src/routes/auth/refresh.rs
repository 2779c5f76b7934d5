use actix_web::{web, HttpRequest, HttpResponse};

use ag_core::domain::value_objects::RefreshResponse;
use ag_core::errors::AuthError;
use ag_core::repositories::{RevocationStore, UserRepository};
use ag_shared::types::ApiResponse;

use crate::handlers::error::{auth_error_response, Language};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Issues a new token for the authenticated identity and revokes the one
/// presented.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "data": { "token": "eyJ...", "expiresIn": 86400 }, ... }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: The presented token no longer validates
pub async fn refresh<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    match state.token_service.refresh(&auth.token).await {
        Some(token) => HttpResponse::Ok().json(ApiResponse::success(RefreshResponse {
            token,
            expires_in: state.token_service.token_ttl_seconds(),
        })),
        // Revoked or expired between the guard and this point
        None => auth_error_response(
            &AuthError::CredentialInvalidSignature,
            Language::from_request(&req),
        ),
    }
}
