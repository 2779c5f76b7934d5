//! Bearer-token authentication middleware for protecting API endpoints.
//!
//! The middleware reads the `Authorization` header, runs it through the
//! core `RoleGuard` (authentication first, then the route's role allow-set)
//! and injects the resolved identity into the request. Requests are denied
//! when no `AuthGuard` is registered in app data.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use ag_core::domain::entities::token::AuthUser;
use ag_core::domain::entities::user::Role;
use ag_core::errors::AuthError;
use ag_core::services::guard::{extract_bearer_token, AuthGuard, RoleGuard};

use crate::handlers::error::{auth_error_response, Language};

/// Authenticated request context injected by [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Identity decoded from the token
    pub user: AuthUser,
    /// The raw bearer token the request was authenticated with
    pub token: String,
}

/// Bearer-token authentication middleware factory
///
/// `JwtAuth::new()` admits any authenticated identity;
/// `JwtAuth::with_roles` additionally requires one of the listed roles.
#[derive(Clone, Default)]
pub struct JwtAuth {
    required_roles: Vec<Role>,
}

impl JwtAuth {
    /// Requires authentication only
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires authentication and one of `roles`
    pub fn with_roles(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            required_roles: roles.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            required_roles: Rc::new(self.required_roles.clone()),
        }))
    }
}

/// Bearer-token authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required_roles: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_roles = Rc::clone(&self.required_roles);

        Box::pin(async move {
            let lang = Language::from_request(req.request());

            let guard = req
                .app_data::<web::Data<AuthGuard>>()
                .map(|guard| RoleGuard::new(guard.get_ref().clone(), required_roles.to_vec()));
            let guard = match guard {
                Some(guard) => guard,
                None => {
                    tracing::error!("AuthGuard is not registered; denying request");
                    return Ok(deny(req, AuthError::CredentialInvalidSignature, lang));
                }
            };

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().map(str::to_owned));
            let header = match header {
                None => None,
                Some(Ok(value)) => Some(value),
                Some(Err(_)) => return Ok(deny(req, AuthError::CredentialMalformed, lang)),
            };

            let user = match guard.check(header.as_deref()).await {
                Ok(user) => user,
                Err(error) => {
                    tracing::debug!(error = %error, path = %req.path(), "Request denied");
                    return Ok(deny(req, error, lang));
                }
            };

            // The guard already accepted this header, so extraction succeeds
            let token = extract_bearer_token(header.as_deref())
                .map(str::to_owned)
                .unwrap_or_default();

            req.extensions_mut().insert(AuthContext { user, token });

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn deny<B>(req: ServiceRequest, error: AuthError, lang: Language) -> ServiceResponse<EitherBody<B>> {
    req.into_response(auth_error_response(&error, lang))
        .map_into_right_body()
}

/// Extractor for the authenticated context
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for the authenticated identity only
pub struct CurrentUser(pub AuthUser);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .map(|context| CurrentUser(context.user.clone()))
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use std::sync::Arc;

    use ag_core::repositories::MockRevocationStore;
    use ag_core::services::token::{TokenService, TokenServiceConfig};

    async fn whoami(user: CurrentUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.username)
    }

    fn token_service() -> Arc<TokenService<MockRevocationStore>> {
        Arc::new(TokenService::new(MockRevocationStore::new(), TokenServiceConfig::default()).unwrap())
    }

    fn identity(role: Role) -> AuthUser {
        AuthUser {
            user_id: 5,
            username: "mallory".to_string(),
            email: "mallory@example.com".to_string(),
            role,
        }
    }

    #[actix_web::test]
    async fn test_missing_guard_fails_closed() {
        let tokens = token_service();
        let token = tokens.generate(&identity(Role::Admin)).unwrap();

        let app = test::init_service(
            App::new().route("/me", web::get().to(whoami).wrap(JwtAuth::new())),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_role_restricted_route() {
        let tokens = token_service();
        let guard = web::Data::new(AuthGuard::new(tokens.clone()));
        let token = tokens.generate(&identity(Role::User)).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(guard)
                .route("/me", web::get().to(whoami).wrap(JwtAuth::new()))
                .route(
                    "/admin",
                    web::get().to(whoami).wrap(JwtAuth::with_roles([Role::Admin])),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "mallory");

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
