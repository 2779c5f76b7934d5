//! Application factory
//!
//! Builds the Actix-web application around an already wired [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, App, Error, HttpRequest, HttpResponse,
};
use serde_json::json;
use tracing_actix_web::TracingLogger;

use ag_core::domain::entities::user::Role;
use ag_core::repositories::{RevocationStore, UserRepository};
use ag_core::services::guard::AuthGuard;
use ag_shared::config::Environment;
use ag_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::Language;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, examples, users, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    auth_guard: web::Data<AuthGuard>,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    let admin = || JwtAuth::with_roles([Role::Admin]);

    App::new()
        .app_data(app_state)
        .app_data(auth_guard)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Logging outermost so denied and CORS-rejected requests are recorded too
        .wrap(create_cors(environment))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, S>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::<U, S>))
                        // Parses its own bearer header; revoked tokens may still log out
                        .route("/logout", web::post().to(auth::logout::<U, S>))
                        .route(
                            "/refresh",
                            web::post().to(auth::refresh::<U, S>).wrap(JwtAuth::new()),
                        ),
                )
                .service(
                    web::scope("/users")
                        .service(
                            web::resource("")
                                .route(web::post().to(users::create::<U, S>).wrap(JwtAuth::new()))
                                .route(web::get().to(users::find_all::<U, S>).wrap(admin())),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(users::find_one::<U, S>).wrap(JwtAuth::new()))
                                .route(web::delete().to(users::remove::<U, S>).wrap(admin())),
                        ),
                )
                .service(
                    web::scope("/admin/users")
                        .service(
                            web::resource("")
                                .route(web::get().to(users::find_all::<U, S>).wrap(admin()))
                                .route(web::post().to(users::create::<U, S>).wrap(admin())),
                        )
                        // Registered before `/{id}`, which would otherwise capture them
                        .route("/me", web::get().to(users::me).wrap(JwtAuth::new()))
                        .route("/my-id", web::get().to(users::my_id).wrap(JwtAuth::new()))
                        .route("/{id}", web::delete().to(users::remove::<U, S>).wrap(admin())),
                )
                .service(
                    web::scope("/auth-examples")
                        .route(
                            "/authenticated",
                            web::get().to(examples::authenticated).wrap(JwtAuth::new()),
                        )
                        .route(
                            "/admin-only",
                            web::get().to(examples::admin_only).wrap(admin()),
                        )
                        .route(
                            "/admin-or-editor",
                            web::get()
                                .to(examples::admin_or_editor)
                                .wrap(JwtAuth::with_roles([Role::Admin, Role::Editor])),
                        )
                        .route(
                            "/user-info",
                            web::get().to(examples::user_info).wrap(JwtAuth::new()),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports 503 when either the revocation store or the user database does
/// not answer. Without the store every authenticated request is rejected.
async fn health_check<U, S>(state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RevocationStore + 'static,
{
    let redis_up = match state.token_service.store().ping().await {
        Ok(up) => up,
        Err(e) => {
            tracing::warn!(error = %e, "Revocation store health check failed");
            false
        }
    };
    let database_up = match state.user_service.ping().await {
        Ok(up) => up,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let healthy = redis_up && database_up;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let up_or_down = |up: bool| if up { "up" } else { "down" };

    HttpResponse::build(status).json(json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "authgate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "redis": up_or_down(redis_up),
        "database": up_or_down(database_up),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let message = match Language::from_request(req) {
        Language::English => "Request body is not valid JSON for this endpoint",
        Language::Chinese => "请求体不是有效的 JSON",
    };
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("body", err.to_string()),
    );

    InternalError::from_response(err, response).into()
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let message = match Language::from_request(&req) {
        Language::English => "The requested resource was not found",
        Language::Chinese => "请求的资源不存在",
    };

    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, message))
}
