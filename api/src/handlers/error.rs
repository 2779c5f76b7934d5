//! Mapping of domain errors to localized HTTP error responses

use actix_web::{http::header, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ag_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use ag_shared::errors::{error_codes, ErrorResponse};

/// Language preference for error messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Detect language preference from Accept-Language header
    pub fn from_request(req: &HttpRequest) -> Self {
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_header)
            .unwrap_or(Language::English)
    }

    /// Parse an Accept-Language value such as `zh-CN,zh;q=0.9,en;q=0.8`
    pub fn from_header(header_str: &str) -> Self {
        let mut preferred_lang = Language::English;
        let mut max_quality = 0.0;

        for entry in header_str.split(',') {
            let mut parts = entry.trim().split(';');
            let language = parts.next().unwrap_or_default().to_lowercase();
            let quality = parts
                .next()
                .and_then(|q| q.trim().trim_start_matches("q=").parse::<f32>().ok())
                .unwrap_or(1.0);

            if quality <= max_quality {
                continue;
            }
            if language.starts_with("zh") {
                preferred_lang = Language::Chinese;
                max_quality = quality;
            } else if language.starts_with("en") {
                preferred_lang = Language::English;
                max_quality = quality;
            }
        }

        preferred_lang
    }
}

fn localized(lang: Language, en: &str, zh: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Chinese => zh.to_string(),
    }
}

fn respond(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Status code for an authentication or authorization failure
pub fn auth_error_status(error: &AuthError) -> StatusCode {
    if error.is_forbidden() {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// Builds the response for a guard or login failure
///
/// Unknown email and wrong password share one message.
pub fn auth_error_response(error: &AuthError, lang: Language) -> HttpResponse {
    let (code, en, zh) = match error {
        AuthError::CredentialMissing => (
            error_codes::CREDENTIAL_MISSING,
            "Authorization token is required",
            "缺少授权令牌",
        ),
        AuthError::CredentialMalformed => (
            error_codes::CREDENTIAL_MALFORMED,
            "Authorization header must use the Bearer scheme",
            "授权头必须使用 Bearer 格式",
        ),
        AuthError::CredentialExpired => (
            error_codes::CREDENTIAL_EXPIRED,
            "Token has expired",
            "令牌已过期",
        ),
        AuthError::CredentialRevoked => (
            error_codes::CREDENTIAL_REVOKED,
            "Token has been revoked",
            "令牌已被撤销",
        ),
        AuthError::CredentialInvalidSignature => (
            error_codes::CREDENTIAL_INVALID,
            "Invalid or expired token",
            "令牌无效或已过期",
        ),
        AuthError::InsufficientRole => (
            error_codes::INSUFFICIENT_ROLE,
            "Insufficient permissions",
            "权限不足",
        ),
        AuthError::UserNotFound | AuthError::PasswordMismatch => (
            error_codes::INVALID_CREDENTIALS,
            "Invalid email or password",
            "邮箱或密码错误",
        ),
    };

    respond(
        auth_error_status(error),
        ErrorResponse::new(code, localized(lang, en, zh)),
    )
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    match error {
        DomainError::Auth(ref auth_error) => {
            tracing::debug!(error = %auth_error, "Authentication failure");
            auth_error_response(auth_error, lang)
        }
        DomainError::NotFound { resource } => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(
                error_codes::NOT_FOUND,
                localized(
                    lang,
                    &format!("{} not found", resource),
                    &format!("{} 不存在", resource),
                ),
            ),
        ),
        DomainError::Conflict { message } => respond(
            StatusCode::CONFLICT,
            ErrorResponse::new(
                error_codes::CONFLICT,
                localized(lang, &message, "资源已存在"),
            ),
        ),
        DomainError::Validation(validation_error) => {
            let (en, zh) = match &validation_error {
                ValidationError::RequiredField { field } => (
                    format!("Field '{}' is required", field),
                    format!("字段 '{}' 为必填项", field),
                ),
                ValidationError::InvalidFormat { field } => (
                    format!("Field '{}' has an invalid format", field),
                    format!("字段 '{}' 格式无效", field),
                ),
                ValidationError::InvalidEmail => (
                    "Invalid email address".to_string(),
                    "邮箱地址无效".to_string(),
                ),
                ValidationError::UnknownRole { role } => (
                    format!("Unknown role: {}", role),
                    format!("未知角色：{}", role),
                ),
                ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                } => (
                    format!("Field '{}' must be between {} and {}, got {}", field, min, max, value),
                    format!("字段 '{}' 必须介于 {} 和 {} 之间，实际为 {}", field, min, max, value),
                ),
            };
            respond(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(error_codes::VALIDATION_ERROR, localized(lang, &en, &zh)),
            )
        }
        DomainError::Token(TokenError::TokenGenerationFailed { .. })
        | DomainError::Token(TokenError::UnsupportedAlgorithm { .. })
        | DomainError::Token(TokenError::InvalidTokenTtl { .. })
        | DomainError::Database(_)
        | DomainError::Cache(_)
        | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Request failed with internal error");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(
                    error_codes::INTERNAL_ERROR,
                    localized(lang, "An internal error occurred", "发生内部错误"),
                ),
            )
        }
    }
}

/// Handle domain errors using the request's language preference
pub fn handle_domain_error(error: DomainError, req: &HttpRequest) -> HttpResponse {
    handle_domain_error_with_lang(error, Language::from_request(req))
}

/// Builds a 400 response listing the failing fields of a request body
pub fn validation_error_response(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let mut response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        localized(lang, "Request validation failed", "请求参数验证失败"),
    );

    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }

    respond(StatusCode::BAD_REQUEST, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_language_detection() {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9,en;q=0.8"))
            .to_http_request();
        assert_eq!(Language::from_request(&req), Language::Chinese);

        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "en-US,zh;q=0.5"))
            .to_http_request();
        assert_eq!(Language::from_request(&req), Language::English);

        let req = TestRequest::default().to_http_request();
        assert_eq!(Language::from_request(&req), Language::English);
    }

    #[test]
    fn test_auth_error_status_mapping() {
        for error in [
            AuthError::CredentialMissing,
            AuthError::CredentialMalformed,
            AuthError::CredentialExpired,
            AuthError::CredentialRevoked,
            AuthError::CredentialInvalidSignature,
            AuthError::UserNotFound,
            AuthError::PasswordMismatch,
        ] {
            assert_eq!(auth_error_status(&error), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(
            auth_error_status(&AuthError::InsufficientRole),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let lang = Language::English;

        let not_found = DomainError::NotFound { resource: "User with ID 1".into() };
        assert_eq!(
            handle_domain_error_with_lang(not_found, lang).status(),
            StatusCode::NOT_FOUND
        );

        let conflict = DomainError::Conflict { message: "exists".into() };
        assert_eq!(
            handle_domain_error_with_lang(conflict, lang).status(),
            StatusCode::CONFLICT
        );

        let internal = DomainError::Cache("down".into());
        assert_eq!(
            handle_domain_error_with_lang(internal, lang).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
