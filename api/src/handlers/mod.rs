//! Shared response helpers for route handlers

pub mod error;

pub use error::{
    auth_error_response, handle_domain_error, handle_domain_error_with_lang,
    validation_error_response, Language,
};
