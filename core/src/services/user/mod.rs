//! User management service module

mod service;

pub use service::UserService;
