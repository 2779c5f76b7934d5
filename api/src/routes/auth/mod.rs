//! Authentication route handlers
//!
//! - `POST /api/v1/auth/login` exchanges email and password for a session token
//! - `POST /api/v1/auth/logout` revokes the presented token
//! - `POST /api/v1/auth/refresh` swaps the presented token for a fresh one

pub mod login;
pub mod logout;
pub mod refresh;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
