pub mod revocation;
pub mod user;

pub use revocation::RevocationStore;
pub use user::UserRepository;

#[cfg(any(test, feature = "testing"))]
pub use revocation::MockRevocationStore;
#[cfg(any(test, feature = "testing"))]
pub use user::MockUserRepository;
