//! Authentication module for Yatube.
//!
//! Password hashing, signup, login and session tokens.

mod password;
mod registration;
mod session;
pub mod validation;

pub use password::{hash_password, verify_password, PasswordError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use session::{authenticate, SessionClaims, SessionKeys};
pub use validation::ValidationError;
