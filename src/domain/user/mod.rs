//! User domain module.
//!
//! Registered accounts, email normalization and bcrypt password hashes.

mod account;
mod errors;
mod password;

pub use account::{normalize_email, User, MAX_IDENTITY_LEN};
pub use errors::AccountError;
pub use password::{PasswordHash, MIN_BCRYPT_COST};
