//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `StoreSessionValidator` - Resolves cookies through the session store
//! - `MockSessionValidator` - Fixed token map for tests

mod mock;
mod session_validator;

pub use mock::MockSessionValidator;
pub use session_validator::StoreSessionValidator;
