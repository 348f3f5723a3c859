//! Account handlers: signup, login, logout and schema bootstrap.

mod init_db;
mod login;
mod logout;
mod signup;

pub use init_db::{InitDbError, InitDbHandler};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::{LogoutCommand, LogoutHandler};
pub use signup::{SignupCommand, SignupHandler, SignupResult};
