//! Authentication module

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{authenticate, session_gate, CurrentUser};
pub use password::PasswordHasher;
