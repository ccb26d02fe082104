//! # Rentbook Security
//! 
//! Security utilities: password hashing, session tokens, session store.

pub mod password;
pub mod session;
pub mod token;

pub use password::{PasswordError, PasswordService};
pub use session::{SessionConfig, SessionStore};
