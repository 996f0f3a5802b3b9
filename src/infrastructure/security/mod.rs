// src/infrastructure/security/mod.rs
mod session;

pub use session::{AdminSessionManager, ADMIN_SESSION_COOKIE};
