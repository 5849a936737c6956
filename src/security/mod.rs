pub mod access;
pub mod jwt;

pub use access::{authorize, require_admin, RequiredRole};
