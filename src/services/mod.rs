pub mod roles;

pub use roles::RoleResolver;
