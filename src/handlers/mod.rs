pub mod auth;
pub mod events;
pub mod health;
pub mod members;

pub use auth::*;
pub use events::*;
pub use health::*;
pub use members::*;
