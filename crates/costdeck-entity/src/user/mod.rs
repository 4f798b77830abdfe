mod model;
mod role;

pub use model::{CreateUser, User};
pub use role::UserRole;
