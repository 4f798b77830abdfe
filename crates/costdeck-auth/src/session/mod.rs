mod store;
mod validator;

pub use store::SessionStore;
pub use validator::{AuthContext, SessionValidator};
