mod model;

pub use model::{CreateLoginAttempt, LoginAttempt};
