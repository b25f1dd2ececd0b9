mod user;

pub use user::{User, SYSTEM_ROLE};
