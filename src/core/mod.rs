pub mod auth;
pub mod blocking;
pub mod client;
pub mod query;

pub use crate::domain::ports::{Resource, TokenProvider};
pub use crate::utils::error::Result;
