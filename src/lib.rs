//! Typed client for the Kroger public API (<https://developer.kroger.com>).
//!
//! ```no_run
//! use kroger_api::{ClientConfig, KrogerClient, ProductQuery};
//!
//! # async fn run() -> kroger_api::Result<()> {
//! let config = ClientConfig::from_env()?.with_scopes(["product.compact"]);
//! let client = KrogerClient::new(config)?;
//! let milk = client
//!     .search_products(&ProductQuery::new().term("milk").top_n(5))
//!     .await?;
//! for product in &milk {
//!     println!("{} {}", product.product_id, product.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::core::auth::{ClientCredentialsAuth, StaticToken};
pub use crate::core::blocking;
pub use crate::core::client::KrogerClient;
pub use crate::core::query::{FulfillmentType, LocationQuery, ProductQuery};
pub use crate::domain::ports::{Resource, TokenProvider};
pub use crate::domain::{Collection, Location, Product};
pub use crate::utils::error::{KrogerError, Result};
