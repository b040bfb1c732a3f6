//! Synchronous façade over [`crate::core::client::KrogerClient`].
//!
//! Each call drives the async client on a private current-thread runtime, so
//! these methods must not be called from inside another tokio runtime.

use crate::config::ClientConfig;
use crate::core::client::KrogerClient as AsyncKrogerClient;
use crate::core::query::{LocationQuery, ProductQuery};
use crate::domain::ports::TokenProvider;
use crate::domain::{Chain, Collection, DepartmentInfo, Location, Product};
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

#[derive(Clone)]
pub struct KrogerClient {
    inner: AsyncKrogerClient,
    runtime: Arc<Runtime>,
}

impl KrogerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_async(AsyncKrogerClient::new(config)?)
    }

    pub fn with_token_provider(
        config: ClientConfig,
        auth: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        Self::from_async(AsyncKrogerClient::with_token_provider(config, auth)?)
    }

    pub fn from_async(inner: AsyncKrogerClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn as_async(&self) -> &AsyncKrogerClient {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn search_products(&self, query: &ProductQuery) -> Result<Collection<Product>> {
        self.block_on(self.inner.search_products(query))
    }

    pub fn get_product(&self, product_id: &str) -> Result<Product> {
        self.block_on(self.inner.get_product(product_id))
    }

    pub fn search_locations(&self, query: &LocationQuery) -> Result<Collection<Location>> {
        self.block_on(self.inner.search_locations(query))
    }

    pub fn get_location(&self, location_id: &str) -> Result<Location> {
        self.block_on(self.inner.get_location(location_id))
    }

    pub fn list_chains(&self) -> Result<Vec<Chain>> {
        self.block_on(self.inner.list_chains())
    }

    pub fn get_chain(&self, name: &str) -> Result<Chain> {
        self.block_on(self.inner.get_chain(name))
    }

    pub fn list_departments(&self) -> Result<Vec<DepartmentInfo>> {
        self.block_on(self.inner.list_departments())
    }

    pub fn get_department(&self, department_id: &str) -> Result<DepartmentInfo> {
        self.block_on(self.inner.get_department(department_id))
    }
}
