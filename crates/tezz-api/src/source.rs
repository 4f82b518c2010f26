//! Where module snapshots come from

use crate::client::ApiClient;
use async_trait::async_trait;
use tezz_core::error::Result;
use tezz_core::types::Module;

/// Anything that can produce the current user's modules
///
/// The schedule and diary only need a module snapshot; they do not care
/// whether it came from the backend or elsewhere.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn fetch_modules(&self) -> Result<Vec<Module>>;
}

#[async_trait]
impl ModuleSource for ApiClient {
    async fn fetch_modules(&self) -> Result<Vec<Module>> {
        self.modules().await
    }
}

#[async_trait]
impl ModuleSource for Vec<Module> {
    async fn fetch_modules(&self) -> Result<Vec<Module>> {
        Ok(self.clone())
    }
}
