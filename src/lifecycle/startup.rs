//! Startup orchestration: bring up the configured document store.

use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::store::{DocumentStore, MemoryStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("store.url is required for the mongo backend")]
    MissingStoreUrl,

    #[error("this build has no MongoDB support (enable the `mongo` feature)")]
    MongoUnsupported,

    #[error("store connection failed: {0}")]
    Store(#[from] StoreError),
}

/// Connect the configured store and check it answers.
pub async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StartupError> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Mongo => connect_mongo(config).await?,
    };

    store.ping().await?;

    match config.backend {
        StoreBackend::Mongo => tracing::info!(
            backend = store.backend_name(),
            database = %config.database,
            "Connected to MongoDB"
        ),
        StoreBackend::Memory => tracing::warn!(
            backend = store.backend_name(),
            "Using in-memory store; data is lost on exit"
        ),
    }

    Ok(store)
}

#[cfg(feature = "mongo")]
async fn connect_mongo(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StartupError> {
    let url = config.url.as_deref().ok_or(StartupError::MissingStoreUrl)?;
    let store = crate::store::MongoStore::connect(url, &config.database).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongo"))]
async fn connect_mongo(_config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StartupError> {
    Err(StartupError::MongoUnsupported)
}
