//! Application context providing the dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::store::Store;

/// Shared handle to the document store.
pub type AppStore = Arc<Store>;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, enabling
/// compile-time dependency resolution.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// MongoDB store handle (wraps the driver's connection pool).
    pub store: AppStore,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Connects to MongoDB using the configured URI and builds the context.
    pub async fn connect(config: Config) -> Result<Self, mongodb::error::Error> {
        let store = Store::connect(&config.mongodb).await?;
        Ok(Self::new(store, config))
    }
}
