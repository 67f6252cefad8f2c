//! Init command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;

use super::App;

impl App {
    /// Run the init command to create the indexes the service relies on.
    pub async fn run_init(&self) -> Result<()> {
        let config = Config::load()?;
        tracing::info!("Connecting to MongoDB at {}", config.mongodb.uri);
        let ctx = Context::connect(config).await?;
        tracing::info!("Connected to database '{}'", ctx.config.mongodb.database);

        tracing::info!("Creating indexes...");
        ctx.store.ensure_indexes().await?;
        tracing::info!("Indexes ready (unique name index on categories)");

        Ok(())
    }
}
