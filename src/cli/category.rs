//! Category administration commands.

use clap::Subcommand;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::models::CategoryInput;
use crate::services::CategoryService;
use crate::store::Order;

/// Category administration subcommands.
#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories with pagination and an optional name filter
    List {
        #[arg(long, default_value_t = 0)]
        skip: u64,

        #[arg(long, default_value_t = 20)]
        limit: u64,

        #[arg(long, default_value = "created_at")]
        sort_by: String,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        order: String,

        /// Case-insensitive name substring filter
        #[arg(long)]
        name: Option<String>,
    },

    /// Create a category
    Create {
        name: String,

        /// Id of the creating user
        #[arg(long)]
        creator: String,
    },

    /// Rename a category
    Update {
        id: String,
        name: String,

        /// Id of the updating user
        #[arg(long)]
        updater: String,
    },

    /// Soft-delete a category (the record is kept, marked deleted)
    Delete {
        id: String,

        /// Id of the updating user
        #[arg(long)]
        updater: String,
    },

    /// Check whether a name is already taken
    Check { name: String },
}

impl CategoryCommand {
    /// Run the category subcommand against the configured database.
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let ctx = Context::connect(config).await?;
        let service = CategoryService::from_ref(&ctx);

        match self {
            CategoryCommand::List {
                skip,
                limit,
                sort_by,
                order,
                name,
            } => {
                let order: Order = order.parse().map_err(|e: String| eyre!(e))?;
                let page = service
                    .get_categories(skip, limit, &sort_by, order, name.as_deref())
                    .await?;
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
            CategoryCommand::Create { name, creator } => {
                let category = service
                    .create_category(&CategoryInput { name }, &creator)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&category)?);
            }
            CategoryCommand::Update { id, name, updater } => {
                let category = service
                    .update_category(&id, &updater, &CategoryInput { name })
                    .await?;
                println!("{}", serde_json::to_string_pretty(&category)?);
            }
            CategoryCommand::Delete { id, updater } => {
                let category = service.delete_category(&id, &updater).await?;
                println!("{}", serde_json::to_string_pretty(&category)?);
            }
            CategoryCommand::Check { name } => match service.check_duplicate_category(&name).await? {
                Some(category) => println!("{}", serde_json::to_string_pretty(&category)?),
                None => println!("null"),
            },
        }

        Ok(())
    }
}
