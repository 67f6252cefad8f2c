//! CLI module for Rubric.
//!
//! Subcommands:
//! - `init`: Create the database indexes the service relies on
//! - `category`: Category administration (list/create/update/delete/check)

mod category;
mod init;

use clap::{Parser, Subcommand};

pub use category::CategoryCommand;

/// Rubric - category management service
#[derive(Parser)]
#[command(name = "rubric")]
#[command(about = "Category management service backed by MongoDB")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize the database indexes
    Init,

    /// Category administration
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Init => self.run_init().await,
            Command::Category { command } => command.run().await,
        }
    }
}
