use clap::Subcommand;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{DatabaseManager, NoteStore, PgNoteStore};

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    #[command(about = "Create the notes table and indexes if missing")]
    Migrate,

    #[command(about = "Check that the notes database is reachable")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config::config().database).await?;

    match cmd {
        DbCommands::Migrate => {
            DatabaseManager::migrate(&pool).await?;
            output_success(&output_format, "Notes schema is up to date", None)
        }
        DbCommands::Ping => {
            PgNoteStore::new(pool).ping().await?;
            output_success(&output_format, "Notes database is reachable", None)
        }
    }
}
