//! Subcommands and their dispatch.

mod delete;
mod list;
mod output;
mod show;
mod write;

use std::io::{BufRead, Write};

use clap::{Subcommand, ValueEnum};

use crate::state::AppState;

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all posts, newest first
    List,
    /// Show one post in full
    Show(show::ShowArgs),
    /// Publish a new post
    Create(write::CreateArgs),
    /// Replace the title, description and image of a post
    Edit(write::EditArgs),
    /// Delete a post (asks for confirmation)
    Delete(delete::DeleteArgs),
}

/// Terminal streams, injectable so commands can run against buffers.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    /// Command results.
    pub out: &'a mut dyn Write,
    /// Prompts and notices.
    pub err: &'a mut dyn Write,
}

pub async fn execute(
    command: Commands,
    format: OutputFormat,
    state: &mut AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    match command {
        Commands::List => list::execute(format, state, console),
        Commands::Show(args) => show::execute(args, format, state, console),
        Commands::Create(args) => write::create(args, format, state, console).await,
        Commands::Edit(args) => write::edit(args, format, state, console).await,
        Commands::Delete(args) => delete::execute(args, state, console).await,
    }
}
