use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use clap::Args;

use blog_core::domain::PostId;

use super::Console;
use crate::state::AppState;

const CONFIRM_PROMPT: &str = "Are you sure you want to delete this post?";

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the post to delete
    pub id: PostId,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn execute(
    args: DeleteArgs,
    state: &mut AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    let Some(post) = state.store.read(args.id) else {
        bail!("Post {} not found", args.id);
    };

    if !args.yes {
        writeln!(console.err, "\"{}\"", post.title)?;
        if !confirm(CONFIRM_PROMPT, console.input, console.err)? {
            writeln!(console.err, "Cancelled.")?;
            return Ok(());
        }
    }

    let removed = state
        .store
        .delete(args.id)
        .await
        .context("Post could not be deleted from storage")?;
    if !removed {
        bail!("Post {} not found", args.id);
    }

    tracing::info!(post_id = args.id, "Post deleted");
    writeln!(console.out, "Deleted post {}", args.id)?;
    Ok(())
}

/// Ask a yes/no question. Anything but `y`/`yes` (any case) is a no.
fn confirm(prompt: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> anyhow::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
