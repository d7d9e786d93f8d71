//! `create` and `edit` - the two form submissions.

use std::io::Write;

use anyhow::bail;
use clap::Args;

use blog_core::DomainError;
use blog_core::domain::PostId;
use blog_shared::PostView;

use super::output::print_post;
use super::{Console, OutputFormat};
use crate::state::AppState;

/// The editable fields of a post.
#[derive(Debug, Args)]
pub struct PostFields {
    /// Post title (required)
    #[arg(long)]
    pub title: String,

    /// Post body (required)
    #[arg(long)]
    pub description: String,

    /// Image URL; leave out to use the default image
    #[arg(long, default_value = "")]
    pub image: String,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: PostFields,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the post to edit
    pub id: PostId,

    #[command(flatten)]
    pub fields: PostFields,
}

pub async fn create(
    args: CreateArgs,
    format: OutputFormat,
    state: &mut AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    let PostFields {
        title,
        description,
        image,
    } = args.fields;

    let post = state
        .store
        .create(title, description, image)
        .await
        .map_err(explain)?;

    tracing::info!(post_id = post.id, "Post published");
    announce(console, format, "Published", &PostView::from_post(&post, &state.default_image))
}

pub async fn edit(
    args: EditArgs,
    format: OutputFormat,
    state: &mut AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    let PostFields {
        title,
        description,
        image,
    } = args.fields;

    let post = match state.store.update(args.id, title, description, image).await {
        Ok(post) => post,
        Err(e) if e.is_not_found() => bail!("Post {} not found", args.id),
        Err(e) => return Err(explain(e)),
    };

    tracing::info!(post_id = post.id, "Post updated");
    announce(console, format, "Updated", &PostView::from_post(&post, &state.default_image))
}

fn announce(
    console: &mut Console<'_>,
    format: OutputFormat,
    verb: &str,
    post: &PostView,
) -> anyhow::Result<()> {
    if format == OutputFormat::Text {
        writeln!(console.out, "{verb} post {}: {}", post.id, post.title)?;
        Ok(())
    } else {
        print_post(console.out, format, post)
    }
}

fn explain(err: DomainError) -> anyhow::Error {
    let persistence = err.is_persistence();
    let err = anyhow::Error::new(err);
    if persistence {
        err.context("Changes could not be saved to storage")
    } else {
        err
    }
}
