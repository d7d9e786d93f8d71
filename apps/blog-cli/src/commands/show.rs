use anyhow::bail;
use clap::Args;

use blog_core::domain::PostId;
use blog_shared::PostView;

use super::output::print_post;
use super::{Console, OutputFormat};
use crate::state::AppState;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Id of the post
    pub id: PostId,
}

pub fn execute(
    args: ShowArgs,
    format: OutputFormat,
    state: &AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    let Some(post) = state.store.read(args.id) else {
        bail!("Post {} not found", args.id);
    };

    print_post(
        console.out,
        format,
        &PostView::from_post(post, &state.default_image),
    )
}
