use blog_shared::PostView;

use super::output::print_list;
use super::{Console, OutputFormat};
use crate::state::AppState;

pub fn execute(
    format: OutputFormat,
    state: &AppState,
    console: &mut Console<'_>,
) -> anyhow::Result<()> {
    let views = PostView::from_posts(state.store.list(), &state.default_image);
    print_list(console.out, format, &views)
}
