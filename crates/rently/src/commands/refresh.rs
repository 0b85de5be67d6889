//! `refresh`: log in and rewrite both token files.

use std::path::Path;

use serde::Serialize;

use rently_core::{Bridge, FileCredentialStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Saved<'a> {
    raw_path: &'a Path,
    bearer_path: &'a Path,
}

pub async fn handle(
    bridge: &Bridge<FileCredentialStore>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    bridge.refresh_token().await?;

    let store = bridge.store();
    let saved = Saved {
        raw_path: store.raw_path(),
        bearer_path: store.bearer_path(),
    };
    let out = output::render_single(global.output, &saved, |s| {
        format!(
            "Saved raw token -> {}\nSaved bearer token -> {}",
            s.raw_path.display(),
            s.bearer_path.display()
        )
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
