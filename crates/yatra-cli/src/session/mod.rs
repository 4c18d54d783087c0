//! Session handling for the CLI.
//!
//! The session is an [`AuthContext`] over a [`FileStore`] in the user's data
//! directory, so it survives between invocations.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use tracing::debug;

use yatra_core::{Access, ApiUrl, AuthContext, Location, Token, flows};
use yatra_file::FileStore;
use yatra_http::HttpApi;

use crate::cli::GlobalArgs;

pub type CliContext = AuthContext<FileStore>;

/// Directory holding the session entries.
pub fn data_dir(global: &GlobalArgs) -> Result<PathBuf> {
    if let Some(dir) = &global.data_dir {
        return Ok(dir.clone());
    }

    let dirs = ProjectDirs::from("com", "YatraNepal", "yatra")
        .context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("session"))
}

/// Rehydrate the session from disk.
pub fn open(global: &GlobalArgs) -> Result<CliContext> {
    let dir = data_dir(global)?;
    debug!(dir = %dir.display(), "Opening session store");
    Ok(AuthContext::new(FileStore::new(dir)))
}

/// Build the API client for the configured service.
pub fn api(global: &GlobalArgs) -> Result<HttpApi> {
    let url = ApiUrl::new(&global.api).context("Invalid API URL")?;
    HttpApi::new(url).context("Failed to create HTTP client")
}

/// Pass the route guard for `route` and return the bearer token.
///
/// A redirect becomes an error naming the login command, carrying the
/// route so the user can come back to it.
pub fn require(ctx: &CliContext, route: &str) -> Result<Token> {
    match ctx.guard(&Location::parse(route), ()) {
        Access::Granted(()) => flows::require_token(ctx)
            .context("Stored session has no token. Run 'yatra login' again."),
        Access::Redirect(redirect) => Err(anyhow!(
            "Not logged in. Run 'yatra login --return-to {}' first.",
            redirect.from
        )),
    }
}

/// Attach context to a failed remote call, pointing at the login command
/// when the service rejected the credentials.
pub fn remote<T>(result: yatra_core::Result<T>, action: &str) -> Result<T> {
    result.map_err(|e| {
        if e.is_auth_rejection() {
            anyhow::Error::new(e).context(format!(
                "{action}: the service rejected the session. Run 'yatra login' again."
            ))
        } else {
            anyhow::Error::new(e).context(action.to_string())
        }
    })
}
