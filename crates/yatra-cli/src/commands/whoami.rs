//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{output, session};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the stored user record as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(global: &GlobalArgs, args: WhoamiArgs) -> Result<()> {
    let ctx = session::open(global)?;
    let user = ctx
        .user()
        .context("No active session. Run 'yatra login' first.")?;

    if args.json {
        return output::json(user);
    }

    output::field("ID", user.id().unwrap_or("-"));
    output::field("Username", user.username().unwrap_or("-"));
    output::field("Email", user.email().unwrap_or("-"));
    output::field(
        "Token",
        if ctx.token().is_some() { "stored" } else { "missing" },
    );

    Ok(())
}
