//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{output, session};

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(global: &GlobalArgs, _args: LogoutArgs) -> Result<()> {
    let mut ctx = session::open(global)?;
    let active = ctx.user().is_some() || ctx.token().is_some();

    ctx.logout().context("Failed to clear session")?;

    if active {
        output::success("Logged out");
    } else {
        output::success("No active session");
    }

    Ok(())
}
