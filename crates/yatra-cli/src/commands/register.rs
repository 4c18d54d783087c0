//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use yatra_core::{Registration, flows};

use crate::cli::GlobalArgs;
use crate::{output, progress, session};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name for the new account
    #[arg(long)]
    pub username: String,

    /// Email address to log in with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "YATRA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(global: &GlobalArgs, args: RegisterArgs) -> Result<()> {
    let api = session::api(global)?;
    let registration = Registration::new(&args.username, &args.email, &args.password);

    eprintln!("{}", "Creating account...".dimmed());

    progress::run(flows::register(&api, &registration))
        .await
        .context("Failed to create account")?;

    output::success("Account created");
    output::hint(&format!(
        "Run 'yatra login --email {}' to start a session.",
        args.email
    ));

    Ok(())
}
