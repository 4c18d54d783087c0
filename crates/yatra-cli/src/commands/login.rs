//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use yatra_core::{BookingApi, Credentials, Location, flows};

use crate::cli::GlobalArgs;
use crate::{output, progress, session};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "YATRA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Location to continue at once logged in
    #[arg(long, default_value = "/")]
    pub return_to: String,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let api = session::api(global)?;
    let mut ctx = session::open(global)?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = progress::run(flows::login(&mut ctx, &api, &credentials))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    if let Some(username) = user.username() {
        output::field("User", username);
    }
    if let Some(email) = user.email() {
        output::field("Email", email);
    }
    output::field("API", api.url().as_str());

    let next = Location::parse(&args.return_to);
    if next.path() != "/" || !next.search().is_empty() {
        output::field("Continue at", &next.to_string());
    }

    Ok(())
}
