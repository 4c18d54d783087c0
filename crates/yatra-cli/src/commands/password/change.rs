//! Password change command implementation.

use anyhow::{Result, bail};
use clap::Args;

use yatra_core::{BookingApi, PasswordChange};

use crate::cli::GlobalArgs;
use crate::{output, progress, session};

const PASSWORD_ROUTE: &str = "/profile/password";

#[derive(Args, Debug)]
pub struct ChangeArgs {
    /// Current password
    #[arg(long = "current")]
    pub current_password: String,

    /// New password
    #[arg(long = "new")]
    pub new_password: String,
}

pub async fn run(global: &GlobalArgs, args: ChangeArgs) -> Result<()> {
    if args.new_password.is_empty() {
        bail!("New password cannot be empty");
    }

    let ctx = session::open(global)?;
    let token = session::require(&ctx, PASSWORD_ROUTE)?;
    let api = session::api(global)?;

    let change = PasswordChange::new(args.current_password, args.new_password);
    session::remote(
        progress::run(api.change_password(&change, &token)).await,
        "Failed to change password",
    )?;

    output::success("Password changed");

    Ok(())
}
