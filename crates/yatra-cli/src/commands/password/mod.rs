//! Password subcommands.

mod change;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalArgs;

#[derive(Args, Debug)]
pub struct PasswordCommand {
    #[command(subcommand)]
    pub command: PasswordSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PasswordSubcommand {
    /// Change your account password
    Change(change::ChangeArgs),
}

pub async fn handle(global: &GlobalArgs, cmd: PasswordCommand) -> Result<()> {
    match cmd.command {
        PasswordSubcommand::Change(args) => change::run(global, args).await,
    }
}
