//! Profile subcommands.

mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalArgs;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Update fields of your profile
    Update(update::UpdateArgs),
}

pub async fn handle(global: &GlobalArgs, cmd: ProfileCommand) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Update(args) => update::run(global, args).await,
    }
}
