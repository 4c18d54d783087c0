//! Reservation subcommands.

mod cancel;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalArgs;

/// Route the bookings screen is guarded under.
const BOOKINGS_ROUTE: &str = "/bookings";

#[derive(Args, Debug)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsSubcommand {
    /// List your reservations
    List(list::ListArgs),

    /// Ask the hotel to cancel a reservation
    Cancel(cancel::CancelArgs),
}

pub async fn handle(global: &GlobalArgs, cmd: BookingsCommand) -> Result<()> {
    match cmd.command {
        BookingsSubcommand::List(args) => list::run(global, args).await,
        BookingsSubcommand::Cancel(args) => cancel::run(global, args).await,
    }
}
