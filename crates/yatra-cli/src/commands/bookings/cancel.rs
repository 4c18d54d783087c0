//! Request-cancel command implementation.

use anyhow::{Context, Result};
use clap::Args;

use yatra_core::{BookingApi, ResourceId};

use super::BOOKINGS_ROUTE;
use crate::cli::GlobalArgs;
use crate::{output, progress, session};

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Reservation ID
    pub id: String,

    /// Reason passed on to the hotel
    #[arg(long)]
    pub reason: Option<String>,
}

pub async fn run(global: &GlobalArgs, args: CancelArgs) -> Result<()> {
    let id = ResourceId::new(&args.id).context("Invalid reservation ID")?;

    let ctx = session::open(global)?;
    let token = session::require(&ctx, BOOKINGS_ROUTE)?;
    let api = session::api(global)?;

    session::remote(
        progress::run(api.request_cancel(&id, args.reason.as_deref(), &token)).await,
        "Failed to request cancellation",
    )?;

    output::success(&format!("Cancellation requested for {}", id));

    Ok(())
}
