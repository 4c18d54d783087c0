//! List reservations command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use yatra_core::{BookingApi, Reservation};

use super::BOOKINGS_ROUTE;
use crate::cli::GlobalArgs;
use crate::{output, progress, session};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print reservations as JSON, one per line
    #[arg(long)]
    pub json: bool,

    /// Print reservations as a pretty-printed JSON array
    #[arg(long, conflicts_with = "json")]
    pub pretty: bool,
}

pub async fn run(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let ctx = session::open(global)?;
    let token = session::require(&ctx, BOOKINGS_ROUTE)?;
    let api = session::api(global)?;

    let reservations = session::remote(
        progress::run(api.list_reservations(&token)).await,
        "Failed to list reservations",
    )?;

    if args.pretty {
        return output::json_pretty(&reservations);
    }

    if args.json {
        for reservation in &reservations {
            output::json(reservation)?;
        }
        return Ok(());
    }

    if reservations.is_empty() {
        println!("{}", "No reservations".dimmed());
        return Ok(());
    }

    for reservation in &reservations {
        println!("{}", summary(reservation));
    }

    Ok(())
}

/// One line per reservation: id, hotel, room, dates and status.
fn summary(reservation: &Reservation) -> String {
    let mut line = reservation.id.bold().to_string();

    line.push_str("  ");
    line.push_str(reservation.hotel_name().unwrap_or("(unknown hotel)"));
    if let Some(room) = reservation.room_name() {
        line.push_str(&format!(" / {}", room));
    }

    match (&reservation.check_in, &reservation.check_out) {
        (Some(check_in), Some(check_out)) => line.push_str(&format!(
            "  {} → {}",
            output::date(check_in),
            output::date(check_out)
        )),
        (Some(check_in), None) => line.push_str(&format!("  from {}", output::date(check_in))),
        _ => {}
    }

    if let Some(status) = &reservation.status {
        let status = if reservation.is_cancel_pending() {
            status.yellow()
        } else {
            status.green()
        };
        line.push_str(&format!("  [{}]", status));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_includes_hotel_dates_and_status() {
        colored::control::set_override(false);
        let reservation: Reservation = serde_json::from_value(json!({
            "_id": "r1",
            "hotel": {"name": "Hotel Annapurna"},
            "room": {"title": "Deluxe"},
            "checkIn": "2026-11-01T00:00:00.000Z",
            "checkOut": "2026-11-04T00:00:00.000Z",
            "status": "confirmed"
        }))
        .unwrap();

        assert_eq!(
            summary(&reservation),
            "r1  Hotel Annapurna / Deluxe  2026-11-01 → 2026-11-04  [confirmed]"
        );
    }

    #[test]
    fn summary_tolerates_sparse_records() {
        colored::control::set_override(false);
        let reservation: Reservation = serde_json::from_value(json!({"_id": "r2"})).unwrap();
        assert_eq!(summary(&reservation), "r2  (unknown hotel)");
    }
}
