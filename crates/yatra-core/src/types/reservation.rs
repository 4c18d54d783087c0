//! Reservation record type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A booking as listed by `GET /api/reservations/user`.
///
/// Only the fields the client acts on are typed; everything else the
/// service sends is kept in `extra` and serialized back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// The reservation id (`_id` on the wire, `id` also accepted).
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Booking status, e.g. `confirmed` or `cancel-requested`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        default,
        rename = "checkIn",
        alias = "startDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_in: Option<String>,

    #[serde(
        default,
        rename = "checkOut",
        alias = "endDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_out: Option<String>,

    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reservation {
    /// Returns a display name for the booked hotel.
    ///
    /// Accepts `hotelName`, a `hotel` string, or a populated `hotel` object
    /// with a `name`.
    pub fn hotel_name(&self) -> Option<&str> {
        self.named("hotelName", "hotel")
    }

    /// Returns a display name for the booked room.
    pub fn room_name(&self) -> Option<&str> {
        self.named("roomName", "room")
            .or_else(|| self.extra.get("roomTitle").and_then(Value::as_str))
    }

    /// Returns true if a cancellation has already been requested or applied.
    pub fn is_cancel_pending(&self) -> bool {
        self.status.as_deref().is_some_and(|s| {
            let s = s.to_ascii_lowercase();
            s.contains("cancel")
        })
    }

    fn named(&self, flat: &str, nested: &str) -> Option<&str> {
        if let Some(name) = self.extra.get(flat).and_then(Value::as_str) {
            return Some(name);
        }
        match self.extra.get(nested)? {
            Value::String(s) => Some(s),
            Value::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("title"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}
