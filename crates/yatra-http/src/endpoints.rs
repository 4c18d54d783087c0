//! Endpoint paths and wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use yatra_core::{ResourceId, Reservation};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const REGISTER: &str = "/api/auth/register";

pub const LOGIN: &str = "/api/auth/login";

pub const USER_RESERVATIONS: &str = "/api/reservations/user";

pub const CHANGE_PASSWORD: &str = "/api/users/change-password";

/// `PUT /api/reservations/{id}/request-cancel`
pub fn request_cancel(id: &ResourceId) -> String {
    format!("/api/reservations/{}/request-cancel", id)
}

/// `PUT /api/users/update/{id}`
pub fn update_user(id: &ResourceId) -> String {
    format!("/api/users/update/{}", id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response from login. Only `user` and `token` are read.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: Value,
    #[serde(alias = "accessToken")]
    pub token: String,
}

/// Request body for request-cancel.
#[derive(Debug, Serialize)]
pub struct CancelRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

/// The reservation list, either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReservationsResponse {
    List(Vec<Reservation>),
    Wrapped {
        #[serde(alias = "data", alias = "bookings")]
        reservations: Vec<Reservation>,
    },
}

impl ReservationsResponse {
    pub fn into_vec(self) -> Vec<Reservation> {
        match self {
            Self::List(list) => list,
            Self::Wrapped { reservations } => reservations,
        }
    }
}

/// Error body as sent by the service.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_interpolate_ids() {
        let id = ResourceId::new("abc123").unwrap();
        assert_eq!(request_cancel(&id), "/api/reservations/abc123/request-cancel");
        assert_eq!(update_user(&id), "/api/users/update/abc123");
    }

    #[test]
    fn reservations_accept_both_shapes() {
        let bare: ReservationsResponse =
            serde_json::from_value(json!([{"_id": "r1"}, {"_id": "r2"}])).unwrap();
        assert_eq!(bare.into_vec().len(), 2);

        let wrapped: ReservationsResponse =
            serde_json::from_value(json!({"reservations": [{"_id": "r1"}]})).unwrap();
        assert_eq!(wrapped.into_vec()[0].id, "r1");

        let data: ReservationsResponse =
            serde_json::from_value(json!({"success": true, "data": []})).unwrap();
        assert!(data.into_vec().is_empty());
    }

    #[test]
    fn cancel_request_omits_missing_reason() {
        assert_eq!(
            serde_json::to_value(CancelRequest { reason: None }).unwrap(),
            json!({})
        );
        assert_eq!(
            serde_json::to_value(CancelRequest {
                reason: Some("change of plans")
            })
            .unwrap(),
            json!({"reason": "change of plans"})
        );
    }
}
