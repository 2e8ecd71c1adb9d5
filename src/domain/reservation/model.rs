//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Awaiting confirmation by the restaurant
    Pending,
    /// Booked; the default for reservations made through the booking flow
    Confirmed,
    /// Cancelled by the guest or the restaurant
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "pending" => Ok(Self::Pending),
            "Confirmed" | "confirmed" => Ok(Self::Confirmed),
            "Cancelled" | "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::ValidationFailed(vec![format!(
                "Unknown reservation status '{}'.",
                other
            )])),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation ID, immutable once assigned
    pub id: i32,
    pub restaurant_id: i32,
    /// Owning user, always taken from the caller's session
    pub user_id: i32,
    pub at: DateTime<Utc>,
    pub party_size: i32,
    pub status: ReservationStatus,
}

/// A reservation that has not been persisted yet.
///
/// `id` is `None` when the store assigns identifiers itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub id: Option<i32>,
    pub restaurant_id: i32,
    pub user_id: i32,
    pub at: DateTime<Utc>,
    pub party_size: i32,
    pub status: ReservationStatus,
}

impl NewReservation {
    /// A booking made through the booking flow starts out confirmed.
    pub fn confirmed(user_id: i32, restaurant_id: i32, at: DateTime<Utc>, party_size: i32) -> Self {
        Self {
            id: None,
            restaurant_id,
            user_id,
            at,
            party_size,
            status: ReservationStatus::Confirmed,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn into_reservation(self, id: i32) -> Reservation {
        Reservation {
            id,
            restaurant_id: self.restaurant_id,
            user_id: self.user_id,
            at: self.at,
            party_size: self.party_size,
            status: self.status,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn booking_flow_defaults_to_confirmed() {
        let r = NewReservation::confirmed(10000001, 20000001, Utc::now() + Duration::days(1), 2);
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert!(r.id.is_none());
    }

    #[test]
    fn into_reservation_keeps_fields() {
        let at = Utc::now() + Duration::hours(3);
        let r = NewReservation::confirmed(7, 20000002, at, 4)
            .with_status(ReservationStatus::Pending)
            .into_reservation(50000009);
        assert_eq!(r.id, 50000009);
        assert_eq!(r.at, at);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.user_id, 7);
    }

    #[test]
    fn status_parses_case_insensitive_names() {
        assert_eq!("confirmed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Confirmed);
        assert_eq!("Pending".parse::<ReservationStatus>().unwrap(), ReservationStatus::Pending);
        assert_eq!(ReservationStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "Expired".parse::<ReservationStatus>().unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed(_)));
    }
}
