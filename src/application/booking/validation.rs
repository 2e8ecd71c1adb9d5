//! Booking request rules.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::{DomainError, DomainResult, SharedClock};

pub const MIN_PARTY_SIZE: i32 = 1;
pub const MAX_PARTY_SIZE: i32 = 12;

pub const RESTAURANT_REQUIRED: &str = "A restaurant must be selected.";
pub const FUTURE_TIME_REQUIRED: &str = "Please select a valid future date & time.";
pub const PARTY_SIZE_OUT_OF_RANGE: &str = "Party size must be between 1 and 12.";

/// A booking form as submitted. Any field may be missing.
///
/// The derived rules only flag fields; the messages reported are the
/// constants above.
#[derive(Debug, Clone, Default, Validate)]
pub struct BookingRequest {
    #[validate(required, range(min = 1))]
    pub restaurant_id: Option<i32>,

    /// Checked against the clock, outside the derived rules
    pub at: Option<DateTime<Utc>>,

    #[validate(required, range(min = 1, max = 12))]
    pub party_size: Option<i32>,
}

/// Outcome of validating a booking request. Holds every violated rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn into_result(self) -> DomainResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed(self.errors))
        }
    }
}

/// Checks restaurant selection, future start time and party size.
/// Rules are independent; all violations are reported.
#[derive(Clone)]
pub struct ReservationValidator {
    clock: SharedClock,
}

impl ReservationValidator {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    pub fn validate_create(
        &self,
        restaurant_id: Option<i32>,
        at: Option<DateTime<Utc>>,
        party_size: Option<i32>,
    ) -> ValidationResult {
        self.validate(&BookingRequest {
            restaurant_id,
            at,
            party_size,
        })
    }

    pub fn validate(&self, request: &BookingRequest) -> ValidationResult {
        let mut result = ValidationResult::default();

        let failed = match request.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect(),
        };
        let has_failed = |field: &str| failed.iter().any(|f| f == field);

        if has_failed("restaurant_id") {
            result.add_error(RESTAURANT_REQUIRED);
        }

        let now = self.clock.now();
        if !matches!(request.at, Some(at) if at > now) {
            result.add_error(FUTURE_TIME_REQUIRED);
        }

        if has_failed("party_size") {
            result.add_error(PARTY_SIZE_OUT_OF_RANGE);
        }

        result
    }
}
