//! At-most-one-in-flight guard for a logical operation.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{DomainError, DomainResult};

/// Rejects a second start of an operation while the first is running.
pub struct SingleFlight {
    name: &'static str,
    busy: AtomicBool,
}

impl SingleFlight {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            busy: AtomicBool::new(false),
        }
    }

    /// Start the operation. The flight ends when the guard is dropped.
    pub fn try_begin(&self) -> DomainResult<FlightGuard<'_>> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(DomainError::Busy(self.name));
        }
        Ok(FlightGuard { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct FlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_is_rejected_until_guard_drops() {
        let flight = SingleFlight::new("create reservation");

        let guard = flight.try_begin().unwrap();
        assert!(flight.is_busy());
        assert!(matches!(
            flight.try_begin(),
            Err(DomainError::Busy("create reservation"))
        ));

        drop(guard);
        assert!(!flight.is_busy());
        assert!(flight.try_begin().is_ok());
    }
}
