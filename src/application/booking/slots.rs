//! Bookable time slots within opening hours.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::config::BookingConfig;
use crate::domain::{DomainResult, SharedClock};

/// Produces the slot grid for a day: every `interval` from opening to
/// closing time inclusive, as wall-clock times at a fixed UTC offset.
///
/// For today, slots at or before the current instant are left out. The
/// result is recomputed on every call and may be empty.
#[derive(Clone)]
pub struct SlotGenerator {
    opening: NaiveTime,
    closing: NaiveTime,
    interval: Duration,
    offset: FixedOffset,
    clock: SharedClock,
}

impl SlotGenerator {
    pub fn new(config: &BookingConfig, clock: SharedClock) -> DomainResult<Self> {
        config.validate()?;
        let offset = config.utc_offset()?;

        Ok(Self {
            opening: config.opening_time,
            closing: config.closing_time,
            interval: Duration::minutes(config.slot_interval_minutes),
            offset,
            clock,
        })
    }

    /// Calendar date of "now" at the booking offset.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.offset).date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Wall-clock date and time at `hour:minute` on `day`, as UTC.
    pub fn at(&self, day: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&day.and_time(time))
            .single()
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn generate_slots(&self, day: NaiveDate) -> Vec<DateTime<Utc>> {
        let now = self.clock.now();
        let is_today = day == self.today();

        let close = day.and_time(self.closing);
        let mut local = day.and_time(self.opening);
        let mut slots = Vec::new();

        while local <= close {
            if let Some(at) = self.at(local.date(), local.time()) {
                if !(is_today && at <= now) {
                    slots.push(at);
                }
            }
            local += self.interval;
        }
        slots
    }
}
