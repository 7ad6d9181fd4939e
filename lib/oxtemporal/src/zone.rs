//! The seam between wall-clock values and the linear instant scale.
//!
//! Mapping a wall-clock reading to an absolute point in time needs zone
//! rules, which live outside this crate; the arithmetic core only consumes
//! the [`ZoneResolver`] contract and never interprets an [`Instant`]
//! beyond carrying it. [`Utc`] is the reference implementation: a fixed
//! zero-offset zone with no ambiguity, enough for the dispatcher's numeric
//! inputs.

use crate::TemporalError;
use crate::calendar::{self, Disambiguation, NANOS_PER_DAY};
use crate::date_time::{DateTime, Time};

/// An opaque point on a linear, zone-independent time scale, counted in
/// nanoseconds from the Unix epoch.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct Instant {
    epoch_nanoseconds: i128,
}

impl Instant {
    #[inline]
    #[must_use]
    pub const fn from_epoch_nanoseconds(epoch_nanoseconds: i128) -> Self {
        Self { epoch_nanoseconds }
    }

    #[inline]
    #[must_use]
    pub const fn epoch_nanoseconds(self) -> i128 {
        self.epoch_nanoseconds
    }
}

/// Resolution between wall-clock values and instants, implemented outside
/// the arithmetic core. Zone identifiers and zone disambiguation tokens
/// (for example "earlier") are passed through as opaque strings.
pub trait ZoneResolver {
    /// Maps a wall-clock value in the given zone to an absolute instant.
    fn resolve_to_instant(
        &self,
        local: &DateTime,
        zone: &str,
        disambiguation: &str,
    ) -> Result<Instant, TemporalError>;

    /// Maps an absolute instant to the wall-clock value it reads as in the
    /// given zone.
    fn local_date_time(&self, instant: Instant, zone: &str)
    -> Result<DateTime, TemporalError>;
}

/// The fixed zero-offset zone. It has no transitions, so every wall-clock
/// value maps to exactly one instant and the disambiguation token is
/// accepted unused; the zone identifier is likewise ignored.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Utc;

impl ZoneResolver for Utc {
    fn resolve_to_instant(
        &self,
        local: &DateTime,
        _zone: &str,
        _disambiguation: &str,
    ) -> Result<Instant, TemporalError> {
        let days = calendar::epoch_days_from_date(local.year(), local.month(), local.day());
        let time = calendar::time_to_nanoseconds(
            local.hour(),
            local.minute(),
            local.second(),
            local.millisecond(),
            local.microsecond(),
            local.nanosecond(),
        );
        Ok(Instant::from_epoch_nanoseconds(days * NANOS_PER_DAY + time))
    }

    fn local_date_time(
        &self,
        instant: Instant,
        _zone: &str,
    ) -> Result<DateTime, TemporalError> {
        let nanoseconds = instant.epoch_nanoseconds();
        let (year, month, day) =
            calendar::date_from_epoch_days_i128(nanoseconds.div_euclid(NANOS_PER_DAY))?;
        let time = Time::from_tuple(calendar::time_from_nanoseconds(
            nanoseconds.rem_euclid(NANOS_PER_DAY),
        ));
        DateTime::new(
            year,
            i64::from(month),
            i64::from(day),
            i64::from(time.hour()),
            i64::from(time.minute()),
            i64::from(time.second()),
            i64::from(time.millisecond()),
            i64::from(time.microsecond()),
            i64::from(time.nanosecond()),
            Disambiguation::Reject,
        )
    }
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn epoch_is_midnight() -> Result<(), TemporalError> {
        let local = Utc.local_date_time(Instant::from_epoch_nanoseconds(0), "UTC")?;
        assert_eq!(local.to_string(), "1970-01-01T00:00");
        assert_eq!(
            Utc.resolve_to_instant(&local, "UTC", "earlier")?
                .epoch_nanoseconds(),
            0
        );
        Ok(())
    }

    #[test]
    fn round_trips() -> Result<(), TemporalError> {
        for text in [
            "1970-01-02T00:00",
            "1969-12-31T23:59:59.999999999",
            "2021-03-07T13:30:05.000000123",
            "1600-02-29T06:00",
        ] {
            let local = DateTime::from_str(text)?;
            let instant = Utc.resolve_to_instant(&local, "UTC", "earlier")?;
            assert_eq!(Utc.local_date_time(instant, "UTC")?, local);
        }
        assert_eq!(
            Utc.resolve_to_instant(&DateTime::from_str("1970-01-02T00:00")?, "UTC", "earlier")?
                .epoch_nanoseconds(),
            86_400_000_000_000
        );
        assert_eq!(
            Utc.resolve_to_instant(
                &DateTime::from_str("1969-12-31T23:59:59.999999999")?,
                "UTC",
                "earlier"
            )?
            .epoch_nanoseconds(),
            -1
        );
        Ok(())
    }

    #[test]
    fn instants_order_on_the_line() {
        let earlier = Instant::from_epoch_nanoseconds(-5);
        let later = Instant::from_epoch_nanoseconds(5);
        assert!(earlier < later);
    }
}
