//! The coercion dispatcher: one normalization routine per value type over a
//! closed union of accepted input shapes.
//!
//! Every routine follows the same precedence order: the exact target shape,
//! a richer compatible shape projected down, numeric instants localized
//! through the zone collaborator, strings, and finally field bags. A shape
//! mismatch falls through to the next step; a recognized-but-invalid shape
//! (a bag missing a required field, an instant the collaborator cannot
//! localize) is a terminal failure. Strings are the one exception: a failed
//! parse falls through, so the dispatcher ends with an invalid-input error
//! naming the value. Richer-shape projection must come before numeric and
//! string interpretation, and numeric before field bags.

use crate::TemporalError;
use crate::calendar::Disambiguation;
use crate::date_time::{Date, DateTime, DateTimeLike, MonthDay, Time, YearMonth};
use crate::duration::{Duration, DurationLike};
use crate::zone::{Instant, ZoneResolver};
use std::fmt;
use std::str::FromStr;

/// A heterogeneous input accepted by the dispatcher, resolved once at the
/// API boundary.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Input {
    Date(Date),
    DateTime(DateTime),
    Time(Time),
    YearMonth(YearMonth),
    MonthDay(MonthDay),
    Duration(Duration),
    Instant(Instant),
    /// A numeric timestamp, interpreted as nanoseconds since the Unix
    /// epoch on the instant scale.
    EpochNanoseconds(i128),
    Text(String),
    Fields(DateTimeLike),
    DurationFields(DurationLike),
}

impl From<Date> for Input {
    #[inline]
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime> for Input {
    #[inline]
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Time> for Input {
    #[inline]
    fn from(value: Time) -> Self {
        Self::Time(value)
    }
}

impl From<YearMonth> for Input {
    #[inline]
    fn from(value: YearMonth) -> Self {
        Self::YearMonth(value)
    }
}

impl From<MonthDay> for Input {
    #[inline]
    fn from(value: MonthDay) -> Self {
        Self::MonthDay(value)
    }
}

impl From<Duration> for Input {
    #[inline]
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<Instant> for Input {
    #[inline]
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<i128> for Input {
    #[inline]
    fn from(value: i128) -> Self {
        Self::EpochNanoseconds(value)
    }
}

impl From<&str> for Input {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Input {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTimeLike> for Input {
    #[inline]
    fn from(value: DateTimeLike) -> Self {
        Self::Fields(value)
    }
}

impl From<DurationLike> for Input {
    #[inline]
    fn from(value: DurationLike) -> Self {
        Self::DurationFields(value)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(value) => value.fmt(f),
            Self::DateTime(value) => value.fmt(f),
            Self::Time(value) => value.fmt(f),
            Self::YearMonth(value) => value.fmt(f),
            Self::MonthDay(value) => value.fmt(f),
            Self::Duration(value) => value.fmt(f),
            Self::Instant(value) => write!(f, "instant {}", value.epoch_nanoseconds()),
            Self::EpochNanoseconds(value) => value.fmt(f),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::Fields(_) => write!(f, "property bag"),
            Self::DurationFields(_) => write!(f, "duration property bag"),
        }
    }
}

/// Normalizes any accepted input into a canonical [`Date`].
pub fn date(input: impl Into<Input>, zone: &dyn ZoneResolver) -> Result<Date, TemporalError> {
    let input = input.into();
    match &input {
        Input::Date(date) => return Ok(*date),
        Input::DateTime(date_time) => return Ok(date_time.date()),
        Input::Instant(instant) => return Ok(localized(*instant, zone)?.date()),
        Input::EpochNanoseconds(nanoseconds) => {
            return Ok(localized(Instant::from_epoch_nanoseconds(*nanoseconds), zone)?.date());
        }
        Input::Text(text) => {
            if let Ok(date) = Date::from_str(text) {
                return Ok(date);
            }
        }
        Input::Fields(fields) => return date_from_fields(fields),
        _ => {}
    }
    Err(invalid_input("date", &input))
}

/// Normalizes any accepted input into a canonical [`DateTime`]. The
/// optional auxiliary input supplies the missing half when a calendar-date
/// shape and a clock-time shape arrive separately, in either order.
pub fn date_time(
    input: impl Into<Input>,
    aux: Option<&Input>,
    zone: &dyn ZoneResolver,
) -> Result<DateTime, TemporalError> {
    let input = input.into();
    match &input {
        Input::DateTime(date_time) => return Ok(*date_time),
        Input::Date(date) => {
            let time = match aux {
                Some(Input::Time(time)) => *time,
                Some(Input::DateTime(date_time)) => date_time.time(),
                _ => Time::MIDNIGHT,
            };
            return Ok(date.with_time(time));
        }
        Input::Time(time) => {
            match aux {
                Some(Input::Date(date)) => return Ok(date.with_time(*time)),
                Some(Input::DateTime(date_time)) => {
                    return Ok(date_time.date().with_time(*time));
                }
                _ => {}
            }
        }
        Input::Instant(instant) => return localized(*instant, zone),
        Input::EpochNanoseconds(nanoseconds) => {
            return localized(Instant::from_epoch_nanoseconds(*nanoseconds), zone);
        }
        Input::Text(text) => {
            if let Ok(date_time) = DateTime::from_str(text) {
                return Ok(date_time);
            }
        }
        Input::Fields(fields) => return date_time_from_fields(fields),
        _ => {}
    }
    Err(invalid_input("date-time", &input))
}

/// Normalizes any accepted input into a canonical [`YearMonth`].
pub fn year_month(
    input: impl Into<Input>,
    zone: &dyn ZoneResolver,
) -> Result<YearMonth, TemporalError> {
    let input = input.into();
    match &input {
        Input::YearMonth(year_month) => return Ok(*year_month),
        Input::Date(date) => return Ok(date.year_month()),
        Input::DateTime(date_time) => return Ok(date_time.year_month()),
        Input::Instant(instant) => return Ok(localized(*instant, zone)?.year_month()),
        Input::EpochNanoseconds(nanoseconds) => {
            return Ok(localized(Instant::from_epoch_nanoseconds(*nanoseconds), zone)?
                .year_month());
        }
        Input::Text(text) => {
            if let Ok(year_month) = YearMonth::from_str(text) {
                return Ok(year_month);
            }
        }
        Input::Fields(fields) => {
            let year = required(fields.year, "year-month", "year")?;
            let month = required(fields.month, "year-month", "month")?;
            return YearMonth::new(year, month, Disambiguation::Constrain);
        }
        _ => {}
    }
    Err(invalid_input("year-month", &input))
}

/// Normalizes any accepted input into a canonical [`MonthDay`].
pub fn month_day(
    input: impl Into<Input>,
    zone: &dyn ZoneResolver,
) -> Result<MonthDay, TemporalError> {
    let input = input.into();
    match &input {
        Input::MonthDay(month_day) => return Ok(*month_day),
        Input::Date(date) => return Ok(date.month_day()),
        Input::DateTime(date_time) => return Ok(date_time.month_day()),
        Input::Instant(instant) => return Ok(localized(*instant, zone)?.month_day()),
        Input::EpochNanoseconds(nanoseconds) => {
            return Ok(localized(Instant::from_epoch_nanoseconds(*nanoseconds), zone)?
                .month_day());
        }
        Input::Text(text) => {
            if let Ok(month_day) = MonthDay::from_str(text) {
                return Ok(month_day);
            }
        }
        Input::Fields(fields) => {
            let month = required(fields.month, "month-day", "month")?;
            let day = required(fields.day, "month-day", "day")?;
            return MonthDay::new(month, day, Disambiguation::Constrain);
        }
        _ => {}
    }
    Err(invalid_input("month-day", &input))
}

/// Normalizes any accepted input into a canonical [`Duration`].
pub fn duration(input: impl Into<Input>) -> Result<Duration, TemporalError> {
    let input = input.into();
    match &input {
        Input::Duration(duration) => return Ok(*duration),
        Input::Text(text) => {
            if let Ok(duration) = Duration::from_str(text) {
                return Ok(duration);
            }
        }
        Input::DurationFields(fields) => return Duration::from_like(fields),
        _ => {}
    }
    Err(invalid_input("duration", &input))
}

/// Companion routine for the zone-linked type: normalizes any accepted
/// input into an [`Instant`]. Wall-clock shapes resolve through the zone
/// collaborator with its default disambiguation.
pub fn instant(
    input: impl Into<Input>,
    zone: &dyn ZoneResolver,
) -> Result<Instant, TemporalError> {
    let input = input.into();
    match &input {
        Input::Instant(instant) => return Ok(*instant),
        Input::DateTime(date_time) => {
            return zone.resolve_to_instant(date_time, "UTC", "earlier");
        }
        Input::EpochNanoseconds(nanoseconds) => {
            return Ok(Instant::from_epoch_nanoseconds(*nanoseconds));
        }
        _ => {}
    }
    Err(invalid_input("instant", &input))
}

fn localized(instant: Instant, zone: &dyn ZoneResolver) -> Result<DateTime, TemporalError> {
    zone.local_date_time(instant, "UTC")
}

fn date_from_fields(fields: &DateTimeLike) -> Result<Date, TemporalError> {
    let year = required(fields.year, "date", "year")?;
    let month = required(fields.month, "date", "month")?;
    let day = required(fields.day, "date", "day")?;
    Date::new(year, month, day, Disambiguation::Constrain)
}

fn date_time_from_fields(fields: &DateTimeLike) -> Result<DateTime, TemporalError> {
    let year = required(fields.year, "date-time", "year")?;
    let month = required(fields.month, "date-time", "month")?;
    let day = required(fields.day, "date-time", "day")?;
    let hour = required(fields.hour, "date-time", "hour")?;
    let minute = required(fields.minute, "date-time", "minute")?;
    DateTime::new(
        year,
        month,
        day,
        hour,
        minute,
        fields.second.unwrap_or(0),
        fields.millisecond.unwrap_or(0),
        fields.microsecond.unwrap_or(0),
        fields.nanosecond.unwrap_or(0),
        Disambiguation::Constrain,
    )
}

fn required(
    value: Option<i64>,
    target: &'static str,
    field: &'static str,
) -> Result<i64, TemporalError> {
    value.ok_or_else(|| TemporalError::InvalidPropertyBag {
        target,
        message: format!("{field} is required"),
    })
}

fn invalid_input(target: &'static str, input: &Input) -> TemporalError {
    TemporalError::InvalidInput {
        target,
        value: input.to_string(),
    }
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use crate::zone::Utc;
    use std::str::FromStr;

    #[test]
    fn same_shape_is_identity() -> Result<(), TemporalError> {
        let value = Date::from_str("2021-03-07")?;
        assert_eq!(date(value, &Utc)?, value);
        let value = Duration::from_str("P1Y")?;
        assert_eq!(duration(value)?, value);
        Ok(())
    }

    #[test]
    fn richer_shape_projects() -> Result<(), TemporalError> {
        let value = DateTime::from_str("2021-03-07T13:30:05")?;
        assert_eq!(date(value, &Utc)?.to_string(), "2021-03-07");
        assert_eq!(year_month(value, &Utc)?.to_string(), "2021-03");
        assert_eq!(month_day(value, &Utc)?.to_string(), "--03-07");
        let projected = date(value, &Utc)?;
        assert_eq!(year_month(projected, &Utc)?.to_string(), "2021-03");
        Ok(())
    }

    #[test]
    fn combining_halves() -> Result<(), TemporalError> {
        let day = Date::from_str("2021-03-07")?;
        let clock = Time::from_str("13:30")?;
        assert_eq!(
            date_time(day, Some(&Input::from(clock)), &Utc)?.to_string(),
            "2021-03-07T13:30"
        );
        assert_eq!(
            date_time(clock, Some(&Input::from(day)), &Utc)?.to_string(),
            "2021-03-07T13:30"
        );
        // A date alone identifies midnight; a time alone identifies nothing.
        assert_eq!(date_time(day, None, &Utc)?.to_string(), "2021-03-07T00:00");
        assert!(matches!(
            date_time(clock, None, &Utc),
            Err(TemporalError::InvalidInput { target: "date-time", .. })
        ));
        Ok(())
    }

    #[test]
    fn numeric_inputs_resolve_through_the_zone() -> Result<(), TemporalError> {
        assert_eq!(date_time(0_i128, None, &Utc)?.to_string(), "1970-01-01T00:00");
        assert_eq!(date(86_400_000_000_000_i128, &Utc)?.to_string(), "1970-01-02");
        assert_eq!(year_month(-1_i128, &Utc)?.to_string(), "1969-12");
        let at_noon = DateTime::from_str("1970-01-01T12:00")?;
        assert_eq!(
            instant(at_noon, &Utc)?.epoch_nanoseconds(),
            43_200_000_000_000
        );
        assert_eq!(instant(5_i128, &Utc)?.epoch_nanoseconds(), 5);
        Ok(())
    }

    #[test]
    fn strings_parse_or_fall_through() -> Result<(), TemporalError> {
        assert_eq!(date("2021-03-07", &Utc)?.to_string(), "2021-03-07");
        assert_eq!(
            date_time("2021-03-07T13:30", None, &Utc)?.to_string(),
            "2021-03-07T13:30"
        );
        assert_eq!(duration("-P1Y")?.to_string(), "-P1Y");
        assert!(matches!(
            date("not a date", &Utc),
            Err(TemporalError::InvalidInput { target: "date", .. })
        ));
        // A recognized grammar with an impossible date also falls through
        // to the terminal invalid-input error.
        assert!(matches!(
            date("2021-02-29", &Utc),
            Err(TemporalError::InvalidInput { .. })
        ));
        Ok(())
    }

    #[test]
    fn field_bags_construct_with_constrain() -> Result<(), TemporalError> {
        let bag = DateTimeLike {
            year: Some(2019),
            month: Some(2),
            day: Some(30),
            ..DateTimeLike::default()
        };
        assert_eq!(date(bag, &Utc)?.to_string(), "2019-02-28");
        let bag = DateTimeLike {
            year: Some(2021),
            month: Some(3),
            day: Some(7),
            hour: Some(13),
            minute: Some(30),
            ..DateTimeLike::default()
        };
        // second..nanosecond default to zero.
        assert_eq!(date_time(bag, None, &Utc)?.to_string(), "2021-03-07T13:30");
        assert!(matches!(
            date_time(
                DateTimeLike {
                    year: Some(2021),
                    month: Some(3),
                    day: Some(7),
                    ..DateTimeLike::default()
                },
                None,
                &Utc
            ),
            Err(TemporalError::InvalidPropertyBag { target: "date-time", .. })
        ));
        assert!(matches!(
            date(DateTimeLike::default(), &Utc),
            Err(TemporalError::InvalidPropertyBag { .. })
        ));
        let bag = DurationLike {
            months: Some(1),
            ..DurationLike::default()
        };
        assert_eq!(duration(bag)?.to_string(), "P1M");
        Ok(())
    }

    #[test]
    fn exhausted_shapes_name_the_value() -> Result<(), TemporalError> {
        let probe = Date::new(2021, 3, 7, Disambiguation::Reject)?;
        assert_eq!(
            duration(probe),
            Err(TemporalError::InvalidInput {
                target: "duration",
                value: "2021-03-07".into()
            })
        );
        assert!(matches!(
            year_month(Duration::default(), &Utc),
            Err(TemporalError::InvalidInput { target: "year-month", .. })
        ));
        Ok(())
    }
}
