use crate::TemporalError;
use crate::calendar::{self, Disambiguation};
use crate::cast::{self, Input};
use crate::duration::Duration;
use crate::parser;
use crate::zone::{Instant, Utc, ZoneResolver};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The fixed non-leap year that [`MonthDay`] values are validated against.
const REFERENCE_YEAR: i64 = 1970;

const DATE_FIELDS: &[&str] = &["year", "month", "day"];
const DATE_TIME_FIELDS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "millisecond",
    "microsecond",
    "nanosecond",
];
const YEAR_MONTH_FIELDS: &[&str] = &["year", "month"];
const MONTH_DAY_FIELDS: &[&str] = &["month", "day"];

/// Field bag for partial updates and structural construction; unset fields
/// fall back to a per-operation default.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct DateTimeLike {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub millisecond: Option<i64>,
    pub microsecond: Option<i64>,
    pub nanosecond: Option<i64>,
}

impl DateTimeLike {
    pub(crate) fn entries(&self) -> [(&'static str, Option<i64>); 9] {
        [
            ("year", self.year),
            ("month", self.month),
            ("day", self.day),
            ("hour", self.hour),
            ("minute", self.minute),
            ("second", self.second),
            ("millisecond", self.millisecond),
            ("microsecond", self.microsecond),
            ("nanosecond", self.nanosecond),
        ]
    }
}

/// Rejects bags carrying a field outside the receiver's schema, or no
/// recognized field at all.
fn ensure_bag(
    like: &DateTimeLike,
    target: &'static str,
    allowed: &[&str],
) -> Result<(), TemporalError> {
    let mut recognized = false;
    for (field, value) in like.entries() {
        if value.is_some() {
            if allowed.contains(&field) {
                recognized = true;
            } else {
                return Err(TemporalError::InvalidPropertyBag {
                    target,
                    message: format!("{field} is not a {target} field"),
                });
            }
        }
    }
    if recognized {
        Ok(())
    } else {
        Err(TemporalError::InvalidPropertyBag {
            target,
            message: "no recognized field is set".into(),
        })
    }
}

/// Construction seam for [`Date`]-shaped values: `with`/`plus`/`minus`
/// build their result through this factory, so a type wrapping [`Date`] can
/// implement it and receive instances of its own kind from `with_as`,
/// `plus_as` and `minus_as`.
pub trait FromDateParts: Sized {
    fn from_date_parts(
        year: i64,
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError>;
}

/// Construction seam for [`DateTime`]-shaped values.
pub trait FromDateTimeParts: Sized {
    #[expect(clippy::too_many_arguments)]
    fn from_date_time_parts(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        microsecond: i64,
        nanosecond: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError>;
}

/// Construction seam for [`YearMonth`]-shaped values.
pub trait FromYearMonthParts: Sized {
    fn from_year_month_parts(
        year: i64,
        month: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError>;
}

/// Construction seam for [`MonthDay`]-shaped values.
pub trait FromMonthDayParts: Sized {
    fn from_month_day_parts(
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError>;
}

/// A calendar date on the proleptic Gregorian calendar, without clock or
/// zone.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct Date {
    year: i64,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        let (year, month, day) = calendar::resolve_date(year, month, day, disambiguation)?;
        Ok(Self { year, month, day })
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i64 {
        self.year
    }

    #[inline]
    #[must_use]
    pub fn month(self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub fn day(self) -> u8 {
        self.day
    }

    /// ISO day of week: 1 = Monday through 7 = Sunday.
    #[inline]
    #[must_use]
    pub fn day_of_week(self) -> u8 {
        calendar::day_of_week(self.year, self.month, self.day)
    }

    #[inline]
    #[must_use]
    pub fn day_of_year(self) -> u16 {
        calendar::day_of_year(self.year, self.month, self.day)
    }

    #[inline]
    #[must_use]
    pub fn week_of_year(self) -> u8 {
        calendar::week_of_year(self.year, self.month, self.day)
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(self) -> u8 {
        calendar::days_in_month(self.year, self.month)
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(self) -> u16 {
        calendar::days_in_year(self.year)
    }

    #[inline]
    #[must_use]
    pub fn leap_year(self) -> bool {
        calendar::is_leap_year(self.year)
    }

    /// Overlays the set fields of `like` onto this date and reconstructs.
    pub fn with(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.with_as(like, disambiguation)
    }

    /// As [`Self::with`], constructing through `T`.
    pub fn with_as<T: FromDateParts>(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        ensure_bag(like, "date", DATE_FIELDS)?;
        T::from_date_parts(
            like.year.unwrap_or(self.year),
            like.month.unwrap_or(i64::from(self.month)),
            like.day.unwrap_or(i64::from(self.day)),
            disambiguation,
        )
    }

    /// Adds a duration carrying only calendar components.
    pub fn plus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.plus_as(duration, disambiguation)
    }

    /// As [`Self::plus`], constructing through `T`.
    pub fn plus_as<T: FromDateParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("date", DURATION_DATE_FIELDS)?;
        let (year, month, day) = calendar::add_date(
            self.year,
            self.month,
            self.day,
            duration.years(),
            duration.months(),
            duration.days(),
            disambiguation,
        )?;
        T::from_date_parts(year, i64::from(month), i64::from(day), Disambiguation::Reject)
    }

    /// Subtracts a duration carrying only calendar components.
    pub fn minus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.minus_as(duration, disambiguation)
    }

    /// As [`Self::minus`], constructing through `T`.
    pub fn minus_as<T: FromDateParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("date", DURATION_DATE_FIELDS)?;
        let (year, month, day) = calendar::subtract_date(
            self.year,
            self.month,
            self.day,
            duration.years(),
            duration.months(),
            duration.days(),
            disambiguation,
        )?;
        T::from_date_parts(year, i64::from(month), i64::from(day), Disambiguation::Reject)
    }

    /// Absolute difference between the two dates, whole years first, then
    /// months, days absorbing the remainder.
    pub fn difference(self, other: impl Into<Input>) -> Result<Duration, TemporalError> {
        let other = cast::date(other, &Utc)?;
        let (earlier, later) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        let (years, months, days) = calendar::difference_date(
            (earlier.year, earlier.month, earlier.day),
            (later.year, later.month, later.day),
        )?;
        Duration::new(years, months, days, 0, 0, 0, 0, 0, 0)
    }

    /// Combines this date with a wall-clock time.
    #[inline]
    #[must_use]
    pub fn with_time(self, time: Time) -> DateTime {
        DateTime { date: self, time }
    }

    #[inline]
    #[must_use]
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    #[inline]
    #[must_use]
    pub fn month_day(self) -> MonthDay {
        MonthDay {
            month: self.month,
            day: self.day,
        }
    }

    /// Normalizes any accepted date input into a canonical value.
    pub fn from_value(input: impl Into<Input>) -> Result<Self, TemporalError> {
        cast::date(input, &Utc)
    }

    /// Three-way ordering after coercing both arguments.
    pub fn compare(
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Ordering, TemporalError> {
        Ok(cast::date(a, &Utc)?.cmp(&cast::date(b, &Utc)?))
    }
}

const DURATION_DATE_FIELDS: &[&str] = &["years", "months", "days"];

impl FromDateParts for Date {
    fn from_date_parts(
        year: i64,
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        Self::new(year, month, day, disambiguation)
    }
}

impl FromStr for Date {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let (year, month, day) = parser::date(input)?;
        Self::new(year, i64::from(month), i64::from(day), Disambiguation::Reject)
    }
}

impl fmt::Display for Date {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

/// A wall-clock time with six independent subsecond-capable fields, full
/// nanosecond precision and no floating point.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    microsecond: u16,
    nanosecond: u16,
}

impl Time {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
        microsecond: 0,
        nanosecond: 0,
    };

    /// Under `Balance` the whole-day carry is discarded: the time wraps
    /// around the clock.
    pub fn new(
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        microsecond: i64,
        nanosecond: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        let (hour, minute, second, millisecond, microsecond, nanosecond) = match disambiguation {
            Disambiguation::Constrain => calendar::constrain_time(
                hour,
                minute,
                second,
                millisecond,
                microsecond,
                nanosecond,
            ),
            Disambiguation::Balance => {
                let (_, hour, minute, second, millisecond, microsecond, nanosecond) =
                    calendar::balance_time(
                        hour,
                        minute,
                        second,
                        millisecond,
                        microsecond,
                        nanosecond,
                    );
                (hour, minute, second, millisecond, microsecond, nanosecond)
            }
            Disambiguation::Reject => calendar::reject_time(
                hour,
                minute,
                second,
                millisecond,
                microsecond,
                nanosecond,
            )?,
        };
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        })
    }

    #[inline]
    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }

    #[inline]
    #[must_use]
    pub fn second(self) -> u8 {
        self.second
    }

    #[inline]
    #[must_use]
    pub fn millisecond(self) -> u16 {
        self.millisecond
    }

    #[inline]
    #[must_use]
    pub fn microsecond(self) -> u16 {
        self.microsecond
    }

    #[inline]
    #[must_use]
    pub fn nanosecond(self) -> u16 {
        self.nanosecond
    }

    pub(crate) fn as_tuple(self) -> (u8, u8, u8, u16, u16, u16) {
        (
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
            self.microsecond,
            self.nanosecond,
        )
    }

    pub(crate) fn from_tuple(
        (hour, minute, second, millisecond, microsecond, nanosecond): (u8, u8, u8, u16, u16, u16),
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        }
    }
}

impl FromStr for Time {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let (hour, minute, second, millisecond, microsecond, nanosecond) = parser::time(input)?;
        Self::new(
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(millisecond),
            i64::from(microsecond),
            i64::from(nanosecond),
            Disambiguation::Reject,
        )
    }
}

impl fmt::Display for Time {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, *self)
    }
}

/// A calendar date combined with a wall-clock time; still independent of
/// any zone.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        microsecond: i64,
        nanosecond: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        match disambiguation {
            Disambiguation::Balance => {
                // Clock overflow carries into the date before the date
                // itself balances.
                let (days, hour, minute, second, millisecond, microsecond, nanosecond) =
                    calendar::balance_time(
                        hour,
                        minute,
                        second,
                        millisecond,
                        microsecond,
                        nanosecond,
                    );
                let day = day
                    .checked_add(days)
                    .ok_or(TemporalError::InvalidField {
                        field: "day",
                        value: i128::from(day) + i128::from(days),
                    })?;
                let (year, month, day) = calendar::balance_date(year, month, day)?;
                Ok(Self {
                    date: Date { year, month, day },
                    time: Time {
                        hour,
                        minute,
                        second,
                        millisecond,
                        microsecond,
                        nanosecond,
                    },
                })
            }
            Disambiguation::Constrain | Disambiguation::Reject => Ok(Self {
                date: Date::new(year, month, day, disambiguation)?,
                time: Time::new(
                    hour,
                    minute,
                    second,
                    millisecond,
                    microsecond,
                    nanosecond,
                    disambiguation,
                )?,
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i64 {
        self.date.year
    }

    #[inline]
    #[must_use]
    pub fn month(self) -> u8 {
        self.date.month
    }

    #[inline]
    #[must_use]
    pub fn day(self) -> u8 {
        self.date.day
    }

    #[inline]
    #[must_use]
    pub fn hour(self) -> u8 {
        self.time.hour
    }

    #[inline]
    #[must_use]
    pub fn minute(self) -> u8 {
        self.time.minute
    }

    #[inline]
    #[must_use]
    pub fn second(self) -> u8 {
        self.time.second
    }

    #[inline]
    #[must_use]
    pub fn millisecond(self) -> u16 {
        self.time.millisecond
    }

    #[inline]
    #[must_use]
    pub fn microsecond(self) -> u16 {
        self.time.microsecond
    }

    #[inline]
    #[must_use]
    pub fn nanosecond(self) -> u16 {
        self.time.nanosecond
    }

    /// ISO day of week: 1 = Monday through 7 = Sunday.
    #[inline]
    #[must_use]
    pub fn day_of_week(self) -> u8 {
        self.date.day_of_week()
    }

    #[inline]
    #[must_use]
    pub fn day_of_year(self) -> u16 {
        self.date.day_of_year()
    }

    #[inline]
    #[must_use]
    pub fn week_of_year(self) -> u8 {
        self.date.week_of_year()
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(self) -> u8 {
        self.date.days_in_month()
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(self) -> u16 {
        self.date.days_in_year()
    }

    #[inline]
    #[must_use]
    pub fn leap_year(self) -> bool {
        self.date.leap_year()
    }

    /// Overlays the set fields of `like` and reconstructs.
    pub fn with(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.with_as(like, disambiguation)
    }

    /// As [`Self::with`], constructing through `T`.
    pub fn with_as<T: FromDateTimeParts>(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        ensure_bag(like, "date-time", DATE_TIME_FIELDS)?;
        T::from_date_time_parts(
            like.year.unwrap_or(self.date.year),
            like.month.unwrap_or(i64::from(self.date.month)),
            like.day.unwrap_or(i64::from(self.date.day)),
            like.hour.unwrap_or(i64::from(self.time.hour)),
            like.minute.unwrap_or(i64::from(self.time.minute)),
            like.second.unwrap_or(i64::from(self.time.second)),
            like.millisecond.unwrap_or(i64::from(self.time.millisecond)),
            like.microsecond.unwrap_or(i64::from(self.time.microsecond)),
            like.nanosecond.unwrap_or(i64::from(self.time.nanosecond)),
            disambiguation,
        )
    }

    /// Adds a duration: the calendar delta first, then the clock delta,
    /// with the day carry folded back into the date.
    pub fn plus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.plus_as(duration, disambiguation)
    }

    /// As [`Self::plus`], constructing through `T`.
    pub fn plus_as<T: FromDateTimeParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        let (year, month, day) = calendar::add_date(
            self.date.year,
            self.date.month,
            self.date.day,
            duration.years(),
            duration.months(),
            duration.days(),
            disambiguation,
        )?;
        let (carry, hour, minute, second, millisecond, microsecond, nanosecond) =
            calendar::add_time(
                self.time.as_tuple(),
                duration.hours(),
                duration.minutes(),
                duration.seconds(),
                duration.milliseconds(),
                duration.microseconds(),
                duration.nanoseconds(),
            );
        let (year, month, day) =
            calendar::balance_date(year, i64::from(month), i64::from(day) + carry)?;
        T::from_date_time_parts(
            year,
            i64::from(month),
            i64::from(day),
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(millisecond),
            i64::from(microsecond),
            i64::from(nanosecond),
            Disambiguation::Reject,
        )
    }

    /// Subtracts a duration: the clock delta first (borrowing from the
    /// date), then the calendar delta.
    pub fn minus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.minus_as(duration, disambiguation)
    }

    /// As [`Self::minus`], constructing through `T`.
    pub fn minus_as<T: FromDateTimeParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        let (carry, hour, minute, second, millisecond, microsecond, nanosecond) =
            calendar::subtract_time(
                self.time.as_tuple(),
                duration.hours(),
                duration.minutes(),
                duration.seconds(),
                duration.milliseconds(),
                duration.microseconds(),
                duration.nanoseconds(),
            );
        let days = duration
            .days()
            .checked_sub(carry)
            .ok_or(TemporalError::InvalidField {
                field: "days",
                value: i128::from(duration.days()) - i128::from(carry),
            })?;
        let (year, month, day) = calendar::subtract_date(
            self.date.year,
            self.date.month,
            self.date.day,
            duration.years(),
            duration.months(),
            days,
            disambiguation,
        )?;
        T::from_date_time_parts(
            year,
            i64::from(month),
            i64::from(day),
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(millisecond),
            i64::from(microsecond),
            i64::from(nanosecond),
            Disambiguation::Reject,
        )
    }

    /// Absolute difference between the two values, populating all nine
    /// duration fields.
    pub fn difference(self, other: impl Into<Input>) -> Result<Duration, TemporalError> {
        let other = cast::date_time(other, None, &Utc)?;
        let (earlier, later) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        let (delta_days, hours, minutes, seconds, milliseconds, microseconds, nanoseconds) =
            calendar::difference_time(earlier.time.as_tuple(), later.time.as_tuple());
        let (year, month, day) = calendar::balance_date(
            later.date.year,
            i64::from(later.date.month),
            i64::from(later.date.day) + delta_days,
        )?;
        let (years, months, days) = calendar::difference_date(
            (earlier.date.year, earlier.date.month, earlier.date.day),
            (year, month, day),
        )?;
        Duration::new(
            years,
            months,
            days,
            i64::from(hours),
            i64::from(minutes),
            i64::from(seconds),
            i64::from(milliseconds),
            i64::from(microseconds),
            i64::from(nanoseconds),
        )
    }

    /// Resolves this wall-clock value to an absolute instant through the
    /// zone collaborator; the disambiguation token is passed through
    /// unchanged.
    pub fn in_zone(
        self,
        resolver: &dyn ZoneResolver,
        zone: &str,
        disambiguation: &str,
    ) -> Result<Instant, TemporalError> {
        resolver.resolve_to_instant(&self, zone, disambiguation)
    }

    #[inline]
    #[must_use]
    pub fn date(self) -> Date {
        self.date
    }

    #[inline]
    #[must_use]
    pub fn time(self) -> Time {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn year_month(self) -> YearMonth {
        self.date.year_month()
    }

    #[inline]
    #[must_use]
    pub fn month_day(self) -> MonthDay {
        self.date.month_day()
    }

    /// Normalizes any accepted date-time input into a canonical value.
    pub fn from_value(input: impl Into<Input>) -> Result<Self, TemporalError> {
        cast::date_time(input, None, &Utc)
    }

    /// Three-way ordering after coercing both arguments.
    pub fn compare(
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Ordering, TemporalError> {
        Ok(cast::date_time(a, None, &Utc)?.cmp(&cast::date_time(b, None, &Utc)?))
    }
}

impl FromDateTimeParts for DateTime {
    fn from_date_time_parts(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        millisecond: i64,
        microsecond: i64,
        nanosecond: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        Self::new(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
            disambiguation,
        )
    }
}

impl FromStr for DateTime {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let ((year, month, day), (hour, minute, second, millisecond, microsecond, nanosecond)) =
            parser::date_time(input)?;
        Self::new(
            year,
            i64::from(month),
            i64::from(day),
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(millisecond),
            i64::from(microsecond),
            i64::from(nanosecond),
            Disambiguation::Reject,
        )
    }
}

impl fmt::Display for DateTime {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T", self.date)?;
        write_time(f, self.time)
    }
}

impl From<DateTime> for Date {
    #[inline]
    fn from(date_time: DateTime) -> Self {
        date_time.date()
    }
}

impl From<DateTime> for Time {
    #[inline]
    fn from(date_time: DateTime) -> Self {
        date_time.time()
    }
}

impl From<DateTime> for YearMonth {
    #[inline]
    fn from(date_time: DateTime) -> Self {
        date_time.year_month()
    }
}

impl From<DateTime> for MonthDay {
    #[inline]
    fn from(date_time: DateTime) -> Self {
        date_time.month_day()
    }
}

impl From<Date> for YearMonth {
    #[inline]
    fn from(date: Date) -> Self {
        date.year_month()
    }
}

impl From<Date> for MonthDay {
    #[inline]
    fn from(date: Date) -> Self {
        date.month_day()
    }
}

/// A year and month without a day; the day is implicitly 1 for arithmetic.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct YearMonth {
    year: i64,
    month: u8,
}

impl YearMonth {
    pub fn new(
        year: i64,
        month: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        let (year, month) = match disambiguation {
            Disambiguation::Constrain => {
                let (year, month, _) = calendar::constrain_date(year, month, 1);
                (year, month)
            }
            Disambiguation::Balance => calendar::balance_year_month(year, month)?,
            Disambiguation::Reject => {
                let (year, month, _) = calendar::reject_date(year, month, 1)?;
                (year, month)
            }
        };
        Ok(Self { year, month })
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i64 {
        self.year
    }

    #[inline]
    #[must_use]
    pub fn month(self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(self) -> u8 {
        calendar::days_in_month(self.year, self.month)
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(self) -> u16 {
        calendar::days_in_year(self.year)
    }

    #[inline]
    #[must_use]
    pub fn leap_year(self) -> bool {
        calendar::is_leap_year(self.year)
    }

    /// Overlays the set fields of `like` and reconstructs.
    pub fn with(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.with_as(like, disambiguation)
    }

    /// As [`Self::with`], constructing through `T`.
    pub fn with_as<T: FromYearMonthParts>(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        ensure_bag(like, "year-month", YEAR_MONTH_FIELDS)?;
        T::from_year_month_parts(
            like.year.unwrap_or(self.year),
            like.month.unwrap_or(i64::from(self.month)),
            disambiguation,
        )
    }

    /// Adds a duration carrying only years and months.
    pub fn plus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.plus_as(duration, disambiguation)
    }

    /// As [`Self::plus`], constructing through `T`.
    pub fn plus_as<T: FromYearMonthParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("year-month", DURATION_YEAR_MONTH_FIELDS)?;
        let (year, month, _) = calendar::add_date(
            self.year,
            self.month,
            1,
            duration.years(),
            duration.months(),
            0,
            disambiguation,
        )?;
        T::from_year_month_parts(year, i64::from(month), Disambiguation::Reject)
    }

    /// Subtracts a duration carrying only years and months.
    pub fn minus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.minus_as(duration, disambiguation)
    }

    /// As [`Self::minus`], constructing through `T`.
    pub fn minus_as<T: FromYearMonthParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("year-month", DURATION_YEAR_MONTH_FIELDS)?;
        let (year, month, _) = calendar::subtract_date(
            self.year,
            self.month,
            1,
            duration.years(),
            duration.months(),
            0,
            disambiguation,
        )?;
        T::from_year_month_parts(year, i64::from(month), Disambiguation::Reject)
    }

    /// Absolute difference in whole years and months.
    pub fn difference(self, other: impl Into<Input>) -> Result<Duration, TemporalError> {
        let other = cast::year_month(other, &Utc)?;
        let (earlier, later) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        let mut years = later.year - earlier.year;
        let mut months = i64::from(later.month) - i64::from(earlier.month);
        if months < 0 {
            years -= 1;
            months += 12;
        }
        Duration::new(years, months, 0, 0, 0, 0, 0, 0, 0)
    }

    /// Anchors this year-month to a concrete day.
    pub fn with_day(
        self,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Date, TemporalError> {
        Date::new(self.year, i64::from(self.month), day, disambiguation)
    }

    /// Normalizes any accepted year-month input into a canonical value.
    pub fn from_value(input: impl Into<Input>) -> Result<Self, TemporalError> {
        cast::year_month(input, &Utc)
    }

    /// Three-way ordering after coercing both arguments.
    pub fn compare(
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Ordering, TemporalError> {
        Ok(cast::year_month(a, &Utc)?.cmp(&cast::year_month(b, &Utc)?))
    }
}

const DURATION_YEAR_MONTH_FIELDS: &[&str] = &["years", "months"];

impl FromYearMonthParts for YearMonth {
    fn from_year_month_parts(
        year: i64,
        month: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        Self::new(year, month, disambiguation)
    }
}

impl FromStr for YearMonth {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let (year, month) = parser::year_month(input)?;
        Self::new(year, i64::from(month), Disambiguation::Reject)
    }
}

impl fmt::Display for YearMonth {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}", self.month)
    }
}

/// A recurring annual date: a month and day independent of any year,
/// validated against the fixed non-leap reference year.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    pub fn new(
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        let (month, day) = match disambiguation {
            Disambiguation::Constrain => {
                let (_, month, day) = calendar::constrain_date(REFERENCE_YEAR, month, day);
                (month, day)
            }
            Disambiguation::Balance => {
                // The year is discarded: balancing past December wraps
                // around into January.
                let (_, month, day) = calendar::balance_date(REFERENCE_YEAR, month, day)?;
                (month, day)
            }
            Disambiguation::Reject => {
                let (_, month, day) = calendar::reject_date(REFERENCE_YEAR, month, day)?;
                (month, day)
            }
        };
        Ok(Self { month, day })
    }

    #[inline]
    #[must_use]
    pub fn month(self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub fn day(self) -> u8 {
        self.day
    }

    /// Overlays the set fields of `like` and reconstructs.
    pub fn with(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.with_as(like, disambiguation)
    }

    /// As [`Self::with`], constructing through `T`.
    pub fn with_as<T: FromMonthDayParts>(
        self,
        like: &DateTimeLike,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        ensure_bag(like, "month-day", MONTH_DAY_FIELDS)?;
        T::from_month_day_parts(
            like.month.unwrap_or(i64::from(self.month)),
            like.day.unwrap_or(i64::from(self.day)),
            disambiguation,
        )
    }

    /// Adds a duration carrying only months and days, wrapping around the
    /// reference year.
    pub fn plus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.plus_as(duration, disambiguation)
    }

    /// As [`Self::plus`], constructing through `T`.
    pub fn plus_as<T: FromMonthDayParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("month-day", DURATION_MONTH_DAY_FIELDS)?;
        let (_, month, day) = calendar::add_date(
            REFERENCE_YEAR,
            self.month,
            self.day,
            0,
            duration.months(),
            duration.days(),
            disambiguation,
        )?;
        // Re-anchor into the reference year; a leap-day landing balances
        // over into March.
        let (_, month, day) =
            calendar::balance_date(REFERENCE_YEAR, i64::from(month), i64::from(day))?;
        T::from_month_day_parts(i64::from(month), i64::from(day), Disambiguation::Reject)
    }

    /// Subtracts a duration carrying only months and days.
    pub fn minus(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        self.minus_as(duration, disambiguation)
    }

    /// As [`Self::minus`], constructing through `T`.
    pub fn minus_as<T: FromMonthDayParts>(
        self,
        duration: impl Into<Input>,
        disambiguation: Disambiguation,
    ) -> Result<T, TemporalError> {
        let duration = cast::duration(duration)?;
        duration.ensure_only("month-day", DURATION_MONTH_DAY_FIELDS)?;
        let (_, month, day) = calendar::subtract_date(
            REFERENCE_YEAR,
            self.month,
            self.day,
            0,
            duration.months(),
            duration.days(),
            disambiguation,
        )?;
        let (_, month, day) =
            calendar::balance_date(REFERENCE_YEAR, i64::from(month), i64::from(day))?;
        T::from_month_day_parts(i64::from(month), i64::from(day), Disambiguation::Reject)
    }

    /// Absolute difference in whole months and days within the reference
    /// year, whole months maximized first.
    pub fn difference(self, other: impl Into<Input>) -> Result<Duration, TemporalError> {
        let other = cast::month_day(other, &Utc)?;
        let (earlier, later) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        let mut months = i64::from(later.month) - i64::from(earlier.month);
        if months > 0 {
            let clamped = earlier
                .day
                .min(calendar::days_in_month(REFERENCE_YEAR, later.month));
            if clamped > later.day {
                months -= 1;
            }
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let intermediate_month = (i64::from(earlier.month) + months) as u8;
        let intermediate_day = earlier
            .day
            .min(calendar::days_in_month(REFERENCE_YEAR, intermediate_month));
        let days = i64::from(calendar::day_of_year(REFERENCE_YEAR, later.month, later.day))
            - i64::from(calendar::day_of_year(
                REFERENCE_YEAR,
                intermediate_month,
                intermediate_day,
            ));
        Duration::new(0, months, days, 0, 0, 0, 0, 0, 0)
    }

    /// Anchors this recurring date to a concrete year, re-validating the
    /// stored pair against the target year under the given policy.
    pub fn with_year(
        self,
        year: i64,
        disambiguation: Disambiguation,
    ) -> Result<Date, TemporalError> {
        Date::new(
            year,
            i64::from(self.month),
            i64::from(self.day),
            disambiguation,
        )
    }

    /// Normalizes any accepted month-day input into a canonical value.
    pub fn from_value(input: impl Into<Input>) -> Result<Self, TemporalError> {
        cast::month_day(input, &Utc)
    }

    /// Three-way ordering after coercing both arguments.
    pub fn compare(
        a: impl Into<Input>,
        b: impl Into<Input>,
    ) -> Result<Ordering, TemporalError> {
        Ok(cast::month_day(a, &Utc)?.cmp(&cast::month_day(b, &Utc)?))
    }
}

const DURATION_MONTH_DAY_FIELDS: &[&str] = &["months", "days"];

impl FromMonthDayParts for MonthDay {
    fn from_month_day_parts(
        month: i64,
        day: i64,
        disambiguation: Disambiguation,
    ) -> Result<Self, TemporalError> {
        Self::new(month, day, disambiguation)
    }
}

impl FromStr for MonthDay {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let (month, day) = parser::month_day(input)?;
        Self::new(i64::from(month), i64::from(day), Disambiguation::Reject)
    }
}

impl fmt::Display for MonthDay {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month, self.day)
    }
}

fn write_year(f: &mut fmt::Formatter<'_>, year: i64) -> fmt::Result {
    if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())
    } else {
        write!(f, "{year:04}")
    }
}

/// `HH:MM`, with `:SS` and its fraction omitted entirely on a whole minute
/// and trailing fraction zeros trimmed.
fn write_time(f: &mut fmt::Formatter<'_>, time: Time) -> fmt::Result {
    write!(f, "{:02}:{:02}", time.hour, time.minute)?;
    let fraction = u32::from(time.millisecond) * 1_000_000
        + u32::from(time.microsecond) * 1_000
        + u32::from(time.nanosecond);
    if time.second != 0 || fraction != 0 {
        write!(f, ":{:02}", time.second)?;
        if fraction != 0 {
            let digits = format!("{fraction:09}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
    }
    Ok(())
}
