use crate::TemporalError;
use crate::calendar::Disambiguation;
use crate::cast::{self, Input};
use crate::date_time::DateTime;
use crate::parser;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A signed span of calendar and clock time.
///
/// The nine fields are independent: the calendar fields (years, months,
/// days) cover a variable amount of real time and only resolve against a
/// concrete base date, while the clock fields are fixed-ratio. All fields
/// share one sign; mixed-sign durations are rejected at construction.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub struct Duration {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
    microseconds: i64,
    nanoseconds: i64,
}

/// Field bag for duration construction; unset fields default to zero.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct DurationLike {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub milliseconds: Option<i64>,
    pub microseconds: Option<i64>,
    pub nanoseconds: Option<i64>,
}

impl Duration {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i64,
        nanoseconds: i64,
    ) -> Result<Self, TemporalError> {
        let duration = Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        };
        let mut sign = 0;
        for (field, value) in duration.entries() {
            if value != 0 {
                let field_sign = value.signum();
                if sign == 0 {
                    sign = field_sign;
                } else if sign != field_sign {
                    return Err(TemporalError::InvalidField {
                        field,
                        value: i128::from(value),
                    });
                }
            }
        }
        Ok(duration)
    }

    #[inline]
    #[must_use]
    pub fn years(&self) -> i64 {
        self.years
    }

    #[inline]
    #[must_use]
    pub fn months(&self) -> i64 {
        self.months
    }

    #[inline]
    #[must_use]
    pub fn days(&self) -> i64 {
        self.days
    }

    #[inline]
    #[must_use]
    pub fn hours(&self) -> i64 {
        self.hours
    }

    #[inline]
    #[must_use]
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    #[inline]
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    #[inline]
    #[must_use]
    pub fn milliseconds(&self) -> i64 {
        self.milliseconds
    }

    #[inline]
    #[must_use]
    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }

    #[inline]
    #[must_use]
    pub fn nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// -1, 0 or 1, shared by every non-zero field.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> i64 {
        self.entries()
            .into_iter()
            .map(|(_, value)| value.signum())
            .find(|sign| *sign != 0)
            .unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == 0
    }

    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.sign() < 0 { -*self } else { *self }
    }

    /// Normalizes any accepted duration input into a canonical value.
    pub fn from_value(input: impl Into<Input>) -> Result<Self, TemporalError> {
        cast::duration(input)
    }

    pub(crate) fn from_like(like: &DurationLike) -> Result<Self, TemporalError> {
        Self::new(
            like.years.unwrap_or(0),
            like.months.unwrap_or(0),
            like.days.unwrap_or(0),
            like.hours.unwrap_or(0),
            like.minutes.unwrap_or(0),
            like.seconds.unwrap_or(0),
            like.milliseconds.unwrap_or(0),
            like.microseconds.unwrap_or(0),
            like.nanoseconds.unwrap_or(0),
        )
    }

    /// All-or-nothing field compatibility check used by `plus`/`minus`: a
    /// non-zero component outside `allowed` fails, nothing is truncated.
    pub(crate) fn ensure_only(
        &self,
        target: &'static str,
        allowed: &[&'static str],
    ) -> Result<(), TemporalError> {
        for (field, value) in self.entries() {
            if value != 0 && !allowed.contains(&field) {
                return Err(TemporalError::InvalidDuration { target, field });
            }
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, i64); 9] {
        [
            ("years", self.years),
            ("months", self.months),
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
            ("milliseconds", self.milliseconds),
            ("microseconds", self.microseconds),
            ("nanoseconds", self.nanoseconds),
        ]
    }
}

impl FromStr for Duration {
    type Err = TemporalError;

    fn from_str(input: &str) -> Result<Self, TemporalError> {
        let parts = parser::duration(input)?;
        Self::new(
            parts.years,
            parts.months,
            parts.days,
            parts.hours,
            parts.minutes,
            parts.seconds,
            parts.milliseconds,
            parts.microseconds,
            parts.nanoseconds,
        )
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "PT0S");
        }
        let value = self.abs();
        if self.sign() < 0 {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        if value.years != 0 {
            write!(f, "{}Y", value.years)?;
        }
        if value.months != 0 {
            write!(f, "{}M", value.months)?;
        }
        if value.days != 0 {
            write!(f, "{}D", value.days)?;
        }
        // The grammar has no subsecond designators; fold them into the
        // seconds fraction for rendering.
        let second_nanos = i128::from(value.seconds) * 1_000_000_000
            + i128::from(value.milliseconds) * 1_000_000
            + i128::from(value.microseconds) * 1_000
            + i128::from(value.nanoseconds);
        if value.hours != 0 || value.minutes != 0 || second_nanos != 0 {
            write!(f, "T")?;
            if value.hours != 0 {
                write!(f, "{}H", value.hours)?;
            }
            if value.minutes != 0 {
                write!(f, "{}M", value.minutes)?;
            }
            let seconds = second_nanos / 1_000_000_000;
            let fraction = second_nanos % 1_000_000_000;
            if fraction != 0 {
                let digits = format!("{fraction:09}");
                write!(f, "{seconds}.{}S", digits.trim_end_matches('0'))?;
            } else if seconds != 0 {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

impl Neg for Duration {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            years: self.years.neg(),
            months: self.months.neg(),
            days: self.days.neg(),
            hours: self.hours.neg(),
            minutes: self.minutes.neg(),
            seconds: self.seconds.neg(),
            milliseconds: self.milliseconds.neg(),
            microseconds: self.microseconds.neg(),
            nanoseconds: self.nanoseconds.neg(),
        }
    }
}

impl PartialOrd for Duration {
    /// Orders two durations by adding both to a set of fixed reference
    /// dates; `None` when the reference dates disagree (months and days
    /// have no fixed ratio).
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut agreed: Option<Ordering> = None;
        for (year, month) in [(1969, 9), (1697, 2), (1903, 3), (1903, 7)] {
            let base = DateTime::new(year, month, 1, 0, 0, 0, 0, 0, 0, Disambiguation::Reject)
                .ok()?;
            let result = base
                .plus(*self, Disambiguation::Constrain)
                .ok()?
                .cmp(&base.plus(*other, Disambiguation::Constrain).ok()?);
            match agreed {
                None => agreed = Some(result),
                Some(previous) if previous != result => return None,
                Some(_) => {}
            }
        }
        agreed
    }
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn from_str() -> Result<(), TemporalError> {
        assert_eq!(Duration::from_str("P1Y")?.to_string(), "P1Y");
        assert_eq!(Duration::from_str("P1M")?.to_string(), "P1M");
        assert_eq!(Duration::from_str("P1D")?.to_string(), "P1D");
        assert_eq!(Duration::from_str("PT1H")?.to_string(), "PT1H");
        assert_eq!(Duration::from_str("PT1M")?.to_string(), "PT1M");
        assert_eq!(Duration::from_str("PT1S")?.to_string(), "PT1S");
        assert_eq!(Duration::from_str("-P1Y2M3DT4H5M6S")?.to_string(), "-P1Y2M3DT4H5M6S");
        assert_eq!(Duration::from_str("PT1.5S")?.to_string(), "PT1.5S");
        assert_eq!(Duration::from_str("PT0.000000001S")?.to_string(), "PT0.000000001S");
        assert_eq!(Duration::from_str("PT0.123456789S")?.to_string(), "PT0.123456789S");
        assert_eq!(Duration::from_str("PT0S")?.to_string(), "PT0S");
        assert_eq!(Duration::from_str("P0D")?.to_string(), "PT0S");
        assert!(Duration::from_str("P").is_err());
        assert!(Duration::from_str("1Y").is_err());
        assert!(Duration::from_str("P1H").is_err());
        assert!(Duration::from_str("PT1D").is_err());
        assert!(Duration::from_str("P1.5Y").is_err());
        assert!(Duration::from_str("P1YT").is_err());
        Ok(())
    }

    #[test]
    fn parsed_fields() -> Result<(), TemporalError> {
        let duration = Duration::from_str("-P1Y2M3DT4H5M6.007008009S")?;
        assert_eq!(duration.years(), -1);
        assert_eq!(duration.months(), -2);
        assert_eq!(duration.days(), -3);
        assert_eq!(duration.hours(), -4);
        assert_eq!(duration.minutes(), -5);
        assert_eq!(duration.seconds(), -6);
        assert_eq!(duration.milliseconds(), -7);
        assert_eq!(duration.microseconds(), -8);
        assert_eq!(duration.nanoseconds(), -9);
        assert_eq!(duration.sign(), -1);
        assert_eq!(duration.abs().sign(), 1);
        assert_eq!((-duration).years(), 1);
        Ok(())
    }

    #[test]
    fn fraction_padding() -> Result<(), TemporalError> {
        let duration = Duration::from_str("PT1.5S")?;
        assert_eq!(duration.seconds(), 1);
        assert_eq!(duration.milliseconds(), 500);
        assert_eq!(duration.microseconds(), 0);
        assert_eq!(duration.nanoseconds(), 0);
        let duration = Duration::from_str("PT0.123456789S")?;
        assert_eq!(duration.milliseconds(), 123);
        assert_eq!(duration.microseconds(), 456);
        assert_eq!(duration.nanoseconds(), 789);
        Ok(())
    }

    #[test]
    fn mixed_signs_rejected() {
        assert!(Duration::new(1, -1, 0, 0, 0, 0, 0, 0, 0).is_err());
        assert!(Duration::new(0, 0, 1, 0, 0, 0, 0, 0, -1).is_err());
        assert!(Duration::new(1, 0, 2, 0, 0, 0, 0, 0, 0).is_ok());
        assert!(Duration::new(-1, 0, -2, 0, 0, 0, 0, 0, 0).is_ok());
    }

    #[test]
    fn zero() -> Result<(), TemporalError> {
        let zero = Duration::default();
        assert!(zero.is_zero());
        assert_eq!(zero.sign(), 0);
        assert_eq!(zero.to_string(), "PT0S");
        assert_eq!(Duration::from_str("PT0S")?, zero);
        Ok(())
    }

    #[test]
    fn ordering() -> Result<(), TemporalError> {
        let one_day = Duration::from_str("P1D")?;
        let two_days = Duration::from_str("P2D")?;
        let one_month = Duration::from_str("P1M")?;
        let thirty_days = Duration::from_str("P30D")?;
        assert_eq!(one_day.partial_cmp(&two_days), Some(Ordering::Less));
        assert_eq!(two_days.partial_cmp(&one_day), Some(Ordering::Greater));
        assert_eq!(one_day.partial_cmp(&one_day), Some(Ordering::Equal));
        // A month is 28 to 31 days long depending on the base date.
        assert_eq!(one_month.partial_cmp(&thirty_days), None);
        assert_eq!(
            Duration::from_str("P1Y")?.partial_cmp(&Duration::from_str("P13M")?),
            Some(Ordering::Less)
        );
        Ok(())
    }

    #[test]
    fn field_compatibility() -> Result<(), TemporalError> {
        let calendar_only = Duration::from_str("P1Y2M3D")?;
        assert!(calendar_only.ensure_only("date", &["years", "months", "days"]).is_ok());
        let with_clock = Duration::from_str("P1DT1H")?;
        assert!(matches!(
            with_clock.ensure_only("date", &["years", "months", "days"]),
            Err(TemporalError::InvalidDuration {
                target: "date",
                field: "hours"
            })
        ));
        Ok(())
    }
}
