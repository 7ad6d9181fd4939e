#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod calendar;
pub mod cast;
mod date_time;
mod duration;
mod error;
mod parser;
mod zone;

pub use self::calendar::Disambiguation;
pub use self::cast::Input;
pub use self::date_time::{
    Date, DateTime, DateTimeLike, FromDateParts, FromDateTimeParts, FromMonthDayParts,
    FromYearMonthParts, MonthDay, Time, YearMonth,
};
pub use self::duration::{Duration, DurationLike};
pub use self::error::TemporalError;
pub use self::zone::{Instant, Utc, ZoneResolver};
