//! Hand-rolled recognizers for the ISO 8601 subsets accepted by the value
//! types. Each `*_rep` function consumes a prefix of the input and returns
//! the parsed fields together with the remaining text; the entry points
//! additionally require the whole input to be consumed.

use crate::TemporalError;
use std::str::FromStr;

type Frag<'a, T> = Result<(T, &'a str), &'static str>;

pub(crate) type TimeParts = (u8, u8, u8, u16, u16, u16);

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DurationParts {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub microseconds: i64,
    pub nanoseconds: i64,
}

// dateRep ::= yearFrag '-' monthFrag '-' dayFrag
pub(crate) fn date(input: &str) -> Result<(i64, u8, u8), TemporalError> {
    complete("date", input, date_rep)
}

fn date_rep(input: &str) -> Frag<'_, (i64, u8, u8)> {
    let (year, input) = year_frag(input)?;
    let input = expect_char(input, '-', "the year and month must be separated by '-'")?;
    let (month, input) = month_frag(input)?;
    let input = expect_char(input, '-', "the month and day must be separated by '-'")?;
    let (day, input) = day_frag(input)?;
    Ok(((year, month, day), input))
}

// dateTimeRep ::= dateRep 'T' timeRep
pub(crate) fn date_time(input: &str) -> Result<((i64, u8, u8), TimeParts), TemporalError> {
    complete("date-time", input, date_time_rep)
}

fn date_time_rep(input: &str) -> Frag<'_, ((i64, u8, u8), TimeParts)> {
    let (date, input) = date_rep(input)?;
    let input = expect_char(input, 'T', "the date and time must be separated by 'T'")?;
    let (time, input) = time_rep(input)?;
    Ok(((date, time), input))
}

// timeRep ::= hourFrag ':' minuteFrag (':' secondFrag ('.' fractionFrag)?)?
pub(crate) fn time(input: &str) -> Result<TimeParts, TemporalError> {
    complete("time", input, time_rep)
}

fn time_rep(input: &str) -> Frag<'_, TimeParts> {
    let (hour, input) = hour_frag(input)?;
    let input = expect_char(input, ':', "the hours and minutes must be separated by ':'")?;
    let (minute, input) = minute_frag(input)?;
    let Some(input) = input.strip_prefix(':') else {
        return Ok(((hour, minute, 0, 0, 0, 0), input));
    };
    let (second, input) = second_frag(input)?;
    let Some(input) = input.strip_prefix('.') else {
        return Ok(((hour, minute, second, 0, 0, 0), input));
    };
    let ((millisecond, microsecond, nanosecond), input) = fraction_frag(input)?;
    Ok((
        (hour, minute, second, millisecond, microsecond, nanosecond),
        input,
    ))
}

// yearMonthRep ::= yearFrag '-' monthFrag
pub(crate) fn year_month(input: &str) -> Result<(i64, u8), TemporalError> {
    complete("year-month", input, year_month_rep)
}

fn year_month_rep(input: &str) -> Frag<'_, (i64, u8)> {
    let (year, input) = year_frag(input)?;
    let input = expect_char(input, '-', "the year and month must be separated by '-'")?;
    let (month, input) = month_frag(input)?;
    Ok(((year, month), input))
}

// monthDayRep ::= '--'? monthFrag '-' dayFrag
pub(crate) fn month_day(input: &str) -> Result<(u8, u8), TemporalError> {
    complete("month-day", input, month_day_rep)
}

fn month_day_rep(input: &str) -> Frag<'_, (u8, u8)> {
    let input = input.strip_prefix("--").unwrap_or(input);
    let (month, input) = month_frag(input)?;
    let input = expect_char(input, '-', "the month and day must be separated by '-'")?;
    let (day, input) = day_frag(input)?;
    Ok(((month, day), input))
}

// durationRep ::= '-'? 'P' (yearsFrag? monthsFrag? daysFrag?)
//                 ('T' hoursFrag? minutesFrag? secondsFrag?)?
pub(crate) fn duration(input: &str) -> Result<DurationParts, TemporalError> {
    complete("duration", input, duration_rep)
}

fn duration_rep(input: &str) -> Frag<'_, DurationParts> {
    // Designator positions, in the only order the grammar accepts.
    const START: u32 = 0;
    const AFTER_YEAR: u32 = 1;
    const AFTER_MONTH: u32 = 2;
    const AFTER_DAY: u32 = 3;
    const AFTER_T: u32 = 4;
    const AFTER_HOUR: u32 = 5;
    const AFTER_MINUTE: u32 = 6;
    const AFTER_SECOND: u32 = 7;

    let (negative, input) = match input.strip_prefix('-') {
        Some(left) => (true, left),
        None => (false, input),
    };
    let mut input = expect_char(input, 'P', "durations must start with 'P'")?;
    let mut state = START;
    let mut parts = DurationParts::default();
    let mut seen = false;
    while !input.is_empty() {
        if let Some(left) = input.strip_prefix('T') {
            if state >= AFTER_T {
                return Err("duplicated time separator 'T'");
            }
            state = AFTER_T;
            input = left;
            continue;
        }
        let (number_str, left) = decimal_prefix(input);
        if number_str.is_empty() {
            break;
        }
        match left.chars().next() {
            Some('Y') if state < AFTER_YEAR => {
                parts.years = whole_component(number_str, negative)?;
                state = AFTER_YEAR;
            }
            Some('M') if state < AFTER_MONTH => {
                parts.months = whole_component(number_str, negative)?;
                state = AFTER_MONTH;
            }
            Some('D') if state < AFTER_DAY => {
                parts.days = whole_component(number_str, negative)?;
                state = AFTER_DAY;
            }
            Some('H') if state == AFTER_T => {
                parts.hours = whole_component(number_str, negative)?;
                state = AFTER_HOUR;
            }
            Some('M') if (AFTER_T..AFTER_MINUTE).contains(&state) => {
                parts.minutes = whole_component(number_str, negative)?;
                state = AFTER_MINUTE;
            }
            Some('S') if (AFTER_T..AFTER_SECOND).contains(&state) => {
                let (whole, fraction) = number_str.split_once('.').unwrap_or((number_str, ""));
                parts.seconds = whole_component(whole, negative)?;
                if !fraction.is_empty() {
                    let (ms, us, ns) = fraction_triples(fraction)?;
                    parts.milliseconds = apply_sign(i64::from(ms), negative);
                    parts.microseconds = apply_sign(i64::from(us), negative);
                    parts.nanoseconds = apply_sign(i64::from(ns), negative);
                }
                state = AFTER_SECOND;
            }
            Some(_) => return Err("unexpected duration designator"),
            None => return Err("a duration number must be followed by a designator"),
        }
        seen = true;
        input = &left[1..];
    }
    if !seen {
        return Err("at least one duration component is required");
    }
    if state == AFTER_T {
        return Err("the time separator 'T' must be followed by a component");
    }
    Ok((parts, input))
}

fn whole_component(number_str: &str, negative: bool) -> Result<i64, &'static str> {
    if number_str.is_empty() {
        return Err("a duration component requires digits");
    }
    if number_str.contains('.') {
        return Err("a fraction is only allowed on the seconds component");
    }
    let value = i64::from_str(number_str).map_err(|_| "a duration component is too large")?;
    Ok(apply_sign(value, negative))
}

fn apply_sign(value: i64, negative: bool) -> i64 {
    if negative { -value } else { value }
}

// yearFrag ::= '-'? digit{4,} with no leading zero beyond four digits
fn year_frag(input: &str) -> Frag<'_, i64> {
    let (sign, input) = match input.strip_prefix('-') {
        Some(left) => (-1, left),
        None => (1, input),
    };
    let (number_str, input) = integer_prefix(input);
    if number_str.len() < 4 {
        return Err("the year must be encoded on at least four digits");
    }
    if number_str.len() > 4 && number_str.starts_with('0') {
        return Err("the year must not start with 0 if encoded on more than four digits");
    }
    let number = i64::from_str(number_str).map_err(|_| "the year is too large")?;
    Ok((sign * number, input))
}

// monthFrag ::= ('0' [1-9]) | ('1' [0-2])
fn month_frag(input: &str) -> Frag<'_, u8> {
    let (number, input) = two_digits(input, "the month must be encoded on two digits")?;
    if !(1..=12).contains(&number) {
        return Err("the month must be between 01 and 12");
    }
    Ok((number, input))
}

// dayFrag ::= ('0' [1-9]) | ([12] digit) | ('3' [01])
fn day_frag(input: &str) -> Frag<'_, u8> {
    let (number, input) = two_digits(input, "the day must be encoded on two digits")?;
    if !(1..=31).contains(&number) {
        return Err("the day must be between 01 and 31");
    }
    Ok((number, input))
}

// hourFrag ::= ([01] digit) | ('2' [0-3])
fn hour_frag(input: &str) -> Frag<'_, u8> {
    let (number, input) = two_digits(input, "the hours must be encoded on two digits")?;
    if number > 23 {
        return Err("the hours must be between 00 and 23");
    }
    Ok((number, input))
}

// minuteFrag ::= [0-5] digit
fn minute_frag(input: &str) -> Frag<'_, u8> {
    let (number, input) = two_digits(input, "the minutes must be encoded on two digits")?;
    if number > 59 {
        return Err("the minutes must be between 00 and 59");
    }
    Ok((number, input))
}

// secondFrag ::= [0-5] digit
fn second_frag(input: &str) -> Frag<'_, u8> {
    let (number, input) = two_digits(input, "the seconds must be encoded on two digits")?;
    if number > 59 {
        return Err("the seconds must be between 00 and 59");
    }
    Ok((number, input))
}

// fractionFrag ::= digit+, right-padded or truncated to millisecond,
// microsecond and nanosecond triples of exactly three digits each
fn fraction_frag(input: &str) -> Frag<'_, (u16, u16, u16)> {
    let (digits, input) = integer_prefix(input);
    if digits.is_empty() {
        return Err("the fraction must contain at least one digit");
    }
    Ok((fraction_triples(digits)?, input))
}

fn fraction_triples(digits: &str) -> Result<(u16, u16, u16), &'static str> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("the fraction must only contain digits");
    }
    let mut padded = [b'0'; 9];
    for (target, byte) in padded.iter_mut().zip(digits.bytes()) {
        *target = byte;
    }
    let triple = |range: std::ops::Range<usize>| -> u16 {
        padded[range]
            .iter()
            .fold(0, |value, byte| value * 10 + u16::from(byte - b'0'))
    };
    Ok((triple(0..3), triple(3..6), triple(6..9)))
}

fn two_digits<'a>(input: &'a str, message: &'static str) -> Frag<'a, u8> {
    let (number_str, input) = integer_prefix(input);
    if number_str.len() != 2 {
        return Err(message);
    }
    let number = u8::from_str(number_str).map_err(|_| message)?;
    Ok((number, input))
}

fn complete<T>(
    target: &'static str,
    input: &str,
    parse: impl FnOnce(&str) -> Result<(T, &str), &'static str>,
) -> Result<T, TemporalError> {
    let invalid = |message| TemporalError::InvalidString {
        target,
        input: input.into(),
        message,
    };
    let (value, left) = parse(input).map_err(invalid)?;
    if !left.is_empty() {
        return Err(invalid("unrecognized value suffix"));
    }
    Ok(value)
}

fn expect_char<'a>(
    input: &'a str,
    constant: char,
    error_message: &'static str,
) -> Result<&'a str, &'static str> {
    input.strip_prefix(constant).ok_or(error_message)
}

fn integer_prefix(input: &str) -> (&str, &str) {
    let end = input
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

fn decimal_prefix(input: &str) -> (&str, &str) {
    let mut dot_seen = false;
    let mut end = input.len();
    for (i, c) in input.char_indices() {
        if c.is_ascii_digit() {
            // Ok
        } else if c == '.' && !dot_seen {
            dot_seen = true;
        } else {
            end = i;
            break;
        }
    }
    input.split_at(end)
}
