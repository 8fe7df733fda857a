//! Accumulator for parsed date/time fields.
//!
//! The parser fills a [`Parsed`] one field at a time through checked
//! setters, then [`Parsed::resolve`] turns the collection into a concrete
//! value, defaulting unspecified date components from a reference date and
//! unspecified time components to zero.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Error, ParseResult};

/// Parsed field values, all optional until resolution.
///
/// Setters reject out-of-range values immediately and reject conflicting
/// re-assignment (the same field appearing twice with different values),
/// so a `Parsed` never holds an impossible combination of single fields;
/// cross-field validity (day 31 in February) is checked by `resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Parsed {
    year: Option<i32>,
    quarter: Option<u32>,
    month: Option<u32>,
    day: Option<u32>,
    week_of_year: Option<u32>,
    weekday: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
    millisecond: Option<u32>,
    offset_minutes: Option<i32>,
}

fn set<T: Copy + PartialEq>(slot: &mut Option<T>, value: T) -> ParseResult<()> {
    match *slot {
        Some(current) if current != value => Err(Error::ParsingInvalid),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

fn ranged(value: i64, min: i64, max: i64) -> ParseResult<u32> {
    if (min..=max).contains(&value) {
        Ok(value as u32)
    } else {
        Err(Error::ParsingOutOfRange)
    }
}

impl Parsed {
    pub(crate) fn new() -> Parsed {
        Parsed::default()
    }

    pub(crate) fn set_year(&mut self, value: i64) -> ParseResult<()> {
        let year = i32::try_from(value).map_err(|_| Error::ParsingOutOfRange)?;
        set(&mut self.year, year)
    }

    /// Sets the year from a two-digit value; values above 68 land in the
    /// 1900s, the rest in the 2000s.
    pub(crate) fn set_year_mod_100(&mut self, value: i64) -> ParseResult<()> {
        let value = ranged(value, 0, 99)? as i64;
        self.set_year(if value > 68 { 1900 + value } else { 2000 + value })
    }

    pub(crate) fn set_quarter(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.quarter, ranged(value, 1, 4)?)
    }

    pub(crate) fn set_month(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.month, ranged(value, 1, 12)?)
    }

    pub(crate) fn set_day(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.day, ranged(value, 1, 31)?)
    }

    pub(crate) fn set_week_of_year(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.week_of_year, ranged(value, 1, 54)?)
    }

    /// Day of week, Sunday = 0. Recorded for width purposes only; the
    /// resolved date is driven by year/month/day.
    pub(crate) fn set_weekday(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.weekday, ranged(value, 0, 6)?)
    }

    pub(crate) fn set_hour(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.hour, ranged(value, 0, 23)?)
    }

    /// An `h` field value. Without a meridiem marker the value is taken as
    /// an already-24-hour reading, so the full 0–23 range is accepted here
    /// and the 12-hour range check happens at resolution.
    pub(crate) fn set_hour12(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.hour12, ranged(value, 0, 23)?)
    }

    pub(crate) fn set_pm(&mut self, value: bool) -> ParseResult<()> {
        set(&mut self.pm, value)
    }

    pub(crate) fn set_minute(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.minute, ranged(value, 0, 59)?)
    }

    pub(crate) fn set_second(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.second, ranged(value, 0, 59)?)
    }

    pub(crate) fn set_millisecond(&mut self, value: i64) -> ParseResult<()> {
        set(&mut self.millisecond, ranged(value, 0, 999)?)
    }

    pub(crate) fn set_offset_minutes(&mut self, value: i32) -> ParseResult<()> {
        if value <= -24 * 60 || value >= 24 * 60 {
            return Err(Error::ParsingOutOfRange);
        }
        match self.offset_minutes {
            Some(current) if current != value => Err(Error::ParsingInvalid),
            _ => {
                self.offset_minutes = Some(value);
                Ok(())
            }
        }
    }

    /// The UTC offset, if the input carried one.
    pub(crate) fn offset_minutes(&self) -> Option<i32> {
        self.offset_minutes
    }

    /// Resolves the accumulated fields into a civil date-time.
    ///
    /// Date components missing from the input come from `reference`; a
    /// quarter can stand in for a month; time components default to zero.
    pub(crate) fn resolve(&self, reference: NaiveDate) -> ParseResult<NaiveDateTime> {
        use chrono::Datelike;

        let year = self.year.unwrap_or_else(|| reference.year());
        let month = self
            .month
            .or_else(|| self.quarter.map(|q| (q - 1) * 3 + 1))
            .unwrap_or_else(|| reference.month());
        let day = self.day.unwrap_or_else(|| reference.day());

        let hour = match (self.hour, self.hour12, self.pm) {
            // a 24-hour field wins; a meridiem marker alongside it is
            // consumed but carries no extra information
            (Some(hour), None, _) => hour,
            (None, Some(hour12), Some(pm)) => {
                // a meridiem marker puts the hour on the 12-hour clock
                if hour12 > 12 {
                    return Err(Error::ParsingOutOfRange);
                }
                hour12 % 12 + if pm { 12 } else { 0 }
            }
            (None, Some(hour12), None) => hour12,
            (None, None, _) => 0,
            // both an `H` and an `h` field resolved: accept agreement only
            (Some(hour), Some(hour12), _) if hour == hour12 => hour,
            _ => return Err(Error::ParsingInvalid),
        };

        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::ParsingOutOfRange)?;
        let time = date
            .and_hms_milli_opt(
                hour,
                self.minute.unwrap_or(0),
                self.second.unwrap_or(0),
                self.millisecond.unwrap_or(0),
            )
            .ok_or(Error::ParsingOutOfRange)?;
        Ok(time)
    }
}
