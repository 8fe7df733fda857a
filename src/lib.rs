//! Locale-aware date/time pattern formatting, parsing and timezone
//! conversion.
//!
//! The engine compiles format strings like `"MMM dd, yyyy h:mm:ss a"` into
//! token sequences, renders civil date-times against them with per-locale
//! display names, and parses formatted text back — leniently or strictly —
//! including meridiem handling, two-digit-year windowing and time-only
//! input anchored to a reference date. Named-timezone conversion between
//! UTC instants and wall time delegates to [`chrono-tz`], and compiled
//! formats are memoized in an instance-owned [`FormatCache`].
//!
//! ```
//! use chrono::NaiveDate;
//! use datefmt::{DateTimeFormat, Locale};
//! use std::sync::Arc;
//!
//! let locale = Arc::new(Locale::resolve("en-US"));
//! let format = DateTimeFormat::new("MMM dd, yyyy h:mm:ss a", locale);
//!
//! let value = NaiveDate::from_ymd_opt(2014, 10, 23)
//!     .unwrap()
//!     .and_hms_opt(16, 30, 45)
//!     .unwrap();
//! assert_eq!(format.format(&value), "Oct 23, 2014 4:30:45 PM");
//! ```
//!
//! For config-defaulted operations — default patterns, default zone,
//! durations, number formats — use [`LocalizationService`].
//!
//! [`chrono-tz`]: https://docs.rs/chrono-tz

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

pub use crate::cache::{strict_mode_format, FormatCache};
pub use crate::duration::{Duration, DurationUnit};
pub use crate::error::{Error, ParseResult};
pub use crate::format::{DateTimeFormat, Formatted};
pub use crate::locale::{Locale, NumberSymbols};
pub use crate::number::NumberFormat;
pub use crate::pattern::{tokenize, FieldKind, Style, Token};
pub use crate::service::{LocaleConfig, LocalizationService};
pub use crate::zone::ZoneConverter;

mod cache;
mod duration;
mod error;
mod format;
mod locale;
mod number;
mod parse;
mod parsed;
mod pattern;
mod scan;
mod service;
mod zone;

/// A parsed point in time.
///
/// The parser produces a [`Wall`](TimeValue::Wall) reading when the input
/// carried no UTC offset and an absolute [`Instant`](TimeValue::Instant)
/// when it did. The two never mix implicitly; crossing between them goes
/// through [`ZoneConverter`] (or the explicit accessors below, which state
/// their assumption in their name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeValue {
    /// Civil clock reading, zone not yet applied.
    Wall(NaiveDateTime),
    /// Absolute instant.
    Instant(DateTime<Utc>),
}

impl TimeValue {
    /// The clock reading: wall values verbatim, instants read on the UTC
    /// clock.
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            TimeValue::Wall(wall) => *wall,
            TimeValue::Instant(instant) => instant.naive_utc(),
        }
    }

    /// The absolute instant, interpreting a wall reading as UTC.
    pub fn instant_assuming_utc(&self) -> DateTime<Utc> {
        match self {
            TimeValue::Wall(wall) => Utc.from_utc_datetime(wall),
            TimeValue::Instant(instant) => *instant,
        }
    }

    /// The absolute instant, if the input pinned one.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            TimeValue::Wall(_) => None,
            TimeValue::Instant(instant) => Some(*instant),
        }
    }
}
