//! Rendering of date/time values against a compiled pattern.

use core::fmt::{self, Write};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::locale::Locale;
use crate::pattern::{self, FieldKind, Token};
use crate::{parse, ParseResult, TimeValue};

/// A pattern compiled against a locale, ready to format and parse.
///
/// Construction never fails: every pattern string compiles (see
/// [`pattern::tokenize`]). Instances are immutable and can be shared freely
/// across threads; the format cache hands them out behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DateTimeFormat {
    pattern: String,
    tokens: Vec<Token>,
    locale: Arc<Locale>,
}

impl DateTimeFormat {
    /// Compiles `pattern` for the given locale.
    pub fn new(pattern: &str, locale: Arc<Locale>) -> DateTimeFormat {
        DateTimeFormat {
            pattern: pattern.to_owned(),
            tokens: pattern::tokenize(pattern),
            locale,
        }
    }

    /// The original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled token sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The locale this format renders with.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Formats a wall-clock value. Offset fields render as `+00:00`.
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        self.format_with_offset(datetime, 0)
    }

    /// Formats a wall-clock value, rendering offset fields from the given
    /// signed UTC offset in minutes.
    pub fn format_with_offset(&self, datetime: &NaiveDateTime, offset_minutes: i32) -> String {
        self.display(datetime, offset_minutes).to_string()
    }

    /// Returns a lazy [`fmt::Display`] adapter over the value, for writing
    /// into an existing buffer without an intermediate allocation.
    pub fn display<'a>(
        &'a self,
        datetime: &'a NaiveDateTime,
        offset_minutes: i32,
    ) -> Formatted<'a> {
        Formatted { format: self, datetime, offset_minutes }
    }

    /// Parses `text` back into a [`TimeValue`], anchoring missing date
    /// components to today's date. See [`parse_with_reference`] for the
    /// deterministic variant.
    ///
    /// [`parse_with_reference`]: DateTimeFormat::parse_with_reference
    pub fn parse(&self, text: &str, strict: bool) -> ParseResult<TimeValue> {
        let today = chrono::Local::now().date_naive();
        self.parse_with_reference(text, strict, today)
    }

    /// Parses `text` against this format.
    ///
    /// Date components absent from the pattern are taken from `reference`;
    /// absent time components are zero, so a time-only pattern anchors to
    /// the reference date. In strict mode a numeric field must consume at
    /// least its declared width, so `HH` rejects a lone digit.
    pub fn parse_with_reference(
        &self,
        text: &str,
        strict: bool,
        reference: NaiveDate,
    ) -> ParseResult<TimeValue> {
        parse::parse_tokens(&self.tokens, &self.locale, text, strict, reference)
    }
}

/// Lazy rendering adapter returned by [`DateTimeFormat::display`].
#[derive(Debug)]
pub struct Formatted<'a> {
    format: &'a DateTimeFormat,
    datetime: &'a NaiveDateTime,
    offset_minutes: i32,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_tokens(
            f,
            &self.format.tokens,
            &self.format.locale,
            self.datetime,
            self.offset_minutes,
        )
    }
}

pub(crate) fn render_tokens(
    w: &mut impl Write,
    tokens: &[Token],
    locale: &Locale,
    datetime: &NaiveDateTime,
    offset_minutes: i32,
) -> fmt::Result {
    for token in tokens {
        match token {
            Token::Literal(text) => w.write_str(text)?,
            Token::Field { kind, width } => {
                render_field(w, *kind, *width, locale, datetime, offset_minutes)?
            }
        }
    }
    Ok(())
}

fn render_field(
    w: &mut impl Write,
    kind: FieldKind,
    width: usize,
    locale: &Locale,
    datetime: &NaiveDateTime,
    offset_minutes: i32,
) -> fmt::Result {
    let date = datetime.date();
    let time = datetime.time();

    match kind {
        FieldKind::Year => {
            if width == 2 {
                write_padded(w, i64::from(date.year()).rem_euclid(100), 2)
            } else {
                write_padded(w, i64::from(date.year()), width)
            }
        }
        FieldKind::Month => match width {
            1 | 2 => write_padded(w, i64::from(date.month()), width),
            3 => w.write_str(locale.short_months()[date.month0() as usize]),
            _ => w.write_str(locale.long_months()[date.month0() as usize]),
        },
        FieldKind::Day => write_padded(w, i64::from(date.day()), width),
        FieldKind::Weekday => {
            let index = date.weekday().num_days_from_sunday() as usize;
            match width {
                1 | 2 => write_padded(w, index as i64, width),
                3 => w.write_str(locale.short_weekdays()[index]),
                _ => w.write_str(locale.long_weekdays()[index]),
            }
        }
        FieldKind::Hour12 => write_padded(w, i64::from(time.hour12().1), width),
        FieldKind::Hour24 => write_padded(w, i64::from(time.hour()), width),
        FieldKind::Hour24One => {
            let hour = if time.hour() == 0 { 24 } else { time.hour() };
            write_padded(w, i64::from(hour), width)
        }
        FieldKind::Minute => write_padded(w, i64::from(time.minute()), width),
        FieldKind::Second => write_padded(w, i64::from(time.second()), width),
        FieldKind::Millisecond => {
            let millis = i64::from(time.nanosecond() % 1_000_000_000) / 1_000_000;
            // scale to the requested number of fractional digits
            let value = if width < 3 {
                millis / 10i64.pow((3 - width) as u32)
            } else {
                millis * 10i64.pow((width - 3) as u32)
            };
            write_padded(w, value, width)
        }
        FieldKind::MeridiemLower => {
            let [am, pm] = locale.am_pm();
            w.write_str(if time.hour12().0 { pm } else { am })
        }
        FieldKind::MeridiemUpper => {
            let [am, pm] = locale.am_pm();
            let marker = if time.hour12().0 { pm } else { am };
            for c in marker.chars().flat_map(|c| c.to_uppercase()) {
                w.write_char(c)?;
            }
            Ok(())
        }
        FieldKind::OffsetColon => write_offset(w, offset_minutes, true),
        FieldKind::OffsetNoColon => write_offset(w, offset_minutes, false),
        FieldKind::Quarter => write_padded(w, i64::from(date.month0() / 3 + 1), width),
        FieldKind::WeekOfYear => {
            write_padded(w, i64::from(week_of_year(&date, locale.first_weekday())), width)
        }
        FieldKind::Styled(style) => {
            let expansion = pattern::tokenize(locale.style_pattern(style));
            render_tokens(w, &expansion, locale, datetime, offset_minutes)
        }
    }
}

fn write_padded(w: &mut impl Write, value: i64, width: usize) -> fmt::Result {
    if width <= 1 {
        write!(w, "{}", value)
    } else {
        write!(w, "{:01$}", value, width)
    }
}

/// Writes a signed minute offset as `±HH:MM` or `±HHMM`. Zero is `+00:00`,
/// never a bare `Z`.
fn write_offset(w: &mut impl Write, offset_minutes: i32, colon: bool) -> fmt::Result {
    let (sign, offset) =
        if offset_minutes < 0 { ('-', -offset_minutes) } else { ('+', offset_minutes) };
    if colon {
        write!(w, "{}{:02}:{:02}", sign, offset / 60, offset % 60)
    } else {
        write!(w, "{}{:02}{:02}", sign, offset / 60, offset % 60)
    }
}

/// Week of year where week 1 is the week containing January 1 and weeks
/// begin on `first_day`.
pub(crate) fn week_of_year(date: &NaiveDate, first_day: Weekday) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .expect("January 1 exists in every year");
    let lead = (jan1.weekday().num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7;
    (date.ordinal0() + lead) / 7 + 1
}
