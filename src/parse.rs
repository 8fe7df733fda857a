//! Parsing of formatted strings back into date/time values.
//!
//! The parser walks the compiled tokens in order. Literals must match
//! exactly. Numeric fields consume digit runs greedily, bounded by each
//! field's natural maximum width, and backtrack to shorter runs when the
//! remaining tokens cannot be satisfied — this is what lets an undelimited
//! pattern like `hmmss` resolve `"43045"` as 4:30:45. Strict mode raises
//! each field's minimum to its declared width, so `HH` rejects input a
//! lenient parse would accept.
//!
//! Malformed input is reported as an [`Error`] value; the parser never
//! panics on input.

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use crate::locale::Locale;
use crate::parsed::Parsed;
use crate::pattern::{FieldKind, Token};
use crate::{scan, Error, ParseResult, TimeValue};

/// Parses `text` against compiled tokens, resolving missing date
/// components from `reference`.
pub(crate) fn parse_tokens(
    tokens: &[Token],
    locale: &Locale,
    text: &str,
    strict: bool,
    reference: NaiveDate,
) -> ParseResult<TimeValue> {
    // composite styles parse through their locale expansion
    let tokens = expand_styles(tokens, locale);

    let walker = Walker { locale, strict };
    let parsed = walker.walk(&tokens, Parsed::new(), text)?;

    let wall = parsed.resolve(reference)?;
    match parsed.offset_minutes() {
        // an explicit offset pins the value to an absolute instant
        Some(offset) => {
            let utc = wall - Duration::minutes(i64::from(offset));
            Ok(TimeValue::Instant(Utc.from_utc_datetime(&utc)))
        }
        None => Ok(TimeValue::Wall(wall)),
    }
}

fn expand_styles(tokens: &[Token], locale: &Locale) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Field { kind: FieldKind::Styled(style), .. } => {
                out.extend(crate::pattern::tokenize(locale.style_pattern(*style)));
            }
            other => out.push(other.clone()),
        }
    }
    out
}

struct Walker<'a> {
    locale: &'a Locale,
    strict: bool,
}

impl Walker<'_> {
    /// Consumes `text` against `tokens`; the whole input must be used.
    fn walk(&self, tokens: &[Token], parsed: Parsed, text: &str) -> ParseResult<Parsed> {
        let (token, rest_tokens) = match tokens.split_first() {
            Some(split) => split,
            None => {
                return if text.is_empty() { Ok(parsed) } else { Err(Error::ParsingInvalid) };
            }
        };

        match token {
            Token::Literal(prefix) => match text.strip_prefix(prefix.as_str()) {
                Some(rest) => self.walk(rest_tokens, parsed, rest),
                None if text.len() < prefix.len() => Err(Error::ParsingTooShort),
                None => Err(Error::ParsingInvalid),
            },
            Token::Field { kind, width } => self.field(*kind, *width, rest_tokens, parsed, text),
        }
    }

    fn field(
        &self,
        kind: FieldKind,
        width: usize,
        rest_tokens: &[Token],
        parsed: Parsed,
        text: &str,
    ) -> ParseResult<Parsed> {
        match kind {
            FieldKind::Month if width >= 3 => {
                let (rest, month0) = self.month_name(text, width)?;
                let mut parsed = parsed;
                parsed.set_month(month0 as i64 + 1)?;
                self.walk(rest_tokens, parsed, rest)
            }
            FieldKind::Weekday if width >= 3 => {
                let (rest, weekday) = self.weekday_name(text, width)?;
                let mut parsed = parsed;
                parsed.set_weekday(weekday as i64)?;
                self.walk(rest_tokens, parsed, rest)
            }
            FieldKind::MeridiemLower | FieldKind::MeridiemUpper => {
                let (rest, pm) = scan::meridiem(text, &self.locale.am_pm())?;
                let mut parsed = parsed;
                parsed.set_pm(pm)?;
                self.walk(rest_tokens, parsed, rest)
            }
            FieldKind::OffsetColon | FieldKind::OffsetNoColon => {
                let (rest, offset) = scan::utc_offset(text)?;
                let mut parsed = parsed;
                parsed.set_offset_minutes(offset)?;
                self.walk(rest_tokens, parsed, rest)
            }
            FieldKind::Styled(_) => unreachable!("styles are expanded before walking"),
            _ => self.numeric(kind, width, rest_tokens, parsed, text),
        }
    }

    /// Numeric fields: try the longest digit run first and back off one
    /// digit at a time until the remaining tokens parse.
    fn numeric(
        &self,
        kind: FieldKind,
        width: usize,
        rest_tokens: &[Token],
        parsed: Parsed,
        text: &str,
    ) -> ParseResult<Parsed> {
        // strict mode raises the minimum to the declared width, so `HH`
        // rejects a lone digit while a single-letter field still accepts
        // its natural range
        let max = natural_max_width(kind, width);
        let min = if self.strict { width.min(max) } else { 1 };

        let digits = text
            .as_bytes()
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits < min {
            return Err(if digits == text.len() {
                Error::ParsingTooShort
            } else {
                Error::ParsingInvalid
            });
        }

        let mut first_error = None;
        for take in (min..=digits).rev() {
            let value: i64 = match text[..take].parse() {
                Ok(value) => value,
                Err(_) => return Err(Error::ParsingOutOfRange),
            };
            let mut attempt = parsed;
            let applied = apply_numeric(&mut attempt, kind, width, value, take);
            let result = match applied {
                Ok(()) => self.walk(rest_tokens, attempt, &text[take..]),
                Err(e) => Err(e),
            };
            match result {
                Ok(done) => return Ok(done),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or(Error::ParsingInvalid))
    }

    fn month_name<'t>(&self, text: &'t str, width: usize) -> ParseResult<(&'t str, usize)> {
        if width >= 4 {
            // a long-name field also accepts the abbreviation
            if let Ok(found) = scan::name_index(text, self.locale.long_months()) {
                return Ok(found);
            }
        }
        scan::name_index(text, self.locale.short_months())
    }

    fn weekday_name<'t>(&self, text: &'t str, width: usize) -> ParseResult<(&'t str, usize)> {
        if width >= 4 {
            if let Ok(found) = scan::name_index(text, self.locale.long_weekdays()) {
                return Ok(found);
            }
        }
        scan::name_index(text, self.locale.short_weekdays())
    }
}

/// The widest digit run a field may consume in lenient mode.
fn natural_max_width(kind: FieldKind, declared: usize) -> usize {
    match kind {
        FieldKind::Year => {
            if declared == 2 {
                2
            } else {
                4
            }
        }
        FieldKind::Quarter => 1,
        FieldKind::Weekday => 1,
        FieldKind::Millisecond => 3,
        _ => 2,
    }
}

fn apply_numeric(
    parsed: &mut Parsed,
    kind: FieldKind,
    declared_width: usize,
    value: i64,
    digits: usize,
) -> ParseResult<()> {
    match kind {
        FieldKind::Year => {
            if declared_width == 2 {
                parsed.set_year_mod_100(value)
            } else {
                parsed.set_year(value)
            }
        }
        FieldKind::Month => parsed.set_month(value),
        FieldKind::Day => parsed.set_day(value),
        FieldKind::Weekday => parsed.set_weekday(value),
        FieldKind::Hour12 => parsed.set_hour12(value),
        FieldKind::Hour24 => parsed.set_hour(value),
        FieldKind::Hour24One => {
            if !(1..=24).contains(&value) {
                return Err(Error::ParsingOutOfRange);
            }
            parsed.set_hour(value % 24)
        }
        FieldKind::Minute => parsed.set_minute(value),
        FieldKind::Second => parsed.set_second(value),
        FieldKind::Millisecond => {
            // fraction digits are left-aligned: "3" is 300 ms
            let scale = 10i64.pow(3u32.saturating_sub(digits as u32));
            parsed.set_millisecond(value * scale)
        }
        FieldKind::Quarter => parsed.set_quarter(value),
        FieldKind::WeekOfYear => parsed.set_week_of_year(value),
        _ => Err(Error::ParsingInvalid),
    }
}
