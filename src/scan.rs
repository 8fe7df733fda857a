//! Low-level input scanning for the parser.
//!
//! Each routine consumes a prefix of the input and returns the remainder
//! together with the scanned value, so the parser can thread the cursor
//! through with `?`.

use crate::{Error, ParseResult};

/// Scans a non-negative number of `min` to `max` digits.
///
/// More than `max` digits may follow; only the first `max` are consumed.
/// The absence of any digit is an error.
pub(crate) fn number(s: &str, min: usize, max: usize) -> ParseResult<(&str, i64)> {
    debug_assert!(min <= max);

    let mut window = s.as_bytes();
    if window.len() > max {
        window = &window[..max];
    }
    let upto = window.iter().position(|&c| !c.is_ascii_digit()).unwrap_or(window.len());
    if upto < min {
        // every remaining byte was a digit: the input ran out rather than
        // containing a non-digit
        return Err(if upto == window.len() { Error::ParsingTooShort } else { Error::ParsingInvalid });
    }

    let v: i64 = s[..upto].parse().map_err(|_| Error::ParsingOutOfRange)?;
    Ok((&s[upto..], v))
}

/// Scans exactly `width` digits.
pub(crate) fn number_exact(s: &str, width: usize) -> ParseResult<(&str, i64)> {
    number(s, width, width)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    let mut rest = s.chars();
    for p in prefix.chars() {
        match rest.next() {
            Some(c) if c.to_lowercase().eq(p.to_lowercase()) => {}
            _ => return false,
        }
    }
    true
}

fn consumed_len(s: &str, prefix: &str) -> usize {
    s.chars().take(prefix.chars().count()).map(|c| c.len_utf8()).sum()
}

/// Matches the longest name from `names` as a case-insensitive prefix of
/// the input; returns the remainder and the index of the matched name.
pub(crate) fn name_index<'a>(s: &'a str, names: &[&str]) -> ParseResult<(&'a str, usize)> {
    let mut best: Option<(usize, usize)> = None; // (name index, matched chars)
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() || !starts_with_ignore_case(s, name) {
            continue;
        }
        let chars = name.chars().count();
        if best.map_or(true, |(_, n)| chars > n) {
            best = Some((i, chars));
        }
    }
    match best {
        Some((i, _)) => Ok((&s[consumed_len(s, names[i])..], i)),
        None => Err(if s.is_empty() { Error::ParsingTooShort } else { Error::ParsingInvalid }),
    }
}

/// Matches a meridiem marker; `false` is AM, `true` is PM.
///
/// Tries the locale's own markers first, then the universal `am`/`pm` pair
/// so inputs in the common interchange form always parse.
pub(crate) fn meridiem<'a>(s: &'a str, markers: &[&str; 2]) -> ParseResult<(&'a str, bool)> {
    if let Ok((rest, idx)) = name_index(s, markers) {
        return Ok((rest, idx == 1));
    }
    name_index(s, &["am", "pm"]).map(|(rest, idx)| (rest, idx == 1))
}

/// Scans a UTC offset: `±HH:MM`, `±HHMM`, or (as the designator for UTC
/// itself) `Z`/`z`. Returns signed minutes.
pub(crate) fn utc_offset(s: &str) -> ParseResult<(&str, i32)> {
    let negative = match s.as_bytes().first() {
        Some(b'Z') | Some(b'z') => return Ok((&s[1..], 0)),
        Some(b'+') => false,
        Some(b'-') => true,
        Some(_) => return Err(Error::ParsingInvalid),
        None => return Err(Error::ParsingTooShort),
    };
    let s = &s[1..];

    let (s, hours) = number_exact(s, 2)?;
    let s = match s.as_bytes().first() {
        Some(b':') => &s[1..],
        _ => s,
    };
    let (s, minutes) = number_exact(s, 2)?;

    if hours > 24 || minutes > 59 {
        return Err(Error::ParsingOutOfRange);
    }
    let total = (hours * 60 + minutes) as i32;
    Ok((s, if negative { -total } else { total }))
}
