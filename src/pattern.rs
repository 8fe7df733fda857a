//! The format pattern mini-language and its compiler.
//!
//! A pattern string like `"MMM dd, yyyy h:mm:ss a"` compiles into a flat
//! sequence of [`Token`]s in a single left-to-right scan. A run of the same
//! pattern letter collapses into one [`Token::Field`] whose `width` is the
//! run length; the width later selects padding for numeric fields and
//! short/long forms for named fields. Everything else is literal text.
//!
//! Single quotes delimit literal runs, and a doubled quote is one literal
//! quote character, inside or outside a run: `"h 'o''clock'"` renders as
//! `3 o'clock`. An unterminated quote runs to the end of the pattern.

/// Composite localized styles, the expansions of `L`/`l` runs and of the
/// `LT`/`LTS` time shorthands. Each one resolves to a locale-specific
/// sub-pattern at render time via [`crate::Locale::style_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// `L` — numeric date, zero-padded (`09/23/2014`).
    NumericDate,
    /// `l` — numeric date, unpadded (`9/23/2014`).
    NumericDateShort,
    /// `LL` — long month name date (`September 23, 2014`).
    LongDate,
    /// `ll` — short month name date (`Sep 23, 2014`).
    MediumDate,
    /// `LLL` — long date with time (`September 23, 2014, 3:30 AM`).
    LongDateTime,
    /// `lll` — short date with time (`Sep 23, 2014, 3:30 AM`).
    MediumDateTime,
    /// `LLLL` — long date with weekday and time.
    FullDateTime,
    /// `llll` — short date with weekday and time.
    MediumWeekdayDateTime,
    /// `LT` — time of day (`3:30 AM`).
    Time,
    /// `LTS` — time of day with seconds (`3:30:45 AM`).
    TimeWithSeconds,
}

/// The value a [`Token::Field`] draws from the date, time or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// `y`/`Y`: calendar year. Width 2 renders the year modulo 100.
    Year,
    /// `M`: month, numeric up to width 2, short name at 3, long name at 4.
    Month,
    /// `d`/`D`: day of month.
    Day,
    /// `E`: weekday; numeric day-of-week (Sunday = 0) up to width 2, short
    /// name at 3, long name at 4.
    Weekday,
    /// `h`: hour on the 12-hour clock; midnight and noon render as 12.
    Hour12,
    /// `H`: hour on the 24-hour clock, 0–23.
    Hour24,
    /// `k`: hour on the 1–24 clock; midnight renders as 24.
    Hour24One,
    /// `m`: minute.
    Minute,
    /// `s`: second.
    Second,
    /// `S`: fractional-second digits, zero-padded to the width.
    Millisecond,
    /// `a`: meridiem marker, lower case.
    MeridiemLower,
    /// `A`: meridiem marker, upper case.
    MeridiemUpper,
    /// `Z`: UTC offset as `±HH:MM`; zero renders `+00:00`, never `Z`.
    OffsetColon,
    /// `ZZ`: UTC offset as `±HHMM`.
    OffsetNoColon,
    /// `Q`: quarter of the year, 1–4.
    Quarter,
    /// `w`: week of year; week 1 contains January 1, weeks start on the
    /// locale's first weekday.
    WeekOfYear,
    /// A composite localized style.
    Styled(Style),
}

/// One compiled element of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Verbatim text, matched exactly when parsing.
    Literal(String),
    /// A date/time field with its pattern-letter run length.
    Field {
        /// What the field renders.
        kind: FieldKind,
        /// Run length of the pattern letter.
        width: usize,
    },
}

fn field(kind: FieldKind, width: usize) -> Token {
    Token::Field { kind, width }
}

/// Compiles a pattern string into tokens.
///
/// The scan is total: every input compiles, and an empty pattern compiles
/// to an empty token sequence. Letters with no field meaning become
/// literals.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    macro_rules! flush_literal {
        () => {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
        };
    }

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                // escaped quote outside a run
                literal.push('\'');
                i += 2;
                continue;
            }
            // quoted literal run; doubled quotes inside stay as one quote
            i += 1;
            loop {
                match chars.get(i) {
                    None => break, // unterminated: rest of pattern is literal
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        literal.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&ch) => {
                        literal.push(ch);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() && is_pattern_letter(c) {
            let mut width = 1;
            while chars.get(i + width) == Some(&c) {
                width += 1;
            }

            // `LT`/`LTS` are two- and three-letter composites, not an `L`
            // run followed by literal text.
            if c == 'L' && width == 1 && chars.get(i + 1) == Some(&'T') {
                flush_literal!();
                if chars.get(i + 2) == Some(&'S') {
                    tokens.push(field(FieldKind::Styled(Style::TimeWithSeconds), 3));
                    i += 3;
                } else {
                    tokens.push(field(FieldKind::Styled(Style::Time), 2));
                    i += 2;
                }
                continue;
            }

            flush_literal!();
            tokens.push(letter_token(c, width));
            i += width;
            continue;
        }

        literal.push(c);
        i += 1;
    }

    flush_literal!();
    tokens
}

fn is_pattern_letter(c: char) -> bool {
    matches!(
        c,
        'y' | 'Y' | 'M' | 'd' | 'D' | 'E' | 'h' | 'H' | 'k' | 'm' | 's' | 'S' | 'a' | 'A' | 'Z'
            | 'Q' | 'w' | 'L' | 'l'
    )
}

fn letter_token(c: char, width: usize) -> Token {
    match c {
        'y' => field(FieldKind::Year, width),
        // `Y` always renders at least four digits, except the two-digit form
        'Y' => field(FieldKind::Year, if width == 2 { 2 } else { width.max(4) }),
        'M' => field(FieldKind::Month, width),
        'd' | 'D' => field(FieldKind::Day, width),
        'E' => field(FieldKind::Weekday, width),
        'h' => field(FieldKind::Hour12, width),
        'H' => field(FieldKind::Hour24, width),
        'k' => field(FieldKind::Hour24One, width),
        'm' => field(FieldKind::Minute, width),
        's' => field(FieldKind::Second, width),
        'S' => field(FieldKind::Millisecond, width),
        'a' => field(FieldKind::MeridiemLower, width),
        'A' => field(FieldKind::MeridiemUpper, width),
        'Z' => {
            if width == 1 {
                field(FieldKind::OffsetColon, width)
            } else {
                field(FieldKind::OffsetNoColon, width)
            }
        }
        'Q' => field(FieldKind::Quarter, width),
        'w' => field(FieldKind::WeekOfYear, width),
        'L' => field(
            FieldKind::Styled(match width {
                1 => Style::NumericDate,
                2 => Style::LongDate,
                3 => Style::LongDateTime,
                _ => Style::FullDateTime,
            }),
            width,
        ),
        'l' => field(
            FieldKind::Styled(match width {
                1 => Style::NumericDateShort,
                2 => Style::MediumDate,
                3 => Style::MediumDateTime,
                _ => Style::MediumWeekdayDateTime,
            }),
            width,
        ),
        _ => unreachable!("unhandled pattern letter {c:?}"),
    }
}
