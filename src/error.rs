use core::fmt;

/// Errors surfaced by formatting, parsing and resolution.
///
/// Parse failures are ordinary values: the parser returns them instead of
/// panicking so callers can fall back to a sentinel presentation. The
/// `UnknownLocale` and `UnknownTimeZone` variants are recoverable and are
/// normally consumed inside the crate, where the caller substitutes the
/// configured default and logs a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A number-format pattern could not be compiled.
    InvalidPattern,
    /// The input did not match the expected literal or field shape.
    ParsingInvalid,
    /// The input ended before all tokens were satisfied.
    ParsingTooShort,
    /// A parsed component was outside its valid range, or the combination
    /// of components does not name a real date.
    ParsingOutOfRange,
    /// A locale tag did not resolve to any known locale data.
    UnknownLocale,
    /// A timezone name did not resolve to any known zone.
    UnknownTimeZone,
}

/// The result of a parse operation.
pub type ParseResult<T> = Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern => write!(f, "invalid format pattern"),
            Error::ParsingInvalid => write!(f, "input contains invalid characters"),
            Error::ParsingTooShort => write!(f, "premature end of input"),
            Error::ParsingOutOfRange => write!(f, "input is out of range"),
            Error::UnknownLocale => write!(f, "unknown locale"),
            Error::UnknownTimeZone => write!(f, "unknown time zone"),
        }
    }
}

impl std::error::Error for Error {}
