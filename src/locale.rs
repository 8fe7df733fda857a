//! Locale descriptors: display names, week conventions and number symbols.
//!
//! A [`Locale`] bundles everything the formatter and parser need to render
//! text for one language/country pair. Month, weekday and meridiem names
//! come from the glibc-derived data in `pure-rust-locales`; the composite
//! style patterns, first weekday, relative-time strings and number symbols
//! are carried as in-crate tables because the glibc data does not provide
//! them uniformly.
//!
//! Resolution never fails. An unknown tag degrades step by step — exact
//! match, bare language, the language's customary country — and bottoms out
//! at `en-US`.

use chrono::Weekday;
use pure_rust_locales::{locale_match, Locale as LocaleData};

use crate::pattern::Style;
use crate::Error;

/// Decimal and grouping separators for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    /// Separator between the integer and fraction parts.
    pub decimal: &'static str,
    /// Separator between digit groups in the integer part.
    pub group: &'static str,
}

/// Strings used by duration humanization, `%d` marking the quantity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelativeTimeStrings {
    pub future: &'static str,
    pub past: &'static str,
    pub seconds: &'static str,
    pub minute: &'static str,
    pub minutes: &'static str,
    pub hour: &'static str,
    pub hours: &'static str,
    pub day: &'static str,
    pub days: &'static str,
    pub month: &'static str,
    pub months: &'static str,
    pub year: &'static str,
    pub years: &'static str,
}

static EN_RELATIVE: RelativeTimeStrings = RelativeTimeStrings {
    future: "in %s",
    past: "%s ago",
    seconds: "a few seconds",
    minute: "a minute",
    minutes: "%d minutes",
    hour: "an hour",
    hours: "%d hours",
    day: "a day",
    days: "%d days",
    month: "a month",
    months: "%d months",
    year: "a year",
    years: "%d years",
};

/// Expansions for the composite style tokens (`L`, `ll`, `LT`, ...).
#[derive(Debug, Clone, Copy)]
struct StylePatterns {
    numeric_date: &'static str,
    numeric_date_short: &'static str,
    long_date: &'static str,
    medium_date: &'static str,
    long_date_time: &'static str,
    medium_date_time: &'static str,
    full_date_time: &'static str,
    medium_weekday_date_time: &'static str,
    time: &'static str,
    time_with_seconds: &'static str,
}

static EN_STYLES: StylePatterns = StylePatterns {
    numeric_date: "MM/dd/yyyy",
    numeric_date_short: "M/d/yyyy",
    long_date: "MMMM d, yyyy",
    medium_date: "MMM d, yyyy",
    long_date_time: "MMMM d, yyyy, h:mm a",
    medium_date_time: "MMM d, yyyy, h:mm a",
    full_date_time: "EEEE, MMMM d, yyyy, h:mm a",
    medium_weekday_date_time: "EEE, MMM d, yyyy, h:mm a",
    time: "h:mm a",
    time_with_seconds: "h:mm:ss a",
};

static EN_GB_STYLES: StylePatterns = StylePatterns {
    numeric_date: "dd/MM/yyyy",
    numeric_date_short: "d/M/yyyy",
    long_date: "d MMMM yyyy",
    medium_date: "d MMM yyyy",
    long_date_time: "d MMMM yyyy, HH:mm",
    medium_date_time: "d MMM yyyy, HH:mm",
    full_date_time: "EEEE, d MMMM yyyy, HH:mm",
    medium_weekday_date_time: "EEE, d MMM yyyy, HH:mm",
    time: "HH:mm",
    time_with_seconds: "HH:mm:ss",
};

static DE_STYLES: StylePatterns = StylePatterns {
    numeric_date: "dd.MM.yyyy",
    numeric_date_short: "d.M.yyyy",
    long_date: "d. MMMM yyyy",
    medium_date: "d. MMM yyyy",
    long_date_time: "d. MMMM yyyy, HH:mm",
    medium_date_time: "d. MMM yyyy, HH:mm",
    full_date_time: "EEEE, d. MMMM yyyy, HH:mm",
    medium_weekday_date_time: "EEE, d. MMM yyyy, HH:mm",
    time: "HH:mm",
    time_with_seconds: "HH:mm:ss",
};

/// Display data for one language/country pair.
///
/// Cheap to clone in spirit but normally shared behind an `Arc` by the
/// format cache; all lookups borrow `'static` data.
#[derive(Debug, Clone)]
pub struct Locale {
    tag: String,
    language: String,
    data: LocaleData,
    first_weekday: Weekday,
    symbols: NumberSymbols,
}

/// Legacy two-letter codes whose modern identifier differs. These must be
/// rewritten before lookup; glibc only knows the modern codes.
fn alias(language: &str) -> &str {
    match language {
        "in" => "id",
        "iw" => "he",
        "ji" => "yi",
        "no" => "nb",
        _ => language,
    }
}

/// The customary country for a bare language tag, used as a resolution
/// fallback (glibc has no country-less `en` or `de` locales).
fn default_country(language: &str) -> Option<&'static str> {
    Some(match language {
        "ar" => "AE",
        "cs" => "CZ",
        "da" => "DK",
        "de" => "DE",
        "en" => "US",
        "es" => "ES",
        "fi" => "FI",
        "fr" => "FR",
        "he" => "IL",
        "id" => "ID",
        "it" => "IT",
        "ja" => "JP",
        "ko" => "KR",
        "nb" => "NO",
        "nl" => "NL",
        "pl" => "PL",
        "pt" => "BR",
        "ru" => "RU",
        "sv" => "SE",
        "th" => "TH",
        "tr" => "TR",
        "vi" => "VN",
        "zh" => "CN",
        _ => return None,
    })
}

fn lookup(name: &str) -> Result<LocaleData, Error> {
    LocaleData::try_from(name).map_err(|_| Error::UnknownLocale)
}

impl Locale {
    /// Resolves a locale tag to display data.
    ///
    /// Accepts `language-COUNTRY` and `language_COUNTRY` spellings in any
    /// case. Unknown tags degrade to the bare language, then to the
    /// language's customary country, then to `en-US`; this function cannot
    /// fail.
    pub fn resolve(tag: &str) -> Locale {
        let (language, country) = split_tag(tag);
        let language = alias(&language).to_string();

        let mut candidates: Vec<String> = Vec::new();
        if let Some(country) = &country {
            candidates.push(format!("{}_{}", language, country));
        }
        candidates.push(language.clone());
        if let Some(country) = default_country(&language) {
            candidates.push(format!("{}_{}", language, country));
        }

        for name in &candidates {
            if let Ok(data) = lookup(name) {
                let tag = name.replace('_', "-");
                return Locale::from_parts(tag, language, data);
            }
        }

        log::warn!("no locale data for {:?}, falling back to en-US", tag);
        Locale::from_parts("en-US".to_string(), "en".to_string(), LocaleData::en_US)
    }

    fn from_parts(tag: String, language: String, data: LocaleData) -> Locale {
        let country = tag.split('-').nth(1).unwrap_or("");
        Locale {
            first_weekday: first_weekday(&language, country),
            symbols: number_symbols(&language),
            tag,
            language,
            data,
        }
    }

    /// The canonical hyphenated tag this locale resolved to.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The bare language subtag, after alias rewriting.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Full month names, January first.
    pub fn long_months(&self) -> &'static [&'static str] {
        locale_match!(self.data => LC_TIME::MON)
    }

    /// Abbreviated month names, January first.
    pub fn short_months(&self) -> &'static [&'static str] {
        locale_match!(self.data => LC_TIME::ABMON)
    }

    /// Full weekday names, Sunday first.
    pub fn long_weekdays(&self) -> &'static [&'static str] {
        locale_match!(self.data => LC_TIME::DAY)
    }

    /// Abbreviated weekday names, Sunday first.
    pub fn short_weekdays(&self) -> &'static [&'static str] {
        locale_match!(self.data => LC_TIME::ABDAY)
    }

    /// AM and PM markers. Locales whose glibc data leaves these empty (most
    /// 24-hour-clock locales) fall back to the English markers so 12-hour
    /// patterns still render.
    pub fn am_pm(&self) -> [&'static str; 2] {
        let markers = locale_match!(self.data => LC_TIME::AM_PM);
        match markers {
            &[am, pm, ..] if !am.is_empty() && !pm.is_empty() => [am, pm],
            _ => ["AM", "PM"],
        }
    }

    /// The weekday this locale starts its week on.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Decimal and grouping separators.
    pub fn number_symbols(&self) -> NumberSymbols {
        self.symbols
    }

    /// The sub-pattern a composite style token expands to.
    pub fn style_pattern(&self, style: Style) -> &'static str {
        let styles = match (self.language.as_str(), self.tag.as_str()) {
            ("en", "en-US") => &EN_STYLES,
            ("en", _) => &EN_GB_STYLES,
            ("de", _) => &DE_STYLES,
            _ => &EN_STYLES,
        };
        match style {
            Style::NumericDate => styles.numeric_date,
            Style::NumericDateShort => styles.numeric_date_short,
            Style::LongDate => styles.long_date,
            Style::MediumDate => styles.medium_date,
            Style::LongDateTime => styles.long_date_time,
            Style::MediumDateTime => styles.medium_date_time,
            Style::FullDateTime => styles.full_date_time,
            Style::MediumWeekdayDateTime => styles.medium_weekday_date_time,
            Style::Time => styles.time,
            Style::TimeWithSeconds => styles.time_with_seconds,
        }
    }

    pub(crate) fn relative_times(&self) -> &'static RelativeTimeStrings {
        // Only English strings ship for now; the table keeps the lookup
        // shape so more languages slot in without touching callers.
        &EN_RELATIVE
    }
}

/// Splits a tag into a lowercased language and an uppercased country,
/// skipping script subtags like `Hans`.
fn split_tag(tag: &str) -> (String, Option<String>) {
    let mut parts = tag.split(|c| c == '-' || c == '_').filter(|p| !p.is_empty());
    let language = match parts.next() {
        Some(p) => p.to_ascii_lowercase(),
        None => return ("en".to_string(), Some("US".to_string())),
    };
    let country = parts.find(|p| p.len() == 2).map(|p| p.to_ascii_uppercase());
    (language, country)
}

fn first_weekday(language: &str, country: &str) -> Weekday {
    match country {
        "US" | "CA" | "MX" | "JP" | "KR" | "TW" | "PH" | "CO" | "PE" | "VE" | "ZA" | "IL"
        | "BR" | "AU" => Weekday::Sun,
        "" => match language {
            "en" | "ja" | "ko" | "zh" | "he" | "pt" => Weekday::Sun,
            _ => Weekday::Mon,
        },
        _ => Weekday::Mon,
    }
}

fn number_symbols(language: &str) -> NumberSymbols {
    match language {
        "de" | "es" | "it" | "nl" | "pt" | "tr" | "id" | "da" => {
            NumberSymbols { decimal: ",", group: "." }
        }
        "fr" | "ru" | "cs" | "fi" | "nb" | "pl" | "sv" => {
            NumberSymbols { decimal: ",", group: "\u{a0}" }
        }
        _ => NumberSymbols { decimal: ".", group: "," },
    }
}
