//! The localization service façade.
//!
//! [`LocalizationService`] ties the engine together for callers that want
//! defaults instead of plumbing: a [`LocaleConfig`] supplies the default
//! locale, timezone and patterns, a [`FormatCache`] memoizes compilation,
//! and a [`ZoneConverter`] handles named-zone conversion. Every operation
//! here is a thin composition of those parts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::cache::FormatCache;
use crate::duration::{Duration, DurationUnit};
use crate::format::DateTimeFormat;
use crate::locale::Locale;
use crate::number::NumberFormat;
use crate::parsed::Parsed;
use crate::zone::ZoneConverter;
use crate::{scan, Error, ParseResult, TimeValue};

/// Default locale, zone and pattern data, the analog of the host locale
/// provider the original service consulted.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Default locale tag for all operations.
    pub locale: String,
    /// Default zone for wall-time conversion.
    pub time_zone: String,
    /// Pattern used by `format_date` when none is given.
    pub date_format: String,
    /// Pattern used by `format_datetime` when none is given.
    pub datetime_format: String,
    /// Pattern used by `format_time` when none is given.
    pub time_format: String,
    /// Pattern behind [`LocalizationService::default_number_format`].
    pub number_format: String,
    /// Pattern behind [`LocalizationService::default_percent_format`].
    pub percent_format: String,
    /// Pattern behind [`LocalizationService::default_currency_format`].
    pub currency_format: String,
    /// Symbol substituted for the `¤` placeholder.
    pub currency_symbol: String,
}

impl Default for LocaleConfig {
    fn default() -> LocaleConfig {
        LocaleConfig {
            locale: "en-US".to_string(),
            time_zone: "UTC".to_string(),
            date_format: "MMM d, yyyy".to_string(),
            datetime_format: "MMM d, yyyy h:mm:ss a".to_string(),
            time_format: "h:mm:ss a".to_string(),
            number_format: "#,##0.###".to_string(),
            percent_format: "#,##0%".to_string(),
            currency_format: "\u{a4}#,##0.00".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Locale-aware formatting, parsing, timezone and duration operations with
/// configured defaults.
#[derive(Debug, Default)]
pub struct LocalizationService {
    config: LocaleConfig,
    cache: FormatCache,
    zones: ZoneConverter,
    number_formats: RwLock<HashMap<(String, String), Arc<NumberFormat>>>,
}

impl LocalizationService {
    /// A service with the given defaults.
    pub fn new(config: LocaleConfig) -> LocalizationService {
        LocalizationService {
            zones: ZoneConverter::new(&config.time_zone),
            config,
            cache: FormatCache::new(),
            number_formats: RwLock::new(HashMap::new()),
        }
    }

    /// The configured defaults.
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// The format cache backing this service.
    pub fn cache(&self) -> &FormatCache {
        &self.cache
    }

    /// The timezone converter backing this service.
    pub fn zones(&self) -> &ZoneConverter {
        &self.zones
    }

    fn compiled(&self, pattern: Option<&str>, default: &str, locale: Option<&str>) -> Arc<DateTimeFormat> {
        let pattern = pattern.unwrap_or(default);
        let tag = locale.unwrap_or(&self.config.locale);
        self.cache.format_for(pattern, tag)
    }

    fn locale(&self, locale: Option<&str>) -> Arc<Locale> {
        self.cache.locale_for(locale.unwrap_or(&self.config.locale))
    }

    // --- formatting ---

    /// Formats a date with the configured or given pattern.
    pub fn format_date(&self, date: &NaiveDate, pattern: Option<&str>, locale: Option<&str>) -> String {
        let datetime = date.and_hms_opt(0, 0, 0).expect("midnight exists on every date");
        self.compiled(pattern, &self.config.date_format, locale).format(&datetime)
    }

    /// Formats a time of day with the configured or given pattern.
    pub fn format_time(&self, time: &NaiveTime, pattern: Option<&str>, locale: Option<&str>) -> String {
        let datetime = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(1970, 1, 1).expect("the epoch date exists"),
            *time,
        );
        self.compiled(pattern, &self.config.time_format, locale).format(&datetime)
    }

    /// Formats the date an instant falls on when read on the UTC clock.
    pub fn format_date_utc(
        &self,
        instant: DateTime<Utc>,
        pattern: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        self.format_date(&instant.naive_utc().date(), pattern, locale)
    }

    /// Formats the time of day an instant shows on the UTC clock.
    pub fn format_time_utc(
        &self,
        instant: DateTime<Utc>,
        pattern: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        self.format_time(&instant.naive_utc().time(), pattern, locale)
    }

    /// Formats a civil date-time with the configured or given pattern.
    pub fn format_datetime(
        &self,
        datetime: &NaiveDateTime,
        pattern: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        self.compiled(pattern, &self.config.datetime_format, locale).format(datetime)
    }

    /// Formats an absolute instant read on the UTC clock; offset fields
    /// render `+00:00`.
    pub fn format_datetime_utc(
        &self,
        instant: DateTime<Utc>,
        pattern: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        self.format_datetime(&instant.naive_utc(), pattern, locale)
    }

    /// Formats an absolute instant as the wall time of `zone` (or of the
    /// configured zone), rendering offset fields with the zone's offset at
    /// that instant.
    pub fn format_datetime_in_zone(
        &self,
        instant: DateTime<Utc>,
        zone: Option<&str>,
        pattern: Option<&str>,
        locale: Option<&str>,
    ) -> String {
        let zone = zone.unwrap_or(&self.config.time_zone);
        let wall = self.zones.utc_to_wall(instant, zone);
        let offset = self.zones.offset_minutes(zone, instant);
        self.compiled(pattern, &self.config.datetime_format, locale)
            .format_with_offset(&wall, offset)
    }

    // --- parsing ---

    /// Parses text with the configured or given pattern, anchoring missing
    /// date components to today.
    pub fn parse_datetime(
        &self,
        text: &str,
        pattern: Option<&str>,
        locale: Option<&str>,
        strict: bool,
    ) -> ParseResult<TimeValue> {
        if text.is_empty() {
            return Err(Error::ParsingTooShort);
        }
        self.compiled(pattern, &self.config.datetime_format, locale).parse(text, strict)
    }

    /// Like [`parse_datetime`](LocalizationService::parse_datetime) but
    /// interprets a result without an explicit offset as UTC wall time.
    pub fn parse_datetime_utc(
        &self,
        text: &str,
        pattern: Option<&str>,
        locale: Option<&str>,
        strict: bool,
    ) -> ParseResult<DateTime<Utc>> {
        Ok(self.parse_datetime(text, pattern, locale, strict)?.instant_assuming_utc())
    }

    /// Parses an ISO 8601 date, date-time or time-only string, leniently:
    /// seconds, fraction and offset are each optional, `T` or a space may
    /// separate date and time, and a time-only input anchors to today.
    pub fn parse_iso8601(&self, text: &str) -> ParseResult<TimeValue> {
        parse_iso8601(text, chrono::Local::now().date_naive())
    }

    /// The ISO 8601 interchange form of a value: instants carry the `Z`
    /// designator, wall times none.
    pub fn to_iso_string(&self, value: &TimeValue) -> String {
        match value {
            TimeValue::Instant(instant) => {
                instant.naive_utc().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
            }
            TimeValue::Wall(wall) => wall.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        }
    }

    // --- timezone conversion ---

    /// The wall time of `zone` (default: the configured zone) at `instant`.
    pub fn utc_to_wall_time(&self, instant: DateTime<Utc>, zone: Option<&str>) -> NaiveDateTime {
        self.zones.utc_to_wall(instant, zone.unwrap_or(&self.config.time_zone))
    }

    /// The instant a wall time in `zone` (default: the configured zone)
    /// names.
    pub fn wall_time_to_utc(&self, wall: NaiveDateTime, zone: Option<&str>) -> DateTime<Utc> {
        self.zones.wall_to_utc(wall, zone.unwrap_or(&self.config.time_zone))
    }

    /// The `yyyy-MM-dd` date read in `zone` at `instant`.
    pub fn date_string_in_zone(&self, instant: DateTime<Utc>, zone: Option<&str>) -> String {
        self.zones.date_string_in_zone(instant, zone.unwrap_or(&self.config.time_zone))
    }

    // --- boundaries and comparison ---

    /// Truncates to the start of `unit`. Weeks honor the locale's first
    /// weekday.
    pub fn start_of(
        &self,
        datetime: &NaiveDateTime,
        unit: DurationUnit,
        locale: Option<&str>,
    ) -> NaiveDateTime {
        let date = datetime.date();
        let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).expect("midnight exists");
        match unit {
            DurationUnit::Year => midnight(
                NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("January 1 exists"),
            ),
            DurationUnit::Month => midnight(
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .expect("the first of the month exists"),
            ),
            DurationUnit::Week => {
                let first = self.locale(locale).first_weekday();
                let lead = (date.weekday().num_days_from_sunday() + 7
                    - first.num_days_from_sunday())
                    % 7;
                midnight(date - chrono::Duration::days(i64::from(lead)))
            }
            DurationUnit::Day => midnight(date),
            DurationUnit::Hour => midnight(date) + chrono::Duration::hours(i64::from(datetime.hour())),
            DurationUnit::Minute => {
                midnight(date)
                    + chrono::Duration::hours(i64::from(datetime.hour()))
                    + chrono::Duration::minutes(i64::from(datetime.minute()))
            }
            DurationUnit::Second => {
                midnight(date)
                    + chrono::Duration::hours(i64::from(datetime.hour()))
                    + chrono::Duration::minutes(i64::from(datetime.minute()))
                    + chrono::Duration::seconds(i64::from(datetime.second()))
            }
            DurationUnit::Millisecond => {
                let millis = i64::from(datetime.and_utc().timestamp_subsec_millis());
                self.start_of(datetime, DurationUnit::Second, locale)
                    + chrono::Duration::milliseconds(millis)
            }
        }
    }

    /// Truncates to the last representable millisecond of `unit`.
    pub fn end_of(
        &self,
        datetime: &NaiveDateTime,
        unit: DurationUnit,
        locale: Option<&str>,
    ) -> NaiveDateTime {
        let start = self.start_of(datetime, unit, locale);
        let next = match unit {
            DurationUnit::Year => self.start_of(
                &start.with_year(start.year() + 1).expect("next January 1 exists"),
                DurationUnit::Year,
                locale,
            ),
            DurationUnit::Month => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
                    .expect("the first of the month exists")
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight exists")
            }
            DurationUnit::Week => start + chrono::Duration::days(7),
            DurationUnit::Day => start + chrono::Duration::days(1),
            DurationUnit::Hour => start + chrono::Duration::hours(1),
            DurationUnit::Minute => start + chrono::Duration::minutes(1),
            DurationUnit::Second => start + chrono::Duration::seconds(1),
            DurationUnit::Millisecond => start + chrono::Duration::milliseconds(1),
        };
        next - chrono::Duration::milliseconds(1)
    }

    /// `a` strictly precedes `b` at `unit` granularity.
    pub fn is_before(&self, a: &NaiveDateTime, b: &NaiveDateTime, unit: DurationUnit) -> bool {
        self.start_of(a, unit, None) < self.start_of(b, unit, None)
    }

    /// `a` and `b` fall in the same `unit`.
    pub fn is_same(&self, a: &NaiveDateTime, b: &NaiveDateTime, unit: DurationUnit) -> bool {
        self.start_of(a, unit, None) == self.start_of(b, unit, None)
    }

    /// `a` strictly follows `b` at `unit` granularity.
    pub fn is_after(&self, a: &NaiveDateTime, b: &NaiveDateTime, unit: DurationUnit) -> bool {
        self.start_of(a, unit, None) > self.start_of(b, unit, None)
    }

    /// `value` falls inside `[from, to]` at `unit` granularity, inclusive
    /// of both ends.
    pub fn is_between(
        &self,
        value: &NaiveDateTime,
        from: &NaiveDateTime,
        to: &NaiveDateTime,
        unit: DurationUnit,
    ) -> bool {
        !self.is_before(value, from, unit) && !self.is_after(value, to, unit)
    }

    // --- durations ---

    /// A duration of `amount` times `unit`.
    pub fn duration(&self, amount: i64, unit: DurationUnit) -> Duration {
        Duration::new(amount, unit)
    }

    /// The duration in words, optionally framed as past/future.
    pub fn display_duration(
        &self,
        duration: &Duration,
        with_suffix: bool,
        locale: Option<&str>,
    ) -> String {
        duration.humanize(&self.locale(locale), with_suffix)
    }

    /// The whole duration expressed in `unit`, fractional.
    pub fn display_duration_in(&self, duration: &Duration, unit: DurationUnit) -> f64 {
        duration.as_unit(unit)
    }

    // --- numbers ---

    /// The compiled number format for `pattern` in `locale`, memoized.
    pub fn number_format(
        &self,
        pattern: &str,
        locale: Option<&str>,
    ) -> Result<Arc<NumberFormat>, Error> {
        let locale = self.locale(locale);
        let key = (locale.tag().to_owned(), pattern.to_owned());

        if let Some(format) = self.number_formats.read().expect("number cache poisoned").get(&key)
        {
            return Ok(Arc::clone(format));
        }
        let format = Arc::new(NumberFormat::new(
            pattern,
            locale.number_symbols(),
            &self.config.currency_symbol,
        )?);
        let mut formats = self.number_formats.write().expect("number cache poisoned");
        Ok(Arc::clone(formats.entry(key).or_insert(format)))
    }

    /// The configured plain-number format.
    pub fn default_number_format(&self) -> Result<Arc<NumberFormat>, Error> {
        self.number_format(&self.config.number_format, None)
    }

    /// The configured percent format.
    pub fn default_percent_format(&self) -> Result<Arc<NumberFormat>, Error> {
        self.number_format(&self.config.percent_format, None)
    }

    /// The configured currency format.
    pub fn default_currency_format(&self) -> Result<Arc<NumberFormat>, Error> {
        self.number_format(&self.config.currency_format, None)
    }
}

/// Lenient ISO 8601 parsing: extended-format date, optional time with
/// optional seconds and fraction, optional offset; or a time-only string
/// anchored to `reference`.
pub(crate) fn parse_iso8601(text: &str, reference: NaiveDate) -> ParseResult<TimeValue> {
    let mut parsed = Parsed::new();
    let mut s = text.trim();
    if s.is_empty() {
        return Err(Error::ParsingTooShort);
    }

    let date_first = s.len() >= 5
        && s.as_bytes()[..4].iter().all(|b| b.is_ascii_digit())
        && s.as_bytes()[4] == b'-';

    if date_first {
        let (rest, year) = scan::number_exact(s, 4)?;
        parsed.set_year(year)?;
        let rest = rest.strip_prefix('-').ok_or(Error::ParsingInvalid)?;
        let (rest, month) = scan::number_exact(rest, 2)?;
        parsed.set_month(month)?;
        let rest = rest.strip_prefix('-').ok_or(Error::ParsingInvalid)?;
        let (rest, day) = scan::number_exact(rest, 2)?;
        parsed.set_day(day)?;
        s = rest;

        if !s.is_empty() {
            s = s
                .strip_prefix('T')
                .or_else(|| s.strip_prefix(' '))
                .ok_or(Error::ParsingInvalid)?;
        }
    }

    if !s.is_empty() {
        let (rest, hour) = scan::number_exact(s, 2)?;
        parsed.set_hour(hour)?;
        let rest = rest.strip_prefix(':').ok_or(Error::ParsingInvalid)?;
        let (rest, minute) = scan::number_exact(rest, 2)?;
        parsed.set_minute(minute)?;
        s = rest;

        if let Some(rest) = s.strip_prefix(':') {
            let (rest, second) = scan::number_exact(rest, 2)?;
            parsed.set_second(second)?;
            s = rest;
            if let Some(rest) = s.strip_prefix('.') {
                let digits = rest.bytes().take(3).take_while(|b| b.is_ascii_digit()).count();
                if digits == 0 {
                    return Err(Error::ParsingInvalid);
                }
                let (rest, fraction) = scan::number(rest, digits, digits)?;
                let scale = 10i64.pow(3 - digits as u32);
                parsed.set_millisecond(fraction * scale)?;
                // swallow sub-millisecond digits
                let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
                s = rest;
            }
        }

        if !s.is_empty() {
            let (rest, offset) = scan::utc_offset(s)?;
            parsed.set_offset_minutes(offset)?;
            s = rest;
        }
    }

    if !s.is_empty() {
        return Err(Error::ParsingInvalid);
    }

    let wall = parsed.resolve(reference)?;
    match parsed.offset_minutes() {
        Some(offset) => {
            let utc = wall - chrono::Duration::minutes(i64::from(offset));
            Ok(TimeValue::Instant(Utc.from_utc_datetime(&utc)))
        }
        None => Ok(TimeValue::Wall(wall)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LocalizationService {
        LocalizationService::new(LocaleConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        date(y, mo, d).and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn format_date_uses_the_configured_default_pattern() {
        let service = service();
        assert_eq!(service.format_date(&date(2014, 9, 23), None, None), "Sep 23, 2014");
        assert_eq!(
            service.format_date(&date(2014, 9, 23), Some("yyyy-MM-dd"), None),
            "2014-09-23"
        );
    }

    #[test]
    fn format_datetime_uses_the_configured_default_pattern() {
        let service = service();
        assert_eq!(
            service.format_datetime(&dt(2014, 9, 23, 16, 30, 45), None, None),
            "Sep 23, 2014 4:30:45 PM"
        );
    }

    #[test]
    fn format_time_defaults() {
        let service = service();
        let time = NaiveTime::from_hms_opt(16, 30, 45).unwrap();
        assert_eq!(service.format_time(&time, None, None), "4:30:45 PM");
    }

    #[test]
    fn utc_variants_read_the_utc_clock() {
        let service = service();
        let instant = Utc.from_utc_datetime(&dt(2014, 9, 23, 16, 30, 45));
        assert_eq!(service.format_date_utc(instant, None, None), "Sep 23, 2014");
        assert_eq!(service.format_time_utc(instant, None, None), "4:30:45 PM");
        assert_eq!(
            service.format_datetime_utc(instant, None, None),
            "Sep 23, 2014 4:30:45 PM"
        );
    }

    #[test]
    fn format_datetime_in_zone_renders_wall_time_and_offset() {
        let service = service();
        let instant = Utc.from_utc_datetime(&dt(2017, 2, 3, 20, 30, 0));
        assert_eq!(
            service.format_datetime_in_zone(
                instant,
                Some("America/Los_Angeles"),
                Some("yyyy-MM-dd HH:mm Z"),
                None,
            ),
            "2017-02-03 12:30 -08:00"
        );
    }

    #[test]
    fn parse_datetime_rejects_empty_input() {
        assert_eq!(
            service().parse_datetime("", None, None, false).unwrap_err(),
            Error::ParsingTooShort
        );
    }

    #[test]
    fn parse_datetime_utc_assumes_utc_for_wall_results() {
        let service = service();
        let instant = service
            .parse_datetime_utc("2014-09-23 12:30", Some("yyyy-MM-dd HH:mm"), None, false)
            .unwrap();
        assert_eq!(instant, Utc.from_utc_datetime(&dt(2014, 9, 23, 12, 30, 0)));
    }

    #[test]
    fn iso8601_forms() {
        let reference = date(2020, 6, 15);

        let value = parse_iso8601("2014-09-23T12:35:45.345Z", reference).unwrap();
        assert_eq!(service().to_iso_string(&value), "2014-09-23T12:35:45.345Z");

        let value = parse_iso8601("2014-09-23T12:35:45+01:30", reference).unwrap();
        match value {
            TimeValue::Instant(instant) => {
                assert_eq!(instant.naive_utc(), dt(2014, 9, 23, 11, 5, 45))
            }
            TimeValue::Wall(_) => panic!("expected an instant"),
        }

        let value = parse_iso8601("2014-09-23", reference).unwrap();
        assert_eq!(value.wall_clock(), dt(2014, 9, 23, 0, 0, 0));

        let value = parse_iso8601("2016-02-29", reference).unwrap();
        assert_eq!(value.wall_clock(), dt(2016, 2, 29, 0, 0, 0));

        let value = parse_iso8601("12:30:45", reference).unwrap();
        assert_eq!(value.wall_clock(), dt(2020, 6, 15, 12, 30, 45));

        assert!(parse_iso8601("2015-02-29", reference).is_err());
        assert!(parse_iso8601("not a date", reference).is_err());
        assert!(parse_iso8601("", reference).is_err());
    }

    #[test]
    fn start_of_truncates() {
        let service = service();
        let value = dt(2014, 9, 23, 16, 30, 45);
        assert_eq!(service.start_of(&value, DurationUnit::Year, None), dt(2014, 1, 1, 0, 0, 0));
        assert_eq!(service.start_of(&value, DurationUnit::Month, None), dt(2014, 9, 1, 0, 0, 0));
        assert_eq!(service.start_of(&value, DurationUnit::Day, None), dt(2014, 9, 23, 0, 0, 0));
        assert_eq!(service.start_of(&value, DurationUnit::Hour, None), dt(2014, 9, 23, 16, 0, 0));
        assert_eq!(
            service.start_of(&value, DurationUnit::Minute, None),
            dt(2014, 9, 23, 16, 30, 0)
        );
    }

    #[test]
    fn start_of_week_honors_the_locale() {
        let service = service();
        // 2014-09-23 is a Tuesday
        let value = dt(2014, 9, 23, 12, 0, 0);
        assert_eq!(
            service.start_of(&value, DurationUnit::Week, Some("en-US")),
            dt(2014, 9, 21, 0, 0, 0) // Sunday
        );
        assert_eq!(
            service.start_of(&value, DurationUnit::Week, Some("de-DE")),
            dt(2014, 9, 22, 0, 0, 0) // Monday
        );
    }

    #[test]
    fn end_of_lands_on_the_last_millisecond() {
        let service = service();
        let value = dt(2014, 9, 23, 16, 30, 45);
        assert_eq!(
            service.end_of(&value, DurationUnit::Year, None),
            date(2014, 12, 31).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert_eq!(
            service.end_of(&value, DurationUnit::Month, None),
            date(2014, 9, 30).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert_eq!(
            service.end_of(&value, DurationUnit::Day, None),
            date(2014, 9, 23).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn comparisons_respect_granularity() {
        let service = service();
        let morning = dt(2014, 9, 23, 8, 0, 0);
        let evening = dt(2014, 9, 23, 20, 0, 0);
        let next_day = dt(2014, 9, 24, 8, 0, 0);

        assert!(service.is_same(&morning, &evening, DurationUnit::Day));
        assert!(service.is_before(&morning, &evening, DurationUnit::Hour));
        assert!(!service.is_before(&morning, &evening, DurationUnit::Day));
        assert!(service.is_after(&next_day, &evening, DurationUnit::Day));
        assert!(service.is_between(&evening, &morning, &next_day, DurationUnit::Millisecond));
        assert!(service.is_between(&morning, &morning, &next_day, DurationUnit::Day));
    }

    #[test]
    fn duration_display_goes_through_the_locale() {
        let service = service();
        let duration = service.duration(2, DurationUnit::Hour);
        assert_eq!(service.display_duration(&duration, false, None), "2 hours");
        assert_eq!(service.display_duration(&duration, true, None), "in 2 hours");
        assert_eq!(service.display_duration_in(&duration, DurationUnit::Minute), 120.0);
    }

    #[test]
    fn number_formats_are_cached_per_locale_and_pattern() {
        let service = service();
        let first = service.number_format("#,##0.00", None).unwrap();
        let second = service.number_format("#,##0.00", None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.format(1234.5), "1,234.50");

        let german = service.number_format("#,##0.00", Some("de-DE")).unwrap();
        assert!(!Arc::ptr_eq(&first, &german));
        assert_eq!(german.format(1234.5), "1.234,50");
    }

    #[test]
    fn default_number_formats_come_from_the_config() {
        let service = service();
        assert_eq!(service.default_number_format().unwrap().format(1234.5), "1,234.5");
        assert_eq!(service.default_percent_format().unwrap().format(0.73), "73%");
        assert_eq!(service.default_currency_format().unwrap().format(1999.99), "$1,999.99");
    }
}
