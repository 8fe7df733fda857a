//! End-to-end checks through the public API: compile, format, parse,
//! convert, and back.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use datefmt::{
    strict_mode_format, DateTimeFormat, DurationUnit, Locale, LocaleConfig, LocalizationService,
    TimeValue,
};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()
}

#[test]
fn format_then_parse_round_trips() {
    let locale = Arc::new(Locale::resolve("en-US"));
    for pattern in ["yyyy-MM-dd HH:mm:ss", "MMM dd, yyyy h:mm:ss a", "EEEE, MMMM d, yyyy HH:mm"] {
        let format = DateTimeFormat::new(pattern, Arc::clone(&locale));
        let original = dt(2014, 10, 23, 16, 30, 0);
        let text = format.format(&original);
        let value = format.parse_with_reference(&text, false, reference()).unwrap();
        assert_eq!(value.wall_clock(), original, "{pattern} via {text:?}");
    }
}

#[test]
fn offset_patterns_round_trip_as_instants() {
    let locale = Arc::new(Locale::resolve("en-US"));
    let format = DateTimeFormat::new("yyyy-MM-dd HH:mm:ss.SSSZ", locale);
    let original = NaiveDate::from_ymd_opt(2014, 10, 23)
        .unwrap()
        .and_hms_milli_opt(16, 30, 45, 250)
        .unwrap();

    let text = format.format_with_offset(&original, 90);
    assert_eq!(text, "2014-10-23 16:30:45.250+01:30");

    let value = format.parse_with_reference(&text, false, reference()).unwrap();
    let instant = value.as_instant().expect("offset input should pin an instant");
    assert_eq!(instant.naive_utc(), dt(2014, 10, 23, 15, 0, 45) + chrono::Duration::milliseconds(250));
}

#[test]
fn strict_rewrite_then_strict_parse() {
    assert_eq!(strict_mode_format("dd-MM-y hh:mm a"), "D-M-YYYY h:m A");

    let service = LocalizationService::new(LocaleConfig::default());
    let strict_pattern = strict_mode_format("dd-MM-y hh:mm a");
    let value = service
        .parse_datetime("3-9-2014 4:30 PM", Some(strict_pattern.as_str()), None, true)
        .unwrap();
    assert_eq!(value.wall_clock(), dt(2014, 9, 3, 16, 30, 0));

    // a four-digit year is mandatory once the pattern says YYYY
    assert!(service
        .parse_datetime("3-9-14 4:30 PM", Some(strict_pattern.as_str()), None, true)
        .is_err());
}

#[test]
fn service_defaults_compose() {
    let service = LocalizationService::new(LocaleConfig::default());

    let text = service.format_datetime(&dt(2014, 9, 23, 16, 30, 45), None, None);
    assert_eq!(text, "Sep 23, 2014 4:30:45 PM");

    let value = service.parse_datetime(&text, None, None, false).unwrap();
    assert_eq!(value.wall_clock(), dt(2014, 9, 23, 16, 30, 45));
}

#[test]
fn timezone_pipeline() {
    let service = LocalizationService::new(LocaleConfig::default());
    let instant = Utc.from_utc_datetime(&dt(2017, 2, 3, 20, 30, 0));

    let wall = service.utc_to_wall_time(instant, Some("America/Los_Angeles"));
    assert_eq!(wall, dt(2017, 2, 3, 12, 30, 0));
    assert_eq!(service.wall_time_to_utc(wall, Some("America/Los_Angeles")), instant);

    // DST: the same zone sits seven hours behind in July
    let summer = Utc.from_utc_datetime(&dt(2017, 7, 3, 20, 30, 0));
    assert_eq!(service.utc_to_wall_time(summer, Some("America/Los_Angeles")), dt(2017, 7, 3, 13, 30, 0));

    assert_eq!(service.date_string_in_zone(instant, Some("Asia/Tokyo")), "2017-02-04");
}

#[test]
fn iso8601_to_iso_string_round_trip() {
    let service = LocalizationService::new(LocaleConfig::default());
    let value = service.parse_iso8601("2014-09-23T12:35:45.345Z").unwrap();
    assert_eq!(service.to_iso_string(&value), "2014-09-23T12:35:45.345Z");
}

#[test]
fn cached_formats_are_structurally_shared() {
    let service = LocalizationService::new(LocaleConfig::default());
    let first = service.cache().format_for("MMM dd, yyyy", "en_US");
    let second = service.cache().format_for("MMM dd, yyyy", "en-US");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.tokens(), second.tokens());
}

#[test]
fn localized_output_changes_with_the_locale() {
    let service = LocalizationService::new(LocaleConfig::default());
    let value = dt(2014, 9, 23, 0, 0, 0);

    assert_eq!(
        service.format_datetime(&value, Some("MMMM"), Some("en-US")),
        "September"
    );
    let german = service.format_datetime(&value, Some("MMMM"), Some("de-DE"));
    assert_eq!(german, "September"); // a cognate, but resolved through de data
    let french = service.format_datetime(&value, Some("MMMM"), Some("fr-FR"));
    assert_eq!(french, "septembre");
}

#[test]
fn durations_and_numbers_share_the_service() {
    let service = LocalizationService::new(LocaleConfig::default());

    let duration = service.duration(90, DurationUnit::Minute);
    assert_eq!(service.display_duration(&duration, false, None), "2 hours");
    assert_eq!(service.display_duration_in(&duration, DurationUnit::Hour), 1.5);

    assert_eq!(service.default_currency_format().unwrap().format(1999.99), "$1,999.99");
}

#[test]
fn parse_failures_are_values_not_panics() {
    let service = LocalizationService::new(LocaleConfig::default());
    for input in ["Sep 88, 2014 1:30:00 PM", "Sep 23, 2014 88:30:00 PM", "", "garbage"] {
        assert!(
            service.parse_datetime(input, None, None, false).is_err(),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn week_boundaries_follow_the_locale() {
    let service = LocalizationService::new(LocaleConfig::default());
    let tuesday = dt(2014, 9, 23, 12, 0, 0);
    let value = TimeValue::Wall(service.start_of(&tuesday, DurationUnit::Week, Some("en-US")));
    assert_eq!(value.wall_clock(), dt(2014, 9, 21, 0, 0, 0));
}
