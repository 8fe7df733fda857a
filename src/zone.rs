//! Conversion between UTC instants and civil wall time in named zones.
//!
//! Offset math is delegated to `chrono-tz`; this module only decides how
//! zone names resolve and how DST edge cases map. The conversions are pure:
//! inputs are taken by value and never mutated.

use chrono::{DateTime, Duration, MappedLocalTime, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::Error;

/// Resolves an IANA zone name.
pub(crate) fn resolve_zone(name: &str) -> Result<Tz, Error> {
    name.parse::<Tz>().map_err(|_| Error::UnknownTimeZone)
}

/// Converter with a configured fallback zone for unresolvable names.
#[derive(Debug, Clone)]
pub struct ZoneConverter {
    default_zone: Tz,
}

impl ZoneConverter {
    /// Creates a converter that falls back to `default_zone` when asked
    /// about a zone it cannot resolve. An unresolvable default itself falls
    /// back to UTC.
    pub fn new(default_zone: &str) -> ZoneConverter {
        let default_zone = match resolve_zone(default_zone) {
            Ok(zone) => zone,
            Err(_) => {
                log::warn!("unknown default time zone {:?}, using UTC", default_zone);
                Tz::UTC
            }
        };
        ZoneConverter { default_zone }
    }

    /// The zone used when a requested name does not resolve.
    pub fn default_zone(&self) -> &str {
        self.default_zone.name()
    }

    fn zone(&self, name: &str) -> Tz {
        match resolve_zone(name) {
            Ok(zone) => zone,
            Err(_) => {
                log::warn!(
                    "unsupported time zone {:?}, falling back to {}",
                    name,
                    self.default_zone.name()
                );
                self.default_zone
            }
        }
    }

    /// Converts a UTC instant to the wall time an observer in `zone` reads.
    ///
    /// `"GMT"` and `"UTC"` short-circuit to the input's own clock reading.
    pub fn utc_to_wall(&self, instant: DateTime<Utc>, zone: &str) -> NaiveDateTime {
        if is_utc_alias(zone) {
            return instant.naive_utc();
        }
        self.zone(zone).from_utc_datetime(&instant.naive_utc()).naive_local()
    }

    /// Converts a wall time in `zone` to the UTC instant it names.
    ///
    /// Wall times repeated by a backward transition take the earlier
    /// instant; wall times skipped by a forward transition resolve through
    /// the offset in effect after the gap.
    pub fn wall_to_utc(&self, wall: NaiveDateTime, zone: &str) -> DateTime<Utc> {
        if is_utc_alias(zone) {
            return Utc.from_utc_datetime(&wall);
        }
        let tz = self.zone(zone);
        match tz.from_local_datetime(&wall) {
            MappedLocalTime::Single(mapped) => mapped.with_timezone(&Utc),
            MappedLocalTime::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
            MappedLocalTime::None => {
                let probe = wall + Duration::hours(1);
                match tz.from_local_datetime(&probe) {
                    MappedLocalTime::Single(mapped) | MappedLocalTime::Ambiguous(mapped, _) => {
                        mapped.with_timezone(&Utc) - Duration::hours(1)
                    }
                    // a gap wider than an hour; read the offset straight
                    // off the UTC interpretation
                    MappedLocalTime::None => {
                        let offset = tz.offset_from_utc_datetime(&wall).fix();
                        Utc.from_utc_datetime(&(wall - Duration::seconds(i64::from(
                            offset.local_minus_utc(),
                        ))))
                    }
                }
            }
        }
    }

    /// The signed UTC offset, in minutes, of `zone` at `instant` — the
    /// value offset fields render with.
    pub fn offset_minutes(&self, zone: &str, instant: DateTime<Utc>) -> i32 {
        if is_utc_alias(zone) {
            return 0;
        }
        let local = instant.with_timezone(&self.zone(zone));
        local.offset().fix().local_minus_utc() / 60
    }

    /// The `yyyy-MM-dd` date an observer in `zone` reads at `instant`.
    pub fn date_string_in_zone(&self, instant: DateTime<Utc>, zone: &str) -> String {
        self.utc_to_wall(instant, zone).format("%Y-%m-%d").to_string()
    }
}

impl Default for ZoneConverter {
    fn default() -> Self {
        ZoneConverter { default_zone: Tz::UTC }
    }
}

fn is_utc_alias(zone: &str) -> bool {
    zone.eq_ignore_ascii_case("GMT") || zone.eq_ignore_ascii_case("UTC")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap(),
        )
    }

    fn wall(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    #[test]
    fn gmt_is_a_passthrough() {
        let converter = ZoneConverter::default();
        let instant = utc(2017, 2, 3, 20, 30);
        assert_eq!(converter.utc_to_wall(instant, "GMT"), instant.naive_utc());
        assert_eq!(converter.wall_to_utc(instant.naive_utc(), "GMT"), instant);
    }

    #[test]
    fn converts_standard_time() {
        let converter = ZoneConverter::default();
        assert_eq!(
            converter.utc_to_wall(utc(2017, 2, 3, 20, 30), "America/Los_Angeles"),
            wall(2017, 2, 3, 12, 30)
        );
    }

    #[test]
    fn converts_daylight_time() {
        let converter = ZoneConverter::default();
        // four hours instead of five: the zone is on DST
        assert_eq!(
            converter.utc_to_wall(utc(2017, 10, 3, 6, 1), "America/New_York"),
            wall(2017, 10, 3, 2, 1)
        );
    }

    #[test]
    fn converts_positive_offsets() {
        let converter = ZoneConverter::default();
        assert_eq!(
            converter.utc_to_wall(utc(2014, 1, 3, 6, 1), "Europe/Berlin"),
            wall(2014, 1, 3, 7, 1)
        );
    }

    #[test]
    fn conversion_crosses_month_and_year_boundaries() {
        let converter = ZoneConverter::default();
        assert_eq!(
            converter.utc_to_wall(utc(2017, 10, 1, 0, 0), "America/Los_Angeles"),
            wall(2017, 9, 30, 17, 0)
        );
        assert_eq!(
            converter.utc_to_wall(utc(2018, 1, 1, 0, 0), "America/Los_Angeles"),
            wall(2017, 12, 31, 16, 0)
        );
    }

    #[test]
    fn wall_time_round_trips_to_utc() {
        let converter = ZoneConverter::default();
        assert_eq!(
            converter.wall_to_utc(wall(2017, 2, 3, 12, 30), "America/Los_Angeles"),
            utc(2017, 2, 3, 20, 30)
        );
    }

    #[test]
    fn ambiguous_wall_times_take_the_earlier_instant() {
        let converter = ZoneConverter::default();
        // clocks fall back 2017-11-05 02:00 -> 01:00 in Los Angeles
        assert_eq!(
            converter.wall_to_utc(wall(2017, 11, 5, 1, 30), "America/Los_Angeles"),
            utc(2017, 11, 5, 8, 30)
        );
    }

    #[test]
    fn skipped_wall_times_resolve_past_the_gap() {
        let converter = ZoneConverter::default();
        // clocks spring forward 2017-03-12 02:00 -> 03:00 in Los Angeles
        assert_eq!(
            converter.wall_to_utc(wall(2017, 3, 12, 2, 30), "America/Los_Angeles"),
            utc(2017, 3, 12, 9, 30)
        );
    }

    #[test]
    fn unsupported_zone_falls_back_to_the_default() {
        let converter = ZoneConverter::new("America/Los_Angeles");
        assert_eq!(
            converter.utc_to_wall(utc(2017, 2, 3, 20, 30), "unsupported"),
            wall(2017, 2, 3, 12, 30)
        );
    }

    #[test]
    fn offset_minutes_follow_dst() {
        let converter = ZoneConverter::default();
        assert_eq!(converter.offset_minutes("America/Los_Angeles", utc(2017, 2, 3, 20, 30)), -480);
        assert_eq!(converter.offset_minutes("America/Los_Angeles", utc(2017, 7, 3, 20, 30)), -420);
        assert_eq!(converter.offset_minutes("GMT", utc(2017, 2, 3, 20, 30)), 0);
    }

    #[test]
    fn date_string_reflects_the_zone() {
        let converter = ZoneConverter::default();
        assert_eq!(
            converter.date_string_in_zone(utc(2017, 10, 1, 0, 0), "America/Los_Angeles"),
            "2017-09-30"
        );
        assert_eq!(converter.date_string_in_zone(utc(2017, 10, 1, 0, 0), "GMT"), "2017-10-01");
    }
}
