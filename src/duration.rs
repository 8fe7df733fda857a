//! Time spans with unit conversions and localized display.
//!
//! A [`Duration`] is a signed span backed by milliseconds. Calendar units
//! use the Gregorian averages (a month is 30.436875 days, a year 365.2425),
//! which keeps every conversion total and order-independent; spans measure
//! elapsed time, they are not anchored to a calendar date.

use core::fmt;
use core::ops::{Add, Neg, Sub};

use crate::locale::Locale;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
/// 30.436875 days, the Gregorian average month.
const MILLIS_PER_MONTH: i64 = 2_629_746_000;
/// 365.2425 days, the Gregorian average year.
const MILLIS_PER_YEAR: i64 = 31_556_952_000;

/// Units a [`Duration`] can be constructed from or converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum DurationUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    pub(crate) fn millis(self) -> i64 {
        match self {
            DurationUnit::Millisecond => 1,
            DurationUnit::Second => MILLIS_PER_SECOND,
            DurationUnit::Minute => MILLIS_PER_MINUTE,
            DurationUnit::Hour => MILLIS_PER_HOUR,
            DurationUnit::Day => MILLIS_PER_DAY,
            DurationUnit::Week => MILLIS_PER_WEEK,
            DurationUnit::Month => MILLIS_PER_MONTH,
            DurationUnit::Year => MILLIS_PER_YEAR,
        }
    }
}

/// A signed span of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    millis: i64,
}

impl Duration {
    /// A span of `amount` times `unit`.
    pub fn new(amount: i64, unit: DurationUnit) -> Duration {
        Duration { millis: amount.saturating_mul(unit.millis()) }
    }

    /// A span of whole milliseconds.
    pub fn milliseconds(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Millisecond)
    }

    /// A span of whole seconds.
    pub fn seconds(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Second)
    }

    /// A span of whole minutes.
    pub fn minutes(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Minute)
    }

    /// A span of whole hours.
    pub fn hours(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Hour)
    }

    /// A span of whole days.
    pub fn days(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Day)
    }

    /// A span of whole weeks.
    pub fn weeks(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Week)
    }

    /// A span of average Gregorian months.
    pub fn months(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Month)
    }

    /// A span of average Gregorian years.
    pub fn years(amount: i64) -> Duration {
        Duration::new(amount, DurationUnit::Year)
    }

    /// The span between two chrono time deltas' worth of milliseconds.
    pub fn from_time_delta(delta: chrono::Duration) -> Duration {
        Duration { millis: delta.num_milliseconds() }
    }

    /// The span in whole milliseconds.
    pub fn num_milliseconds(&self) -> i64 {
        self.millis
    }

    /// The whole span expressed in `unit`, fractional.
    pub fn as_unit(&self, unit: DurationUnit) -> f64 {
        self.millis as f64 / unit.millis() as f64
    }

    /// The `unit` component of the bubbled decomposition of this span:
    /// milliseconds 0–999, seconds/minutes 0–59, hours 0–23, days within
    /// the average month, months 0–11, then years.
    pub fn get_unit(&self, unit: DurationUnit) -> i64 {
        let millis = self.millis.abs();
        let value = match unit {
            DurationUnit::Millisecond => millis % MILLIS_PER_SECOND,
            DurationUnit::Second => millis / MILLIS_PER_SECOND % 60,
            DurationUnit::Minute => millis / MILLIS_PER_MINUTE % 60,
            DurationUnit::Hour => millis / MILLIS_PER_HOUR % 24,
            DurationUnit::Day => millis % MILLIS_PER_MONTH / MILLIS_PER_DAY,
            DurationUnit::Week => millis / MILLIS_PER_WEEK,
            DurationUnit::Month => millis / MILLIS_PER_MONTH % 12,
            DurationUnit::Year => millis / MILLIS_PER_YEAR,
        };
        if self.millis < 0 {
            -value
        } else {
            value
        }
    }

    /// Renders the span in words for the given locale, moment-style:
    /// `"a few seconds"`, `"2 hours"`, `"a month"`. With `with_suffix` the
    /// phrase is wrapped in the future/past frame (`"in 2 hours"`,
    /// `"2 hours ago"`), chosen by the span's sign.
    pub fn humanize(&self, locale: &Locale, with_suffix: bool) -> String {
        let strings = locale.relative_times();
        let millis = self.millis.abs();

        let seconds = millis / MILLIS_PER_SECOND;
        let minutes = (millis as f64 / MILLIS_PER_MINUTE as f64).round() as i64;
        let hours = (millis as f64 / MILLIS_PER_HOUR as f64).round() as i64;
        let days = (millis as f64 / MILLIS_PER_DAY as f64).round() as i64;
        let months = (millis as f64 / MILLIS_PER_MONTH as f64).round() as i64;
        let years = (millis as f64 / MILLIS_PER_YEAR as f64).round() as i64;

        let phrase = if seconds < 45 {
            strings.seconds.to_owned()
        } else if seconds < 90 {
            strings.minute.to_owned()
        } else if minutes < 45 {
            strings.minutes.replace("%d", &minutes.to_string())
        } else if minutes < 90 {
            strings.hour.to_owned()
        } else if hours < 22 {
            strings.hours.replace("%d", &hours.to_string())
        } else if hours < 36 {
            strings.day.to_owned()
        } else if days < 26 {
            strings.days.replace("%d", &days.to_string())
        } else if days < 46 {
            strings.month.to_owned()
        } else if days < 320 {
            strings.months.replace("%d", &months.to_string())
        } else if days < 548 {
            strings.year.to_owned()
        } else {
            strings.years.replace("%d", &years.to_string())
        };

        if !with_suffix {
            return phrase;
        }
        let frame = if self.millis < 0 { strings.past } else { strings.future };
        frame.replace("%s", &phrase)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration { millis: self.millis + rhs.millis }
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration { millis: self.millis - rhs.millis }
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration { millis: -self.millis }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    fn en_us() -> Locale {
        Locale::resolve("en-US")
    }

    #[test]
    fn constructors_agree_with_as_unit() {
        assert_eq!(Duration::hours(2).as_unit(DurationUnit::Minute), 120.0);
        assert_eq!(Duration::days(1).as_unit(DurationUnit::Hour), 24.0);
        assert_eq!(Duration::minutes(90).as_unit(DurationUnit::Hour), 1.5);
    }

    #[test]
    fn components_bubble() {
        let span = Duration::milliseconds(
            2 * MILLIS_PER_HOUR + 30 * MILLIS_PER_MINUTE + 45 * MILLIS_PER_SECOND + 250,
        );
        assert_eq!(span.get_unit(DurationUnit::Hour), 2);
        assert_eq!(span.get_unit(DurationUnit::Minute), 30);
        assert_eq!(span.get_unit(DurationUnit::Second), 45);
        assert_eq!(span.get_unit(DurationUnit::Millisecond), 250);
    }

    #[test]
    fn negative_spans_keep_their_sign() {
        let span = -Duration::minutes(90);
        assert_eq!(span.get_unit(DurationUnit::Hour), -1);
        assert_eq!(span.as_unit(DurationUnit::Minute), -90.0);
    }

    #[test]
    fn humanize_buckets() {
        let locale = en_us();
        assert_eq!(Duration::seconds(20).humanize(&locale, false), "a few seconds");
        assert_eq!(Duration::seconds(60).humanize(&locale, false), "a minute");
        assert_eq!(Duration::minutes(10).humanize(&locale, false), "10 minutes");
        assert_eq!(Duration::minutes(60).humanize(&locale, false), "an hour");
        assert_eq!(Duration::hours(5).humanize(&locale, false), "5 hours");
        assert_eq!(Duration::hours(24).humanize(&locale, false), "a day");
        assert_eq!(Duration::days(10).humanize(&locale, false), "10 days");
        assert_eq!(Duration::days(30).humanize(&locale, false), "a month");
        assert_eq!(Duration::days(100).humanize(&locale, false), "3 months");
        assert_eq!(Duration::days(400).humanize(&locale, false), "a year");
        assert_eq!(Duration::years(5).humanize(&locale, false), "5 years");
    }

    #[test]
    fn humanize_suffix_follows_the_sign() {
        let locale = en_us();
        assert_eq!(Duration::hours(2).humanize(&locale, true), "in 2 hours");
        assert_eq!((-Duration::hours(2)).humanize(&locale, true), "2 hours ago");
    }
}
