//! Duration parsing: turns `<value> <unit>` fragments into calendar deltas.
//!
//! Fixed units (`day`, `hour`, `minute`, `second`, `week`) produce exact
//! deltas and admit fractional values. Variable units (`month`, `year`)
//! truncate toward zero and respect calendar arithmetic (month lengths, leap
//! years), the way the Python prototype leans on `dateutil.relativedelta` for this;
//! the Rust equivalent is `chrono::Months`.

use chrono::{DateTime, Duration, Months, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl DurationUnit {
    /// Parses a unit word, case-insensitive, with an optional trailing `s`.
    pub fn parse_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "year" => Some(Self::Year),
            "month" => Some(Self::Month),
            "week" => Some(Self::Week),
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            "minute" => Some(Self::Minute),
            "second" => Some(Self::Second),
            _ => None,
        }
    }
}

/// A resolved calendar delta: either an exact fixed-length duration, or a
/// calendar-relative number of months (years are normalized to 12× months).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalendarDelta {
    Fixed(Duration),
    Calendar { months: i32 },
}

/// Interprets `value <unit>` into a [`CalendarDelta`].
///
/// Variable units (`month`, `year`) truncate fractional values toward zero
/// (`spec.md` §9's acknowledged compromise). Fixed units keep full
/// sub-millisecond precision via fractional milliseconds.
pub fn parse(value: f64, unit: DurationUnit) -> CalendarDelta {
    match unit {
        DurationUnit::Year => CalendarDelta::Calendar {
            months: (value.trunc() as i32) * 12,
        },
        DurationUnit::Month => CalendarDelta::Calendar {
            months: value.trunc() as i32,
        },
        DurationUnit::Week => CalendarDelta::Fixed(millis(value * 7.0 * 24.0 * 3_600_000.0)),
        DurationUnit::Day => CalendarDelta::Fixed(millis(value * 24.0 * 3_600_000.0)),
        DurationUnit::Hour => CalendarDelta::Fixed(millis(value * 3_600_000.0)),
        DurationUnit::Minute => CalendarDelta::Fixed(millis(value * 60_000.0)),
        DurationUnit::Second => CalendarDelta::Fixed(millis(value * 1_000.0)),
    }
}

fn millis(ms: f64) -> Duration {
    Duration::milliseconds(ms.round() as i64)
}

/// Applies a [`CalendarDelta`] to `reference`, respecting calendar arithmetic
/// for variable units.
pub fn apply(delta: CalendarDelta, reference: DateTime<Utc>) -> DateTime<Utc> {
    match delta {
        CalendarDelta::Fixed(d) => reference + d,
        CalendarDelta::Calendar { months } if months >= 0 => {
            reference + Months::new(months as u32)
        }
        CalendarDelta::Calendar { months } => reference - Months::new((-months) as u32),
    }
}

/// Returns an integer minute count for `value <unit>` applied at `reference`.
/// For variable units this is computed by subtracting reference plus the
/// delta from reference and flooring total seconds over 60, per `spec.md`
/// §4.4.
pub fn total_minutes(value: f64, unit: DurationUnit, reference: DateTime<Utc>) -> i64 {
    match parse(value, unit) {
        CalendarDelta::Fixed(d) => d.num_seconds().div_euclid(60),
        delta @ CalendarDelta::Calendar { .. } => {
            let applied = apply(delta, reference);
            (applied - reference).num_seconds().div_euclid(60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn ref_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_plural_and_case_insensitive_units() {
        assert_eq!(DurationUnit::parse_str("Days"), Some(DurationUnit::Day));
        assert_eq!(DurationUnit::parse_str("HOUR"), Some(DurationUnit::Hour));
        assert_eq!(DurationUnit::parse_str("weeks"), Some(DurationUnit::Week));
        assert_eq!(DurationUnit::parse_str("fortnight"), None);
    }

    #[test]
    fn fixed_units_are_exact_minutes() {
        assert_eq!(total_minutes(10.0, DurationUnit::Minute, ref_date()), 10);
        assert_eq!(total_minutes(120.0, DurationUnit::Second, ref_date()), 2);
        assert_eq!(total_minutes(1.0, DurationUnit::Week, ref_date()), 10_080);
        assert_eq!(total_minutes(1.0, DurationUnit::Day, ref_date()), 1_440);
        assert_eq!(total_minutes(1.0, DurationUnit::Hour, ref_date()), 60);
        assert_eq!(total_minutes(3.0, DurationUnit::Day, ref_date()), 4_320);
        assert_eq!(total_minutes(4.0, DurationUnit::Hour, ref_date()), 240);
        assert_eq!(total_minutes(2.0, DurationUnit::Week, ref_date()), 20_160);
    }

    #[test]
    fn fractional_fixed_unit() {
        assert_eq!(total_minutes(1.5, DurationUnit::Day, ref_date()), 36 * 60);
    }

    #[test]
    fn variable_units_respect_leap_year() {
        let jan1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let delta = parse(2.0, DurationUnit::Month);
        let applied = apply(delta, jan1);
        assert_eq!(applied.month(), 3);
        assert_eq!(applied.day(), 1);
        // 2024 is a leap year: Jan (31) + Feb (29) = 60 days.
        assert_eq!((applied - jan1).num_days(), 60);
    }

    #[test]
    fn variable_units_truncate_fractional_toward_zero() {
        let delta = parse(2.5, DurationUnit::Year);
        assert_eq!(delta, CalendarDelta::Calendar { months: 24 });
    }
}
