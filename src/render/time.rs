//! Relative time labels
//!
//! Approximate, human wording of the distance between two instants, e.g.
//! "3 hours ago" or "in about 1 month". Thresholds round to the nearest
//! minute first, then bucket into minutes, hours, days, months and years.

use chrono::{DateTime, Datelike, Utc};

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_ALMOST_TWO_DAYS: f64 = 2520.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;

/// Distance from `now` to `then`, with an "ago" / "in" suffix
pub fn format_distance(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (earlier, later, past) = if then <= now {
        (then, now, true)
    } else {
        (now, then, false)
    };

    let phrase = distance_phrase(earlier, later);
    if past {
        format!("{} ago", phrase)
    } else {
        format!("in {}", phrase)
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

fn distance_phrase(earlier: DateTime<Utc>, later: DateTime<Utc>) -> String {
    let seconds = (later - earlier).num_seconds() as f64;
    let minutes = (seconds / 60.0).round();

    if minutes < 2.0 {
        return if minutes == 0.0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45.0 {
        return plural(minutes as i64, "minute");
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes / MINUTES_IN_DAY).round() as i64;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes / MINUTES_IN_MONTH).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = calendar_months_between(earlier, later);
    if months < 12 {
        let nearest = (minutes / MINUTES_IN_MONTH).round() as i64;
        return plural(nearest, "month");
    }

    let remainder = months % 12;
    let years = months / 12;
    if remainder < 3 {
        format!("about {}", plural(years, "year"))
    } else if remainder < 9 {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

/// Whole calendar months from `earlier` to `later`
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);

    // Incomplete final month
    let later_in_month = (later.day(), later.time());
    let earlier_in_month = (earlier.day(), earlier.time());
    if months > 0 && later_in_month < earlier_in_month {
        months -= 1;
    }
    months
}
