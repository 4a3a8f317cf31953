#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::LegInfo;
use crate::domain::models::RouteTotals;

const KM_PER_MILE: f64 = 1.60934;

static HOURS_RE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"(\d+)\s*hour").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"(\d+)\s*min").unwrap());

/// Kilometers from text such as `"0.8 km"` or `"1.2 mi"`. Anything that
/// doesn't read as a number followed by a known unit counts as zero.
pub fn parse_distance(text: &str) -> f64 {
    let mut parts = text.split_whitespace();
    let (value, unit) = match (parts.next(), parts.next()) {
        (Some(value), Some(unit)) => (value, unit.to_lowercase()),
        _ => return 0.0,
    };

    let value = match value.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return 0.0,
    };

    return match unit.as_str() {
        "km" => value,
        "mi" => value * KM_PER_MILE,
        _ => 0.0,
    };
}

fn first_number(re: &Regex, text: &str) -> u64 {
    return re
        .captures(text)
        .and_then(|caps| return caps.get(1))
        .and_then(|m| return m.as_str().parse::<u64>().ok())
        .unwrap_or(0);
}

/// Minutes from text such as `"1 hour 20 mins"`. The hour and minute parts are
/// found independently and each defaults to zero.
pub fn parse_duration(text: &str) -> u64 {
    let lower = text.to_lowercase();
    let hours = first_number(&HOURS_RE, &lower);
    let minutes = first_number(&MINUTES_RE, &lower);

    return hours.saturating_mul(60).saturating_add(minutes);
}

pub fn compute_totals(legs: &[LegInfo]) -> RouteTotals {
    let mut totals = RouteTotals::default();

    for leg in legs {
        totals.total_distance_km += parse_distance(&leg.distance);
        totals.total_duration_min = totals
            .total_duration_min
            .saturating_add(parse_duration(&leg.duration));
    }

    return totals;
}

pub fn format_total_distance(km: f64) -> String {
    return format!("{km:.1} km");
}

pub fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        return format!("{count} {unit}");
    }

    return format!("{count} {unit}s");
}

pub fn format_total_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        return format!("{} {}", plural(hours, "hr"), plural(mins, "min"));
    }

    return plural(minutes, "min");
}
