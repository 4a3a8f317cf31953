#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;

use chrono::NaiveDateTime;
use chrono::Timelike;

const DAY_SEPARATOR: &str = ": ";
const RANGE_SEPARATOR: &str = " – ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoursStatus {
    OpenNow,
    ClosedNow,
    NotToday,
}

/// One line of a place's weekly schedule, e.g. `"Monday: 9:00 AM – 5:00 PM"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningHours {
    pub day: String,
    pub range: Option<String>,
}

impl OpeningHours {
    pub fn parse(line: &str) -> OpeningHours {
        let (day, range) = match line.split_once(DAY_SEPARATOR) {
            Some((day, range)) => (day.trim(), Some(range.trim())),
            None => (line.trim(), None),
        };

        return OpeningHours {
            day: day.to_string(),
            range: range
                .filter(|range| return !range.is_empty())
                .map(|range| return range.to_string()),
        };
    }

    fn bounds(&self) -> Option<(&str, &str)> {
        return self.range.as_deref()?.split_once(RANGE_SEPARATOR);
    }

    /// Status at `hour` (fractional, 0–24) on `weekday` (full English name).
    /// Ranges that don't parse, including ones past midnight, read as closed.
    pub fn status(&self, weekday: &str, hour: f64) -> HoursStatus {
        if self.day != weekday {
            return HoursStatus::NotToday;
        }

        let open_now = self
            .bounds()
            .and_then(|(open, close)| return Some((parse_time(open)?, parse_time(close)?)))
            .map(|(open, close)| return hour >= open && hour <= close)
            .unwrap_or(false);

        if open_now {
            return HoursStatus::OpenNow;
        }

        return HoursStatus::ClosedNow;
    }

    pub fn status_at(&self, now: &NaiveDateTime) -> HoursStatus {
        let weekday = now.format("%A").to_string();
        let hour = now.hour() as f64 + now.minute() as f64 / 60.0;

        return self.status(&weekday, hour);
    }

    pub fn display(&self) -> String {
        return format!(
            "{}: {}",
            self.day,
            self.range.as_deref().unwrap_or("Closed")
        );
    }
}

/// Fractional hour for `"5:30 PM"`, `"9 AM"` or `"17:45"`.
pub fn parse_time(text: &str) -> Option<f64> {
    let mut parts = text.split_whitespace();
    let time = parts.next()?;
    let meridiem = parts.next().map(|m| return m.to_uppercase());

    let (hour, minute) = match time.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => (time, "0"),
    };
    let mut hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;

    match meridiem.as_deref() {
        Some("PM") if hour < 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    return Some(hour as f64 + minute as f64 / 60.0);
}
