//! Time Tracker Engine
//!
//! Turns a tracker's target instant into a short duration string such as
//! `"2mo 1w 3d"`. Months are 30-day blocks and years 365-day blocks; the
//! approximation is what users have always seen, so it stays.

use crate::models::{Tracker, TrackerKind};

const MS_PER_SECOND: u64 = 1000;

/// Shown instead of a duration once a countdown's target has passed.
pub const TIME_PASSED: &str = "Time passed";

/// Unit breakdown of a non-negative duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParts {
    pub years: u64,
    /// 0..12
    pub months: u64,
    /// 0..4
    pub weeks: u64,
    /// 0..7
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Cascading floor division: seconds → minutes → hours → days, then weeks,
/// months and years are all derived from total days.
pub fn decompose_time(ms: u64) -> TimeParts {
    let seconds = ms / MS_PER_SECOND;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;
    let years = days / 365;

    TimeParts {
        years,
        months: months % 12,
        weeks: weeks % 4,
        days: days % 7,
        hours: hours % 24,
        minutes: minutes % 60,
        seconds: seconds % 60,
    }
}

/// Greedy, truncating formatter: at most three tokens, largest units first.
pub fn format_time_string(time: &TimeParts) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if time.years > 0 {
        parts.push(format!("{}y", time.years));
    }
    if time.months > 0 {
        parts.push(format!("{}mo", time.months));
    }
    if time.weeks > 0 {
        parts.push(format!("{}w", time.weeks));
    }
    if time.days > 0 {
        parts.push(format!("{}d", time.days));
    }
    if time.hours > 0 && parts.len() < 3 {
        parts.push(format!("{}h", time.hours));
    }
    if time.minutes > 0 && parts.len() < 3 {
        parts.push(format!("{}m", time.minutes));
    }
    if parts.is_empty() || (time.seconds > 0 && parts.len() < 3) {
        parts.push(format!("{}s", time.seconds));
    }

    parts.truncate(3);
    parts.join(" ")
}

/// What a tracker row shows at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerReading {
    Running(String),
    Expired,
}

impl TrackerReading {
    pub fn text(&self) -> &str {
        match self {
            TrackerReading::Running(text) => text,
            TrackerReading::Expired => TIME_PASSED,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TrackerReading::Expired)
    }
}

/// Reading for a target instant and mode, both in epoch milliseconds.
pub fn read_tracker(target_ms: i64, kind: TrackerKind, now_ms: i64) -> TrackerReading {
    let diff = match kind {
        TrackerKind::Countup => now_ms - target_ms,
        TrackerKind::Countdown => target_ms - now_ms,
    };

    if diff < 0 && kind == TrackerKind::Countdown {
        return TrackerReading::Expired;
    }

    TrackerReading::Running(format_time_string(&decompose_time(diff.unsigned_abs())))
}

impl Tracker {
    pub fn reading_at(&self, now_ms: i64) -> TrackerReading {
        read_tracker(self.target.timestamp_millis(), self.kind, now_ms)
    }
}

/// Trackers shown on the dashboard, in stored order.
pub fn pinned_trackers(trackers: &[Tracker]) -> Vec<Tracker> {
    trackers.iter().filter(|t| t.pinned_to_dashboard).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SECOND: u64 = 1000;
    const MINUTE: u64 = 60 * SECOND;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    fn reconstruct(parts: &TimeParts) -> u64 {
        // Weeks and months overlap in the decomposition, so only the
        // non-overlapping units are summed back here.
        parts.seconds * SECOND + parts.minutes * MINUTE + parts.hours * HOUR
    }

    #[test]
    fn test_decompose_ranges_hold() {
        let samples = [
            0,
            999,
            59 * SECOND,
            61 * MINUTE,
            25 * HOUR + 7 * SECOND,
            45 * DAY + 3 * HOUR,
            400 * DAY + 17 * MINUTE,
            3_650 * DAY + 23 * HOUR + 59 * MINUTE + 59 * SECOND,
            u32::MAX as u64 * 1000,
        ];
        for ms in samples {
            let t = decompose_time(ms);
            assert!(t.months < 12, "months for {}", ms);
            assert!(t.weeks < 4, "weeks for {}", ms);
            assert!(t.days < 7, "days for {}", ms);
            assert!(t.hours < 24, "hours for {}", ms);
            assert!(t.minutes < 60, "minutes for {}", ms);
            assert!(t.seconds < 60, "seconds for {}", ms);
            // Sub-day remainder is exact to the second
            assert_eq!(reconstruct(&t), (ms % DAY) / SECOND * SECOND);
        }
    }

    #[test]
    fn test_decompose_reconstructs_whole_total() {
        let samples = [
            6 * DAY + 5 * HOUR,
            29 * DAY,
            45 * DAY + 3 * HOUR,
            364 * DAY + 59 * SECOND,
            400 * DAY + 17 * MINUTE,
            1_000 * DAY + 13 * HOUR + 2 * SECOND,
            3_650 * DAY + 23 * HOUR + 59 * MINUTE + 59 * SECOND,
            u32::MAX as u64 * 1000,
        ];
        for ms in samples {
            let t = decompose_time(ms);
            let total_days = ms / DAY;
            let sub_day = reconstruct(&t);

            // Each day-scale unit converts back with its own factor; months
            // and weeks overlap, so each is checked against the total it wraps.
            let by_years = t.years * 365 * DAY;
            assert!(by_years <= ms && ms - by_years < 365 * DAY, "years for {}", ms);

            let by_months = t.months * 30 * DAY;
            let month_span = total_days % 360 * DAY;
            assert!(by_months <= month_span && month_span - by_months < 30 * DAY, "months for {}", ms);

            let by_weeks_days = (t.weeks * 7 + t.days) * DAY;
            assert_eq!(by_weeks_days, total_days % 28 * DAY, "weeks/days for {}", ms);

            // Days plus the sub-day units give the whole total to the second
            let whole = (total_days - total_days % 28) * DAY + by_weeks_days + sub_day;
            assert_eq!(whole, ms / SECOND * SECOND, "total for {}", ms);
        }
    }

    #[test]
    fn test_decompose_day_units() {
        let t = decompose_time(45 * DAY);
        assert_eq!(t.years, 0);
        assert_eq!(t.months, 1);
        assert_eq!(t.weeks, 2); // 6 weeks mod 4
        assert_eq!(t.days, 3); // 45 mod 7
    }

    #[test]
    fn test_format_never_exceeds_three_tokens() {
        let samples = [
            0,
            SECOND,
            90 * MINUTE + 5 * SECOND,
            45 * DAY + 3 * HOUR + 2 * MINUTE + SECOND,
            400 * DAY + 40 * DAY + 5 * HOUR,
            800 * DAY + 59 * DAY + 23 * HOUR + 59 * MINUTE + 59 * SECOND,
        ];
        for ms in samples {
            let text = format_time_string(&decompose_time(ms));
            assert!(text.split(' ').count() <= 3, "{} -> {}", ms, text);
        }
    }

    #[test]
    fn test_format_zero_is_zero_seconds() {
        assert_eq!(format_time_string(&decompose_time(0)), "0s");
    }

    #[test]
    fn test_format_ninety_minutes_exact() {
        assert_eq!(format_time_string(&decompose_time(90 * MINUTE)), "1h 30m");
    }

    #[test]
    fn test_format_keeps_seconds_with_room() {
        assert_eq!(format_time_string(&decompose_time(90 * MINUTE + 12 * SECOND)), "1h 30m 12s");
        assert_eq!(format_time_string(&decompose_time(2 * DAY + 5 * SECOND)), "2d 5s");
    }

    #[test]
    fn test_format_truncates_large_units() {
        // 1y, 1mo (395 days / 30 = 13 → 1), 0w (56 % 4), 3d (395 % 7)
        let text = format_time_string(&decompose_time(395 * DAY + 4 * HOUR));
        assert_eq!(text, "1y 1mo 3d");
    }

    #[test]
    fn test_countdown_ninety_minutes_ahead() {
        let now = 1_700_000_000_000i64;
        let target = now + (90 * MINUTE) as i64;
        assert_eq!(
            read_tracker(target, TrackerKind::Countdown, now),
            TrackerReading::Running("1h 30m".into())
        );
    }

    #[test]
    fn test_countdown_in_past_always_expired() {
        let now = 1_700_000_000_000i64;
        for overrun in [1i64, 1000, 86_400_000, 10 * 365 * 86_400_000] {
            let reading = read_tracker(now - overrun, TrackerKind::Countdown, now);
            assert!(reading.is_expired());
            assert_eq!(reading.text(), TIME_PASSED);
        }
    }

    #[test]
    fn test_countup_measures_elapsed() {
        let now = 1_700_000_000_000i64;
        let reading = read_tracker(now - (3 * DAY) as i64, TrackerKind::Countup, now);
        assert_eq!(reading, TrackerReading::Running("3d".into()));

        // A count-up whose start is still ahead shows the absolute gap
        let ahead = read_tracker(now + (2 * HOUR) as i64, TrackerKind::Countup, now);
        assert_eq!(ahead, TrackerReading::Running("2h".into()));
    }
}
