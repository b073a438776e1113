use chrono::{Duration, NaiveDate};

/// Default length of one streak day, in hours.
pub const DEFAULT_DAY_HOURS: i64 = 24;

/// Longest run of consecutive trading days.
///
/// Dates are deduplicated and sorted. A gap of exactly one `day_length`
/// extends the current run, any other gap starts a new run of 1. The gap is
/// measured as elapsed time divided by `day_length`, so a 26-hour day never
/// matches the 24 hours between two calendar dates and every run stays at 1.
pub fn longest_streak(dates: &[NaiveDate], day_length: Duration) -> u32 {
    let mut days: Vec<NaiveDate> = dates.to_vec();
    days.sort_unstable();
    days.dedup();

    if days.is_empty() {
        return 0;
    }

    let day_ms = day_length.num_milliseconds();
    if day_ms <= 0 {
        return 1;
    }

    let mut longest: u32 = 1;
    let mut current: u32 = 1;

    for pair in days.windows(2) {
        let elapsed_ms = pair[1].signed_duration_since(pair[0]).num_milliseconds();
        let gap = elapsed_ms as f64 / day_ms as f64;

        if (gap - 1.0).abs() < 1e-9 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }

    longest
}
