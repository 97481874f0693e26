/// Last year in which the event ran for the full 25 days.
const LAST_FULL_CALENDAR_YEAR: i32 = 2024;

/// Maximum valid puzzle day for an event year.
///
/// Advent of Code ran 25 puzzles per event until 2024 and 12 from 2025 on.
pub fn estimate_day_count(year: i32) -> u32 {
    if year <= LAST_FULL_CALENDAR_YEAR { 25 } else { 12 }
}

pub fn is_valid_day(year: i32, day: i64) -> bool {
    day >= 1 && day <= i64::from(estimate_day_count(year))
}
