use std::fmt;
use chrono::{Datelike, Local, Month};
use serde::Serialize;

/// A (year, month) position in a multi-month scrape. `month` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month out of range: {month}");
        MonthCursor { year, month }
    }

    /// The current month in local time.
    pub fn today() -> Self {
        let now = Local::now();
        MonthCursor::new(now.year(), now.month())
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            MonthCursor::new(self.year + 1, 1)
        } else {
            MonthCursor::new(self.year, self.month + 1)
        }
    }

    /// "Jan 2022" style label.
    pub fn short_label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name()[..3].to_string())
            .unwrap_or_else(|| self.month.to_string());
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Inclusive count of calendar months from `start` to `end`.
///
/// An `end` earlier than `start` yields 0.
pub fn months_between(start: MonthCursor, end: MonthCursor) -> u32 {
    let span = (i64::from(end.year) - i64::from(start.year)) * 12
        + (i64::from(end.month) - i64::from(start.month))
        + 1;
    u32::try_from(span.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances_within_year() {
        for month in 1..12 {
            let next = MonthCursor::new(2023, month).next();
            assert_eq!(next, MonthCursor::new(2023, month + 1));
        }
    }

    #[test]
    fn next_rolls_december_into_january() {
        assert_eq!(MonthCursor::new(2022, 12).next(), MonthCursor::new(2023, 1));
        assert_eq!(MonthCursor::new(1999, 12).next(), MonthCursor::new(2000, 1));
    }

    #[test]
    fn full_year_is_twelve_months() {
        for year in [2022, 2023, 2024] {
            assert_eq!(months_between(MonthCursor::new(year, 1), MonthCursor::new(year, 12)), 12);
        }
    }

    #[test]
    fn same_month_is_one() {
        for month in 1..=12 {
            let m = MonthCursor::new(2024, month);
            assert_eq!(months_between(m, m), 1);
        }
    }

    #[test]
    fn spans_year_boundaries() {
        assert_eq!(months_between(MonthCursor::new(2022, 1), MonthCursor::new(2025, 6)), 42);
        assert_eq!(months_between(MonthCursor::new(2022, 11), MonthCursor::new(2023, 2)), 4);
    }

    #[test]
    fn end_before_start_is_empty() {
        assert_eq!(months_between(MonthCursor::new(2022, 5), MonthCursor::new(2022, 4)), 0);
        assert_eq!(months_between(MonthCursor::new(2023, 1), MonthCursor::new(2021, 12)), 0);
    }

    #[test]
    fn counting_matches_repeated_next() {
        let start = MonthCursor::new(2022, 1);
        let mut cursor = start;
        for expected in 1..=40 {
            assert_eq!(months_between(start, cursor), expected);
            cursor = cursor.next();
        }
    }

    #[test]
    fn labels() {
        let m = MonthCursor::new(2022, 1);
        assert_eq!(m.to_string(), "2022-01");
        assert_eq!(m.short_label(), "Jan 2022");
        assert_eq!(MonthCursor::new(2024, 11).to_string(), "2024-11");
    }
}
