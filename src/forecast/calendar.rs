//! Trading-day calendar helpers
//!
//! Daily forecasts are indexed by trading days, so future timestamps skip
//! Saturdays and Sundays. Exchange holidays are not modeled; the sources
//! this pipeline mirrors filter weekends only.

use chrono::{Datelike, NaiveDate};

/// The next `count` trading days strictly after `last`, weekends skipped.
pub fn trading_days_after(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut day = last;

    while days.len() < count {
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if day.weekday().num_days_from_monday() < 5 {
            days.push(day);
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_skips_weekends() {
        // 2024-01-05 is a Friday
        let days = trading_days_after(date("2024-01-05"), 3);
        assert_eq!(
            days,
            vec![date("2024-01-08"), date("2024-01-09"), date("2024-01-10")]
        );
    }

    #[test]
    fn test_count_honored_across_weeks() {
        let days = trading_days_after(date("2024-01-01"), 10);
        assert_eq!(days.len(), 10);
        assert!(days
            .iter()
            .all(|d| d.weekday() != Weekday::Sat && d.weekday() != Weekday::Sun));
        // Two full weeks of weekdays from Tuesday 2024-01-02
        assert_eq!(days.first(), Some(&date("2024-01-02")));
        assert_eq!(days.last(), Some(&date("2024-01-15")));
    }

    #[test]
    fn test_strictly_after_start() {
        let days = trading_days_after(date("2024-01-02"), 1);
        assert_eq!(days, vec![date("2024-01-03")]);
    }
}
