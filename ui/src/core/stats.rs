//! Display-only aggregates derived from a [`CalendarDataset`].

use super::calendar::CalendarDataset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub total_days: usize,
    pub active_days: usize,
    pub max_daily_count: u32,
    /// Provider total divided by the number of days, rounded to two decimals.
    pub average_daily: f64,
    pub active_rate_percent: u32,
}

impl Stats {
    pub fn from_dataset(dataset: &CalendarDataset) -> Self {
        let total_days = dataset.days.len();
        if total_days == 0 {
            return Self::empty();
        }

        let active_days = dataset.days.iter().filter(|day| day.is_active()).count();
        let max_daily_count = dataset.days.iter().map(|day| day.count).max().unwrap_or(0);

        // Uses the provider total on purpose; it may include private activity
        // that the daily counts leave out.
        let average_daily = round_to(dataset.total_count as f64 / total_days as f64, 2);
        let active_rate_percent = (active_days as f64 / total_days as f64 * 100.0).round() as u32;

        Self {
            total_days,
            active_days,
            max_daily_count,
            average_daily,
            active_rate_percent,
        }
    }

    pub fn empty() -> Self {
        Self {
            total_days: 0,
            active_days: 0,
            max_daily_count: 0,
            average_daily: 0.0,
            active_rate_percent: 0,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
