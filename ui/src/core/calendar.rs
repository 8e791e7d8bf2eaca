//! Calendar normalization: week-grouped provider payload in, flat chronological
//! day sequence out.
//!
//! The provider already orders weeks and the days inside them, so flattening
//! is a plain concatenation. Ragged first/last weeks keep their position; no
//! padding is introduced and nothing is re-sorted.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use time::{macros::format_description, Date};

use super::error::{CalendarError, CalendarResult};

pub const DAYS_IN_WEEK: usize = 7;

/// One contribution day. Produced by [`normalize`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    pub count: u32,
    pub date: Date,
    /// 0 = Sunday … 6 = Saturday, the provider's convention.
    pub weekday: u8,
}

impl DayRecord {
    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    pub fn iso_date(&self) -> String {
        self.date
            .format(&format_description!("[year]-[month]-[day]"))
            .unwrap_or_default()
    }
}

/// The whole year for one user.
///
/// `total_count` is whatever the provider reported. It can legitimately differ
/// from the sum of `days[i].count` (private contributions are counted in the
/// total but not in the public daily numbers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDataset {
    pub days: Vec<DayRecord>,
    pub total_count: u64,
    pub week_count: usize,
}

impl CalendarDataset {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Largest daily count, floored at 1 so it is always a safe divisor.
    pub fn max_count(&self) -> u32 {
        self.days.iter().map(|day| day.count).max().unwrap_or(0).max(1)
    }

    pub fn summed_daily_counts(&self) -> u64 {
        self.days.iter().map(|day| u64::from(day.count)).sum()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCalendar {
    total_contributions: u64,
    weeks: Vec<RawWeek>,
}

#[derive(Debug, Deserialize)]
struct RawWeek {
    #[serde(alias = "contributionDays")]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    #[serde(alias = "contributionCount")]
    count: u32,
    date: String,
    #[serde(default)]
    weekday: Option<u8>,
}

/// Flatten a week-grouped calendar payload into a [`CalendarDataset`].
///
/// Accepts both the compact shape (`days` / `count`) and GitHub's
/// (`contributionDays` / `contributionCount`). Extra fields such as the
/// provider's own `color` are ignored.
pub fn normalize(username: &str, payload: Value) -> CalendarResult<CalendarDataset> {
    let raw: RawCalendar =
        serde_json::from_value(payload).map_err(|err| CalendarError::malformed(err.to_string()))?;

    let week_count = raw.weeks.len();
    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(week_count * DAYS_IN_WEEK);

    for (week_index, week) in raw.weeks.into_iter().enumerate() {
        for raw_day in week.days {
            let day = parse_day(raw_day, week_index)?;
            if !seen.insert(day.date) {
                return Err(CalendarError::malformed(format!(
                    "date {} appears more than once",
                    day.iso_date()
                )));
            }
            days.push(day);
        }
    }

    if days.is_empty() {
        return Err(CalendarError::EmptyDataset {
            username: username.to_string(),
        });
    }

    let dataset = CalendarDataset {
        days,
        total_count: raw.total_contributions,
        week_count,
    };
    // Provider total and summed daily counts may legitimately differ.
    tracing::debug!(
        username,
        days = dataset.days.len(),
        weeks = week_count,
        total = dataset.total_count,
        summed = dataset.summed_daily_counts(),
        "normalized contribution calendar"
    );

    Ok(dataset)
}

fn parse_day(raw: RawDay, week_index: usize) -> CalendarResult<DayRecord> {
    let date = Date::parse(&raw.date, format_description!("[year]-[month]-[day]")).map_err(
        |err| {
            CalendarError::malformed(format!(
                "week {week_index}: invalid date `{}` ({err})",
                raw.date
            ))
        },
    )?;

    let weekday = match raw.weekday {
        Some(weekday) if usize::from(weekday) < DAYS_IN_WEEK => weekday,
        Some(weekday) => {
            return Err(CalendarError::malformed(format!(
                "week {week_index}: weekday {weekday} out of range for {}",
                raw.date
            )))
        }
        None => date.weekday().number_days_from_sunday(),
    };

    Ok(DayRecord {
        count: raw.count,
        date,
        weekday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_weeks_in_order() {
        let payload = json!({
            "totalContributions": 9,
            "weeks": [
                { "days": [
                    { "count": 1, "date": "2024-01-06", "weekday": 6 }
                ]},
                { "days": [
                    { "count": 3, "date": "2024-01-07", "weekday": 0 },
                    { "count": 5, "date": "2024-01-08", "weekday": 1 }
                ]}
            ]
        });

        let dataset = normalize("octo", payload).unwrap();
        assert_eq!(dataset.week_count, 2);
        assert_eq!(dataset.total_count, 9);
        let counts: Vec<u32> = dataset.days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![1, 3, 5]);
    }

    #[test]
    fn accepts_github_field_names() {
        let payload = json!({
            "totalContributions": 2,
            "weeks": [{ "contributionDays": [
                { "contributionCount": 2, "date": "2024-03-01", "weekday": 5, "color": "#39d353" }
            ]}]
        });

        let dataset = normalize("octo", payload).unwrap();
        assert_eq!(dataset.days[0].count, 2);
        assert_eq!(dataset.days[0].weekday, 5);
    }

    #[test]
    fn missing_weekday_is_derived_from_date() {
        // 2024-01-01 was a Monday.
        let payload = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": 0, "date": "2024-01-01" }] }]
        });
        let dataset = normalize("octo", payload).unwrap();
        assert_eq!(dataset.days[0].weekday, 1);
    }

    #[test]
    fn provider_total_is_not_reconciled() {
        let payload = json!({
            "totalContributions": 40,
            "weeks": [{ "days": [{ "count": 2, "date": "2024-01-01", "weekday": 1 }] }]
        });
        let dataset = normalize("octo", payload).unwrap();
        assert_eq!(dataset.total_count, 40);
        assert_eq!(dataset.summed_daily_counts(), 2);
    }

    #[test]
    fn zero_days_is_empty_dataset() {
        let payload = json!({ "totalContributions": 0, "weeks": [{ "days": [] }] });
        assert_eq!(
            normalize("ghost", payload),
            Err(CalendarError::EmptyDataset {
                username: "ghost".into()
            })
        );
    }

    #[test]
    fn missing_count_or_date_is_malformed() {
        let no_count = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "date": "2024-01-01", "weekday": 1 }] }]
        });
        let no_date = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": 1, "weekday": 1 }] }]
        });
        assert!(matches!(
            normalize("octo", no_count),
            Err(CalendarError::MalformedPayload(_))
        ));
        assert!(matches!(
            normalize("octo", no_date),
            Err(CalendarError::MalformedPayload(_))
        ));
    }

    #[test]
    fn weeks_must_be_a_sequence() {
        let payload = json!({ "totalContributions": 0, "weeks": { "days": [] } });
        assert!(matches!(
            normalize("octo", payload),
            Err(CalendarError::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_bad_dates_weekdays_and_duplicates() {
        let bad_date = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": 0, "date": "01/02/2024" }] }]
        });
        let bad_weekday = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": 0, "date": "2024-01-01", "weekday": 7 }] }]
        });
        let duplicate = json!({
            "totalContributions": 0,
            "weeks": [
                { "days": [{ "count": 0, "date": "2024-01-01" }] },
                { "days": [{ "count": 1, "date": "2024-01-01" }] }
            ]
        });
        let negative = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": -1, "date": "2024-01-01" }] }]
        });

        for payload in [bad_date, bad_weekday, duplicate, negative] {
            assert!(matches!(
                normalize("octo", payload),
                Err(CalendarError::MalformedPayload(_))
            ));
        }
    }

    #[test]
    fn max_count_is_floored_at_one() {
        let payload = json!({
            "totalContributions": 0,
            "weeks": [{ "days": [{ "count": 0, "date": "2024-01-01" }] }]
        });
        assert_eq!(normalize("octo", payload).unwrap().max_count(), 1);
    }
}
