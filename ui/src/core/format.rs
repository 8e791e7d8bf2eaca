//! Formatting helpers for presenting counts, rates, and dates.

use time::{macros::format_description, Date};

/// Group thousands with commas: `12345` → `12,345`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_percent(value: u32) -> String {
    format!("{value}%")
}

/// Tooltip date, e.g. `Jan 1, 2024`.
pub fn format_day(date: Date) -> String {
    date.format(&format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn formats_tooltip_dates() {
        assert_eq!(format_day(date!(2024 - 01 - 01)), "Jan 1, 2024");
        assert_eq!(format_day(date!(2023 - 12 - 25)), "Dec 25, 2023");
        assert!(format_day(date!(2024 - 02 - 29)).is_ascii());
    }

    #[test]
    fn formats_rates() {
        assert_eq!(format_percent(14), "14%");
        assert_eq!(format_average(0.714), "0.71");
    }
}
