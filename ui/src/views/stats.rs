use dioxus::prelude::*;

use crate::core::format::{format_average, format_count, format_percent};
use crate::core::Stats;
use crate::t;

#[component]
pub fn StatsPanel(stats: Stats, total_count: u64) -> Element {
    let active = format!(
        "{} / {}",
        format_count(stats.active_days as u64),
        format_count(stats.total_days as u64)
    );

    rsx! {
        dl { class: "stats",
            StatTile { label: t!("stats-total"), value: format_count(total_count) }
            StatTile { label: t!("stats-active-days"), value: active }
            StatTile { label: t!("stats-max-daily"), value: format_count(u64::from(stats.max_daily_count)) }
            StatTile { label: t!("stats-active-rate"), value: format_percent(stats.active_rate_percent) }
            StatTile { label: t!("stats-average"), value: format_average(stats.average_daily) }
        }
    }
}

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div { class: "stats__tile",
            dt { class: "stats__label", "{label}" }
            dd { class: "stats__value", "{value}" }
        }
    }
}
