//! Per-bar hover state. Each bar owns one of these; nothing here reaches back
//! into layout, encoding, or the fetch.

use time::Date;

use crate::core::{DayRecord, Rgb};

/// Extra brightness a hovered bar receives, as a fraction of its own colour.
pub const EMISSIVE_INTENSITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

impl HoverState {
    pub fn pointer_enter(self) -> Self {
        HoverState::Hovered
    }

    pub fn pointer_leave(self) -> Self {
        HoverState::Idle
    }

    pub fn is_hovered(self) -> bool {
        self == HoverState::Hovered
    }

    /// Tooltip content, only while hovered.
    pub fn tooltip(self, day: &DayRecord) -> Option<Tooltip> {
        self.is_hovered().then(|| Tooltip::for_day(day))
    }

    /// Base colour plus the emissive highlight when hovered.
    pub fn apply(self, color: Rgb) -> Rgb {
        match self {
            HoverState::Idle => color,
            HoverState::Hovered => color.scaled(1.0 + EMISSIVE_INTENSITY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    pub count: u32,
    pub date: Date,
}

impl Tooltip {
    pub fn for_day(day: &DayRecord) -> Self {
        Self {
            count: day.count,
            date: day.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day() -> DayRecord {
        DayRecord {
            count: 4,
            date: date!(2024 - 02 - 29),
            weekday: 4,
        }
    }

    #[test]
    fn enter_and_leave_toggle_state() {
        let state = HoverState::default();
        assert!(!state.is_hovered());
        let hovered = state.pointer_enter();
        assert!(hovered.is_hovered());
        assert_eq!(hovered.pointer_leave(), HoverState::Idle);
    }

    #[test]
    fn tooltip_only_while_hovered() {
        assert_eq!(HoverState::Idle.tooltip(&day()), None);
        let tooltip = HoverState::Hovered.tooltip(&day()).unwrap();
        assert_eq!(tooltip.count, 4);
        assert_eq!(tooltip.date, date!(2024 - 02 - 29));
    }

    #[test]
    fn highlight_brightens_colour() {
        let base = Rgb::new(0x26, 0xa6, 0x41);
        assert_eq!(HoverState::Idle.apply(base), base);
        let lit = HoverState::Hovered.apply(base);
        assert!(lit.r > base.r && lit.g > base.g && lit.b > base.b);
    }
}
