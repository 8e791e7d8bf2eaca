//! Visual encoding: (count, dataset max) → bar height and colour bucket.

/// Height of a bar for a day without activity.
pub const EMPTY_HEIGHT: f32 = 0.1;
/// Visible floor for any non-zero day.
pub const BASE_HEIGHT: f32 = 0.2;
/// Extra height a day at the dataset maximum receives.
pub const HEIGHT_RANGE: f32 = 4.0;
/// Colour normalisation cap so a single outlier does not wash out the rest.
pub const COLOR_NORMALIZATION_CAP: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorBucket {
    Empty,
    Low,
    Medium,
    High,
    Max,
}

impl ColorBucket {
    pub fn color(self) -> Rgb {
        match self {
            ColorBucket::Empty => Rgb::new(0x2d, 0x33, 0x3b),
            ColorBucket::Low => Rgb::new(0x39, 0xd3, 0x53),
            ColorBucket::Medium => Rgb::new(0x26, 0xa6, 0x41),
            ColorBucket::High => Rgb::new(0x00, 0x6d, 0x32),
            ColorBucket::Max => Rgb::new(0x0e, 0x44, 0x29),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorBucket::Empty => "empty",
            ColorBucket::Low => "low",
            ColorBucket::Medium => "medium",
            ColorBucket::High => "high",
            ColorBucket::Max => "max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel, saturating at 255.
    pub fn scaled(self, factor: f32) -> Self {
        let channel = |value: u8| (value as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedBar {
    pub height: f32,
    pub bucket: ColorBucket,
}

pub fn encode(count: u32, max_count: u32) -> EncodedBar {
    EncodedBar {
        height: bar_height(count, max_count),
        bucket: color_bucket(count, max_count),
    }
}

pub fn bar_height(count: u32, max_count: u32) -> f32 {
    if count == 0 {
        return EMPTY_HEIGHT;
    }
    BASE_HEIGHT + (count as f32 / max_count.max(1) as f32) * HEIGHT_RANGE
}

pub fn color_bucket(count: u32, max_count: u32) -> ColorBucket {
    if count == 0 {
        return ColorBucket::Empty;
    }

    let denominator = max_count.max(1).min(COLOR_NORMALIZATION_CAP);
    let percentage = count as f64 / denominator as f64;

    if percentage <= 0.15 {
        ColorBucket::Low
    } else if percentage <= 0.35 {
        ColorBucket::Medium
    } else if percentage <= 0.60 {
        ColorBucket::High
    } else {
        ColorBucket::Max
    }
}
