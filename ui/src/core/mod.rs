//! Data-to-geometry pipeline plus the plumbing around it.

pub mod calendar;
pub mod config;
pub mod encoding;
pub mod error;
pub mod format;
pub mod framing;
pub mod layout;
pub mod provider;
pub mod session;
pub mod stats;

pub use calendar::{normalize, CalendarDataset, DayRecord, DAYS_IN_WEEK};
pub use encoding::{encode, ColorBucket, EncodedBar, Rgb};
pub use error::{CalendarError, CalendarResult};
pub use framing::{frame, framing_for, CameraFraming};
pub use layout::{layout_cell, resolve_week_count, GridCell, Position3};
pub use session::{ContributionSession, RequestTicket, SessionPhase};
pub use stats::Stats;
