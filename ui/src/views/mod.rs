mod explorer;
mod home;
mod scene;
mod stats;

pub use explorer::Explorer;
pub use home::{Home, Profile};
pub use scene::{ContributionScene, HoverCard};
pub use stats::StatsPanel;
