//! Shared UI crate for Commitscape: the calendar pipeline, the render surface
//! and the views both launchers mount.

pub mod core;
pub mod export;
pub mod i18n;
pub mod scene;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

#[cfg(test)]
mod tests;
