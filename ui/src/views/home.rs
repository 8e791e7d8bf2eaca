use dioxus::prelude::*;

use crate::core::config::ViewerConfig;

use super::explorer::Explorer;

/// Landing route: opens on the configured initial user.
#[component]
pub fn Home() -> Element {
    // Re-render when the platform's language signal changes.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());
    let username = use_hook(|| ViewerConfig::load().initial_username);

    rsx! {
        Explorer { key: "{username}", username: username.clone() }
    }
}

/// `/u/:username` deep link.
#[component]
pub fn Profile(username: String) -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    rsx! {
        Explorer { key: "{username}", username: username.clone() }
    }
}
