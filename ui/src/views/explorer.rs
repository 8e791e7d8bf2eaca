use dioxus::prelude::*;

use crate::core::provider;
use crate::core::{CalendarError, ContributionSession, SessionPhase};
use crate::export::ExportButton;
use crate::scene::SceneSurface;
use crate::t;

use super::scene::ContributionScene;
use super::stats::StatsPanel;

/// Start fetching `username`. The session hands out a ticket so an older
/// request finishing late cannot overwrite this one.
fn start_load(mut session: Signal<ContributionSession>, username: String) {
    let ticket = session.write().begin(&username);
    spawn(async move {
        let outcome = provider::load_calendar(&ticket.username).await;
        session.write().resolve(ticket, outcome);
    });
}

fn error_message(error: &CalendarError) -> String {
    match error {
        CalendarError::Transport(_) => t!("error-transport"),
        CalendarError::Provider(detail) => t!("error-provider", detail = detail.clone()),
        CalendarError::MalformedPayload(_) => t!("error-malformed"),
        CalendarError::EmptyDataset { username } => t!("error-empty", username = username.clone()),
        CalendarError::NoSurfaceMounted | CalendarError::Render(_) => error.to_string(),
    }
}

/// Only failures that might go away on their own get a retry button; the rest
/// would fail the same way for the same username.
fn retry_offered(error: &CalendarError) -> bool {
    error.is_retryable()
}

#[component]
pub fn Explorer(username: String) -> Element {
    let session = use_signal(ContributionSession::default);
    let mut draft = use_signal(|| username.clone());
    use_context_provider(|| Signal::new(None::<SceneSurface>));

    {
        let initial = username.clone();
        use_effect(move || start_load(session, initial.clone()));
    }

    let current = session();
    let loading = current.is_loading();
    let has_dataset = current.dataset().is_some();
    let generation = current.generation();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let requested = draft().trim().to_string();
        if requested.is_empty() || session.peek().is_loading() {
            return;
        }
        start_load(session, requested);
    };

    let body = match current.phase().clone() {
        SessionPhase::Idle => rsx! {
            p { class: "explorer__placeholder", {t!("explorer-empty")} }
        },
        SessionPhase::Loading { username } => rsx! {
            div { class: "explorer__placeholder explorer__placeholder--loading",
                span { class: "spinner", aria_hidden: "true" }
                {t!("explorer-loading", username = username)}
            }
        },
        SessionPhase::Failed { username, error } => {
            let message = error_message(&error);
            let kind = error.kind();
            let retry = retry_offered(&error);
            rsx! {
                div { class: "alert alert--{kind}", role: "alert",
                    p { class: "alert__message", "{message}" }
                    if retry {
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| start_load(session, username.clone()),
                            {t!("error-retry")}
                        }
                    }
                }
            }
        }
        SessionPhase::Ready { username, dataset, stats } => {
            let total_count = dataset.total_count;
            rsx! {
                StatsPanel { stats, total_count }
                ContributionScene { key: "{generation}", username, dataset }
            }
        }
    };

    rsx! {
        section { class: "page explorer",
            header { class: "explorer__header",
                h1 { {t!("explorer-title")} }
                p { class: "explorer__intro", {t!("explorer-intro")} }
            }

            form { class: "explorer__form", onsubmit: on_submit,
                label {
                    class: "visually-hidden",
                    r#for: "username-input",
                    {t!("explorer-username-label")}
                }
                input {
                    id: "username-input",
                    class: "explorer__input",
                    r#type: "text",
                    autocomplete: "off",
                    spellcheck: "false",
                    placeholder: t!("explorer-username-placeholder"),
                    value: "{draft}",
                    disabled: loading,
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: loading || draft().trim().is_empty(),
                    {t!("explorer-load")}
                }
                ExportButton { disabled: loading || !has_dataset }
            }

            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_only_for_transport_failures() {
        assert!(retry_offered(&CalendarError::Transport("timed out".into())));
        assert!(!retry_offered(&CalendarError::Provider(
            "Could not resolve to a User with the login of 'ghost'".into()
        )));
        assert!(!retry_offered(&CalendarError::malformed("missing weeks")));
        assert!(!retry_offered(&CalendarError::EmptyDataset {
            username: "ghost".into()
        }));
    }
}
