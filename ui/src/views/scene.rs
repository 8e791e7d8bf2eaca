//! Interactive scene: the projected bars as SVG, orbit controls and the hover tooltip.

use std::sync::Arc;

use dioxus::prelude::*;

use crate::core::format::{format_count, format_day};
use crate::core::{framing_for, CalendarDataset};
use crate::scene::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::scene::mesh::{points_attr, ProjectedBar};
use crate::scene::{
    build_frame, HoverState, OrbitCamera, SceneLabels, SceneSurface, Tooltip, Viewport,
};
use crate::t;

/// Radians of orbit per dragged pixel.
const ROTATE_SPEED: f32 = 0.005;
const ZOOM_STEP: f32 = 1.1;

/// Tooltip content plus the bar it belongs to. The pin position is looked up
/// in the current frame so it follows the bar while the camera orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverCard {
    pub tooltip: Tooltip,
    pub index: usize,
}

#[component]
pub fn ContributionScene(username: String, dataset: Arc<CalendarDataset>) -> Element {
    let framing = framing_for(Some(&dataset));
    let mut camera = use_signal(|| OrbitCamera::from_framing(&framing));
    let mut drag = use_signal(|| None::<(f64, f64)>);
    let mut hover = use_signal(|| None::<HoverCard>);
    let surface = try_use_context::<Signal<Option<SceneSurface>>>();

    let active_days = dataset.days.iter().filter(|day| day.is_active()).count();
    let total = format_count(dataset.total_count);
    let active = format_count(active_days as u64);
    let labels = SceneLabels {
        title: t!("scene-title", username = username.clone()),
        subtitle: t!("scene-subtitle", total = total, active = active),
    };

    {
        let username = username.clone();
        let dataset = dataset.clone();
        let labels = labels.clone();
        use_effect(move || {
            let mounted = SceneSurface {
                username: username.clone(),
                dataset: dataset.clone(),
                camera: camera(),
                labels: labels.clone(),
            };
            if let Some(mut surface) = surface {
                surface.set(Some(mounted));
            }
        });
    }
    use_drop(move || {
        if let Some(mut surface) = surface {
            surface.set(None);
        }
    });

    let scene = build_frame(&dataset, &camera(), Viewport::default());
    let tooltip = hover().and_then(|card| {
        let (x, y) = scene.anchor_of(card.index)?;
        let left = x / VIEWPORT_WIDTH * 100.0;
        let top = y / VIEWPORT_HEIGHT * 100.0;
        Some((
            format!("left: {left:.2}%; top: {top:.2}%;"),
            t!("tooltip-contributions", count = card.tooltip.count),
            format_day(card.tooltip.date),
        ))
    });
    let ground = scene.ground.as_deref().map(points_attr);
    let bars: Vec<(String, ProjectedBar)> = scene
        .bars
        .into_iter()
        .map(|bar| (bar.key(), bar))
        .collect();
    let label = scene.label.map(|label| {
        (
            label.x,
            label.y,
            label.font_px,
            label.y + label.font_px * 0.9,
            (label.font_px * 0.55).max(10.0),
        )
    });
    let view_box = format!("0 0 {VIEWPORT_WIDTH} {VIEWPORT_HEIGHT}");

    rsx! {
        div { class: "scene",
            svg {
                class: if drag().is_some() { "scene__canvas scene__canvas--dragging" } else { "scene__canvas" },
                view_box: "{view_box}",
                preserve_aspect_ratio: "xMidYMid meet",
                onmousedown: move |evt: MouseEvent| {
                    let point = evt.client_coordinates();
                    drag.set(Some((point.x, point.y)));
                },
                onmousemove: move |evt: MouseEvent| {
                    if let Some((x, y)) = drag() {
                        let point = evt.client_coordinates();
                        let dx = (point.x - x) as f32;
                        let dy = (point.y - y) as f32;
                        camera.write().rotate(-dx * ROTATE_SPEED, -dy * ROTATE_SPEED);
                        drag.set(Some((point.x, point.y)));
                    }
                },
                onmouseup: move |_| drag.set(None),
                onmouseleave: move |_| drag.set(None),
                onwheel: move |evt: WheelEvent| {
                    let delta = evt.delta().strip_units().y;
                    if delta != 0.0 {
                        camera.write().zoom(if delta > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP });
                    }
                },

                rect { class: "scene__backdrop", width: "100%", height: "100%" }
                if let Some(points) = ground {
                    polygon { class: "scene__ground", points: "{points}" }
                }
                for (key, bar) in bars {
                    ContributionBar {
                        key: "{key}",
                        bar,
                        on_hover: move |card: Option<HoverCard>| hover.set(card),
                    }
                }
                if let Some((x, y, size, sub_y, sub_size)) = label {
                    text {
                        class: "scene__title",
                        x: "{x}",
                        y: "{y}",
                        font_size: "{size}",
                        text_anchor: "middle",
                        "{labels.title}"
                    }
                    text {
                        class: "scene__subtitle",
                        x: "{x}",
                        y: "{sub_y}",
                        font_size: "{sub_size}",
                        text_anchor: "middle",
                        "{labels.subtitle}"
                    }
                }
            }

            if let Some((style, count, date)) = tooltip {
                div { class: "scene__tooltip", style: "{style}",
                    strong { "{count}" }
                    span { "{date}" }
                }
            }

            div { class: "scene__controls",
                span { class: "scene__hint", {t!("scene-hint")} }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| camera.set(OrbitCamera::from_framing(&framing)),
                    {t!("scene-reset")}
                }
            }
        }
    }
}

/// One day's bar. Hover state lives here, so entering or leaving a bar only
/// re-renders that bar.
#[component]
fn ContributionBar(bar: ProjectedBar, on_hover: EventHandler<Option<HoverCard>>) -> Element {
    let mut state = use_signal(HoverState::default);
    let base = state().apply(bar.color());
    let day = bar.instance.day;
    let index = bar.instance.index;

    rsx! {
        g {
            class: if state().is_hovered() { "scene__bar scene__bar--hovered" } else { "scene__bar" },
            "data-bucket": bar.instance.bar.bucket.as_str(),
            onmouseenter: move |_| {
                let next = state().pointer_enter();
                state.set(next);
                on_hover.call(next.tooltip(&day).map(|tooltip| HoverCard { tooltip, index }));
            },
            onmouseleave: move |_| {
                state.set(state().pointer_leave());
                on_hover.call(None);
            },
            for face in bar.faces.iter() {
                polygon { points: face.points_attr(), fill: face.fill(base) }
            }
        }
    }
}
