//! Standalone SVG document for a [`SceneFrame`], used by the snapshot exporter.

use std::fmt::Write;

use super::mesh::{points_attr, SceneFrame};

const BACKGROUND_TOP: &str = "#151923";
const BACKGROUND_BOTTOM: &str = "#0f1116";
const GROUND_FILL: &str = "#161b22";
const LABEL_FILL: &str = "#f5f7fb";
const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Text drawn above the grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneLabels {
    pub title: String,
    pub subtitle: String,
}

pub fn render_markup(frame: &SceneFrame, labels: &SceneLabels) -> String {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    let mut out = String::with_capacity(64 * 1024);

    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>\
         <defs><linearGradient id='bg' x1='0' y1='0' x2='0' y2='1'>\
         <stop offset='0%' stop-color='{BACKGROUND_TOP}'/><stop offset='100%' stop-color='{BACKGROUND_BOTTOM}'/>\
         </linearGradient></defs>\
         <rect width='{width}' height='{height}' fill='url(#bg)'/>"
    );

    if let Some(ground) = &frame.ground {
        let _ = write!(out, "<polygon points='{}' fill='{GROUND_FILL}'/>", points_attr(ground));
    }

    for bar in &frame.bars {
        let base = bar.color();
        let _ = write!(out, "<g data-date='{}'>", bar.key());
        for face in &bar.faces {
            let _ = write!(
                out,
                "<polygon points='{}' fill='{}'/>",
                face.points_attr(),
                face.fill(base)
            );
        }
        out.push_str("</g>");
    }

    if let Some(label) = frame.label {
        let subtitle_px = (label.font_px * 0.55).max(10.0);
        let _ = write!(
            out,
            "<text x='{x:.1}' y='{y:.1}' fill='{LABEL_FILL}' font-family='{FONT_FAMILY}' font-size='{size:.1}' font-weight='700' text-anchor='middle'>{title}</text>\
             <text x='{x:.1}' y='{sub_y:.1}' fill='{LABEL_FILL}' fill-opacity='0.72' font-family='{FONT_FAMILY}' font-size='{sub_size:.1}' text-anchor='middle'>{subtitle}</text>",
            x = label.x,
            y = label.y,
            size = label.font_px,
            title = escape_xml(&labels.title),
            sub_y = label.y + label.font_px * 0.9,
            sub_size = subtitle_px,
            subtitle = escape_xml(&labels.subtitle),
        );
    }

    out.push_str("</svg>");
    out
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
