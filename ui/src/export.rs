//! PNG snapshots of the mounted scene.
//!
//! Native builds rasterize the scene SVG with resvg and encode it with `png`.
//! The web build hands the same SVG to a canvas and decodes the resulting data
//! URL. Either way the bytes are then saved (native) or downloaded (web).

use dioxus::prelude::*;

use crate::core::{CalendarError, CalendarResult};
use crate::scene::SceneSurface;
use crate::t;

const SNAPSHOT_MIME: &str = "image/png";

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

/// What `export_snapshot` did with the captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing was mounted; no file was produced.
    Skipped,
    /// Written to disk at this path.
    Saved(String),
    /// Handed to the browser as a download.
    Downloaded,
}

pub fn snapshot_filename(username: &str) -> String {
    format!("{username}_contributions_3d.png")
}

/// Render the mounted surface to PNG bytes.
pub async fn capture_frame(surface: Option<&SceneSurface>) -> CalendarResult<Vec<u8>> {
    let surface = surface.ok_or(CalendarError::NoSurfaceMounted)?;
    let markup = surface.markup();

    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(&markup).await.map_err(CalendarError::Render)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_native(&markup).map_err(CalendarError::Render)
    }
}

/// Capture and deliver a snapshot. A missing surface is logged and skipped.
pub async fn export_snapshot(surface: Option<SceneSurface>) -> Result<ExportOutcome, String> {
    let bytes = match capture_frame(surface.as_ref()).await {
        Ok(bytes) => bytes,
        Err(CalendarError::NoSurfaceMounted) => {
            tracing::info!("snapshot requested with nothing mounted; skipping");
            return Ok(ExportOutcome::Skipped);
        }
        Err(err) => return Err(err.to_string()),
    };

    // `capture_frame` only succeeds with a surface.
    let username = surface.map(|s| s.username).unwrap_or_default();
    let filename = snapshot_filename(&username);
    let delivered = download_bytes(&filename, SNAPSHOT_MIME, bytes).await?;
    tracing::info!(%filename, saved = ?delivered, "snapshot exported");

    Ok(match delivered {
        Some(path) => ExportOutcome::Saved(path),
        None => ExportOutcome::Downloaded,
    })
}

#[component]
pub fn ExportButton(disabled: bool) -> Element {
    let surface = try_use_context::<Signal<Option<SceneSurface>>>();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "export__status".to_string(),
            format!("{}…", t!("export-working")),
        )),
        ExportStatus::Done(message) => Some((
            "export__status export__status--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "export__status export__status--error".to_string(),
            t!("export-failed", error = err.clone()),
        )),
    };

    let on_export = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working);
            let current = surface.and_then(|s| (*s.peek()).clone());
            spawn(async move {
                match export_snapshot(current).await {
                    Ok(ExportOutcome::Saved(path)) => {
                        status_signal.set(ExportStatus::Done(t!("export-saved", path = path)))
                    }
                    Ok(ExportOutcome::Downloaded) => {
                        status_signal.set(ExportStatus::Done(t!("export-downloaded")))
                    }
                    Ok(ExportOutcome::Skipped) => {
                        status_signal.set(ExportStatus::Done(t!("export-skipped")))
                    }
                    Err(err) => status_signal.set(ExportStatus::Error(err)),
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        div { class: "export",
            button {
                r#type: "button",
                class: "button button--ghost",
                disabled: disabled || busy(),
                onclick: on_export,
                {t!("export-button")}
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Commitscape", "Commitscape")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize_native(markup: &str) -> Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(markup, &options).map_err(|err| err.to_string())?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or("Snapshot has an empty canvas")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, size.width(), size.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| err.to_string())?
            .write_image_data(&rgba)
            .map_err(|err| err.to_string())?;
    }

    Ok(buffer)
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(markup: &str) -> Result<Vec<u8>, String> {
    use base64::Engine as _;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    use crate::scene::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(markup));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(VIEWPORT_WIDTH as u32);
    canvas.set_height(VIEWPORT_HEIGHT as u32);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type(SNAPSHOT_MIME)
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    base64::engine::general_purpose::STANDARD
        .decode(data_url.split(',').nth(1).ok_or("Malformed data URL")?)
        .map_err(|_| "PNG decode failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::{frame, normalize};
    use crate::scene::{OrbitCamera, SceneLabels};
    use serde_json::json;

    #[test]
    fn filename_follows_username() {
        assert_eq!(snapshot_filename("octocat"), "octocat_contributions_3d.png");
    }

    #[test]
    fn nothing_mounted_is_reported() {
        let outcome = futures::executor::block_on(capture_frame(None));
        assert_eq!(outcome, Err(CalendarError::NoSurfaceMounted));
    }

    #[test]
    fn export_without_surface_is_a_no_op() {
        let outcome = futures::executor::block_on(export_snapshot(None));
        assert_eq!(outcome, Ok(ExportOutcome::Skipped));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_capture_produces_png() {
        let dataset = normalize(
            "octo",
            json!({
                "totalContributions": 4,
                "weeks": [{ "days": [
                    { "count": 4, "date": "2024-01-01" },
                    { "count": 0, "date": "2024-01-02" }
                ]}]
            }),
        )
        .unwrap();
        let surface = SceneSurface {
            username: "octo".into(),
            camera: OrbitCamera::from_framing(&frame(dataset.week_count)),
            dataset: Arc::new(dataset),
            labels: SceneLabels::default(),
        };

        let bytes = futures::executor::block_on(capture_frame(Some(&surface))).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
