//! Viewer page rendering
//!
//! The page template and script are embedded at compile time. The server
//! fills in the initial state (image, hint, title, label form, preload
//! images) so the first paint is correct before the script runs, and embeds
//! the data the script needs as a JSON block.

use plotsort_common::{ClassificationMap, ImageSet, LabelSet, Viewer};
use serde::Serialize;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// 1x1 transparent GIF used when there is nothing to show
const BLANK_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// Data handed to the page script
#[derive(Debug, Serialize)]
pub struct InitialData<'a> {
    pub filenames: &'a ImageSet,
    pub keys: &'a LabelSet,
    /// Only present when a prior selection file exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imageselection: Option<&'a ClassificationMap>,
    pub session: &'a str,
    pub start: usize,
}

/// Render the viewer page
///
/// `has_prior_state` controls whether `imageselection` is embedded; the
/// viewer's map is used either way for the server-rendered hint.
pub fn render_index(viewer: &Viewer, has_prior_state: bool, session: &str) -> String {
    let data = InitialData {
        filenames: viewer.images(),
        keys: viewer.labels(),
        imageselection: has_prior_state.then(|| viewer.selection()),
        session,
        start: viewer.index().unwrap_or(0),
    };

    let image_src = viewer
        .current()
        .map(encode_path)
        .unwrap_or_else(|| BLANK_IMAGE.to_string());

    let title = escape_html(&viewer.title());
    let image_src = escape_html(&image_src);
    let preload = render_preload(viewer);
    let label_form = render_label_form(viewer);
    let hint = escape_html(&viewer.hint());
    let initial_data = script_json(&data);

    fill_template(
        INDEX_HTML,
        &[
            ("TITLE", title.as_str()),
            ("IMAGE_SRC", image_src.as_str()),
            ("PRELOAD_IMAGES", preload.as_str()),
            ("LABEL_FORM", label_form.as_str()),
            ("HINT", hint.as_str()),
            ("INITIAL_DATA", initial_data.as_str()),
            ("APP_JS", APP_JS),
        ],
    )
}

/// Substitute `{{NAME}}` placeholders in one pass
///
/// Substituted values are not rescanned, so file names that happen to look
/// like placeholders come through unchanged.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

fn render_preload(viewer: &Viewer) -> String {
    viewer
        .preload()
        .into_iter()
        .map(|name| {
            format!(
                "<img class=\"preload\" src=\"{}\" alt=\"\" aria-hidden=\"true\" />",
                escape_html(&encode_path(name))
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Radio buttons mirroring the label vocabulary, current label checked
fn render_label_form(viewer: &Viewer) -> String {
    let current = viewer.current_label();
    viewer
        .labels()
        .iter()
        .map(|(key, label)| {
            let id = format!("key_{}", key);
            format!(
                "<input type=\"radio\" name=\"classification\" id=\"{id}\" value=\"{value}\"{checked} />\
                 <label for=\"{id}\">{label} ({value})</label>",
                id = escape_html(&id),
                value = escape_html(key),
                label = escape_html(label),
                checked = if current == Some(key) { " checked" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

/// JSON safe to place inside a `<script>` element
fn script_json<T: Serialize>(value: &T) -> String {
    // Serializing borrowed maps and strings cannot fail
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a relative file path for use as a URL, keeping `/`
///
/// Matches `split('/').map(encodeURIComponent).join('/')` in the page script.
pub fn encode_path(path: &str) -> String {
    const KEEP: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) || byte == b'/' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
