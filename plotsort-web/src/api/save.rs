//! Selection persistence endpoint

use axum::{body::Bytes, extract::State};
use plotsort_common::{SaveRequest, SessionId};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /save
///
/// Body: `{"session": string, "imageselection": {filename: labelKey}}`.
/// Writes the map to `<selections>/<sanitized session>.json`, replacing the
/// previous content for that session. Answers `OK` as plain text.
///
/// Malformed bodies and unusable session ids answer 400 and write nothing.
/// Entries for files outside the current image set, or with a label key that
/// is no longer configured, are dropped. Saves are serialized through
/// `AppState::save_lock` so the last request to arrive is the one on disk.
pub async fn save_selection(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<&'static str> {
    let request: SaveRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            "Rejected save payload ({}): {}",
            e,
            String::from_utf8_lossy(&body)
        );
        ApiError::BadRequest(format!("Malformed save request: {}", e))
    })?;

    let session = SessionId::sanitize(&request.session)?;
    let mut selection = request.imageselection;
    let unlabeled = selection.retain_labels(&state.config.labels);
    if !unlabeled.is_empty() {
        warn!(
            "Dropped {} entries with unconfigured labels: {:?}",
            unlabeled.len(),
            unlabeled
        );
    }

    let _guard = state.save_lock.lock().await;
    let config = state.config.clone();
    let (path, dropped) = tokio::task::spawn_blocking(move || {
        let images = config.scan_images()?;
        let dropped = selection.retain_images(&images);
        let store = config.selection_store();
        let path = store.save(&session, &selection)?;
        info!(
            "Saved {} ({} entries): {}",
            session.file_name(),
            selection.len(),
            serde_json::to_string(&selection)?
        );
        Ok::<_, plotsort_common::Error>((path, dropped))
    })
    .await??;

    if !dropped.is_empty() {
        warn!(
            "Dropped {} entries for files not in the image set: {:?}",
            dropped.len(),
            dropped
        );
    }
    debug!("Selection written to {}", path.display());

    Ok("OK")
}
