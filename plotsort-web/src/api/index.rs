//! Viewer page
//!
//! Every request re-reads the image set and the latest selection file.

use axum::{
    extract::{Query, State},
    response::Html,
};
use plotsort_common::{session, Viewer};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::page;
use crate::AppState;

/// Query parameters for the viewer page
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// File to open first
    pub f: Option<String>,
}

/// GET /
///
/// Serves the viewer with the current file list, label vocabulary and the
/// most recent prior selection embedded. A malformed selection file fails
/// the request.
pub async fn serve_index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> ApiResult<Html<String>> {
    let config = state.config.clone();

    let (images, prior) = tokio::task::spawn_blocking(move || {
        let images = config.scan_images()?;
        let prior = config.selection_store().load_latest()?;
        Ok::<_, plotsort_common::Error>((images, prior))
    })
    .await??;

    debug!(
        "Serving viewer: {} files, prior state: {}",
        images.len(),
        prior.is_some()
    );

    let has_prior_state = prior.is_some();
    let viewer = Viewer::new(
        images,
        state.config.labels.clone(),
        prior.unwrap_or_default(),
    )
    .starting_at(query.f.as_deref());

    let session = session::new_page_session_id();
    Ok(Html(page::render_index(&viewer, has_prior_state, &session)))
}
