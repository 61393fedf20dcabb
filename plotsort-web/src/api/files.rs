//! Static file serving from the image root

use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::ApiError;
use crate::AppState;

/// GET /<path>
///
/// Serves any file below the image root. `ServeDir` rejects paths that try
/// to leave the root. Methods other than GET/HEAD answer 404.
pub async fn serve_file(State(state): State<AppState>, request: Request) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return ApiError::NotFound(format!("{} {}", request.method(), request.uri().path()))
            .into_response();
    }

    match ServeDir::new(&state.config.image_root)
        .append_index_html_on_directories(false)
        .oneshot(request)
        .await
    {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
