//! HTTP API handlers for plotsort-web

pub mod files;
pub mod index;
pub mod save;

pub use files::serve_file;
pub use index::serve_index;
pub use save::save_selection;
