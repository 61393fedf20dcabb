//! # plotsort common library
//!
//! Domain types and filesystem logic shared by the plotsort web service:
//! - Label vocabulary and classification maps
//! - Session identifiers
//! - Image set enumeration
//! - Selection file persistence
//! - Viewer rendering model
//! - Configuration loading

pub mod classification;
pub mod config;
pub mod error;
pub mod images;
pub mod labels;
pub mod selection;
pub mod session;
pub mod viewer;

pub use classification::{ClassificationMap, SaveRequest};
pub use config::{Config, TomlConfig};
pub use error::{Error, Result};
pub use images::ImageSet;
pub use labels::LabelSet;
pub use selection::SelectionStore;
pub use session::SessionId;
pub use viewer::Viewer;
