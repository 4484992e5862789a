pub mod annotations;
pub mod constants;
mod layout;
mod navigation;
mod notes;
mod options;
mod position;
pub mod preload;
mod session;
pub mod storage;
mod types;
pub mod url;
mod view;
mod zoom;

pub use annotations::{AnnotationStore, StickyLayer, StickyNote, parse_snapshot};
pub use layout::*;
pub use navigation::*;
pub use notes::NotesPad;
pub use options::*;
pub use preload::{
    FileFetcher, ImageFetcher, ImageLoader, ImageTracker, LoadOutcome, LoadState, image_path,
    priority_images,
};
pub use session::*;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use types::*;
pub use view::*;
pub use zoom::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Please enter a page number between 1 and {max} (got {requested})")]
    PageOutOfRange { requested: i64, max: u32 },
    #[error("Position {0} is not a content page")]
    NotContentPage(u32),
    #[error("Failed to load {dependency}. {hint}")]
    MissingDependency { dependency: String, hint: String },
    #[error("Failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },
    #[error("Image load timeout: {path}")]
    ImageTimeout { path: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
