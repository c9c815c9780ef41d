use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("HEIC (.heic/.heif) images are not supported; convert them to JPG or PNG first")]
    HeicUnsupported,
    #[error("not a PDF document: {0}")]
    NotAPdf(String),
    #[error("unsupported image format (JPG and PNG only): {0}")]
    UnsupportedImage(String),
    #[error("cannot open document: {0}")]
    CannotOpen(String),
    #[error("password-protected documents are not supported; remove the protection and retry")]
    Protected,
    #[error("invalid output path: {0}")]
    InvalidOutput(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("generation canceled")]
    Canceled,
    #[error("generation failed")]
    Generation,
    #[error("render error: {0}")]
    Render(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl BookletError {
    /// Whether the message is safe to show to an end user verbatim.
    /// Everything else is redacted to [`BookletError::Generation`] at the
    /// pipeline boundary after being logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BookletError::FileNotFound(_)
                | BookletError::HeicUnsupported
                | BookletError::NotAPdf(_)
                | BookletError::UnsupportedImage(_)
                | BookletError::CannotOpen(_)
                | BookletError::Protected
                | BookletError::InvalidOutput(_)
                | BookletError::Config(_)
                | BookletError::Canceled
                | BookletError::Generation
        )
    }
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// The closed set of source unit kinds a job may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ItemKind {
    /// A multi-page PDF document
    Document,
    /// A single raster image (JPG or PNG)
    Image,
    /// An explicit blank page
    Blank,
}

/// An unvalidated entry as supplied by the caller (UI list row, manifest line).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RawItem {
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<PathBuf>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: String,
}

/// A validated source unit. Immutable for the duration of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    /// Source path; always `None` for blank items.
    pub location: Option<PathBuf>,
    pub display_name: String,
}

/// One physically renderable logical page.
///
/// `item_index: None` marks a synthetic blank appended by the padding policy;
/// user-placed blank items keep their real index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    pub item_index: Option<usize>,
    /// Page within a Document item (0-based); `None` for images and blanks.
    pub page_index: Option<usize>,
    pub is_blank: bool,
}

impl PageRef {
    /// Synthetic blank used for padding and the cover-preview offset.
    pub fn blank() -> Self {
        Self {
            item_index: None,
            page_index: None,
            is_blank: true,
        }
    }
}

/// One physical output page: a left and a right half-page slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    pub left: Option<PageRef>,
    pub right: Option<PageRef>,
}
