//! Job manifests
//!
//! A JSON description of one complete job — ordered items, options, and
//! the output destination — for callers that drive the pipeline without an
//! interactive item list. This is library-level job input; argument
//! parsing stays with the caller.

use crate::catalog::validate_items;
use crate::options::GenerateOptions;
use crate::pipeline::{JobCallbacks, generate};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobManifest {
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub options: GenerateOptions,
    pub output_pdf: PathBuf,
}

impl JobManifest {
    /// Load a manifest from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("failed to parse job manifest: {e}")))
    }
}

/// Load, validate, and run a manifest end to end with no callbacks attached.
pub async fn run_manifest(path: impl AsRef<Path>) -> Result<()> {
    let manifest = JobManifest::load(path).await?;
    let items = validate_items(&manifest.items)?;
    generate(
        items,
        manifest.options,
        manifest.output_pdf,
        JobCallbacks::default(),
    )
    .await
}
