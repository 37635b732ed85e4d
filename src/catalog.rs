//! Candidate catalog
//!
//! Holds the three completion candidate sets (wildcard files, tags, LoRA
//! names) as a read-only snapshot. A refresh replaces the snapshot
//! wholesale; readers always observe either the old or the new catalog,
//! never a partial update.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Which candidate set a completion context draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Wildcard file reference (`__name__`)
    File,
    /// Tag aggregation reference (`<[tag]>`)
    Tag,
    /// LoRA reference (`<lora:name:1.0>`)
    Lora,
}

/// One catalog snapshot: three ordered candidate lists
///
/// Mirrors the wire payload served by the wildcard data endpoint, so a
/// snapshot can be loaded directly from a JSON dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    /// Wildcard file names (relative path without extension, `/`-joined)
    #[serde(default)]
    pub files: Vec<String>,

    /// Tag names aggregated from wildcard tag files
    #[serde(default)]
    pub tags: Vec<String>,

    /// LoRA model names
    #[serde(default)]
    pub loras: Vec<String>,
}

impl CatalogData {
    /// Candidate list for a context kind
    pub fn candidates(&self, kind: CandidateKind) -> &[String] {
        match kind {
            CandidateKind::File => &self.files,
            CandidateKind::Tag => &self.tags,
            CandidateKind::Lora => &self.loras,
        }
    }

    /// True if no set has any candidates
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.tags.is_empty() && self.loras.is_empty()
    }

    /// Total candidate count across all sets
    pub fn len(&self) -> usize {
        self.files.len() + self.tags.len() + self.loras.len()
    }
}

/// Shared handle to the current catalog snapshot
///
/// Cloning the handle is cheap; `snapshot()` pins the current data so a
/// concurrent `replace()` cannot change a list mid-read.
#[derive(Clone, Default)]
pub struct CandidateCatalog {
    inner: Arc<RwLock<Arc<CatalogData>>>,
}

impl CandidateCatalog {
    /// Create a catalog from initial data
    pub fn new(data: CatalogData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(data))),
        }
    }

    /// Pin the current snapshot
    pub fn snapshot(&self) -> Arc<CatalogData> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically swap in a new snapshot
    pub fn replace(&self, data: CatalogData) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(data);
    }
}
