//! Candidate provider
//!
//! Builds catalog snapshots from the filesystem: wildcard list files
//! (`.txt`), wildcard tag files (`.yaml`/`.yml`) and LoRA model files. A
//! snapshot can also be loaded from a JSON dump in the catalog wire shape.
//!
//! Provider failures never surface to the editor: a missing directory or an
//! unreadable file degrades to an empty or partial set with a logged
//! warning, and suggestions for that set simply don't appear.

use crate::catalog::{CandidateCatalog, CatalogData};
use crate::error::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions recognized as LoRA models
const LORA_EXTENSIONS: &[&str] = &["safetensors", "ckpt", "pt"];

/// Builds catalog snapshots from configured sources
#[derive(Debug, Clone, Default)]
pub struct CandidateProvider {
    wildcards_dir: Option<PathBuf>,
    loras_dir: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    max_depth: usize,
}

impl CandidateProvider {
    /// Create a provider with the default scan depth
    pub fn new() -> Self {
        Self {
            max_depth: 4,
            ..Default::default()
        }
    }

    /// Set the wildcard directory (`.txt` lists and `.yaml` tag files)
    pub fn wildcards_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.wildcards_dir = Some(dir.into());
        self
    }

    /// Set the LoRA model directory
    pub fn loras_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.loras_dir = Some(dir.into());
        self
    }

    /// Set a JSON snapshot file; when present it takes precedence over
    /// directory scanning
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Bound the recursive directory walk
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Build a catalog snapshot from the configured sources.
    ///
    /// Never fails: every error degrades to an empty set.
    pub fn build(&self) -> CatalogData {
        if let Some(path) = &self.snapshot_path {
            match load_snapshot(path) {
                Ok(data) => {
                    debug!(
                        files = data.files.len(),
                        tags = data.tags.len(),
                        loras = data.loras.len(),
                        "loaded catalog snapshot"
                    );
                    return data;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load catalog snapshot");
                    return CatalogData::default();
                }
            }
        }

        let mut data = CatalogData::default();

        if let Some(dir) = &self.wildcards_dir {
            let (files, tags) = scan_wildcards(dir, self.max_depth);
            data.files = files;
            data.tags = tags;
        }
        if let Some(dir) = &self.loras_dir {
            data.loras = scan_loras(dir, self.max_depth);
        }

        debug!(
            files = data.files.len(),
            tags = data.tags.len(),
            loras = data.loras.len(),
            "built catalog from filesystem"
        );
        data
    }

    /// Rebuild and atomically swap the catalog snapshot
    pub fn refresh(&self, catalog: &CandidateCatalog) {
        catalog.replace(self.build());
    }
}

/// Load a catalog snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<CatalogData> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Scan a wildcard directory.
///
/// Every `.txt` and `.yaml`/`.yml` file contributes its extension-less
/// relative path (`/`-joined) to the files list; tag files additionally
/// contribute the values of their entries' `Tags:` lists. Files are sorted;
/// tags are sorted and deduplicated.
fn scan_wildcards(dir: &Path, max_depth: usize) -> (Vec<String>, Vec<String>) {
    let mut files = Vec::new();
    let mut tags = BTreeSet::new();

    for path in walk_directory(dir, max_depth) {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        match ext {
            "txt" => {
                if let Some(name) = relative_stem(dir, &path) {
                    files.push(name);
                }
            }
            "yaml" | "yml" => {
                if let Some(name) = relative_stem(dir, &path) {
                    files.push(name);
                }
                collect_tags(&path, &mut tags);
            }
            _ => {}
        }
    }

    files.sort();
    (files, tags.into_iter().collect())
}

/// Scan a LoRA directory for model file stems
fn scan_loras(dir: &Path, max_depth: usize) -> Vec<String> {
    let mut loras: Vec<String> = walk_directory(dir, max_depth)
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| LORA_EXTENSIONS.contains(&ext))
        })
        .filter_map(|path| relative_stem(dir, &path))
        .collect();

    loras.sort();
    loras
}

/// Walk a directory recursively, skipping hidden entries
fn walk_directory(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %root.display(), error = %e, "cannot read candidate directory");
            return files;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if let Some(name) = path.file_name() {
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
        }

        if path.is_file() {
            files.push(path);
        } else if path.is_dir() && max_depth > 0 {
            files.append(&mut walk_directory(&path, max_depth - 1));
        }
    }

    files
}

/// Extension-less path relative to `root`, joined with `/`
fn relative_stem(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.with_extension("");
    let parts: Vec<String> = stem
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Pull every `Tags:` list value out of a wildcard tag file.
///
/// The expected shape is a top-level mapping of entry name to an entry
/// mapping that may carry a `Tags` sequence. Anything else is ignored.
fn collect_tags(path: &Path, tags: &mut BTreeSet<String>) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot read wildcard tag file");
            return;
        }
    };

    let doc: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "malformed wildcard tag file");
            return;
        }
    };

    let Some(entries) = doc.as_mapping() else {
        return;
    };
    for entry in entries.values() {
        let Some(list) = entry.get("Tags").and_then(|t| t.as_sequence()) else {
            continue;
        };
        for tag in list {
            if let Some(text) = tag.as_str() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    tags.insert(trimmed.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_wildcards_txt_and_yaml() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "colors.txt", "Red\nBlue\nGreen\n");
        write(temp.path(), "animals/cats.txt", "tabby\n");
        write(
            temp.path(),
            "styles.yaml",
            "Crimson Fire:\n  Prompts:\n    - \"crimson red\"\n  Tags:\n    - color\n    - red\nOcean:\n  Tags:\n    - blue\n    - color\n",
        );

        let (files, tags) = scan_wildcards(temp.path(), 4);
        assert_eq!(files, ["animals/cats", "colors", "styles"]);
        assert_eq!(tags, ["blue", "color", "red"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_unrelated_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".hidden.txt", "nope\n");
        write(temp.path(), "notes.md", "not a wildcard\n");
        write(temp.path(), "real.txt", "yes\n");

        let (files, tags) = scan_wildcards(temp.path(), 4);
        assert_eq!(files, ["real"]);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_malformed_yaml_degrades_to_no_tags() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "broken.yaml", ": : :\n\t- bad");

        let (files, tags) = scan_wildcards(temp.path(), 4);
        // The file itself is still a selectable wildcard name
        assert_eq!(files, ["broken"]);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_scan_loras() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "anime_v1.safetensors", "");
        write(temp.path(), "detail/add_detail.pt", "");
        write(temp.path(), "readme.txt", "not a model");

        let loras = scan_loras(temp.path(), 4);
        assert_eq!(loras, ["anime_v1", "detail/add_detail"]);
    }

    #[test]
    fn test_missing_directories_yield_empty_catalog() {
        let provider = CandidateProvider::new()
            .wildcards_dir("/nonexistent/wildcards")
            .loras_dir("/nonexistent/loras");
        let data = provider.build();
        assert!(data.is_empty());
    }

    #[test]
    fn test_snapshot_takes_precedence() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "snapshot.json",
            r#"{"files": ["colors"], "tags": ["red"], "loras": ["anime_v1"]}"#,
        );
        write(temp.path(), "wildcards/other.txt", "ignored\n");

        let provider = CandidateProvider::new()
            .wildcards_dir(temp.path().join("wildcards"))
            .snapshot_path(temp.path().join("snapshot.json"));
        let data = provider.build();
        assert_eq!(data.files, ["colors"]);
        assert_eq!(data.loras, ["anime_v1"]);
    }

    #[test]
    fn test_malformed_snapshot_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "snapshot.json", "not json at all");

        let provider = CandidateProvider::new().snapshot_path(temp.path().join("snapshot.json"));
        assert!(provider.build().is_empty());
    }

    #[test]
    fn test_refresh_swaps_catalog() {
        let temp = TempDir::new().unwrap();
        let catalog = CandidateCatalog::default();
        write(temp.path(), "colors.txt", "Red\n");

        let provider = CandidateProvider::new().wildcards_dir(temp.path());
        provider.refresh(&catalog);
        assert_eq!(catalog.snapshot().files, ["colors"]);

        write(temp.path(), "animals.txt", "cat\n");
        provider.refresh(&catalog);
        assert_eq!(catalog.snapshot().files, ["animals", "colors"]);
    }
}
