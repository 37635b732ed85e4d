//! Promptloom - Prompt Wildcard Completion Studio
//!
//! A terminal prompt editor with inline autocompletion for prompt-expansion
//! references:
//! - `__name__` wildcard file references
//! - `<[tag]>` tag aggregation references
//! - `<lora:name:1.0>` LoRA references
//!
//! # Architecture
//!
//! The completion core is three small, pure pieces:
//! - **trigger**: classifies the text before the caret into at most one
//!   completion context
//! - **rank**: orders a candidate set against the partial query with a
//!   tiered fuzzy scorer
//! - **popup**: the suggestion list state machine (selection, wrap-around
//!   navigation, commit splicing)
//!
//! Around it sit the candidate **catalog** (atomic snapshots of the three
//! candidate sets), the **provider** (filesystem scans and JSON snapshots),
//! and the **editor**/TUI surface that wires keystrokes to the core.
//!
//! # Example
//!
//! ```
//! use promptloom::{detect, rank, CandidateKind};
//!
//! let buffer = "a cat, __col";
//! let ctx = detect(buffer, buffer.len()).expect("inside a wildcard token");
//! assert_eq!(ctx.kind, CandidateKind::File);
//!
//! let candidates = vec!["colors".to_string(), "cool".to_string()];
//! let ranked = rank(&ctx.query, &candidates);
//! assert_eq!(ranked[0], "colors");
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod popup;
pub mod provider;
pub mod rank;
pub mod terminal;
pub mod trigger;

// Re-export commonly used types
pub use app::StudioApp;
pub use catalog::{CandidateCatalog, CandidateKind, CatalogData};
pub use config::StudioConfig;
pub use editor::PromptEditor;
pub use error::{Result, StudioError};
pub use popup::{Completion, SuggestionList, SUGGESTION_CAP};
pub use provider::CandidateProvider;
pub use rank::{rank, score, ScoredMatch};
pub use trigger::{detect, CompletionContext};
