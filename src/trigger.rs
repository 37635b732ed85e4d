//! Completion trigger detection
//!
//! Classifies the text immediately before the caret into at most one
//! completion context. Each context kind is an independent anchored pattern;
//! the patterns are evaluated in a fixed priority order (LoRA before
//! file/tag) so overlapping openers resolve deterministically.
//!
//! Detection is a pure function of the buffer and caret. Characters at or
//! after the caret are never consulted.

use crate::catalog::CandidateKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<lora:` opener followed by anything but a closing `>`, anchored at the
/// caret. Once the closing delimiter is typed the context is closed.
static LORA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<lora:([^>]*)$").expect("lora pattern is valid"));

/// `__` or `<[` opener followed by word characters, slashes, hyphens or
/// spaces, anchored at the caret. The opener decides File vs Tag.
static FILE_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(__|<\[)([\w/\- ]*)$").expect("file/tag pattern is valid"));

/// An active completion context at the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// Which candidate set this context draws from
    pub kind: CandidateKind,

    /// The literal opener substring that introduced the context
    pub opener: String,

    /// Raw substring typed since the opener
    pub query: String,

    /// Byte offset where the opener begins (splice-from position)
    pub start: usize,

    /// Caret byte offset captured at trigger time (splice-to position)
    pub caret: usize,
}

impl CompletionContext {
    /// Fully-formed replacement text for a selected candidate
    pub fn replacement(&self, selected: &str) -> String {
        match self.kind {
            CandidateKind::File => format!("__{selected}__"),
            CandidateKind::Tag => format!("<[{selected}]>"),
            CandidateKind::Lora => format!("<lora:{selected}:1.0>"),
        }
    }
}

/// Detect the completion context at `caret`, if any.
///
/// `caret` is a byte offset into `buffer`. An out-of-range caret, a caret
/// that is not on a character boundary, and a caret at position 0 all yield
/// `None` rather than an error.
pub fn detect(buffer: &str, caret: usize) -> Option<CompletionContext> {
    if caret == 0 || caret > buffer.len() || !buffer.is_char_boundary(caret) {
        return None;
    }
    let head = &buffer[..caret];

    if let Some(caps) = LORA_PATTERN.captures(head) {
        let whole = caps.get(0).expect("capture 0 always present");
        return Some(CompletionContext {
            kind: CandidateKind::Lora,
            opener: "<lora:".to_string(),
            query: caps[1].to_string(),
            start: whole.start(),
            caret,
        });
    }

    if let Some(caps) = FILE_TAG_PATTERN.captures(head) {
        let whole = caps.get(0).expect("capture 0 always present");
        let opener = caps[1].to_string();
        let kind = if opener == "__" {
            CandidateKind::File
        } else {
            CandidateKind::Tag
        };
        return Some(CompletionContext {
            kind,
            opener,
            query: caps[2].to_string(),
            start: whole.start(),
            caret,
        });
    }

    None
}
