//! Tiered fuzzy ranking
//!
//! Turns a candidate set and a partial query into an ordered result. Scoring
//! is tiered rather than edit-distance based: exact equality outranks a
//! prefix match, which outranks a substring match, which outranks a bare
//! in-order subsequence match. Within the subsequence tier, candidates whose
//! matched characters cluster earlier score higher.
//!
//! The tier boundaries and tie behavior are part of the observable contract:
//! the sort is stable, so equally scored candidates keep their input order,
//! and the result is never capped here. Display capping happens at render
//! time so the caller can report the true match count.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Candidate equals the query exactly
pub const SCORE_EXACT: f32 = 100.0;
/// Candidate starts with the query
pub const SCORE_PREFIX: f32 = 75.0;
/// Candidate contains the query as a substring
pub const SCORE_SUBSTRING: f32 = 50.0;
/// Candidate contains the query as an in-order subsequence; a position
/// bonus in `[0, 1)` is added on top
pub const SCORE_SUBSEQUENCE: f32 = 10.0;

/// A scored candidate, produced fresh on every keystroke
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// The candidate string, unmodified
    pub item: String,
    /// Tier score, higher is better
    pub score: f32,
}

/// Score one candidate against a non-empty query, case-insensitively.
///
/// Returns `None` when the candidate does not even contain the query as an
/// in-order subsequence; such candidates are excluded entirely.
pub fn score(query: &str, candidate: &str) -> Option<f32> {
    let q = query.to_lowercase();
    let c = candidate.to_lowercase();

    if c == q {
        return Some(SCORE_EXACT);
    }
    if c.starts_with(&q) {
        return Some(SCORE_PREFIX);
    }
    if c.contains(&q) {
        return Some(SCORE_SUBSTRING);
    }

    subsequence_bonus(&q, &c).map(|bonus| SCORE_SUBSEQUENCE + bonus)
}

/// Greedy left-to-right subsequence scan.
///
/// Each matched character earns `100 - position` (floored at zero, counted
/// in characters), and the total is scaled by the query length so the bonus
/// stays below `1.0` and the subsequence tier never collides with the
/// substring tier.
fn subsequence_bonus(query: &str, candidate: &str) -> Option<f32> {
    let chars: Vec<char> = candidate.chars().collect();
    let mut pos = 0usize;
    let mut reward = 0usize;
    let mut query_len = 0usize;

    'query: for qc in query.chars() {
        query_len += 1;
        while pos < chars.len() {
            let matched = chars[pos] == qc;
            pos += 1;
            if matched {
                reward += 100usize.saturating_sub(pos - 1);
                continue 'query;
            }
        }
        return None;
    }

    if query_len == 0 {
        return None;
    }
    Some((reward as f32 / (100.0 * query_len as f32)).min(0.999))
}

/// Rank candidates against a query.
///
/// An empty or whitespace-only query returns every candidate sorted
/// lexicographically ascending (case-insensitive collation) — the "browse
/// everything" fallback. Otherwise candidates are scored, non-matches are
/// dropped, and the rest are stably sorted by descending score. Duplicate
/// candidates keep their first occurrence.
pub fn rank(query: &str, candidates: &[String]) -> Vec<String> {
    if query.trim().is_empty() {
        let mut all = candidates.to_vec();
        all.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        all.dedup();
        return all;
    }

    let mut seen = HashSet::new();
    let mut scored: Vec<ScoredMatch> = candidates
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .filter_map(|c| {
            score(query, c).map(|s| ScoredMatch {
                item: c.clone(),
                score: s,
            })
        })
        .collect();

    // Stable: ties keep candidate input order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|m| m.item).collect()
}
