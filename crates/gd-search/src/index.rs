//! Weighted fuzzy search over the icon catalog.
//!
//! The index is built once per catalog load and never mutated afterwards;
//! queries are pure reads and safe to run concurrently. Three fields are
//! searched per entry — name, tags, categories — with fixed weights, so a
//! name match outranks a tag or category match of equal quality.

use crate::catalog::IconEntry;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::fmt;

/// Tunable matching configuration.
///
/// `threshold` bounds allowed dissimilarity on a 0–1 scale (0 = perfect
/// matches only). The default 0.2 is strict-ish: it tolerates substring
/// queries and dropped-letter typos while excluding unrelated entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub threshold: f64,
    pub name_weight: f64,
    pub tag_weight: f64,
    pub category_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            name_weight: 4.0,
            tag_weight: 1.0,
            category_weight: 1.0,
        }
    }
}

/// Immutable search index over a loaded catalog.
///
/// Queries never mutate the index; share it behind an `Arc` for
/// concurrent readers.
pub struct SearchIndex {
    entries: Vec<IconEntry>,
    matcher: SkimMatcherV2,
    config: SearchConfig,
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SearchIndex {
    /// Build an index over `catalog` with the default configuration.
    #[must_use]
    pub fn build(catalog: Vec<IconEntry>) -> Self {
        Self::with_config(catalog, SearchConfig::default())
    }

    /// Build an index with an explicit configuration.
    #[must_use]
    pub fn with_config(catalog: Vec<IconEntry>, config: SearchConfig) -> Self {
        log::debug!("built icon index over {} entries", catalog.len());
        Self {
            entries: catalog,
            matcher: SkimMatcherV2::default().ignore_case(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog in load order.
    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    /// Rank catalog entries against `text`.
    ///
    /// The query is trimmed and case-folded first. A blank query bypasses
    /// ranking entirely and returns the whole catalog in load order — the
    /// "show me everything" fast path, not a degenerate ranking.
    ///
    /// Multi-word queries AND their words: every word must match at least
    /// one field of an entry for the entry to appear.
    pub fn query(&self, text: &str) -> Vec<IconEntry> {
        let query = text.trim().to_lowercase();
        if query.is_empty() {
            return self.entries.clone();
        }

        // Each token's self-match score is the ceiling its field scores
        // are normalized against.
        let tokens: Vec<(&str, f64)> = query
            .split_whitespace()
            .map(|token| {
                let ceiling = self.matcher.fuzzy_match(token, token).unwrap_or(0).max(1);
                (token, ceiling as f64)
            })
            .collect();

        let mut ranked: Vec<(f64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(pos, entry)| self.score_entry(entry, &tokens).map(|score| (score, pos)))
            .collect();

        // Highest score first; catalog order breaks ties.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
            .into_iter()
            .map(|(_, pos)| self.entries[pos].clone())
            .collect()
    }

    /// Score one entry against all tokens; `None` if any token fails to
    /// land in any field.
    fn score_entry(&self, entry: &IconEntry, tokens: &[(&str, f64)]) -> Option<f64> {
        let mut total = 0.0;
        for &(token, ceiling) in tokens {
            total += self.score_token(entry, token, ceiling)?;
        }
        Some(total)
    }

    /// Best weighted field score for one token, or `None` if no field
    /// comes within the threshold.
    fn score_token(&self, entry: &IconEntry, token: &str, ceiling: f64) -> Option<f64> {
        let c = self.config;
        let mut best: Option<f64> = None;

        let name = self
            .field_similarity(&entry.name, token, ceiling)
            .map(|s| s * c.name_weight);
        let tags = entry
            .tags
            .iter()
            .filter_map(|t| self.field_similarity(t, token, ceiling))
            .map(|s| s * c.tag_weight);
        let categories = entry
            .categories
            .iter()
            .filter_map(|cat| self.field_similarity(cat, token, ceiling))
            .map(|s| s * c.category_weight);

        for score in name.into_iter().chain(tags).chain(categories) {
            if best.is_none_or(|b| score > b) {
                best = Some(score);
            }
        }
        best
    }

    /// Similarity of `token` against one field, gated by the threshold.
    ///
    /// Dissimilarity is the shortfall of the match score relative to the
    /// token's self-match ceiling. Equal match quality on a shorter field
    /// ranks higher: the similarity folds in how much of the field the
    /// token covers, so `home` beats `homework` for the query `home`.
    fn field_similarity(&self, field: &str, token: &str, ceiling: f64) -> Option<f64> {
        let raw = self.matcher.fuzzy_match(field, token)? as f64;
        let dissimilarity = (1.0 - raw / ceiling).clamp(0.0, 1.0);
        if dissimilarity > self.config.threshold {
            return None;
        }

        let coverage =
            (token.chars().count() as f64 / field.chars().count().max(1) as f64).min(1.0);
        Some((1.0 - dissimilarity) * (0.5 + 0.5 * coverage))
    }
}
