// Kabu Lookup Search Engine
// Main API that ranks catalog entries against a raw query

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::matcher::{PreparedQuery, TierMatcher};
use crate::types::{CatalogError, CatalogStats, InstrumentRecord, ScoredCandidate};

/// Score every catalog entry and return the best matches with their scores
///
/// Entries scoring 0 are dropped; the rest are sorted by descending score with
/// catalog order kept for equal scores, then truncated to `limit`.
pub fn rank<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<ScoredCandidate<'a>> {
    rank_with(&TierMatcher::new(), query, catalog, limit)
}

/// Return the best-matching instruments for a raw query
///
/// Never fails: an empty query, or one that matches nothing, yields an empty list.
///
/// # Example
/// ```
/// # use kabu_lookup::{search, Catalog, InstrumentRecord};
/// let catalog = Catalog::new(vec![
///     InstrumentRecord::new("7203.T", "トヨタ自動車").with_transliteration("toyota"),
///     InstrumentRecord::new("9984.T", "ソフトバンクグループ").with_transliteration("softbank"),
/// ]).unwrap();
///
/// let results = search("toyota", &catalog, 20);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].code, "7203.T");
/// ```
pub fn search<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<&'a InstrumentRecord> {
    rank(query, catalog, limit)
        .into_iter()
        .map(|candidate| candidate.instrument)
        .collect()
}

fn rank_with<'a>(
    matcher: &TierMatcher,
    query: &str,
    catalog: &'a Catalog,
    limit: usize,
) -> Vec<ScoredCandidate<'a>> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let prepared = PreparedQuery::new(query);

    let mut candidates: Vec<ScoredCandidate<'a>> = catalog
        .entries()
        .filter_map(|(record, entry)| {
            matcher
                .score(&prepared, entry)
                .map(|(tier, score)| ScoredCandidate {
                    instrument: record,
                    score,
                    tier,
                })
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    // Vec::sort_by is stable: equal scores keep catalog order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    let matched = candidates.len();
    candidates.truncate(limit);

    log::trace!(
        "query {:?} (normalized {:?}, numeric {}): {} matched, {} returned",
        prepared.raw,
        prepared.normalized,
        prepared.numeric,
        matched,
        candidates.len()
    );

    candidates
}

/// Instrument lookup engine over an injected, read-only catalog
///
/// Combines:
/// - The catalog with precomputed comparison forms
/// - The tier matcher (first-match-wins cascade)
/// - Search settings (default limit)
#[derive(Debug, Clone)]
pub struct InstrumentSearch {
    /// Catalog searched by every query
    catalog: Catalog,

    /// Tier table walker
    matcher: TierMatcher,

    /// Search settings
    config: SearchConfig,
}

impl InstrumentSearch {
    /// Create an engine over a catalog with default settings
    pub fn new(catalog: Catalog) -> Self {
        let config = SearchConfig::default().with_market_suffix(catalog.market_suffix());
        Self::with_config(catalog, config)
    }

    /// Create an engine with explicit settings
    ///
    /// The catalog's market suffix is authoritative for bare codes; a
    /// differing suffix in `config` is logged and replaced.
    pub fn with_config(catalog: Catalog, mut config: SearchConfig) -> Self {
        if config.market_suffix != catalog.market_suffix() {
            log::warn!(
                "Config market suffix '{}' differs from catalog suffix '{}'; using catalog",
                config.market_suffix,
                catalog.market_suffix()
            );
            config.market_suffix = catalog.market_suffix().to_string();
        }

        Self {
            catalog,
            matcher: TierMatcher::new(),
            config,
        }
    }

    /// Build the catalog from records using the config's market suffix
    pub fn from_records(records: Vec<InstrumentRecord>, config: SearchConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::with_suffix(records, &config.market_suffix)?;
        Ok(Self::with_config(catalog, config))
    }

    /// Engine over the embedded sample catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::builtin()?))
    }

    /// Search with the configured default limit
    pub fn search(&self, query: &str) -> Vec<&InstrumentRecord> {
        self.search_limit(query, self.config.default_limit)
    }

    /// Search with an explicit limit
    pub fn search_limit(&self, query: &str, limit: usize) -> Vec<&InstrumentRecord> {
        self.search_scored(query, limit)
            .into_iter()
            .map(|candidate| candidate.instrument)
            .collect()
    }

    /// Search keeping each candidate's score and winning tier
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<ScoredCandidate<'_>> {
        rank_with(&self.matcher, query, &self.catalog, limit)
    }

    /// The catalog being searched
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Active settings
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics about the current catalog
    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }
}
