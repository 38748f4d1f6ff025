//! # Kabu Lookup: Instrument Search Engine
//!
//! Resolves a partial, possibly mixed-script query into a ranked shortlist of
//! listed instruments (ticker + display name + reading + transliteration).
//!
//! ## Query Handling
//!
//! 1. **Normalization** - NFKC, lowercase, whitespace and prolonged-sound marks removed
//!    - `"ｿﾌﾄﾊﾞﾝｸ"`, `"ソフトバンク"` and `"ソフト バンク"` compare equal
//! 2. **Numeric mode** - digit-only queries match bare codes only
//!    - `search("720")` - `7203.T` (prefix) ranks above `1720.T` (contains)
//! 3. **Tier cascade** - every other query walks a 13-tier table, first match wins
//!    - exact code > exact name/reading/transliteration > prefixes > substrings
//!
//! Within a tier, shorter fields score higher (`base - length`); equal scores
//! keep catalog order.
//!
//! ## Example Usage
//!
//! ```
//! use kabu_lookup::{Catalog, InstrumentRecord, InstrumentSearch};
//!
//! let catalog = Catalog::new(vec![
//!     InstrumentRecord::new("7203.T", "トヨタ自動車")
//!         .with_reading("とよたじどうしゃ")
//!         .with_transliteration("toyota"),
//!     InstrumentRecord::new("9984.T", "ソフトバンクグループ")
//!         .with_transliteration("softbank"),
//! ])?;
//!
//! let engine = InstrumentSearch::new(catalog);
//!
//! assert_eq!(engine.search("ﾄﾖﾀ")[0].code, "7203.T");
//! assert_eq!(engine.search("984")[0].code, "9984.T");
//! assert!(engine.search("xyz").is_empty());
//! # Ok::<(), kabu_lookup::CatalogError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Normalizer** - Canonical comparison form for queries and catalog fields
//! - **Tier Table** - Ordered rules: field, relation and score formula
//! - **Tier Matcher** - First-match-wins walk over the table for one entry
//! - **Catalog** - Immutable records with precomputed comparison forms
//! - **InstrumentSearch API** - Main entry point combining all components

pub mod catalog;
pub mod config;
pub mod data;
pub mod matcher;
pub mod normalize;
pub mod search;
pub mod tiers;
pub mod types;

// Re-export main types and functions for convenience
pub use catalog::Catalog;
pub use config::SearchConfig;
pub use data::{DataInfo, DataLoader};
pub use matcher::{PreparedEntry, PreparedQuery, TierMatcher};
pub use normalize::{normalize, strip_code_suffix};
pub use search::{rank, search, InstrumentSearch};
pub use tiers::{MatchTier, TierRule};
pub use types::{CatalogError, CatalogStats, InstrumentRecord, ScoredCandidate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
