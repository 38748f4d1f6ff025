// Kabu Lookup Type Definitions
// Core types for catalog records, ranking results and load errors

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::tiers::MatchTier;

/// A single listed instrument as loaded from the catalog
///
/// Records are immutable once the catalog is built. Field aliases accept the
/// converter output (`name`, `kana`, `romaji`) as well as the long names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Exchange ticker in canonical case (e.g., "7203.T")
    pub code: String,

    /// Primary display name in native script (e.g., "トヨタ自動車")
    #[serde(alias = "name")]
    pub display_name: String,

    /// Phonetic reading of the name (e.g., "とよたじどうしゃ")
    #[serde(
        default,
        alias = "kana",
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub phonetic_reading: Option<String>,

    /// Latin-alphabet rendering of the name (e.g., "toyotajidousha")
    #[serde(
        default,
        alias = "romaji",
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub transliteration: Option<String>,
}

impl InstrumentRecord {
    /// Create a record with only the mandatory fields
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            phonetic_reading: None,
            transliteration: None,
        }
    }

    /// Set the phonetic reading (empty strings count as absent)
    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.phonetic_reading = Some(reading.into()).filter(|r| !r.is_empty());
        self
    }

    /// Set the transliteration (empty strings count as absent)
    pub fn with_transliteration(mut self, transliteration: impl Into<String>) -> Self {
        self.transliteration = Some(transliteration.into()).filter(|t| !t.is_empty());
        self
    }

    /// Code with the market suffix removed ("7203.T" → "7203")
    pub fn bare_code(&self, suffix: &str) -> &str {
        crate::normalize::strip_code_suffix_with(&self.code, suffix)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A catalog entry paired with the score it earned for one query
///
/// Borrowed from the catalog; discarded after sorting and truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    /// The matched record
    pub instrument: &'a InstrumentRecord,

    /// Ranking score (always > 0 for a candidate)
    pub score: u32,

    /// Tier that produced the score
    pub tier: MatchTier,
}

/// Summary counts for a loaded catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    /// Number of records
    pub total: usize,
    /// Records carrying a phonetic reading
    pub with_reading: usize,
    /// Records carrying a transliteration
    pub with_transliteration: usize,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} instruments ({} with reading, {} with transliteration)",
            self.total, self.with_reading, self.with_transliteration
        )
    }
}

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate instrument code '{code}' (first seen at index {first}, again at {second})")]
    DuplicateCode {
        code: String,
        first: usize,
        second: usize,
    },

    #[error("Instrument at index {index} has an empty code")]
    EmptyCode { index: usize },

    #[error("Unsupported catalog format '{extension}': expected .json or .js")]
    UnsupportedFormat { extension: String },

    #[error("No instrument entries found in catalog source")]
    NoEntries,
}
