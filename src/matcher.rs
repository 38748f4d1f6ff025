// Kabu Lookup Tier Matcher
// Scores one prepared catalog entry against one prepared query

use crate::normalize::{char_len, is_numeric_query, normalize, strip_code_suffix_with};
use crate::tiers::{Field, MatchTier, TierRule, GENERAL_TIERS, NUMERIC_TIERS};
use crate::types::InstrumentRecord;

/// Comparison forms of one catalog record, computed once at catalog build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEntry {
    /// Code lower-cased for case-insensitive code tiers
    pub code_lower: String,
    /// Code with the market suffix removed, original case
    pub bare_code: String,
    /// Normalized display name
    pub name: String,
    /// Normalized phonetic reading, if the record has one
    pub reading: Option<String>,
    /// Normalized transliteration, if the record has one
    pub transliteration: Option<String>,
}

impl PreparedEntry {
    /// Build the comparison forms for a record
    pub fn from_record(record: &InstrumentRecord, market_suffix: &str) -> Self {
        Self {
            code_lower: record.code.to_lowercase(),
            bare_code: strip_code_suffix_with(&record.code, market_suffix).to_string(),
            name: normalize(&record.display_name),
            reading: record.phonetic_reading.as_deref().map(normalize),
            transliteration: record.transliteration.as_deref().map(normalize),
        }
    }

    /// Field value for a rule, or None when the optional field is absent
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Code => Some(self.code_lower.as_str()),
            Field::BareCode => Some(self.bare_code.as_str()),
            Field::Name => Some(self.name.as_str()),
            Field::Reading => self.reading.as_deref(),
            Field::Transliteration => self.transliteration.as_deref(),
        }
    }
}

/// A raw query and the derived forms the tier table compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    /// Query exactly as typed
    pub raw: String,
    /// Raw query lower-cased, for code tiers
    pub raw_lower: String,
    /// Normalized query, for name/reading/transliteration tiers
    pub normalized: String,
    /// All ASCII digits: only the numeric rule applies
    pub numeric: bool,
}

impl PreparedQuery {
    /// Derive every query form from the raw input
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            raw_lower: raw.to_lowercase(),
            normalized: normalize(raw),
            numeric: is_numeric_query(raw),
        }
    }

    /// True when there is nothing to search for
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Query form a rule's field is compared against
    ///
    /// Returns None for normalized-field rules when normalization leaves
    /// nothing, so a whitespace-only query cannot prefix-match every entry.
    fn form_for(&self, field: Field) -> Option<&str> {
        match field {
            f if f.uses_normalized_query() => Some(self.normalized.as_str()).filter(|q| !q.is_empty()),
            Field::BareCode => Some(self.raw.as_str()),
            _ => Some(self.raw_lower.as_str()),
        }
    }
}

/// Walks the tier table top-to-bottom with first-match-wins semantics
#[derive(Debug, Clone, Copy)]
pub struct TierMatcher {
    general: &'static [TierRule],
    numeric: &'static [TierRule],
}

impl TierMatcher {
    /// Matcher over the standard tier table
    pub const fn new() -> Self {
        Self {
            general: &GENERAL_TIERS,
            numeric: &NUMERIC_TIERS,
        }
    }

    /// Score an entry, returning the winning tier and its score
    ///
    /// Digit-only queries evaluate only the numeric bare-code rules; all other
    /// queries evaluate the general cascade. Absent optional fields skip their
    /// tiers.
    pub fn score(&self, query: &PreparedQuery, entry: &PreparedEntry) -> Option<(MatchTier, u32)> {
        if query.is_empty() {
            return None;
        }

        let rules = if query.numeric { self.numeric } else { self.general };
        rules.iter().find_map(|rule| Self::apply(rule, query, entry))
    }

    #[inline]
    fn apply(rule: &TierRule, query: &PreparedQuery, entry: &PreparedEntry) -> Option<(MatchTier, u32)> {
        let value = entry.field(rule.field)?;
        let needle = query.form_for(rule.field)?;

        if rule.relation.holds(value, needle) {
            Some((rule.tier, rule.scoring.score(char_len(value))))
        } else {
            None
        }
    }
}

impl Default for TierMatcher {
    fn default() -> Self {
        Self::new()
    }
}
