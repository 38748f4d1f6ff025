// Kabu Lookup Tier Table
// Ordered match tiers evaluated first-match-wins for every catalog entry

/// The tier that produced a candidate's score
///
/// Variants are listed in evaluation order. The two numeric tiers are the
/// only ones evaluated for digit-only queries; the rest apply to every other
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    /// Bare code starts with the digit query
    NumericPrefix,
    /// Bare code contains the digit query elsewhere
    NumericContains,
    /// Code equals the query, ignoring case
    CodeExact,
    /// Normalized name equals the normalized query
    NameExact,
    /// Normalized reading equals the normalized query
    ReadingExact,
    /// Normalized transliteration equals the normalized query
    TransliterationExact,
    /// Code starts with the query, ignoring case
    CodePrefix,
    /// Normalized reading starts with the normalized query
    ReadingPrefix,
    /// Normalized name starts with the normalized query
    NamePrefix,
    /// Normalized transliteration starts with the normalized query
    TransliterationPrefix,
    /// Bare code contains the raw query
    BareCodeContains,
    /// Normalized name contains the normalized query
    NameContains,
    /// Normalized reading contains the normalized query
    ReadingContains,
    /// Normalized transliteration contains the normalized query
    TransliterationContains,
    /// Code contains the query, ignoring case
    CodeContains,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatchTier::NumericPrefix => "numeric-prefix",
            MatchTier::NumericContains => "numeric-contains",
            MatchTier::CodeExact => "code-exact",
            MatchTier::NameExact => "name-exact",
            MatchTier::ReadingExact => "reading-exact",
            MatchTier::TransliterationExact => "transliteration-exact",
            MatchTier::CodePrefix => "code-prefix",
            MatchTier::ReadingPrefix => "reading-prefix",
            MatchTier::NamePrefix => "name-prefix",
            MatchTier::TransliterationPrefix => "transliteration-prefix",
            MatchTier::BareCodeContains => "bare-code-contains",
            MatchTier::NameContains => "name-contains",
            MatchTier::ReadingContains => "reading-contains",
            MatchTier::TransliterationContains => "transliteration-contains",
            MatchTier::CodeContains => "code-contains",
        };
        f.write_str(label)
    }
}

/// Which representation of an entry a rule compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Lower-cased code vs lower-cased raw query
    Code,
    /// Code without market suffix vs raw query
    BareCode,
    /// Normalized display name vs normalized query
    Name,
    /// Normalized phonetic reading vs normalized query
    Reading,
    /// Normalized transliteration vs normalized query
    Transliteration,
}

impl Field {
    /// Whether the field is compared against the normalized query form
    pub fn uses_normalized_query(self) -> bool {
        matches!(self, Field::Name | Field::Reading | Field::Transliteration)
    }
}

/// How the field must relate to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equals,
    StartsWith,
    Contains,
}

impl Relation {
    /// Test the relation between a field value and a query value
    #[inline]
    pub fn holds(self, field: &str, query: &str) -> bool {
        match self {
            Relation::Equals => field == query,
            Relation::StartsWith => field.starts_with(query),
            Relation::Contains => field.contains(query),
        }
    }
}

/// Score formula for a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    /// Fixed score regardless of field length
    Flat(u32),
    /// `base - length(field)`: shorter, more specific fields rank higher
    LengthPenalized(u32),
}

impl Scoring {
    /// Compute the score for a matched field of `field_len` characters
    ///
    /// Never returns 0 so a match is never mistaken for "no match".
    #[inline]
    pub fn score(self, field_len: u32) -> u32 {
        match self {
            Scoring::Flat(base) => base,
            Scoring::LengthPenalized(base) => base.saturating_sub(field_len).max(1),
        }
    }
}

/// One row of the tier table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRule {
    pub tier: MatchTier,
    pub field: Field,
    pub relation: Relation,
    pub scoring: Scoring,
}

impl TierRule {
    const fn new(tier: MatchTier, field: Field, relation: Relation, scoring: Scoring) -> Self {
        Self {
            tier,
            field,
            relation,
            scoring,
        }
    }
}

/// Cascade used instead of the general one when the raw query is all digits
pub const NUMERIC_TIERS: [TierRule; 2] = [
    TierRule::new(
        MatchTier::NumericPrefix,
        Field::BareCode,
        Relation::StartsWith,
        Scoring::LengthPenalized(1000),
    ),
    TierRule::new(
        MatchTier::NumericContains,
        Field::BareCode,
        Relation::Contains,
        Scoring::LengthPenalized(500),
    ),
];

/// General cascade, highest priority first
pub const GENERAL_TIERS: [TierRule; 13] = [
    TierRule::new(MatchTier::CodeExact, Field::Code, Relation::Equals, Scoring::Flat(10000)),
    TierRule::new(MatchTier::NameExact, Field::Name, Relation::Equals, Scoring::Flat(9000)),
    TierRule::new(MatchTier::ReadingExact, Field::Reading, Relation::Equals, Scoring::Flat(8500)),
    TierRule::new(
        MatchTier::TransliterationExact,
        Field::Transliteration,
        Relation::Equals,
        Scoring::Flat(8000),
    ),
    TierRule::new(
        MatchTier::CodePrefix,
        Field::Code,
        Relation::StartsWith,
        Scoring::LengthPenalized(8000),
    ),
    TierRule::new(
        MatchTier::ReadingPrefix,
        Field::Reading,
        Relation::StartsWith,
        Scoring::LengthPenalized(7500),
    ),
    TierRule::new(
        MatchTier::NamePrefix,
        Field::Name,
        Relation::StartsWith,
        Scoring::LengthPenalized(7000),
    ),
    TierRule::new(
        MatchTier::TransliterationPrefix,
        Field::Transliteration,
        Relation::StartsWith,
        Scoring::LengthPenalized(7000),
    ),
    TierRule::new(
        MatchTier::BareCodeContains,
        Field::BareCode,
        Relation::Contains,
        Scoring::LengthPenalized(6000),
    ),
    TierRule::new(
        MatchTier::NameContains,
        Field::Name,
        Relation::Contains,
        Scoring::LengthPenalized(5000),
    ),
    TierRule::new(
        MatchTier::ReadingContains,
        Field::Reading,
        Relation::Contains,
        Scoring::LengthPenalized(4000),
    ),
    TierRule::new(
        MatchTier::TransliterationContains,
        Field::Transliteration,
        Relation::Contains,
        Scoring::LengthPenalized(3000),
    ),
    TierRule::new(MatchTier::CodeContains, Field::Code, Relation::Contains, Scoring::Flat(2000)),
];
