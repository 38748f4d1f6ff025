// Kabu Lookup Catalog
// Immutable instrument catalog with precomputed comparison forms

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::data::DataLoader;
use crate::matcher::PreparedEntry;
use crate::normalize::DEFAULT_MARKET_SUFFIX;
use crate::types::{CatalogError, CatalogStats, InstrumentRecord};

/// Read-only instrument catalog
///
/// Built once and injected into the search engine. Record order is preserved
/// and acts as the tie-break key when two entries score the same.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Records in catalog order
    records: Vec<InstrumentRecord>,

    /// Comparison forms, index-aligned with `records`
    prepared: Vec<PreparedEntry>,

    /// Lower-cased code → index into `records`
    by_code: FxHashMap<String, usize>,

    /// Market suffix stripped to obtain bare codes
    market_suffix: String,
}

impl Catalog {
    /// Build a catalog of Tokyo-listed (`.T`) instruments
    ///
    /// # Errors
    /// `EmptyCode` for a blank code, `DuplicateCode` when two records share a
    /// code ignoring case.
    ///
    /// # Example
    /// ```
    /// # use kabu_lookup::{Catalog, InstrumentRecord};
    /// let catalog = Catalog::new(vec![
    ///     InstrumentRecord::new("7203.T", "トヨタ自動車").with_transliteration("toyota"),
    /// ]).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn new(records: Vec<InstrumentRecord>) -> Result<Self, CatalogError> {
        Self::with_suffix(records, DEFAULT_MARKET_SUFFIX)
    }

    /// Build a catalog whose codes carry a different market suffix
    pub fn with_suffix(records: Vec<InstrumentRecord>, market_suffix: &str) -> Result<Self, CatalogError> {
        let mut by_code: FxHashMap<String, usize> = FxHashMap::default();
        by_code.reserve(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode { index });
            }
            let key = record.code.to_lowercase();
            if let Some(&first) = by_code.get(&key) {
                return Err(CatalogError::DuplicateCode {
                    code: record.code.clone(),
                    first,
                    second: index,
                });
            }
            by_code.insert(key, index);
        }

        let prepared = records
            .iter()
            .map(|record| PreparedEntry::from_record(record, market_suffix))
            .collect();

        log::debug!(
            "Catalog built: {} instruments, market suffix '{}'",
            records.len(),
            market_suffix
        );

        Ok(Self {
            records,
            prepared,
            by_code,
            market_suffix: market_suffix.to_string(),
        })
    }

    /// Load the sample catalog embedded in the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::builtin_with_suffix(DEFAULT_MARKET_SUFFIX)
    }

    /// Load the embedded sample catalog, deriving bare codes with `market_suffix`
    pub fn builtin_with_suffix(market_suffix: &str) -> Result<Self, CatalogError> {
        Self::with_suffix(json_records(DataLoader::instruments_json())?, market_suffix)
    }

    /// Parse a JSON array of instrument records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::new(json_records(json)?)
    }

    /// Parse the `ALL_STOCKS` JavaScript module written by the catalog converter
    ///
    /// Each entry looks like
    /// `{ code: "7203.T", name: "トヨタ自動車", kana: "とよたじどうしゃ", romaji: "toyotajidousha"}`.
    /// Lines that are not entries (comments, `export`, brackets) are ignored.
    pub fn from_js_module(source: &str) -> Result<Self, CatalogError> {
        Self::new(js_records(source)?)
    }

    /// Load a catalog file, choosing the parser by extension (`.json` or `.js`)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_path_with_suffix(path, DEFAULT_MARKET_SUFFIX)
    }

    /// Load a catalog file whose codes carry `market_suffix`
    ///
    /// The extension is checked before the file is opened, so an unsupported
    /// format is reported as such even when the file is missing.
    pub fn from_path_with_suffix(path: impl AsRef<Path>, market_suffix: &str) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse: fn(&str) -> Result<Vec<InstrumentRecord>, CatalogError> = match extension.as_str() {
            "json" => json_records,
            "js" | "mjs" => js_records,
            _ => return Err(CatalogError::UnsupportedFormat { extension }),
        };

        let source = std::fs::read_to_string(path)?;
        let catalog = Self::with_suffix(parse(&source)?, market_suffix)?;

        log::info!("Loaded {} instruments from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of instruments
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog holds no instruments
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in catalog order
    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }

    /// Records paired with their comparison forms, in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&InstrumentRecord, &PreparedEntry)> {
        self.records.iter().zip(self.prepared.iter())
    }

    /// Look up an instrument by code, ignoring case
    pub fn get(&self, code: &str) -> Option<&InstrumentRecord> {
        self.by_code
            .get(&code.to_lowercase())
            .map(|&index| &self.records[index])
    }

    /// Market suffix used for bare codes
    pub fn market_suffix(&self) -> &str {
        &self.market_suffix
    }

    /// Summary counts
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.records.len(),
            with_reading: self
                .records
                .iter()
                .filter(|r| r.phonetic_reading.is_some())
                .count(),
            with_transliteration: self
                .records
                .iter()
                .filter(|r| r.transliteration.is_some())
                .count(),
        }
    }
}

fn json_records(json: &str) -> Result<Vec<InstrumentRecord>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

fn js_records(source: &str) -> Result<Vec<InstrumentRecord>, CatalogError> {
    let records = parse_js_entries(source);
    if records.is_empty() {
        return Err(CatalogError::NoEntries);
    }
    log::debug!("Parsed {} entries from converter module", records.len());
    Ok(records)
}

fn js_entry_regex() -> &'static Regex {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    ENTRY.get_or_init(|| {
        Regex::new(
            r#"\{\s*code:\s*"((?:[^"\\]|\\.)*)"\s*,\s*name:\s*"((?:[^"\\]|\\.)*)"(?:\s*,\s*kana:\s*"((?:[^"\\]|\\.)*)")?(?:\s*,\s*romaji:\s*"((?:[^"\\]|\\.)*)")?\s*,?\s*\}"#,
        )
        .expect("converter entry regex is valid")
    })
}

fn parse_js_entries(source: &str) -> Vec<InstrumentRecord> {
    js_entry_regex()
        .captures_iter(source)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map(|m| unescape_js(m.as_str()));
            let mut record = InstrumentRecord::new(field(1).unwrap_or_default(), field(2).unwrap_or_default());
            if let Some(kana) = field(3) {
                record = record.with_reading(kana);
            }
            if let Some(romaji) = field(4) {
                record = record.with_transliteration(romaji);
            }
            record
        })
        .collect()
}

/// Undo the backslash escapes a JS string literal may carry
fn unescape_js(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
