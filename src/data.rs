// Data loader for the embedded sample catalog
// Bundles a JPX instrument list at compile time

/// Embedded sample catalog (JSON array of instrument records)
pub const INSTRUMENTS_JSON: &str = include_str!("../data/instruments.json");

/// Data loader utility
pub struct DataLoader;

impl DataLoader {
    /// Get the embedded catalog JSON
    pub fn instruments_json() -> &'static str {
        INSTRUMENTS_JSON
    }

    /// Get embedded data info
    pub fn info() -> DataInfo {
        DataInfo {
            instruments_size: INSTRUMENTS_JSON.len(),
        }
    }
}

/// Information about embedded data
#[derive(Debug, Clone)]
pub struct DataInfo {
    /// Size of the embedded catalog in bytes
    pub instruments_size: usize,
}
