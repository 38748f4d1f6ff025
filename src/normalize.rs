// Kabu Lookup Text Normalizer
// Canonicalizes queries and catalog fields into a comparison-safe form

use unicode_normalization::UnicodeNormalization;

/// Market suffix carried by Tokyo Stock Exchange codes
pub const DEFAULT_MARKET_SUFFIX: &str = ".T";

/// Prolonged-sound marks and dash-like glyphs that do not affect matching
///
/// Covers the katakana prolonged sound mark in both widths plus the hyphen
/// and dash family that input methods substitute for it.
const PROLONGATION_MARKS: &[char] = &[
    '\u{002D}', // hyphen-minus
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
    '\u{2212}', // minus sign
    '\u{30FC}', // katakana-hiragana prolonged sound mark
    '\u{FF0D}', // fullwidth hyphen-minus
    '\u{FF70}', // halfwidth prolonged sound mark
];

/// Normalize text for equality, prefix and containment comparison
///
/// Applies NFKC (so full-width and half-width forms compare equal), lowercases,
/// then removes whitespace (including the ideographic space) and prolongation
/// marks. Never fails; empty input yields an empty string.
///
/// The same function must be applied to the query and to every catalog field.
///
/// # Examples
/// ```
/// # use kabu_lookup::normalize::normalize;
/// assert_eq!(normalize("ＴＯＹＯＴＡ"), "toyota");
/// assert_eq!(normalize("ｿﾌﾄﾊﾞﾝｸ"), normalize("ソフトバンク"));
/// assert_eq!(normalize("ソフトバンク　グループ"), normalize("ソフトバンクグルプ"));
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && !is_prolongation_mark(*c))
        .collect();

    // Removing characters can leave base + combining pairs adjacent; recompose
    // so normalize(normalize(s)) == normalize(s).
    stripped.nfkc().collect()
}

/// Check if a character is one of the ignored prolongation marks
#[inline]
pub fn is_prolongation_mark(ch: char) -> bool {
    PROLONGATION_MARKS.contains(&ch)
}

/// Remove the default `.T` market suffix from an instrument code
///
/// ```
/// # use kabu_lookup::normalize::strip_code_suffix;
/// assert_eq!(strip_code_suffix("7203.T"), "7203");
/// assert_eq!(strip_code_suffix("AAPL"), "AAPL");
/// ```
#[inline]
pub fn strip_code_suffix(code: &str) -> &str {
    strip_code_suffix_with(code, DEFAULT_MARKET_SUFFIX)
}

/// Remove a configured market suffix from an instrument code
///
/// Codes without the suffix are returned unchanged. An empty suffix is a no-op.
#[inline]
pub fn strip_code_suffix_with<'a>(code: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return code;
    }
    code.strip_suffix(suffix).unwrap_or(code)
}

/// True iff the raw query is non-empty and made only of ASCII decimal digits
#[inline]
pub fn is_numeric_query(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Number of characters used for length penalties
#[inline]
pub(crate) fn char_len(s: &str) -> u32 {
    u32::try_from(s.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_lowercase_latin() {
        assert_eq!(normalize("SoftBank"), "softbank");
    }

    #[test]
    fn test_fullwidth_latin_and_digits() {
        assert_eq!(normalize("ＳＯＮＹ１２３"), "sony123");
    }

    #[test]
    fn test_halfwidth_katakana() {
        assert_eq!(normalize("ﾄﾖﾀ"), "トヨタ");
        assert_eq!(normalize("ｿﾌﾄﾊﾞﾝｸ"), "ソフトバンク");
    }

    #[test]
    fn test_strips_whitespace() {
        assert_eq!(normalize(" toyota  motor "), "toyotamotor");
        assert_eq!(normalize("ソフトバンク\u{3000}グループ"), normalize("ソフトバンクグループ"));
        assert_eq!(normalize("a\tb\nc"), "abc");
    }

    #[test]
    fn test_strips_prolongation_marks() {
        assert_eq!(normalize("グループ"), normalize("グルプ"));
        assert_eq!(normalize("ｸﾞﾙｰﾌﾟ"), normalize("グルプ"));
        assert_eq!(normalize("ソニ－"), normalize("ソニ"));
        assert_eq!(normalize("sony-group"), "sonygroup");
        assert_eq!(normalize("a\u{2014}b\u{2212}c"), "abc");
    }

    #[test]
    fn test_only_marks_and_spaces() {
        assert_eq!(normalize("ー　- "), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for s in ["ＴＯＹＯＴＡ", "ｸﾞﾙｰﾌﾟ", "e \u{301}", "Ｋ", "トヨタ自動車", "7203.T"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_recomposes_after_strip() {
        // The space separating base and combining mark is removed, then composed
        assert_eq!(normalize("e \u{301}"), "\u{e9}");
    }

    #[test]
    fn test_strip_code_suffix() {
        assert_eq!(strip_code_suffix("7203.T"), "7203");
        assert_eq!(strip_code_suffix("130A.T"), "130A");
        assert_eq!(strip_code_suffix("7203"), "7203");
        assert_eq!(strip_code_suffix(".T"), "");
    }

    #[test]
    fn test_strip_code_suffix_with() {
        assert_eq!(strip_code_suffix_with("0005.HK", ".HK"), "0005");
        assert_eq!(strip_code_suffix_with("7203.T", ""), "7203.T");
        assert_eq!(strip_code_suffix_with("7203.t", ".T"), "7203.t");
    }

    #[test]
    fn test_numeric_query() {
        assert!(is_numeric_query("720"));
        assert!(is_numeric_query("0"));
        assert!(!is_numeric_query(""));
        assert!(!is_numeric_query("72a"));
        assert!(!is_numeric_query("7203.T"));
        assert!(!is_numeric_query("７２０"));
        assert!(!is_numeric_query(" 720"));
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("toyota"), 6);
        assert_eq!(char_len("トヨタ"), 3);
        assert_eq!(char_len(""), 0);
    }
}
