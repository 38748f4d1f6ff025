//! Property-based tests for normalization and ranking invariants
//!
//! - Normalization is idempotent
//! - Full-width and half-width variants normalize identically
//! - Queries and catalog fields go through the same normalization
//! - Results are capped, sorted, and stable for equal scores

use kabu_lookup::normalize::{is_numeric_query, normalize};
use kabu_lookup::{rank, search, Catalog, InstrumentRecord, MatchTier};
use proptest::prelude::*;

/// Half-width katakana paired with its full-width form
const KATAKANA_WIDTHS: &[(&str, &str)] = &[
    ("ｱ", "ア"),
    ("ｶ", "カ"),
    ("ｶﾞ", "ガ"),
    ("ｿ", "ソ"),
    ("ﾄ", "ト"),
    ("ﾆ", "ニ"),
    ("ﾊﾞ", "バ"),
    ("ﾊﾟ", "パ"),
    ("ﾌﾟ", "プ"),
    ("ﾖ", "ヨ"),
    ("ﾀ", "タ"),
    ("ﾝ", "ン"),
    ("ｸ", "ク"),
    ("ｰ", "ー"),
    ("ｯ", "ッ"),
];

/// Text drawn from the scripts the catalog actually contains
fn arb_catalog_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9ａ-ｚＡ-Ｚ０-９ぁ-んァ-ヶｦ-ﾟ一-龠 　ー－.&・-]{0,24}"
}

/// ASCII letters and digits
fn arb_ascii_alnum() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,16}"
}

fn to_fullwidth(s: &str) -> String {
    s.chars()
        .map(|c| char::from_u32(c as u32 + 0xFEE0).unwrap_or(c))
        .collect()
}

fn catalog_of_names(names: &[String]) -> Catalog {
    let records = names
        .iter()
        .enumerate()
        .map(|(i, name)| InstrumentRecord::new(format!("{:04}.T", i + 1000), name.clone()))
        .collect();
    Catalog::new(records).unwrap()
}

mod normalize_invariants {
    use super::*;

    proptest! {
        #[test]
        fn prop_normalize_idempotent(s in arb_catalog_text()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_fullwidth_ascii_matches_halfwidth(s in arb_ascii_alnum()) {
            prop_assert_eq!(normalize(&to_fullwidth(&s)), normalize(&s));
        }

        #[test]
        fn prop_halfwidth_katakana_matches_fullwidth(
            picks in prop::collection::vec(prop::sample::select(KATAKANA_WIDTHS), 0..12)
        ) {
            let half: String = picks.iter().map(|(h, _)| *h).collect();
            let full: String = picks.iter().map(|(_, f)| *f).collect();
            prop_assert_eq!(normalize(&half), normalize(&full));
        }

        #[test]
        fn prop_output_has_no_whitespace_or_uppercase(s in arb_catalog_text()) {
            let out = normalize(&s);
            prop_assert!(!out.chars().any(char::is_whitespace));
            prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(!out.contains('ー'));
        }
    }
}

mod ranking_invariants {
    use super::*;

    proptest! {
        #[test]
        fn prop_empty_query_returns_nothing(
            names in prop::collection::vec(arb_catalog_text(), 1..20)
        ) {
            let catalog = catalog_of_names(&names);
            prop_assert!(search("", &catalog, 20).is_empty());
        }

        #[test]
        fn prop_name_lookup_is_width_insensitive(name in arb_ascii_alnum()) {
            prop_assume!(!is_numeric_query(&name));
            let catalog = catalog_of_names(&[name.clone()]);

            let ranked = rank(&to_fullwidth(&name), &catalog, 20);
            prop_assert_eq!(ranked.len(), 1);
            prop_assert_eq!(ranked[0].tier, MatchTier::NameExact);
        }

        #[test]
        fn prop_own_name_is_found(name in arb_catalog_text()) {
            prop_assume!(!is_numeric_query(&name) && !normalize(&name).is_empty());
            prop_assume!(!name.contains('.'));
            let catalog = catalog_of_names(&[name.clone()]);

            let ranked = rank(&name, &catalog, 20);
            prop_assert_eq!(ranked.len(), 1);
            prop_assert_eq!(ranked[0].tier, MatchTier::NameExact);
        }

        #[test]
        fn prop_cap_enforced(count in 1usize..80, limit in 0usize..40) {
            let names: Vec<String> = (0..count).map(|i| format!("銘柄{}", i)).collect();
            let catalog = catalog_of_names(&names);
            prop_assert_eq!(search("銘柄", &catalog, limit).len(), count.min(limit));
        }

        #[test]
        fn prop_equal_scores_keep_catalog_order(count in 2usize..30) {
            // Same length names: every entry lands on the same name-prefix score
            let names: Vec<String> = (0..count).map(|i| format!("共通{:03}", i)).collect();
            let catalog = catalog_of_names(&names);

            let results = search("共通", &catalog, 100);
            let found: Vec<&str> = results.iter().map(|r| r.code.as_str()).collect();
            let expected: Vec<&str> = catalog.records().iter().map(|r| r.code.as_str()).collect();
            prop_assert_eq!(found, expected);
        }

        #[test]
        fn prop_any_query_is_safe(query in any::<String>()) {
            let catalog = Catalog::builtin().unwrap();
            let ranked = rank(&query, &catalog, 20);
            prop_assert!(ranked.len() <= 20);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            prop_assert!(ranked.iter().all(|c| c.score > 0));
        }
    }
}
