//! Keys used from Rust sources and keys defined in the fallback bundle must
//! agree both ways. Locale parity lives in `tests/i18n_missing_keys.rs`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_FTL: &str = include_str!("../../i18n/en-US/commitscape-ui.ftl");

/// Message IDs (`key = ...` at column 0). Terms, attributes and variants are skipped.
fn fallback_keys() -> BTreeSet<String> {
    FALLBACK_FTL
        .lines()
        .filter(|line| !line.starts_with(&[' ', '\t', '#', '-', '.'][..]))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty() && id.chars().all(valid_key_char))
        .map(str::to_string)
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Literal first argument of every `t!("...")` in `.rs` files under `dir`.
fn referenced_keys(dir: &Path, found: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            referenced_keys(&path, found);
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for chunk in content.split("t!(\"").skip(1) {
            if let Some((key, _)) = chunk.split_once('"') {
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }
}

#[test]
fn source_keys_and_fallback_bundle_agree() {
    let defined = fallback_keys();
    assert!(!defined.is_empty(), "no message keys parsed from en-US");

    let mut used = BTreeSet::new();
    referenced_keys(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"), &mut used);

    let missing: Vec<_> = used.difference(&defined).cloned().collect();
    assert!(
        missing.is_empty(),
        "keys used in sources but missing from en-US:\n{}",
        missing.join("\n")
    );

    let unused: Vec<_> = defined.difference(&used).cloned().collect();
    assert!(
        unused.is_empty(),
        "en-US keys never referenced from sources:\n{}",
        unused.join("\n")
    );
}
