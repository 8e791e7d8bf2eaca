use std::collections::{BTreeSet, HashSet};

/// Every non-fallback locale provides at least the keys of `en-US/commitscape-ui.ftl`.
///
/// Only message IDs are parsed (`key =` lines); comments, attributes and
/// variant lines are skipped. New locales are registered in `locales` below.
#[test]
fn all_locales_have_all_fallback_keys() {
    const EN_US: &str = include_str!("../i18n/en-US/commitscape-ui.ftl");
    const ES_ES: &str = include_str!("../i18n/es-ES/commitscape-ui.ftl");

    let fallback_keys = extract_keys(EN_US);

    assert!(
        !fallback_keys.is_empty(),
        "Fallback (en-US) contains no keys."
    );
    assert_no_dup_keys(EN_US, "en-US");

    let locales: &[(&str, &str)] = &[("es-ES", ES_ES)];

    let mut failures = Vec::new();

    for (locale, src) in locales {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let mut missing: BTreeSet<String> = BTreeSet::new();

        for k in &fallback_keys {
            if !keys.contains(k) {
                missing.insert(k.clone());
            }
        }

        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
            failures.join("\n\n")
        );
    }
}

/// Extract message keys from a Fluent file (simple heuristic).
fn extract_keys(src: &str) -> HashSet<String> {
    let mut keys = HashSet::new();

    for line in src.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('.') {
            continue;
        }
        if let Some(eq_pos) = line.find('=') {
            let (left, _right) = line.split_at(eq_pos);
            let key = left.trim();
            if !key.is_empty()
                && !key.contains(' ')
                && !key.contains('\t')
                && !key.starts_with('[')
                && !key.starts_with('@')
            {
                keys.insert(key.to_string());
            }
        }
    }

    keys
}

/// Assert no duplicate key definitions in a single FTL file (rudimentary).
fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for line in src.lines() {
        let raw = line;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
            continue;
        }
        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            if !key.is_empty()
                && !key.contains(' ')
                && !key.contains('\t')
                && !key.starts_with('[')
                && !key.starts_with('@')
            {
                if !seen.insert(key.to_string()) {
                    dups.insert(format!("{key}  (line: \"{raw}\")"));
                }
            }
        }
    }

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}

#[test]
fn placeholders_match_across_locales() {
    const EN_US: &str = include_str!("../i18n/en-US/commitscape-ui.ftl");
    const ES_ES: &str = include_str!("../i18n/es-ES/commitscape-ui.ftl");

    let fallback = placeholders_by_key(EN_US);
    let spanish = placeholders_by_key(ES_ES);

    for (key, vars) in &fallback {
        let translated = spanish.get(key).cloned().unwrap_or_default();
        assert_eq!(&translated, vars, "placeholders differ for `{key}` in es-ES");
    }
}

/// `$variable` names per message, including those on variant lines.
fn placeholders_by_key(src: &str) -> std::collections::HashMap<String, BTreeSet<String>> {
    let mut out: std::collections::HashMap<String, BTreeSet<String>> = Default::default();
    let mut current: Option<String> = None;

    for raw in src.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let is_continuation = raw.starts_with(' ') || raw.starts_with('\t') || line.starts_with('}');
        if !is_continuation {
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim().to_string();
                out.entry(key.clone()).or_default();
                current = Some(key);
            }
        }
        if let Some(key) = &current {
            let entry = out.entry(key.clone()).or_default();
            for piece in line.split('$').skip(1) {
                let name: String = piece
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                    .collect();
                if !name.is_empty() {
                    entry.insert(name);
                }
            }
        }
    }

    out
}
