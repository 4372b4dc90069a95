//! Slug derivation for display names.
//!
//! A slug is the human-readable unique identifier derived from an entity's
//! display name: case-folded, common Latin diacritics folded to ASCII, every
//! non-alphanumeric run collapsed into a single `-`, separators trimmed at
//! both ends. When the base slug is already taken within the scope, the
//! smallest free numeric suffix (`-2`, `-3`, …) disambiguates.
//!
//! Both functions are pure over their inputs. The taken-set passed to
//! [`generate`] is an advisory snapshot; the authoritative uniqueness check
//! happens at insert time in the store, so a stale snapshot can still lose
//! the race and surface as a conflict.

/// Folds one character to its ASCII slug form, or None to treat it as a
/// separator.
fn fold(c: char) -> Option<&'static str> {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' => Some("a"),
        'ç' | 'ć' | 'č' => Some("c"),
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' => Some("e"),
        'ì' | 'í' | 'î' | 'ï' | 'ī' => Some("i"),
        'ñ' | 'ń' => Some("n"),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => Some("o"),
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => Some("u"),
        'ý' | 'ÿ' => Some("y"),
        'š' | 'ś' => Some("s"),
        'ž' | 'ź' | 'ż' => Some("z"),
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        _ => None,
    }
}

/// Derives the base slug from a display name.
///
/// Deterministic; an all-separator name folds to the empty string, which the
/// registry rejects before reaching the store.
pub fn slugify(pretty_name: &str) -> String {
    let mut slug = String::with_capacity(pretty_name.len());
    let mut pending_separator = false;
    for c in pretty_name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if let Some(part) = fold(c) {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push_str(part);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Derives a slug unique against the given taken-set.
///
/// Falls back to the smallest numeric suffix not in use for the base within
/// the scope snapshot.
pub fn generate(
    pretty_name: &str,
    taken: &std::collections::HashSet<String>,
) -> String {
    let base = slugify(pretty_name);
    if !taken.contains(&base) {
        return base;
    }
    let mut suffix = 2u64;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn unit_slug_normalizes_case_and_separators() {
        assert_eq!(slugify("Home"), "home");
        assert_eq!(slugify("  User   Settings  "), "user-settings");
        assert_eq!(slugify("Back-Office / Admin"), "back-office-admin");
        assert_eq!(slugify("v2.0 (beta)"), "v2-0-beta");
    }

    #[test]
    fn unit_slug_folds_diacritics() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Señor Müller"), "senor-muller");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn unit_slug_drops_unmapped_symbols() {
        assert_eq!(slugify("→ Home ←"), "home");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn unit_slug_generate_picks_smallest_free_suffix() {
        let mut taken = HashSet::new();
        assert_eq!(generate("Home", &taken), "home");
        taken.insert("home".to_string());
        assert_eq!(generate("Home", &taken), "home-2");
        taken.insert("home-2".to_string());
        assert_eq!(generate("Home", &taken), "home-3");
        // A freed middle suffix is reused before extending the sequence.
        taken.remove("home-2");
        assert_eq!(generate("Home", &taken), "home-2");
    }

    #[test]
    fn unit_slug_generate_is_deterministic() {
        let taken = HashSet::from(["home".to_string(), "home-2".to_string()]);
        assert_eq!(generate("Home", &taken), generate("Home", &taken));
    }
}
