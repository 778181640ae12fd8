use regex::Regex;
use std::sync::LazyLock;

/// Accepted shape of slug-like path segments: lowercase alphanumeric runs
/// separated by single hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLUG_PATTERN).unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

pub fn is_valid_slug(segment: &str) -> bool {
    SLUG_RE.is_match(segment)
}

/// Turn a URL slug back into a display title.
///
/// Markup is stripped and surrounding whitespace trimmed, then the first
/// letter of the string and every letter following a hyphen is upper-cased
/// and the hyphens become spaces: `breaking-bad` → `Breaking Bad`.
/// Returns `None` when nothing is left.
pub fn slug_to_title(raw: &str) -> Option<String> {
    let stripped = TAG_RE.replace_all(raw, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }

    let words: Vec<String> = trimmed.split('-').map(capitalize_first).collect();
    Some(words.join(" "))
}

/// Case-insensitive lookup key for a title or category name.
pub fn lookup_key(title: &str) -> String {
    title.to_lowercase()
}

/// Derive the stored slug of a program title: `Breaking Bad!` → `breaking-bad`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug that resolves back to `name` through [`slug_to_title`] and
/// [`lookup_key`], or `None` when no slug can. Hyphens and letters outside
/// `a-z` in the name are lost by [`slugify`].
pub fn resolvable_slug(name: &str) -> Option<String> {
    let slug = slugify(name);
    let title = slug_to_title(&slug)?;
    (lookup_key(&title) == lookup_key(name)).then_some(slug)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_lowercase_slugs() {
        assert!(is_valid_slug("breaking-bad"));
        assert!(is_valid_slug("24"));
        assert!(is_valid_slug("the-100"));
    }

    #[test]
    fn rejects_malformed_slugs() {
        for bad in ["", "Breaking-Bad", "a--b", "-a", "a-", "a b", "a_b", "é"] {
            assert!(!is_valid_slug(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn resolvable_slug_only_for_round_tripping_names() {
        assert_eq!(resolvable_slug("Science Fiction").as_deref(), Some("science-fiction"));
        assert_eq!(resolvable_slug("horreur").as_deref(), Some("horreur"));
        assert_eq!(resolvable_slug("Comédie"), None);
        assert_eq!(resolvable_slug("Science-Fiction"), None);
        assert_eq!(resolvable_slug("!!!"), None);
    }

    #[test]
    fn slug_becomes_title_case() {
        assert_eq!(slug_to_title("breaking-bad").as_deref(), Some("Breaking Bad"));
        assert_eq!(slug_to_title("the-walking-dead").as_deref(), Some("The Walking Dead"));
        assert_eq!(slug_to_title("horreur").as_deref(), Some("Horreur"));
    }

    #[test]
    fn markup_and_whitespace_are_removed() {
        assert_eq!(slug_to_title("  <b>game</b>-of-thrones ").as_deref(), Some("Game Of Thrones"));
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(slug_to_title(""), None);
        assert_eq!(slug_to_title("   "), None);
        assert_eq!(slug_to_title("<br>"), None);
    }

    #[test]
    fn lookup_key_is_lowercase_title() {
        let title = slug_to_title("breaking-bad").unwrap();
        assert_eq!(lookup_key(&title), "breaking bad");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Breaking Bad!"), "breaking-bad");
        assert_eq!(slugify("  Marvel's  Agents of S.H.I.E.L.D. "), "marvel-s-agents-of-s-h-i-e-l-d");
        assert_eq!(slugify("24"), "24");
    }

    #[test]
    fn slugified_titles_resolve_back_to_the_same_key() {
        for title in ["The Walking Dead", "Breaking Bad", "Fear The Walking Dead"] {
            let slug = slugify(title);
            assert!(is_valid_slug(&slug));
            let back = slug_to_title(&slug).unwrap();
            assert_eq!(lookup_key(&back), lookup_key(title));
        }
    }
}
