//! Locale-aware string ordering.
//!
//! Registration data is mostly Hebrew with some Latin text mixed in. Ordering
//! follows the Unicode collation rules tailored for the configured language
//! (for `he`, Hebrew script sorts before Latin). Strings the collator
//! considers equal fall back to their raw text, so the order is total and
//! deterministic.

use icu_collator::CollatorOptions;
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// String comparator for one language tag.
#[derive(Clone)]
pub struct Collator {
    tag: String,
    inner: Option<Rc<icu_collator::Collator>>,
}

impl Default for Collator {
    fn default() -> Self {
        Self::for_locale("he")
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("tag", &self.tag)
            .field("tailored", &self.inner.is_some())
            .finish()
    }
}

impl Collator {
    /// Builds a collator for a BCP 47 language tag such as `he` or `he-IL`.
    ///
    /// An unparseable tag uses the root collation order. If no collation data
    /// can be loaded at all, strings compare by code point.
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        let locale = parse_locale(tag).unwrap_or_else(|| {
            tracing::warn!(locale = %tag, "invalid locale tag, using root collation");
            Locale::UND
        });

        let inner = match icu_collator::Collator::try_new(&locale.clone().into(), CollatorOptions::new()) {
            Ok(collator) => Some(Rc::new(collator)),
            Err(e) => {
                tracing::warn!(locale = %locale, error = %e, "collation data unavailable, comparing code points");
                None
            }
        };

        Self {
            tag: tag.to_string(),
            inner,
        }
    }

    /// Language tag this collator was built for.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Compares two strings in collation order.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner
            .as_ref()
            .map_or(Ordering::Equal, |collator| collator.compare(a, b))
            .then_with(|| a.cmp(b))
    }
}

/// Parses a tag, accepting `_` separators and the legacy `iw` code for Hebrew.
fn parse_locale(tag: &str) -> Option<Locale> {
    let normalized = tag.trim().replace('_', "-");
    let normalized = match normalized.split_once('-') {
        Some((language, rest)) if language.eq_ignore_ascii_case("iw") => format!("he-{rest}"),
        None if normalized.eq_ignore_ascii_case("iw") => "he".to_string(),
        _ => normalized,
    };
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<'a>(collator: &Collator, mut names: Vec<&'a str>) -> Vec<&'a str> {
        names.sort_by(|a, b| collator.compare(a, b));
        names
    }

    #[test]
    fn hebrew_alphabetical_order() {
        let collator = Collator::default();
        assert_eq!(
            sorted(&collator, vec!["תמר", "אורי", "נועה", "דניאל"]),
            ["אורי", "דניאל", "נועה", "תמר"]
        );
    }

    #[test]
    fn hebrew_sorts_before_latin_in_hebrew_locale() {
        let collator = Collator::default();
        assert_eq!(collator.compare("Alice", "אורי"), Ordering::Greater);
        assert_eq!(collator.compare("אורי", "Alice"), Ordering::Less);
        assert_eq!(sorted(&collator, vec!["Ort", "אלון", "Hadar"]), ["אלון", "Hadar", "Ort"]);
    }

    #[test]
    fn latin_sorts_before_hebrew_in_english_locale() {
        let collator = Collator::for_locale("en");
        assert_eq!(collator.compare("Alice", "אורי"), Ordering::Less);
    }

    #[test]
    fn lowercase_precedes_uppercase() {
        let collator = Collator::default();
        assert_eq!(collator.compare("alice", "Alice"), Ordering::Less);

        let english = Collator::for_locale("en");
        assert_eq!(
            sorted(&english, vec!["bob", "Alice", "alice", "Bob"]),
            ["alice", "Alice", "bob", "Bob"]
        );
    }

    #[test]
    fn points_are_a_secondary_difference() {
        let collator = Collator::for_locale("he-IL");
        assert_eq!(collator.compare("דָּנִי", "דניאל"), Ordering::Less);
        assert_eq!(collator.compare("דני", "דָּנִי"), Ordering::Less);
        assert_eq!(collator.compare("דָּנִי", "תמר"), Ordering::Less);
    }

    #[test]
    fn equal_text_compares_equal() {
        let collator = Collator::default();
        assert_eq!(collator.compare("abc", "abc"), Ordering::Equal);
        assert_eq!(collator.compare("", ""), Ordering::Equal);
        assert_eq!(collator.compare("", "a"), Ordering::Less);
    }

    #[test]
    fn locale_tags_are_normalized() {
        assert_eq!(parse_locale("he_IL"), "he-IL".parse().ok());
        assert_eq!(parse_locale("iw"), "he".parse().ok());
        assert_eq!(parse_locale("iw-IL"), "he-IL".parse().ok());
        assert!(parse_locale("not a tag!").is_none());
    }

    #[test]
    fn invalid_tag_falls_back_to_root_order() {
        let collator = Collator::for_locale("not a tag!");
        assert_eq!(collator.tag(), "not a tag!");
        assert_eq!(collator.compare("a", "b"), Ordering::Less);
        assert_eq!(collator.compare("Alice", "אורי"), Ordering::Less);
    }
}
