//! Localized message resolution.
//!
//! A minimal keyed resource bundle standing in for the full localization
//! service: templates with positional `{0}`/`{1}` placeholders, plus a
//! `one|many` split for count labels.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("activations.results.title", "Activations"),
        ("search.images.count", "{0} image|{0} images"),
        ("api.error.dateparse", "Unable to parse date: {0}"),
        ("api.error.daterange", "End date {0} precedes start date {1}"),
    ])
});

/// Resolve a message key, substituting positional arguments.
///
/// Unknown keys echo the key itself so a missing bundle entry degrades to
/// something greppable instead of panicking.
pub fn resolve(key: &str, args: &[&str]) -> String {
    let template = MESSAGES.get(key).copied().unwrap_or(key);
    substitute(template, args)
}

/// Resolve a count-label key, picking the singular or plural form.
///
/// Templates carry both forms separated by `|`; a template without the
/// separator is used for every count.
pub fn resolve_count(key: &str, count: i64) -> String {
    let template = MESSAGES.get(key).copied().unwrap_or(key);
    let form = match template.split_once('|') {
        Some((one, many)) => {
            if count == 1 {
                one
            } else {
                many
            }
        }
        None => template,
    };
    substitute(form, &[&count.to_string()])
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_key() {
        assert_eq!(resolve("activations.results.title", &[]), "Activations");
    }

    #[test]
    fn test_resolve_with_args() {
        assert_eq!(
            resolve("api.error.dateparse", &["not-a-date"]),
            "Unable to parse date: not-a-date"
        );
    }

    #[test]
    fn test_resolve_unknown_key_echoes() {
        assert_eq!(resolve("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn test_count_label_plural_split() {
        assert_eq!(resolve_count("search.images.count", 1), "1 image");
        assert_eq!(resolve_count("search.images.count", 2), "2 images");
        assert_eq!(resolve_count("search.images.count", 0), "0 images");
    }
}
