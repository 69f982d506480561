//! Internationalization lookups for templates
//!
//! Country, language and locale display names come from a [`LocaleProvider`],
//! so the data source can be swapped without touching the template functions.
//! [`EmbeddedLocales`] is the compiled-in default.

pub mod embedded;
pub mod provider;

pub use embedded::EmbeddedLocales;
pub use provider::LocaleProvider;

/// Normalize a hyphenated locale tag to ICU form.
///
/// The region segment is uppercased and segments are joined with
/// underscores: `en-us` becomes `en_US`, `de` stays `de`.
pub fn icu_locale(locale: &str) -> String {
    let mut parts: Vec<String> = locale.split('-').map(str::to_string).collect();
    if let Some(region) = parts.get_mut(1) {
        *region = region.to_uppercase();
    }
    parts.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icu_locale_with_region() {
        assert_eq!(icu_locale("en-us"), "en_US");
        assert_eq!(icu_locale("de-at"), "de_AT");
    }

    #[test]
    fn test_icu_locale_without_region() {
        assert_eq!(icu_locale("de"), "de");
        assert_eq!(icu_locale(""), "");
    }

    #[test]
    fn test_icu_locale_extra_segments_pass_through() {
        // Only the region segment is uppercased.
        assert_eq!(icu_locale("de-de-1996"), "de_DE_1996");
    }
}
