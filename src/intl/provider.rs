//! Locale data source abstraction

use std::collections::BTreeMap;

/// Data source for country, language and locale display names.
///
/// Codes follow the usual conventions: uppercase ISO 3166 country codes
/// (`DE`), lowercase ISO 639 language codes (`de`), underscore-separated
/// locale tags (`de_AT`). Lookups are total; unknown codes yield `None`.
pub trait LocaleProvider: Send + Sync {
    /// Map of country codes to display names
    fn country_names(&self, display_locale: Option<&str>) -> BTreeMap<String, String>;

    /// Display name for one country code
    fn country_name(&self, code: &str, display_locale: Option<&str>) -> Option<String>;

    /// Map of language codes to display names
    fn language_names(&self, display_locale: Option<&str>) -> BTreeMap<String, String>;

    /// Display name for one language, preferring a region-qualified variant
    /// (`de` + `AT` resolves `de_AT` before falling back to `de`)
    fn language_name(
        &self,
        code: &str,
        region: Option<&str>,
        display_locale: Option<&str>,
    ) -> Option<String>;

    /// Map of locale tags to display names
    fn locale_names(&self, display_locale: Option<&str>) -> BTreeMap<String, String>;

    /// Display name for one locale tag
    fn locale_name(&self, code: &str, display_locale: Option<&str>) -> Option<String>;
}
