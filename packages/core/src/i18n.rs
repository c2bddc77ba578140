// ABOUTME: Locale parsing and localized message lookup
// ABOUTME: In-memory message registry with language and default-locale fallback plus {{var}} interpolation

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::env::{EnvError, Property, PropertySource};

/// Comma-separated list of locales the application accepts, ex. `fr,pl,en_GB`.
pub const AVAILABLE_LOCALES: Property = Property::with_default("jmpsl.core.locale.available-locales", "en_US");

/// Locale selected when a message is missing for the requested one.
pub const DEFAULT_LOCALE: Property = Property::with_default("jmpsl.core.locale.default-locale", "en_US");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    #[error("Invalid locale identifier: {0}")]
    InvalidLocale(String),

    #[error(transparent)]
    Env(#[from] EnvError),
}

/// A language tag with an optional region, ex. `en`, `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale with the region stripped, used as a fallback step.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    // Accepts `pl`, `en_US` and `en-US` forms.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(2, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(I18nError::InvalidLocale(raw.to_string()));
        }
        if let Some(region) = region {
            if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(I18nError::InvalidLocale(raw.to_string()));
            }
        }
        Ok(Self::new(language, region))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Parse the comma-separated locale list format of the
/// `jmpsl.core.locale.available-locales` property.
pub fn parse_locale_list(raw: &str) -> Result<Vec<Locale>, I18nError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Locale::from_str)
        .collect()
}

/// Replace `{{key}}` placeholders in a message pattern with the given values.
pub fn interpolate(message: &str, variables: &[(&str, &str)]) -> String {
    let mut out = message.to_string();
    for (key, value) in variables {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

/// Localized message lookup over in-memory bundles.
///
/// Resolution order for a key: exact locale, language-only locale, default
/// locale, and finally the key itself. A blank pattern counts as missing, so
/// callers always get something displayable back.
#[derive(Debug, Clone)]
pub struct MessageRegistry {
    bundles: HashMap<Locale, HashMap<String, String>>,
    default_locale: Locale,
}

impl MessageRegistry {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            bundles: HashMap::new(),
            default_locale,
        }
    }

    /// Build a registry with the default locale taken from the property
    /// source (`jmpsl.core.locale.default-locale`).
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, I18nError> {
        let raw: String = DEFAULT_LOCALE.resolve(source)?;
        Ok(Self::new(raw.parse()?))
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn insert(&mut self, locale: Locale, key: &str, pattern: &str) {
        self.bundles
            .entry(locale)
            .or_default()
            .insert(key.to_string(), pattern.to_string());
    }

    pub fn extend<I>(&mut self, locale: Locale, messages: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.bundles.entry(locale).or_default().extend(messages);
    }

    fn pattern(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.bundles
            .get(locale)
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
            .filter(|pattern| !pattern.trim().is_empty())
    }

    /// Localized message for `key`, or the key itself when no bundle has it.
    pub fn message(&self, locale: &Locale, key: &str) -> String {
        self.pattern(locale, key)
            .or_else(|| self.pattern(&locale.language_only(), key))
            .or_else(|| self.pattern(&self.default_locale, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Localized message with `{{var}}` placeholders substituted.
    pub fn message_with(&self, locale: &Locale, key: &str, variables: &[(&str, &str)]) -> String {
        interpolate(&self.message(locale, key), variables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn locale(raw: &str) -> Locale {
        raw.parse().unwrap()
    }

    #[test]
    fn test_locale_parsing_normalizes_case_and_separator() {
        assert_eq!(locale("EN_us").to_string(), "en_US");
        assert_eq!(locale("en-gb").to_string(), "en_GB");
        assert_eq!(locale("pl").to_string(), "pl");
    }

    #[test]
    fn test_invalid_locale_is_rejected() {
        assert!("".parse::<Locale>().is_err());
        assert!("12_en".parse::<Locale>().is_err());
        assert!("en_".parse::<Locale>().is_err());
    }

    #[test]
    fn test_parse_locale_list() {
        let locales = parse_locale_list("fr, pl,en_GB").unwrap();
        assert_eq!(locales, vec![locale("fr"), locale("pl"), locale("en_GB")]);
    }

    #[test]
    fn test_interpolate_replaces_placeholders() {
        let message = interpolate(
            "This is a test with {{param1}} variable.",
            &[("param1", "my testing")],
        );
        assert_eq!(message, "This is a test with my testing variable.");
    }

    #[test]
    fn test_message_falls_back_to_language_then_default_then_key() {
        let mut registry = MessageRegistry::new(locale("en_US"));
        registry.insert(locale("en_US"), "app.greeting", "Hello");
        registry.insert(locale("pl"), "app.greeting", "Cześć");

        assert_eq!(registry.message(&locale("pl_PL"), "app.greeting"), "Cześć");
        assert_eq!(registry.message(&locale("fr_FR"), "app.greeting"), "Hello");
        assert_eq!(registry.message(&locale("fr_FR"), "app.missing"), "app.missing");
    }

    #[test]
    fn test_blank_pattern_counts_as_missing() {
        let mut registry = MessageRegistry::new(locale("en_US"));
        registry.insert(locale("en_US"), "app.empty", "   ");

        assert_eq!(registry.message(&locale("en_US"), "app.empty"), "app.empty");
    }

    #[test]
    fn test_message_with_variables() {
        let mut registry = MessageRegistry::new(locale("en_US"));
        registry.insert(locale("en_US"), "app.welcome", "Welcome, {{name}}!");

        let message = registry.message_with(&locale("en_US"), "app.welcome", &[("name", "Ada")]);
        assert_eq!(message, "Welcome, Ada!");
    }

    #[test]
    fn test_registry_from_source_uses_default_locale_property() {
        let mut source = std::collections::HashMap::new();
        source.insert(
            "jmpsl.core.locale.default-locale".to_string(),
            "pl_PL".to_string(),
        );

        let registry = MessageRegistry::from_source(&source).unwrap();
        assert_eq!(registry.default_locale(), &locale("pl_PL"));

        let fallback =
            MessageRegistry::from_source(&std::collections::HashMap::<String, String>::new()).unwrap();
        assert_eq!(fallback.default_locale(), &locale("en_US"));
    }
}
