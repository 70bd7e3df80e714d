//! Locale identifiers for source and target languages
//!
//! The host hands the connector full locale tags (`en-US`, `zh-Hans`,
//! `pt_BR`); the MTUOC API only wants the language subtag. Parsing goes
//! through `icu_locale` so malformed tags are rejected when the languages are
//! set, not when the server receives them.

use icu_locale::Locale;
use std::str::FromStr;

use crate::error::LocaleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleId(Locale);

impl LocaleId {
    /// Parse a BCP 47 tag. Underscores are accepted as separators.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let normalized = tag.trim().replace('_', "-");
        if normalized.is_empty() {
            return Err(LocaleError {
                locale: tag.to_string(),
                reason: "locale is empty".to_string(),
            });
        }

        Locale::try_from_str(&normalized)
            .map(LocaleId)
            .map_err(|e| LocaleError {
                locale: tag.to_string(),
                reason: e.to_string(),
            })
    }

    /// Language subtag, lowercase: `en-US` → `en`
    pub fn language(&self) -> &str {
        self.0.id.language.as_str()
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleId::parse(s)
    }
}

impl std::fmt::Display for LocaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
