//! Bilingual copy for the marketing site and portal.
//!
//! SmartLine ships English and Arabic. Copy lives in bundled JSON catalogues
//! keyed by dotted message ids (`hero.title`, `driver.firstName`). Lookups
//! never fail: an unknown key renders as itself so a missing translation is
//! visible rather than fatal.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

const BUNDLED_EN: &str = include_str!("../../locales/en.json");
const BUNDLED_AR: &str = include_str!("../../locales/ar.json");

/// Supported interface language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, rendered left to right.
    #[default]
    En,
    /// Arabic, rendered right to left.
    Ar,
}

/// Text direction of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// BCP 47 tag used for the document `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Direction the page must be laid out in.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{Language, TextDirection};
    ///
    /// assert_eq!(Language::Ar.direction(), TextDirection::Rtl);
    /// assert_eq!(Language::En.direction(), TextDirection::Ltr);
    /// ```
    pub fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    /// Whether the language is laid out right to left.
    pub fn is_rtl(self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    /// The other language, as flipped by the header toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language tag is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language '{0}'; expected en or ar")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(UnsupportedLanguage(s.to_owned())),
        }
    }
}

/// Failures raised while loading catalogues.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Catalogue text is not a flat JSON object of strings.
    #[error("catalogue for {language} is malformed: {source}")]
    Malformed {
        language: Language,
        #[source]
        source: serde_json::Error,
    },
    /// Catalogue has no entries.
    #[error("catalogue for {language} is empty")]
    Empty { language: Language },
}

type Messages = BTreeMap<String, String>;

/// Message tables for every supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    en: Messages,
    ar: Messages,
}

impl Catalogue {
    /// Load the catalogues compiled into the binary.
    ///
    /// # Errors
    /// Returns [`CatalogueError`] when a bundled file is malformed or empty.
    pub fn bundled() -> Result<Self, CatalogueError> {
        Self::from_json(BUNDLED_EN, BUNDLED_AR)
    }

    /// Parse catalogues from raw JSON objects.
    ///
    /// # Errors
    /// Returns [`CatalogueError`] when either document is malformed or empty.
    pub fn from_json(en: &str, ar: &str) -> Result<Self, CatalogueError> {
        Ok(Self {
            en: parse_messages(Language::En, en)?,
            ar: parse_messages(Language::Ar, ar)?,
        })
    }

    /// All messages for one language.
    pub fn messages(&self, language: Language) -> &BTreeMap<String, String> {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Resolve `key`, falling back to the key itself.
    ///
    /// # Examples
    /// ```
    /// use smartline::domain::{Catalogue, Language};
    ///
    /// let catalogue = Catalogue::bundled().expect("bundled catalogues");
    /// assert_eq!(catalogue.translate(Language::En, "nav.home"), "Home");
    /// assert_eq!(catalogue.translate(Language::En, "no.such.key"), "no.such.key");
    /// ```
    pub fn translate<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.messages(language)
            .get(key)
            .map_or(key, String::as_str)
    }

    /// Keys present in English but absent from Arabic.
    pub fn untranslated_keys(&self) -> Vec<&str> {
        self.en
            .keys()
            .filter(|key| !self.ar.contains_key(key.as_str()))
            .map(String::as_str)
            .collect()
    }
}

fn parse_messages(language: Language, raw: &str) -> Result<Messages, CatalogueError> {
    let messages: Messages = serde_json::from_str(raw)
        .map_err(|source| CatalogueError::Malformed { language, source })?;
    if messages.is_empty() {
        return Err(CatalogueError::Empty { language });
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Language::En)]
    #[case(" AR ", Language::Ar)]
    #[case("Ar", Language::Ar)]
    fn parses_supported_tags(#[case] raw: &str, #[case] expected: Language) {
        assert_eq!(raw.parse::<Language>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("fr")]
    #[case("en-GB")]
    fn rejects_unsupported_tags(#[case] raw: &str) {
        assert!(raw.parse::<Language>().is_err());
    }

    #[rstest]
    fn toggling_flips_direction() {
        let start = Language::default();
        assert_eq!(start.direction(), TextDirection::Ltr);
        assert_eq!(start.toggled().direction(), TextDirection::Rtl);
        assert_eq!(start.toggled().toggled(), start);
    }

    #[rstest]
    fn bundled_catalogues_are_complete() {
        let catalogue = Catalogue::bundled().expect("bundled catalogues load");
        assert!(catalogue.untranslated_keys().is_empty());
        assert_eq!(
            catalogue.messages(Language::En).len(),
            catalogue.messages(Language::Ar).len()
        );
    }

    #[rstest]
    fn arabic_lookup_differs_from_english() {
        let catalogue = Catalogue::bundled().expect("bundled catalogues load");
        assert_eq!(catalogue.translate(Language::En, "hero.title"), "Your Smart Ride Solution");
        assert_ne!(
            catalogue.translate(Language::Ar, "hero.title"),
            catalogue.translate(Language::En, "hero.title")
        );
    }

    #[rstest]
    fn reports_untranslated_keys() {
        let catalogue = Catalogue::from_json(r#"{"a":"A","b":"B"}"#, r#"{"a":"أ"}"#)
            .expect("catalogues parse");
        assert_eq!(catalogue.untranslated_keys(), vec!["b"]);
    }

    #[rstest]
    #[case("{}")]
    #[case("[1, 2]")]
    fn rejects_empty_or_malformed_catalogues(#[case] raw: &str) {
        assert!(Catalogue::from_json(raw, r#"{"a":"b"}"#).is_err());
    }
}
