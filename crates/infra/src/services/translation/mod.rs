use avtale_domain::Translator;
use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LOCALE: &str = "en";

/// Maps a locale tag to a `Translator` for message composition
#[async_trait::async_trait]
pub trait ITranslationResolver: Send + Sync {
    /// Resolution never fails: unknown tags fall back to their primary
    /// subtag and finally to the default locale.
    async fn resolve(&self, locale: &str) -> Translator;
}

const LOCALES: [(&str, &str); 5] = [
    ("en", include_str!("locales/en.json")),
    ("de", include_str!("locales/de.json")),
    ("es", include_str!("locales/es.json")),
    ("fr", include_str!("locales/fr.json")),
    ("nb", include_str!("locales/nb.json")),
];

/// Phrase catalogs embedded at build time, one JSON file per locale
pub struct TranslationRegistry {
    catalogs: HashMap<String, Arc<HashMap<String, String>>>,
}

impl TranslationRegistry {
    pub fn from_embedded() -> Self {
        let catalogs = LOCALES
            .iter()
            .map(|(locale, phrases)| {
                let catalog: HashMap<String, String> =
                    serde_json::from_str(phrases).expect("Embedded phrase catalogs to be valid JSON");
                (locale.to_string(), Arc::new(catalog))
            })
            .collect();
        Self { catalogs }
    }

    fn catalog(&self, locale: &str) -> (String, Arc<HashMap<String, String>>) {
        if let Some(catalog) = self.catalogs.get(locale) {
            return (locale.to_string(), catalog.clone());
        }
        // A regional tag like "fr-CA" resolves to its "fr" catalog
        if let Some(primary) = locale.split('-').next() {
            if let Some(catalog) = self.catalogs.get(primary) {
                return (primary.to_string(), catalog.clone());
            }
        }
        let default_catalog = self
            .catalogs
            .get(DEFAULT_LOCALE)
            .expect("Default locale catalog to be embedded")
            .clone();
        (DEFAULT_LOCALE.to_string(), default_catalog)
    }
}

#[async_trait::async_trait]
impl ITranslationResolver for TranslationRegistry {
    async fn resolve(&self, locale: &str) -> Translator {
        let (locale, catalog) = self.catalog(locale);
        Translator::new(locale, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_an_exact_locale_tag() {
        let registry = TranslationRegistry::from_embedded();
        let translator = registry.resolve("fr").await;
        assert_eq!(translator.locale(), "fr");
        assert_eq!(translator.t("when"), "Quand");
    }

    #[tokio::test]
    async fn regional_tags_fall_back_to_their_primary_subtag() {
        let registry = TranslationRegistry::from_embedded();
        let translator = registry.resolve("fr-CA").await;
        assert_eq!(translator.locale(), "fr");
    }

    #[tokio::test]
    async fn unknown_tags_fall_back_to_the_default_locale() {
        let registry = TranslationRegistry::from_embedded();
        let translator = registry.resolve("tlh").await;
        assert_eq!(translator.locale(), DEFAULT_LOCALE);
        assert_eq!(translator.t("when"), "When");
    }

    #[test]
    fn every_catalog_carries_the_same_phrases() {
        let registry = TranslationRegistry::from_embedded();
        let mut reference = registry.catalogs[DEFAULT_LOCALE]
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        reference.sort();
        for (locale, catalog) in &registry.catalogs {
            let mut keys = catalog.keys().cloned().collect::<Vec<_>>();
            keys.sort();
            assert_eq!(keys, reference, "Catalog for locale: {} is incomplete", locale);
        }
    }
}
