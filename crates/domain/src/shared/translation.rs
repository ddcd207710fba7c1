use std::{collections::HashMap, sync::Arc};

/// A resolved phrase catalog for a single locale. Cloning is cheap, so a
/// `Translator` can be attached to every participant of a notification
/// payload.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    phrases: Arc<HashMap<String, String>>,
}

impl Translator {
    pub fn new(locale: impl Into<String>, phrases: Arc<HashMap<String, String>>) -> Self {
        Self {
            locale: locale.into(),
            phrases,
        }
    }

    /// The locale tag this catalog was resolved for
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Looks up a phrase, falling back to the key itself for entries the
    /// catalog does not carry.
    pub fn t(&self, key: &str) -> String {
        self.phrases
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        let mut phrases = HashMap::new();
        phrases.insert("when".to_string(), "Wann".to_string());
        Translator::new("de", Arc::new(phrases))
    }

    #[test]
    fn translates_known_phrases() {
        assert_eq!(translator().t("when"), "Wann");
    }

    #[test]
    fn falls_back_to_the_key_for_unknown_phrases() {
        assert_eq!(translator().t("some_unknown_phrase"), "some_unknown_phrase");
    }
}
