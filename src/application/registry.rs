use crate::domain::model::{FetchOutcome, TranslatorId};
use crate::domain::traits::Translator;
use crate::infrastructure::config::TranslationSettings;
use crate::infrastructure::network::google::GoogleTranslator;
use crate::infrastructure::network::youdao::YoudaoTranslator;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// The winning provider's answer for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fetched {
    pub text: String,
    /// The text is a provider error (HTTP reason phrase), not a translation.
    pub is_error: bool,
    pub translator: String,
    pub translator_id: TranslatorId,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub translator: String,
    pub icon: String,
    pub url: String,
}

/// Ordered translators; read-only once built.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    translators: Vec<Arc<dyn Translator>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Youdao then Google, or only the specified one when the settings ask
    /// for it.
    pub fn from_settings(client: Client, settings: &TranslationSettings) -> Self {
        let mut registry = Self::new();
        let all: [(TranslatorId, Arc<dyn Translator>); 2] = [
            (
                TranslatorId::Youdao,
                Arc::new(YoudaoTranslator::new(client, settings)),
            ),
            (TranslatorId::Google, Arc::new(GoogleTranslator)),
        ];
        for (id, translator) in all {
            if !settings.enable_specified || id == settings.specified_translator {
                registry.register(translator);
            }
        }
        registry
    }

    pub fn register(&mut self, translator: Arc<dyn Translator>) {
        self.translators.push(translator);
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.translators.iter().map(|t| t.title()).collect()
    }

    pub fn get(&self, id: TranslatorId) -> Option<&Arc<dyn Translator>> {
        self.translators.iter().find(|t| t.id() == id)
    }

    /// Ask each translator in turn; the first one with a result wins.
    pub async fn translate(&self, query: &str) -> Option<Fetched> {
        for translator in &self.translators {
            let outcome = translator.fetch_info(query).await;
            let is_error = !matches!(outcome, FetchOutcome::Text(_));
            if let Some(text) = outcome.into_text() {
                debug!("Fetched translation from {}", translator.title());
                return Some(Fetched {
                    text,
                    is_error,
                    translator: translator.title().to_string(),
                    translator_id: translator.id(),
                    external_url: translator.external_url(query),
                });
            }
        }
        None
    }

    pub fn external_urls(&self, query: &str) -> Vec<ExternalLink> {
        self.translators
            .iter()
            .filter_map(|t| {
                t.external_url(query).map(|url| ExternalLink {
                    translator: t.title().to_string(),
                    icon: t.icon().to_string(),
                    url,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enable_specified: bool, specified: TranslatorId) -> TranslationSettings {
        TranslationSettings {
            enable_specified,
            specified_translator: specified,
            ..TranslationSettings::default()
        }
    }

    #[test]
    fn registration_order_is_youdao_then_google() {
        let registry = ProviderRegistry::from_settings(Client::new(), &settings(false, TranslatorId::Youdao));
        assert_eq!(registry.titles(), vec!["Youdao Translation", "Google Translation"]);
    }

    #[test]
    fn specified_translator_is_the_only_one() {
        let registry = ProviderRegistry::from_settings(Client::new(), &settings(true, TranslatorId::Google));
        assert_eq!(registry.titles(), vec!["Google Translation"]);
        assert!(registry.get(TranslatorId::Youdao).is_none());
    }

    #[test]
    fn external_urls_from_every_translator() {
        let registry = ProviderRegistry::from_settings(Client::new(), &settings(false, TranslatorId::Youdao));
        let links = registry.external_urls("rust");
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].url, "https://translate.google.cn/#auto/zh-CN/rust");
    }
}
