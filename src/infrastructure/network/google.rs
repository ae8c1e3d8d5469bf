use crate::domain::model::{FetchOutcome, TranslatorId};
use crate::domain::traits::Translator;
use async_trait::async_trait;

/// Google only offers the browser link; nothing is fetched in-app.
#[derive(Debug, Default)]
pub struct GoogleTranslator;

#[async_trait]
impl Translator for GoogleTranslator {
    fn id(&self) -> TranslatorId {
        TranslatorId::Google
    }

    fn title(&self) -> &str {
        "Google Translation"
    }

    fn icon(&self) -> &str {
        "google_small"
    }

    async fn fetch_info(&self, _query: &str) -> FetchOutcome {
        FetchOutcome::Empty
    }

    fn external_url(&self, query: &str) -> Option<String> {
        Some(format!(
            "https://translate.google.cn/#auto/zh-CN/{}",
            urlencoding::encode(query)
        ))
    }
}
