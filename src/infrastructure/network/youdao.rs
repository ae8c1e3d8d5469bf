use crate::domain::error::FetchError;
use crate::domain::model::{FetchOutcome, TranslatorId};
use crate::domain::traits::Translator;
use crate::infrastructure::config::TranslationSettings;
use crate::infrastructure::network::http::fetch_text;
use crate::presentation::html::{decorate_html, render_youdao};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

pub const YOUDAO_ENDPOINT: &str = "http://fanyi.youdao.com/openapi.do";

// Youdao open API (v1.1) response
#[derive(Deserialize, Debug, Default)]
pub struct YoudaoResponse {
    #[serde(rename = "errorCode", default)]
    pub error_code: i64,
    #[serde(rename = "translation")]
    pub translations: Option<Vec<String>>,
    pub basic: Option<BasicInfo>,
    #[serde(rename = "web")]
    pub web_translations: Option<Vec<WebTranslation>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct BasicInfo {
    #[serde(rename = "us-phonetic")]
    pub us_phonetic: Option<String>,
    #[serde(rename = "uk-phonetic")]
    pub uk_phonetic: Option<String>,
    pub phonetic: Option<String>,
    pub explains: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct WebTranslation {
    pub key: String,
    #[serde(default)]
    pub value: Vec<Option<String>>,
}

pub struct YoudaoTranslator {
    client: Client,
    endpoint: String,
    keyfrom: String,
    api_key: String,
}

impl YoudaoTranslator {
    pub fn new(client: Client, settings: &TranslationSettings) -> Self {
        Self::with_endpoint(client, settings, YOUDAO_ENDPOINT)
    }

    pub fn with_endpoint(
        client: Client,
        settings: &TranslationSettings,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            keyfrom: settings.youdao_keyfrom.clone(),
            api_key: settings.youdao_api_key.clone(),
        }
    }

    fn query_url(&self, query: &str) -> Result<Url, FetchError> {
        let params = [
            ("keyfrom", self.keyfrom.as_str()),
            ("key", self.api_key.as_str()),
            ("type", "data"),
            ("version", "1.1"),
            ("doctype", "json"),
            ("q", query),
        ];
        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| FetchError::Transport(format!("bad endpoint {}: {}", self.endpoint, e)))
    }

    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let url = self.query_url(query)?;
        let body = fetch_text(&self.client, url).await?;
        let response: YoudaoResponse = serde_json::from_str(&body)?;
        Ok(decorate_html(&render_youdao(query, &response)))
    }
}

#[async_trait]
impl Translator for YoudaoTranslator {
    fn id(&self) -> TranslatorId {
        TranslatorId::Youdao
    }

    fn title(&self) -> &str {
        "Youdao Translation"
    }

    fn icon(&self) -> &str {
        "youdao_small"
    }

    async fn fetch_info(&self, query: &str) -> FetchOutcome {
        match self.fetch(query).await {
            Ok(html) => {
                debug!("Youdao answered for {:?}", query);
                FetchOutcome::Text(html)
            }
            Err(e) => {
                warn!("Youdao fetch for {:?} failed: {}", query, e);
                FetchOutcome::Failed(e)
            }
        }
    }

    fn external_url(&self, query: &str) -> Option<String> {
        Some(format!(
            "http://dict.youdao.com/w/{}/#keyfrom=dict2.top",
            urlencoding::encode(query)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> YoudaoTranslator {
        YoudaoTranslator::new(Client::new(), &TranslationSettings::default())
    }

    #[test]
    fn query_url_carries_fixed_parameters() {
        let url = translator().query_url("hello world").unwrap();
        assert_eq!(url.host_str(), Some("fanyi.youdao.com"));
        assert_eq!(url.path(), "/openapi.do");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("keyfrom".into(), "IntellijTranslate".into())));
        assert!(pairs.contains(&("key".into(), "1918103305".into())));
        assert!(pairs.contains(&("type".into(), "data".into())));
        assert!(pairs.contains(&("version".into(), "1.1".into())));
        assert!(pairs.contains(&("doctype".into(), "json".into())));
        assert!(pairs.contains(&("q".into(), "hello world".into())));
    }

    #[test]
    fn external_url_is_percent_encoded() {
        let url = translator().external_url("你好").unwrap();
        assert_eq!(
            url,
            "http://dict.youdao.com/w/%E4%BD%A0%E5%A5%BD/#keyfrom=dict2.top"
        );
    }

    #[test]
    fn response_decodes_with_missing_sections() {
        let response: YoudaoResponse = serde_json::from_str(r#"{"errorCode":60}"#).unwrap();
        assert_eq!(response.error_code, 60);
        assert!(response.translations.is_none());
        assert!(response.basic.is_none());
    }

    #[test]
    fn null_explains_still_decodes() {
        let response: YoudaoResponse = serde_json::from_str(
            r#"{"errorCode":0,"translation":["hi"],"basic":{"phonetic":"hai","explains":null}}"#,
        )
        .unwrap();
        let basic = response.basic.unwrap();
        assert!(basic.explains.is_none());
        assert_eq!(basic.phonetic.as_deref(), Some("hai"));
    }
}
