//! Place-name translation.
//!
//! [`Translator`] is the capability the resolver depends on. The production
//! implementation, [`GoogleTranslator`], talks to the public Google Translate
//! `translate_a/single` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::TranslateError;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com/";

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang`.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

/// Returns its input unchanged. Used when translation is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Client for the Google Translate web endpoint.
///
/// Use [`GoogleTranslator::new`] for production or
/// [`GoogleTranslator::with_base_url`] to point at a mock server in tests.
pub struct GoogleTranslator {
    client: Client,
    base_url: Url,
}

impl GoogleTranslator {
    /// # Errors
    ///
    /// Returns [`TranslateError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, TranslateError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// # Errors
    ///
    /// Returns [`TranslateError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`TranslateError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent("rarespawn/0.1 (alert-formatter)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TranslateError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn build_url(&self, text: &str, source_lang: &str, target_lang: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!(
            "{}translate_a/single",
            self.base_url.path()
        ));
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source_lang)
            .append_pair("tl", target_lang)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let url = self.build_url(text, source_lang, target_lang);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TranslateError::Deserialize {
                context: format!("translate(sl={source_lang}, tl={target_lang})"),
                source: e,
            })?;
        parse_translation(&payload)
    }
}

/// Joins the translated chunk of every sentence segment.
///
/// The endpoint answers with `[[["譯文", "source", ...], ...], ...]`.
fn parse_translation(payload: &serde_json::Value) -> Result<String, TranslateError> {
    let translated: String = payload
        .get(0)
        .and_then(serde_json::Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|seg| seg.get(0).and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let translated = translated.trim();
    if translated.is_empty() {
        return Err(TranslateError::EmptyResponse);
    }
    Ok(translated.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_translator(base_url: &str) -> GoogleTranslator {
        GoogleTranslator::with_base_url(base_url, Duration::from_secs(5))
            .expect("translator construction should not fail")
    }

    #[test]
    fn build_url_constructs_query_string() {
        let t = test_translator("https://translate.googleapis.com");
        let url = t.build_url("Tokyo", "en", "zh-TW");
        assert_eq!(
            url.as_str(),
            "https://translate.googleapis.com/translate_a/single?client=gtx&sl=en&tl=zh-TW&dt=t&q=Tokyo"
        );
    }

    #[test]
    fn build_url_keeps_base_path() {
        let t = test_translator("http://127.0.0.1:9000/proxy/");
        let url = t.build_url("New York", "en", "ja");
        assert!(
            url.as_str()
                .starts_with("http://127.0.0.1:9000/proxy/translate_a/single?"),
            "unexpected url: {url}"
        );
        assert!(url.as_str().contains("q=New+York"), "unexpected url: {url}");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GoogleTranslator::with_base_url("not a url", Duration::from_secs(1)).err();
        assert!(matches!(err, Some(TranslateError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn parse_translation_joins_segments() {
        let payload = json!([[["紐約", "New York", null, null, 10], ["市", " City", null]], null, "en"]);
        assert_eq!(parse_translation(&payload).unwrap(), "紐約市");
    }

    #[test]
    fn parse_translation_rejects_empty_payload() {
        assert!(matches!(
            parse_translation(&json!([])),
            Err(TranslateError::EmptyResponse)
        ));
        assert!(matches!(
            parse_translation(&json!([[["  ", "x"]]])),
            Err(TranslateError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn passthrough_returns_input() {
        let out = PassthroughTranslator
            .translate("Taipei", "en", "zh-TW")
            .await
            .unwrap();
        assert_eq!(out, "Taipei");
    }
}
