//! Connector for the MTUOC MT engine API
//!
//! Each query is one self-contained round trip:
//!
//! 1. the fragment is encoded to coded HTML (inline codes become inert
//!    `<u id='N'>` / `<br id='pN'/>` tags),
//! 2. `{"src", "id", "srcLang", "tgtLang"}` is POSTed to `<url>/translate`,
//! 3. the `tgt` field of the JSON response is decoded back into a fragment
//!    using clones of the source fragment's codes.
//!
//! There is no connection reuse and no retry. A fresh HTTP client is built for
//! every query and dropped when it returns.

use async_trait::async_trait;
use mtuoc_fragment::{TextFragment, from_coded_html, to_coded_html};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ConnectorResult, QueryError};
use crate::locale::LocaleId;
use crate::params::{EditorDescription, Parameters, ParametersDescription};
use crate::provider::{ConfigurableComponent, MatchType, QueryResult, TranslationProvider};
use crate::request_id::{RandomIdSource, RequestIdSource};
use crate::wire::{TranslateRequest, TranslateResponse};

const TRANSLATE_METHOD: &str = "/translate";

/// Translation provider backed by an MTUOC engine
///
/// Holds the server parameters, the language pair and the weight given to
/// results. A connector without a URL or without languages fails every
/// non-empty query with a configuration error.
pub struct MtuocConnector {
    /// Server URL
    params: Parameters,
    source_locale: Option<LocaleId>,
    target_locale: Option<LocaleId>,
    /// Copied into every `QueryResult`
    weight: i32,
    /// Generator for the request `id` field
    id_source: Box<dyn RequestIdSource>,
}

impl MtuocConnector {
    /// Display name, also the `origin` of every result
    pub const NAME: &'static str = "MTUOC API Connector";

    /// Bounds connection establishment only; reading the response has no limit
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Score given to every MT result
    pub const FUZZY_SCORE: u8 = 95;

    /// Create a connector with empty parameters and no languages
    ///
    /// The URL and the language pair must be set before querying.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut connector = MtuocConnector::new()
    ///     .with_languages(LocaleId::parse("en")?, LocaleId::parse("fr")?);
    /// connector.parameters_mut().set_url("http://localhost:8000");
    /// ```
    pub fn new() -> Self {
        MtuocConnector {
            params: Parameters::new(),
            source_locale: None,
            target_locale: None,
            weight: 0,
            id_source: Box::new(RandomIdSource),
        }
    }

    /// Create a connector from stored parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Parameters loaded by the host, e.g. with [`Parameters::from_file`]
    pub fn with_parameters(params: Parameters) -> Self {
        MtuocConnector {
            params,
            ..Self::new()
        }
    }

    /// Replace the generator of request ids (e.g. with a fixed id in tests)
    pub fn with_id_source(mut self, id_source: impl RequestIdSource + 'static) -> Self {
        self.id_source = Box::new(id_source);
        self
    }

    /// Builder form of [`MtuocConnector::set_languages`]
    pub fn with_languages(mut self, source: LocaleId, target: LocaleId) -> Self {
        self.set_languages(source, target);
        self
    }

    /// Human-readable summary of the settings, for display only
    pub fn settings_display(&self) -> String {
        format!("MTUOC URL: {}", self.params.url())
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Mutable access for editing the URL in place
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    /// Replace all parameters at once
    pub fn set_parameters(&mut self, params: Parameters) {
        self.params = params;
    }

    /// Set the language pair used by following queries
    ///
    /// # Arguments
    ///
    /// * `source` - Locale of the fragments passed to `query`
    /// * `target` - Locale to translate into
    ///
    /// Only the language subtag of each locale is sent to the server.
    pub fn set_languages(&mut self, source: LocaleId, target: LocaleId) {
        self.source_locale = Some(source);
        self.target_locale = Some(target);
    }

    pub fn source_locale(&self) -> Option<&LocaleId> {
        self.source_locale.as_ref()
    }

    pub fn target_locale(&self) -> Option<&LocaleId> {
        self.target_locale.as_ref()
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Weight the host gives this provider when ranking results
    pub fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
    }

    fn languages(&self) -> Result<(&LocaleId, &LocaleId), QueryError> {
        match (&self.source_locale, &self.target_locale) {
            (Some(source), Some(target)) => Ok((source, target)),
            _ => Err(QueryError::Configuration(
                "Source and target languages must be set before querying.".to_string(),
            )),
        }
    }

    /// One POST to `<url>/translate` and the decoding of its `tgt`
    ///
    /// # Returns
    ///
    /// * `Ok(QueryResult)` - Fragment decoded with the source's codes
    /// * `Err(QueryError)` - Missing configuration, transport failure, status >= 400
    ///   or a body without a string `tgt`
    async fn translate_fragment(&self, fragment: &TextFragment) -> Result<QueryResult, QueryError> {
        if self.params.url().is_empty() {
            return Err(QueryError::Configuration(
                "You must have a URL configured for your MTUOC Engine.".to_string(),
            ));
        }
        let (source, target) = self.languages()?;

        let url = format!("{}{}", self.params.url(), TRANSLATE_METHOD);
        let request = TranslateRequest {
            src: to_coded_html(fragment),
            id: self.id_source.next_id(),
            src_lang: source.language().to_string(),
            tgt_lang: target.language().to_string(),
        };

        debug!(
            url = %url,
            id = request.id,
            src_lang = %request.src_lang,
            tgt_lang = %request.tgt_lang,
            "Sending MTUOC translation request"
        );

        let client = reqwest::Client::builder()
            .http1_only()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let response = client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // 3xx bodies are parsed like 2xx ones
        if status.as_u16() >= 400 {
            warn!(url = %url, status = status.as_u16(), "MTUOC server returned an error");
            return Err(QueryError::RemoteService {
                status: status.as_u16(),
                body,
            });
        }

        let translation = TranslateResponse::from_body(&body)?;
        debug!(id = request.id, "Received MTUOC translation");

        Ok(QueryResult {
            source: fragment.clone(),
            target: from_coded_html(&translation.tgt, fragment, true),
            origin: self.name().to_string(),
            match_type: MatchType::MachineTranslation,
            fuzzy_score: Self::FUZZY_SCORE,
            weight: self.weight,
        })
    }
}

impl Default for MtuocConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MtuocConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MtuocConnector")
            .field("params", &self.params)
            .field("source_locale", &self.source_locale)
            .field("target_locale", &self.target_locale)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TranslationProvider for MtuocConnector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn open(&self) {
        // Nothing to do
    }

    fn close(&self) {
        // Nothing to do
    }

    /// Translate one fragment with the configured MTUOC server.
    ///
    /// Fragments without non-whitespace text return `Ok(None)` before the
    /// configuration is even looked at.
    async fn query(&self, fragment: &TextFragment) -> ConnectorResult<Option<QueryResult>> {
        if !fragment.has_text() {
            return Ok(None);
        }
        let result = self.translate_fragment(fragment).await?;
        Ok(Some(result))
    }
}

impl ConfigurableComponent for MtuocConnector {
    fn parameters_description(&self) -> ParametersDescription {
        self.params.parameters_description()
    }

    fn editor_description(&self) -> EditorDescription {
        self.params.editor_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtuoc_fragment::Code;

    fn configured() -> MtuocConnector {
        let mut connector = MtuocConnector::new()
            .with_languages("en".parse().unwrap(), "fr".parse().unwrap());
        connector.parameters_mut().set_url("http://127.0.0.1:1");
        connector
    }

    #[test]
    fn test_name() {
        assert_eq!(MtuocConnector::new().name(), "MTUOC API Connector");
    }

    #[test]
    fn test_settings_display_embeds_url() {
        let mut connector = MtuocConnector::new();
        assert_eq!(connector.settings_display(), "MTUOC URL: ");
        connector.parameters_mut().set_url("http://localhost:8000");
        assert_eq!(connector.settings_display(), "MTUOC URL: http://localhost:8000");
    }

    #[test]
    fn test_set_parameters_replaces_without_validation() {
        let mut connector = configured();
        connector.set_parameters(Parameters::new());
        assert_eq!(connector.parameters().url(), "");
    }

    #[test]
    fn test_open_close_are_noops() {
        let connector = configured();
        connector.open();
        connector.close();
        connector.open();
        assert_eq!(connector.parameters().url(), "http://127.0.0.1:1");
    }

    #[test]
    fn test_weight_defaults_to_zero() {
        let mut connector = MtuocConnector::new();
        assert_eq!(connector.weight(), 0);
        connector.set_weight(3);
        assert_eq!(connector.weight(), 3);
    }

    #[test]
    fn test_editor_delegates_to_parameters() {
        let connector = MtuocConnector::new();
        assert_eq!(connector.editor_description(), Parameters::new().editor_description());
    }

    #[test]
    fn test_debug_output() {
        let debug_str = format!("{:?}", configured());
        assert!(debug_str.contains("MtuocConnector"));
        assert!(debug_str.contains("127.0.0.1:1"));
    }

    #[tokio::test]
    async fn test_empty_fragment_returns_none_without_url() {
        let connector = MtuocConnector::new();
        assert!(connector.query(&TextFragment::new()).await.unwrap().is_none());
        assert!(connector.query_text("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_whitespace_and_codes_only_returns_none() {
        let connector = MtuocConnector::new();
        let mut fragment = TextFragment::new();
        fragment
            .append_text("  ")
            .append_code(Code::placeholder(1, "br", "<br/>"))
            .append_text("\t\n");
        assert!(connector.query(&fragment).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_url_is_configuration_error() {
        let connector = MtuocConnector::new()
            .with_languages("en".parse().unwrap(), "fr".parse().unwrap());
        let err = connector.query_text("Hello").await.unwrap_err();
        match err.kind() {
            QueryError::Configuration(msg) => assert!(msg.contains("URL")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
        assert!(err.to_string().starts_with("Error querying the server"));
    }

    #[tokio::test]
    async fn test_missing_languages_is_configuration_error() {
        let mut connector = MtuocConnector::new();
        connector.parameters_mut().set_url("http://127.0.0.1:1");
        let err = connector.query_text("Hello").await.unwrap_err();
        assert!(matches!(err.kind(), QueryError::Configuration(_)));
    }
}
