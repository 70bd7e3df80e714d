//! Network-free translation provider for testing
//!
//! `MockProvider` goes through the same coded-HTML encode/decode steps as
//! [`crate::MtuocConnector`] but replaces the HTTP round trip with a
//! deterministic transformation of the encoded string. Hosts can test their
//! pipelines against it without a running MTUOC server.
//!
//! # Example
//!
//! ```ignore
//! use mtuoc_connector::{MockMode, MockProvider, TranslationProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Suffix("fr".to_string()));
//!     let result = mock.query_text("hello").await.unwrap().unwrap();
//!     assert_eq!(result.target.text(), "hello_fr");
//! }
//! ```

use async_trait::async_trait;
use mtuoc_fragment::{TextFragment, from_coded_html, to_coded_html};
use std::collections::HashMap;

use crate::error::{ConnectorResult, QueryError};
use crate::provider::{MatchType, QueryResult, TranslationProvider};

#[derive(Debug, Clone)]
pub enum MockMode {
    /// Return the encoded source unchanged, as a server that echoes `src` would
    Echo,

    /// Append a locale suffix: "hello" → "hello_fr"
    Suffix(String),

    /// Look up the encoded source in a table; unknown sources are echoed
    Mappings(HashMap<String, String>),

    /// Fail every query as if the server had answered with this status and body
    Error { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct MockProvider {
    mode: MockMode,
    weight: i32,
}

impl MockProvider {
    pub const NAME: &'static str = "Mock Provider";

    pub fn new(mode: MockMode) -> Self {
        MockProvider { mode, weight: 0 }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    fn apply_translation(&self, coded: String) -> Result<String, QueryError> {
        match &self.mode {
            MockMode::Echo => Ok(coded),
            MockMode::Suffix(target) => Ok(format!("{}_{}", coded, target)),
            MockMode::Mappings(map) => Ok(map.get(&coded).cloned().unwrap_or(coded)),
            MockMode::Error { status, body } => Err(QueryError::RemoteService {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn query(&self, fragment: &TextFragment) -> ConnectorResult<Option<QueryResult>> {
        if !fragment.has_text() {
            return Ok(None);
        }

        let translated = self.apply_translation(to_coded_html(fragment))?;

        Ok(Some(QueryResult {
            source: fragment.clone(),
            target: from_coded_html(&translated, fragment, true),
            origin: self.name().to_string(),
            match_type: MatchType::MachineTranslation,
            fuzzy_score: 95,
            weight: self.weight,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtuoc_fragment::Code;

    fn bold_world() -> TextFragment {
        let mut fragment = TextFragment::new();
        fragment
            .append_text("Hello ")
            .append_code(Code::opening(1, "b", "<b>"))
            .append_text("world")
            .append_code(Code::closing(1, "b", "</b>"));
        fragment
    }

    #[tokio::test]
    async fn test_echo_returns_source() {
        let mock = MockProvider::new(MockMode::Echo);
        let source = bold_world();
        let result = mock.query(&source).await.unwrap().unwrap();
        assert_eq!(result.target, source);
        assert_eq!(result.origin, "Mock Provider");
    }

    #[tokio::test]
    async fn test_suffix_single_translation() {
        let mock = MockProvider::new(MockMode::Suffix("fr".to_string()));
        let result = mock.query_text("hello").await.unwrap().unwrap();
        assert_eq!(result.target.text(), "hello_fr");
    }

    #[tokio::test]
    async fn test_suffix_keeps_codes() {
        let mock = MockProvider::new(MockMode::Suffix("fr".to_string()));
        let result = mock.query(&bold_world()).await.unwrap().unwrap();
        assert_eq!(result.target.to_string(), "Hello <b>world</b>_fr");
    }

    #[tokio::test]
    async fn test_mapping_translation() {
        let mut map = HashMap::new();
        map.insert(
            "Hello <u id='1'>world</u>".to_string(),
            "<u id='1'>Monde</u>, bonjour".to_string(),
        );
        let mock = MockProvider::new(MockMode::Mappings(map));
        let result = mock.query(&bold_world()).await.unwrap().unwrap();
        assert_eq!(result.target.to_string(), "<b>Monde</b>, bonjour");
    }

    #[tokio::test]
    async fn test_mapping_fallback_to_echo() {
        let mock = MockProvider::new(MockMode::Mappings(HashMap::new()));
        let result = mock.query_text("unknown").await.unwrap().unwrap();
        assert_eq!(result.target.text(), "unknown");
    }

    #[tokio::test]
    async fn test_error_mode_returns_error() {
        let mock = MockProvider::new(MockMode::Error {
            status: 503,
            body: "busy".to_string(),
        });
        let err = mock.query_text("hello").await.unwrap_err();
        match err.kind() {
            QueryError::RemoteService { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("Expected RemoteService, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_errors() {
        let mock = MockProvider::new(MockMode::Error {
            status: 500,
            body: String::new(),
        });
        assert!(mock.query_text("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_weight_is_reported() {
        let mock = MockProvider::new(MockMode::Echo).with_weight(5);
        let result = mock.query_text("hi").await.unwrap().unwrap();
        assert_eq!(result.weight, 5);
        assert_eq!(result.fuzzy_score, 95);
        assert_eq!(result.match_type, MatchType::MachineTranslation);
    }

    #[tokio::test]
    async fn test_lifecycle_through_trait_object() {
        let provider: Box<dyn TranslationProvider> =
            Box::new(MockProvider::new(MockMode::Suffix("es".to_string())));
        provider.open();
        let result = provider.query_text("hola").await;
        provider.close();
        assert_eq!(result.unwrap().unwrap().target.text(), "hola_es");
    }
}
