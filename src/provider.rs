//! Capabilities a translation host composes connectors from
//!
//! A host does not subclass anything: it holds connectors as
//! `Box<dyn TranslationProvider>` and asks the ones that are configurable for
//! their schema and editor through [`ConfigurableComponent`].
//!
//! # Example
//!
//! ```ignore
//! use mtuoc_connector::{MtuocConnector, TranslationProvider};
//! use mtuoc_fragment::TextFragment;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut connector = MtuocConnector::new();
//!     connector.parameters_mut().set_url("http://localhost:8000");
//!     connector.set_languages("en".parse()?, "fr".parse()?);
//!
//!     if let Some(result) = connector.query(&TextFragment::from("Hello")).await? {
//!         println!("{}", result.target); // "Bonjour"
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use mtuoc_fragment::TextFragment;
use serde::Serialize;

use crate::error::ConnectorResult;
use crate::params::{EditorDescription, ParametersDescription};

/// How a translation candidate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchType {
    /// Translation memory match on identical source text
    Exact,
    /// Translation memory match on similar source text
    Fuzzy,
    /// Produced by a machine translation engine
    MachineTranslation,
}

/// One translation candidate for a queried fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub source: TextFragment,
    pub target: TextFragment,
    /// Name of the provider that produced the candidate
    pub origin: String,
    pub match_type: MatchType,
    /// 0-100
    pub fuzzy_score: u8,
    /// Ranking weight assigned by the host
    pub weight: i32,
}

/// A backend that can translate one fragment at a time
///
/// `query` has three outcomes:
///
/// * `Ok(None)` - nothing to translate (no non-whitespace text); no I/O is done
/// * `Ok(Some(result))` - exactly one translation
/// * `Err(_)` - the query failed and produced nothing
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Display name, also used as the result origin
    fn name(&self) -> &str;

    /// Called by the host before the first query
    fn open(&self) {}

    /// Called by the host after the last query, also when a query failed
    fn close(&self) {}

    async fn query(&self, fragment: &TextFragment) -> ConnectorResult<Option<QueryResult>>;

    /// Query a plain string with no inline codes
    async fn query_text(&self, text: &str) -> ConnectorResult<Option<QueryResult>> {
        self.query(&TextFragment::from(text)).await
    }
}

/// A component whose settings a host UI can render and edit
pub trait ConfigurableComponent {
    fn parameters_description(&self) -> ParametersDescription;

    fn editor_description(&self) -> EditorDescription;
}
