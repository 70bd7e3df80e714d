//! Connector for the MTUOC machine translation server
//!
//! This crate lets translation tooling query an MTUOC engine over HTTP and get
//! the answer back as a [`TextFragment`] with its inline codes intact.
//!
//! # Workflow Example
//!
//! ```ignore
//! use mtuoc_connector::{LocaleId, MtuocConnector, TranslationProvider};
//! use mtuoc_fragment::{Code, TextFragment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Configure the connector
//!     let mut connector = MtuocConnector::new()
//!         .with_languages(LocaleId::parse("en-US")?, LocaleId::parse("fr-FR")?);
//!     connector.parameters_mut().set_url("http://localhost:8000");
//!
//!     // 2. Build the fragment to translate
//!     let mut fragment = TextFragment::new();
//!     fragment
//!         .append_text("Hello ")
//!         .append_code(Code::opening(1, "b", "<b>"))
//!         .append_text("world")
//!         .append_code(Code::closing(1, "b", "</b>"));
//!
//!     // 3. Query: Ok(None) means there was nothing to translate
//!     if let Some(result) = connector.query(&fragment).await? {
//!         println!("{}", result.target); // "Bonjour <b>le monde</b>"
//!     }
//!     Ok(())
//! }
//! ```

pub mod connector;
pub mod error;
pub mod locale;
pub mod mock;
pub mod params;
pub mod provider;
pub mod request_id;
pub mod wire;

// Re-export main types for convenient access
pub use connector::MtuocConnector;
pub use error::{ConnectorError, ConnectorResult, LocaleError, ParametersError, QueryError};
pub use locale::LocaleId;
pub use mock::{MockMode, MockProvider};
pub use mtuoc_fragment::{Code, TagType, TextFragment};
pub use params::{
    EditorDescription, ParameterDescriptor, Parameters, ParametersDescription, TextInputPart,
};
pub use provider::{ConfigurableComponent, MatchType, QueryResult, TranslationProvider};
pub use request_id::{FixedIdSource, RandomIdSource, RequestIdSource, SequentialIdSource};
pub use wire::{TranslateRequest, TranslateResponse};
