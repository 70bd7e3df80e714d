//! Error types for the MTUOC connector

use thiserror::Error;

/// The ways a single query can fail
#[derive(Error, Debug)]
pub enum QueryError {
    /// The connector is not usable as configured (missing URL, unset languages)
    #[error("{0}")]
    Configuration(String),

    /// The MT server answered with an HTTP status of 400 or above
    #[error("HTTP Error {status}: {body}")]
    RemoteService { status: u16, body: String },

    /// The response body is not the expected JSON object
    #[error("Invalid response from the MT server: {0}")]
    ResponseParse(String),

    /// Connection failure, timeout or other network fault
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Outward error of [`crate::MtuocConnector::query`]: a fixed message plus the cause.
#[derive(Error, Debug)]
#[error("Error querying the server: {0}")]
pub struct ConnectorError(#[from] QueryError);

impl ConnectorError {
    /// The underlying failure
    pub fn kind(&self) -> &QueryError {
        &self.0
    }

    pub fn into_kind(self) -> QueryError {
        self.0
    }
}

/// Errors from loading or saving connector parameters
#[derive(Error, Debug)]
pub enum ParametersError {
    #[error("Failed to access parameters file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameters: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize parameters: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale identifier '{locale}': {reason}")]
pub struct LocaleError {
    pub locale: String,
    pub reason: String,
}

/// Result type for connector queries
pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_error_message_has_prefix_and_cause() {
        let error = ConnectorError::from(QueryError::RemoteService {
            status: 500,
            body: "internal error".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Error querying the server: HTTP Error 500: internal error"
        );
    }

    #[test]
    fn test_connector_error_exposes_source() {
        use std::error::Error;

        let error = ConnectorError::from(QueryError::Configuration("no URL".to_string()));
        let source = error.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no URL"));
        assert!(matches!(error.kind(), QueryError::Configuration(_)));
    }
}
