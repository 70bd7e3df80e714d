//! JSON bodies of the MTUOC `/translate` route

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryError;

/// Request body: `{"src": ..., "id": ..., "srcLang": ..., "tgtLang": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Coded-HTML source text
    pub src: String,
    pub id: u32,
    pub src_lang: String,
    pub tgt_lang: String,
}

/// Response body. Fields other than `tgt` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslateResponse {
    /// Coded-HTML translation
    pub tgt: String,
}

impl TranslateResponse {
    /// Parse a response body, which must be a JSON object with a string `tgt`.
    pub fn from_body(body: &str) -> Result<Self, QueryError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| QueryError::ResponseParse(format!("body is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(QueryError::ResponseParse(
                "body is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| QueryError::ResponseParse(e.to_string()))
    }
}
