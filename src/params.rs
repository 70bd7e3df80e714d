//! Connector parameters and their settings-editor description
//!
//! The only setting is the base URL of the MTUOC server, e.g.
//! `http://localhost:8000`. The `/translate` route is appended at query time.
//!
//! Persistence belongs to the host. [`Parameters::from_file`] and
//! [`Parameters::save_to_file`] store the parameters as TOML for hosts (and the
//! CLI) that have no storage of their own:
//!
//! ```toml
//! url = "http://localhost:8000"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ParametersError;
use crate::provider::ConfigurableComponent;

const URL: &str = "url";

/// Parameters for [`crate::MtuocConnector`]
///
/// A single `url` key. Missing keys deserialize to the defaults, so an empty
/// TOML file gives an unconfigured connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    url: String,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL of the MTUOC server, empty when unset
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stored verbatim: no trimming or trailing-slash normalization
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Back to the defaults (empty URL)
    pub fn reset(&mut self) {
        self.url.clear();
    }

    /// Parse parameters from TOML text
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Parsed parameters, defaults for missing keys
    /// * `Err(ParametersError::Parse)` - If the text is not valid TOML for these parameters
    pub fn from_toml_str(content: &str) -> Result<Self, ParametersError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ParametersError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load parameters from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - File to read
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Loaded parameters
    /// * `Err(ParametersError)` - If the file cannot be read or parsed
    ///
    /// # Example
    ///
    /// ```ignore
    /// let params = Parameters::from_file("mtuoc.toml")?;
    /// let connector = MtuocConnector::with_parameters(params);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParametersError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Write the parameters as TOML, replacing the file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ParametersError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl ConfigurableComponent for Parameters {
    fn parameters_description(&self) -> ParametersDescription {
        let mut desc = ParametersDescription::new();
        desc.add(
            URL,
            "URL for MTUOC Engine",
            "The MTUOC Engine's API URL - format http://<servername>:<port>",
        );
        desc
    }

    fn editor_description(&self) -> EditorDescription {
        let desc = self.parameters_description();
        let mut editor = EditorDescription::new("MTUOC Engine Connector Settings");
        if let Some(url) = desc.get(URL) {
            editor.add_text_input_part(url);
        }
        editor
    }
}

/// Schema entry for one parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub key: String,
    pub label: String,
    pub help: String,
}

/// Declarative schema of a component's parameters, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParametersDescription {
    entries: Vec<ParameterDescriptor>,
}

impl ParametersDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, label: &str, help: &str) -> &mut Self {
        self.entries.push(ParameterDescriptor {
            key: key.to_owned(),
            label: label.to_owned(),
            help: help.to_owned(),
        });
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParameterDescriptor> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> &[ParameterDescriptor] {
        &self.entries
    }
}

/// A single-line text field bound to one parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInputPart {
    pub descriptor: ParameterDescriptor,
    /// The editor accepts an empty value
    pub allow_empty: bool,
}

/// What a host settings UI needs to render an editor for a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorDescription {
    pub caption: String,
    pub parts: Vec<TextInputPart>,
}

impl EditorDescription {
    pub fn new(caption: &str) -> Self {
        EditorDescription {
            caption: caption.to_owned(),
            parts: Vec::new(),
        }
    }

    /// Adds a text field with no validation attached
    pub fn add_text_input_part(&mut self, descriptor: &ParameterDescriptor) -> &mut TextInputPart {
        self.parts.push(TextInputPart {
            descriptor: descriptor.clone(),
            allow_empty: true,
        });
        let last = self.parts.len() - 1;
        &mut self.parts[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_is_empty() {
        assert_eq!(Parameters::new().url(), "");
    }

    #[test]
    fn test_set_url_is_verbatim() {
        let mut params = Parameters::new();
        params.set_url(" http://localhost:8000/ ");
        assert_eq!(params.url(), " http://localhost:8000/ ");
    }

    #[test]
    fn test_reset_clears_url() {
        let mut params = Parameters::new();
        params.set_url("http://localhost:8000");
        params.reset();
        assert_eq!(params.url(), "");
    }

    #[test]
    fn test_description_has_single_url_entry() {
        let desc = Parameters::new().parameters_description();
        assert_eq!(desc.entries().len(), 1);

        let url = desc.get("url").unwrap();
        assert_eq!(url.label, "URL for MTUOC Engine");
        assert!(url.help.contains("http://<servername>:<port>"));
        assert!(desc.get("context").is_none());
    }

    #[test]
    fn test_editor_has_one_unvalidated_text_field() {
        let editor = Parameters::new().editor_description();

        assert_eq!(editor.caption, "MTUOC Engine Connector Settings");
        assert_eq!(editor.parts.len(), 1);
        assert_eq!(editor.parts[0].descriptor.key, "url");
        assert!(editor.parts[0].allow_empty);
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mtuoc.toml");

        let mut params = Parameters::new();
        params.set_url("http://mt.example.org:8000");
        params.save_to_file(&path).unwrap();

        let loaded = Parameters::from_file(&path).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_toml_missing_url_defaults_to_empty() {
        let params = Parameters::from_toml_str("").unwrap();
        assert_eq!(params.url(), "");
    }

    #[test]
    fn test_toml_invalid_content() {
        let result = Parameters::from_toml_str("url = [");
        assert!(matches!(result, Err(ParametersError::Parse(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = Parameters::from_file("/nonexistent/mtuoc.toml");
        assert!(matches!(result, Err(ParametersError::Io(_))));
    }
}
