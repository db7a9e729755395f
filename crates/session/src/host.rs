//! The editor-widget contract: text models and the host trait.

use workbench_types::Marker;

/// Language id of a text model, used to route provider registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// The query document.
    GraphQL,
    /// The variables and results documents.
    Json,
}

/// A text document owned by the editor layer.
///
/// The session reads the value transiently; every replacement bumps the
/// version counter.
#[derive(Debug, Clone)]
pub struct TextModel {
    uri: String,
    language: LanguageId,
    value: String,
    version: u64,
}

impl TextModel {
    /// Creates a model with version 1, matching editor conventions.
    #[must_use]
    pub fn new(uri: impl Into<String>, language: LanguageId, value: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language,
            value: value.into(),
            version: 1,
        }
    }

    /// The model's uri.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The model's language id.
    #[must_use]
    pub const fn language(&self) -> LanguageId {
        self.language
    }

    /// The current text.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Replaces the text and bumps the version.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.version += 1;
    }

    /// The version counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

/// The surface the session drives on the editor widget.
///
/// Implementations render markers and wire JSON tooling; the session never
/// draws anything itself.
pub trait EditorHost: Send + Sync {
    /// Replaces the full marker set for a model under the given owner key.
    fn set_model_markers(&self, uri: &str, owner: &str, markers: Vec<Marker>);

    /// Hands a JSON schema to the host's JSON diagnostics tooling for the
    /// given model. Hosts without JSON tooling ignore it.
    fn set_json_diagnostics_schema(&self, uri: &str, schema: serde_json::Value) {
        let _ = (uri, schema);
    }
}
