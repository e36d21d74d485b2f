use std::fmt;
use std::sync::Arc;

use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Boxed error produced by registered error factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Builds a typed error from the normalized request error. Registered per
/// HTTP status at client construction.
pub type ErrorFactory = Arc<dyn Fn(SdkRequestError) -> BoxError + Send + Sync>;

/// Fatal configuration error raised synchronously at client construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`base_url` option is required and must be a non-empty string")]
    MissingBaseUrl,

    #[error("`base_url` option is not a valid URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("`errors` option contains invalid HTTP status {0}")]
    InvalidErrorStatus(u16),
}

/// Error returned by `SdkClient::request`.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure with no received response, propagated verbatim.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived with a non-success status and was mapped through
    /// the error registry.
    #[error("{0}")]
    Response(BoxError),
}

impl Error {
    /// The mapped response error, when this is one.
    pub fn response(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Response(err) => Some(err.as_ref()),
            Error::Transport(_) => None,
        }
    }
}

/// Wraps a failed HTTP response.
///
/// Every property of the response payload is shallow-copied with its key
/// converted to camelCase; `code` carries the numeric HTTP status. Nothing
/// of the raw transport response remains reachable.
#[derive(Debug, Clone)]
pub struct SdkRequestError {
    pub code: u16,
    pub message: String,
    fields: IndexMap<String, Value>,
}

impl SdkRequestError {
    pub fn from_payload(code: u16, payload: &Value) -> Self {
        match payload {
            Value::Object(map) => {
                let mut fields = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    fields.insert(key.to_lower_camel_case(), value.clone());
                }
                let message = fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed with status {code}"));
                Self {
                    code,
                    message,
                    fields,
                }
            }
            Value::String(text) => Self {
                code,
                message: text.clone(),
                fields: IndexMap::new(),
            },
            other => Self {
                code,
                message: other.to_string(),
                fields: IndexMap::new(),
            },
        }
    }

    /// Look up a copied payload property by its camelCase key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl fmt::Display for SdkRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SdkRequestError {}

/// Maps HTTP statuses to error factories.
///
/// Resolution order: exact status, then status class (first digit times
/// 100), then the caller falls back to the plain `SdkRequestError`.
#[derive(Clone, Default)]
pub struct ErrorRegistry {
    factories: IndexMap<u16, ErrorFactory>,
}

impl ErrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, status: u16, factory: ErrorFactory) -> Result<(), ConfigError> {
        if !(100..=599).contains(&status) {
            return Err(ConfigError::InvalidErrorStatus(status));
        }
        self.factories.insert(status, factory);
        Ok(())
    }

    pub fn resolve(&self, status: u16) -> Option<&ErrorFactory> {
        self.factories
            .get(&status)
            .or_else(|| self.factories.get(&(status / 100 * 100)))
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ErrorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRegistry")
            .field("statuses", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_keys_are_camel_cased() {
        let err = SdkRequestError::from_payload(
            404,
            &json!({"message": "not found", "api_code": "missing", "another_property": 7}),
        );
        assert_eq!(err.code, 404);
        assert_eq!(err.message, "not found");
        assert_eq!(err.get("apiCode"), Some(&json!("missing")));
        assert_eq!(err.get("anotherProperty"), Some(&json!(7)));
        assert_eq!(err.get("api_code"), None);
    }

    #[test]
    fn non_object_payload_becomes_message() {
        let err = SdkRequestError::from_payload(500, &json!("boom"));
        assert_eq!(err.message, "boom");
        assert!(err.fields().is_empty());
    }

    #[test]
    fn registry_resolves_exact_before_class() {
        let mut registry = ErrorRegistry::new();
        registry
            .insert(500, Arc::new(|e| Box::new(e)))
            .unwrap();
        registry
            .insert(503, Arc::new(|e| Box::new(e)))
            .unwrap();

        assert!(registry.resolve(503).is_some());
        // 502 falls back to the 500 class entry.
        assert!(registry.resolve(502).is_some());
        assert!(registry.resolve(404).is_none());
    }

    #[test]
    fn registry_rejects_invalid_statuses() {
        let mut registry = ErrorRegistry::new();
        let err = registry.insert(42, Arc::new(|e| Box::new(e))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidErrorStatus(42)));
    }
}
