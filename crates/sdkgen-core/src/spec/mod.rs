pub mod operation;
pub mod parameter;
pub mod v2;
pub mod v3;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use operation::PathItem;
use v2::SwaggerSpec;
use v3::OpenApiSpec;

/// API metadata shared by both spec versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Application identity override used for module naming.
    #[serde(rename = "x-app", skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
}

impl Info {
    /// The application identity: `x-app` when present, otherwise the title.
    pub fn app_identity(&self) -> &str {
        self.app.as_deref().unwrap_or(&self.title)
    }
}

/// A versioned API specification, resolved to its variant once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiSpec {
    V2(SwaggerSpec),
    V3(OpenApiSpec),
}

impl ApiSpec {
    pub fn info(&self) -> &Info {
        match self {
            ApiSpec::V2(spec) => &spec.info,
            ApiSpec::V3(spec) => &spec.info,
        }
    }

    pub fn paths(&self) -> &IndexMap<String, PathItem> {
        match self {
            ApiSpec::V2(spec) => &spec.paths,
            ApiSpec::V3(spec) => &spec.paths,
        }
    }
}

/// Resolve the spec variant from an already-parsed document.
///
/// The version is probed exactly once here; everything downstream matches on
/// the `ApiSpec` variant instead of re-inspecting the document shape.
pub fn from_value(value: Value) -> Result<ApiSpec, ParseError> {
    if let Some(version) = value.get("openapi").and_then(Value::as_str) {
        if version.starts_with('3') {
            let spec: OpenApiSpec = serde_json::from_value(value)?;
            return Ok(ApiSpec::V3(spec));
        }
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    if let Some(version) = value.get("swagger").and_then(Value::as_str) {
        if version.starts_with('2') {
            let spec: SwaggerSpec = serde_json::from_value(value)?;
            return Ok(ApiSpec::V2(spec));
        }
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    Err(ParseError::MissingField("openapi | swagger".to_string()))
}

/// Parse a specification from JSON.
pub fn from_json(input: &str) -> Result<ApiSpec, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Parse a specification from YAML.
pub fn from_yaml(input: &str) -> Result<ApiSpec, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}
