use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Info;
use super::operation::PathItem;

/// Top-level OpenAPI 2.0 ("swagger") specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerSpec {
    pub swagger: String,

    pub info: Info,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,

    #[serde(rename = "basePath", default, skip_serializing_if = "String::is_empty")]
    pub base_path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
}
