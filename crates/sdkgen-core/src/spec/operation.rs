use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parameter::Parameter;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }

    /// Whether the SDK treats the `data` payload as the request body for this
    /// method. Every other method maps `data` onto the query string.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete)
    }
}

/// An API operation: one (path, method) pair inside a specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    /// Explicit SDK method name extension.
    #[serde(rename = "x-sdkMethodName", skip_serializing_if = "Option::is_none")]
    pub sdk_method_name: Option<String>,

    /// Legacy synonym accepted by the 1.x builder for v2 specs.
    #[serde(rename = "sdkMethodName", skip_serializing_if = "Option::is_none")]
    pub sdk_method_name_legacy: Option<String>,

    /// Opaque messaging-transport metadata, carried through verbatim.
    #[serde(rename = "x-amqp", skip_serializing_if = "Option::is_none")]
    pub amqp: Option<Value>,
}

impl Operation {
    /// Resolve the SDK method name. The `x-` extension always wins; the bare
    /// legacy field is consulted only when the caller allows it (v2 specs).
    pub fn resolve_sdk_method_name(&self, allow_legacy: bool) -> Option<&str> {
        self.sdk_method_name
            .as_deref()
            .or_else(|| {
                if allow_legacy {
                    self.sdk_method_name_legacy.as_deref()
                } else {
                    None
                }
            })
            .filter(|name| !name.is_empty())
    }
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

impl PathItem {
    /// Iterate declared operations in method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}
