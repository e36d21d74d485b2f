use serde::Serialize;
use serde_json::Value;

use crate::spec::operation::HttpMethod;
use crate::spec::parameter::{Parameter, ParameterLocation, PropertySchema};

/// Transport family a specification targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportFamily {
    Http,
    Amqp,
}

impl TransportFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportFamily::Http => "http",
            TransportFamily::Amqp => "amqp",
        }
    }
}

/// Package metadata of the service an SDK is generated for.
#[derive(Debug, Clone, Serialize)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
}

/// A normalized parameter record used in every descriptor bucket, including
/// the pseudo-parameters produced by body flattening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorParam {
    pub name: String,

    pub required: bool,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DescriptorParam {
    pub fn from_parameter(param: &Parameter) -> Self {
        Self {
            name: param.name.clone(),
            required: param.required,
            location: param.location,
            param_type: param.param_type.clone(),
            format: param.format.clone(),
            description: param.description.clone(),
        }
    }

    /// A pseudo form parameter derived from one body schema property.
    pub fn from_body_property(name: &str, required: bool, prop: &PropertySchema) -> Self {
        Self {
            name: name.to_string(),
            required,
            location: ParameterLocation::FormData,
            param_type: prop.prop_type.clone(),
            format: prop.format.clone(),
            description: prop.description.clone(),
        }
    }
}

/// The normalized, generation-ready representation of one operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub sdk_method_name: String,

    /// True for post/put/delete: `data_params` are body fields. Otherwise
    /// `data_params` hold the query-location parameters and `query_params`
    /// stay empty.
    pub has_body: bool,

    pub method: HttpMethod,

    /// URL template with `{name}` path placeholders.
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub path_params: Vec<DescriptorParam>,
    pub header_params: Vec<DescriptorParam>,
    pub data_params: Vec<DescriptorParam>,
    pub query_params: Vec<DescriptorParam>,

    /// Opaque messaging-transport metadata carried through from `x-amqp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amqp: Option<Value>,
}

/// The full per-(app, version) generation context handed to renderers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecContext {
    pub module_name: String,
    pub version: String,
    pub host: String,
    pub base_path: String,
    pub routes: Vec<RouteDescriptor>,
}

/// Everything generated for one app: the archive filename handed to the
/// packaging collaborator plus one context per bundled spec version.
#[derive(Debug, Clone)]
pub struct AppBundle {
    pub app: String,
    pub transport: TransportFamily,
    pub package: PackageMeta,
    pub filename: String,
    pub contexts: Vec<SpecContext>,
}
