use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported API specification version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("duplicate route sdk method name `{name}` ({method} {path})")]
    DuplicateSdkMethodName {
        name: String,
        method: String,
        path: String,
    },

    #[error("missing x-sdkMethodName for {method} {path}")]
    MissingSdkMethodName { method: String, path: String },

    #[error(
        "module name `{module}` for app `{app}` version {version} collides with \
         the module generated for app `{prior_app}` version {prior_version}"
    )]
    ModuleNameCollision {
        module: String,
        app: String,
        version: String,
        prior_app: String,
        prior_version: String,
    },
}
