use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::error::{BoxError, ConfigError, Error, ErrorFactory, ErrorRegistry, SdkRequestError};
use crate::request::{RequestOptions, route_request};

/// Construction options for `SdkClient`.
#[derive(Clone, Default)]
pub struct ClientOptions {
    pub base_url: String,
    /// Default query parameters attached to every request.
    pub params: IndexMap<String, Value>,
    /// Convenience alias for `params`; merged in at construction, explicit
    /// `params` win on key collision.
    pub query: IndexMap<String, Value>,
    /// Default headers attached to every request.
    pub headers: IndexMap<String, String>,
    errors: Vec<(u16, ErrorFactory)>,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Register an error factory for an HTTP status.
    pub fn error<F>(mut self, status: u16, factory: F) -> Self
    where
        F: Fn(SdkRequestError) -> BoxError + Send + Sync + 'static,
    {
        self.errors.push((status, Arc::new(factory)));
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field(
                "errors",
                &self.errors.iter().map(|(s, _)| *s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A successful call result. Transport internals are stripped; only status,
/// payload, and headers survive.
#[derive(Debug, Clone)]
pub struct SdkResponse {
    pub status: u16,
    pub data: Value,
    pub headers: IndexMap<String, String>,
}

/// The runtime client base every generated per-version SDK module wraps.
#[derive(Debug, Clone)]
pub struct SdkClient {
    http: reqwest::Client,
    base_url: Url,
    params: IndexMap<String, Value>,
    headers: IndexMap<String, String>,
    errors: ErrorRegistry,
}

impl SdkClient {
    /// Build a client. Missing or invalid `base_url` and out-of-range error
    /// statuses are fatal configuration errors.
    pub fn new(options: ClientOptions) -> Result<Self, ConfigError> {
        if options.base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        let base_url = Url::parse(&options.base_url)?;

        // Fold the `query` alias into the default params; explicit params
        // win on key collision.
        let mut params = options.query;
        params.extend(options.params);

        let mut errors = ErrorRegistry::new();
        for (status, factory) in options.errors {
            errors.insert(status, factory)?;
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            params,
            headers: options.headers,
            errors,
        })
    }

    /// Default query parameters after alias merging.
    pub fn params(&self) -> &IndexMap<String, Value> {
        &self.params
    }

    /// Extension hook: hand the underlying transport to the plugin and
    /// return whatever it returns.
    pub fn with_transport<R>(&self, plugin: impl FnOnce(&reqwest::Client) -> R) -> R {
        plugin(&self.http)
    }

    /// Issue one request. Body-verb `data` is sent as the JSON body; for
    /// every other verb `data` merges into the query string.
    pub async fn request(&self, options: RequestOptions) -> Result<SdkResponse, Error> {
        let routed = route_request(options, &self.params);
        let url = join_url(&self.base_url, &routed.url);

        debug!("{} {}", routed.method, url);

        let mut builder = self.http.request(routed.method, &url);
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        for (key, value) in &routed.headers {
            builder = builder.header(key, value);
        }
        if !routed.query.is_empty() {
            builder = builder.query(&query_pairs(&routed.query));
        }
        if let Some(data) = &routed.data {
            builder = builder.json(data);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = copy_headers(response.headers());
        let text = response.text().await?;
        let data = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        };

        if status.is_success() {
            return Ok(SdkResponse {
                status: status.as_u16(),
                data,
                headers,
            });
        }

        let request_error = SdkRequestError::from_payload(status.as_u16(), &data);
        let boxed = match self.errors.resolve(status.as_u16()) {
            Some(factory) => factory(request_error),
            None => Box::new(request_error),
        };
        Err(Error::Response(boxed))
    }
}

fn join_url(base: &Url, path: &str) -> String {
    if path.is_empty() {
        return base.as_str().trim_end_matches('/').to_string();
    }
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn query_pairs(params: &IndexMap<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn copy_headers(headers: &reqwest::header::HeaderMap) -> IndexMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_base_url() {
        let err = SdkClient::new(ClientOptions::new("")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let err = SdkClient::new(ClientOptions::new("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn query_option_is_an_alias_for_params() {
        let client = SdkClient::new(
            ClientOptions::new("http://localhost")
                .query("foo", "bar")
                .param("bar", "foo"),
        )
        .unwrap();

        assert_eq!(client.params().get("foo"), Some(&json!("bar")));
        assert_eq!(client.params().get("bar"), Some(&json!("foo")));
    }

    #[test]
    fn params_win_over_query_alias_on_collision() {
        let client = SdkClient::new(
            ClientOptions::new("http://localhost")
                .query("key", "from-query")
                .param("key", "from-params"),
        )
        .unwrap();
        assert_eq!(client.params().get("key"), Some(&json!("from-params")));
    }

    #[test]
    fn rejects_out_of_range_error_status() {
        let options =
            ClientOptions::new("http://localhost").error(9999, |e| Box::new(e));
        let err = SdkClient::new(options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidErrorStatus(9999)));
    }

    #[test]
    fn with_transport_returns_plugin_result() {
        let client = SdkClient::new(ClientOptions::new("http://localhost")).unwrap();
        let marker = client.with_transport(|_transport| 42);
        assert_eq!(marker, 42);
    }

    #[test]
    fn joins_base_and_path() {
        let base = Url::parse("http://localhost:8080/api/").unwrap();
        assert_eq!(join_url(&base, "/pets"), "http://localhost:8080/api/pets");
        assert_eq!(join_url(&base, "pets"), "http://localhost:8080/api/pets");
        assert_eq!(join_url(&base, ""), "http://localhost:8080/api");
    }
}
