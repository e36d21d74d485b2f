use indexmap::IndexMap;
use reqwest::Method;
use serde_json::Value;

/// One normalized call as constructed by generated wrapper code.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// URL template relative to the client base, with `{name}` placeholders.
    pub url: String,
    /// Positional values substituted into the URL template placeholders.
    pub path_args: Vec<String>,
    /// Body fields for post/put/delete; query fields for everything else.
    pub data: Option<IndexMap<String, Value>>,
    pub params: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn path_arg(mut self, value: impl Into<String>) -> Self {
        self.path_args.push(value.into());
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// The transport-ready form of one call: body and query fully decided.
#[derive(Debug, Clone)]
pub struct RoutedRequest {
    pub method: Method,
    pub url: String,
    pub data: Option<IndexMap<String, Value>>,
    pub query: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
}

fn takes_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::DELETE
}

/// Decide whether `data` travels as the body or the query string.
///
/// For post/put/delete the data stays in the body slot. For every other
/// method it merges into the query parameters and the body slot is cleared.
/// Merge order is pinned: defaults, then data-derived values, then explicit
/// `params` — explicit params always win on key collision.
pub fn route_request(
    options: RequestOptions,
    default_params: &IndexMap<String, Value>,
) -> RoutedRequest {
    let url = fill_path(&options.url, &options.path_args);
    let mut query = default_params.clone();

    let data = if takes_body(&options.method) {
        query.extend(options.params);
        options.data
    } else {
        if let Some(data) = options.data {
            query.extend(data);
        }
        query.extend(options.params);
        None
    };

    RoutedRequest {
        method: options.method,
        url,
        data,
        query,
        headers: options.headers,
    }
}

/// Substitute `{placeholder}` segments with positional arguments, in order.
/// Unmatched placeholders are left in place.
pub fn fill_path(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        match rest[start..].find('}') {
            Some(offset) => {
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str(&rest[start..start + offset + 1]),
                }
                rest = &rest[start + offset + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_data_merges_into_query() {
        let options = RequestOptions::new(Method::GET, "/pets")
            .data("foo", "bar")
            .param("bar", "foo");
        let routed = route_request(options, &IndexMap::new());

        assert!(routed.data.is_none());
        assert_eq!(routed.query.get("foo"), Some(&json!("bar")));
        assert_eq!(routed.query.get("bar"), Some(&json!("foo")));
    }

    #[test]
    fn patch_counts_as_query_method() {
        let options = RequestOptions::new(Method::PATCH, "/pets").data("foo", "bar");
        let routed = route_request(options, &IndexMap::new());
        assert!(routed.data.is_none());
        assert_eq!(routed.query.get("foo"), Some(&json!("bar")));
    }

    #[test]
    fn body_verbs_keep_data_as_body() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let options = RequestOptions::new(method, "/pets")
                .data("foo", "bar")
                .param("pretty", true);
            let routed = route_request(options, &IndexMap::new());

            let data = routed.data.expect("body verbs keep data");
            assert_eq!(data.get("foo"), Some(&json!("bar")));
            assert_eq!(routed.query.get("pretty"), Some(&json!(true)));
            assert!(!routed.query.contains_key("foo"));
        }
    }

    #[test]
    fn explicit_params_override_data_derived_values() {
        let options = RequestOptions::new(Method::GET, "/pets")
            .data("page", 1)
            .param("page", 2);
        let routed = route_request(options, &IndexMap::new());
        assert_eq!(routed.query.get("page"), Some(&json!(2)));
    }

    #[test]
    fn defaults_lose_to_call_values() {
        let mut defaults = IndexMap::new();
        defaults.insert("token".to_string(), json!("default"));
        defaults.insert("keep".to_string(), json!(true));

        let options = RequestOptions::new(Method::GET, "/pets").param("token", "explicit");
        let routed = route_request(options, &defaults);
        assert_eq!(routed.query.get("token"), Some(&json!("explicit")));
        assert_eq!(routed.query.get("keep"), Some(&json!(true)));
    }

    #[test]
    fn fills_path_placeholders_in_order() {
        assert_eq!(
            fill_path("/users/{id}/pets/{pet}", &["7".to_string(), "rex".to_string()]),
            "/users/7/pets/rex"
        );
        assert_eq!(fill_path("/users/{id}", &[]), "/users/{id}");
        assert_eq!(fill_path("/plain", &[]), "/plain");
    }
}
