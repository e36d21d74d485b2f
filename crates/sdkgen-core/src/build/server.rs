use crate::context::TransportFamily;
use crate::spec::ApiSpec;
use crate::spec::v3::Server;

/// The effective destination derived from version-specific server metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedServer {
    pub host: String,
    pub base_path: String,
}

/// Derive host and base path from the spec's server declaration.
///
/// A spec whose shape yields neither is resolved to empty strings; callers
/// treat that as unsupported rather than an error.
pub fn resolve_server(spec: &ApiSpec) -> ResolvedServer {
    match spec {
        ApiSpec::V3(spec) => {
            let server = spec.servers.first().cloned().unwrap_or_default();
            ResolvedServer {
                host: format!(
                    "{}{}",
                    server.variable_default("protocol"),
                    server.variable_default("host")
                ),
                base_path: server.variable_default("basePath").to_string(),
            }
        }
        ApiSpec::V2(spec) => {
            let mut host = spec.host.clone();
            if has_http_scheme(&spec.schemes) && !host.is_empty() && !has_scheme_prefix(&host) {
                let scheme = if spec.schemes.iter().any(|s| s == "https") {
                    "https://"
                } else {
                    "http://"
                };
                host = format!("{scheme}{host}");
            }
            ResolvedServer {
                host,
                base_path: spec.base_path.clone(),
            }
        }
    }
}

/// Determine which transport family a spec targets, or `None` when the
/// declaration names neither HTTP(S) nor the messaging family.
pub fn transport_family(spec: &ApiSpec) -> Option<TransportFamily> {
    match spec {
        ApiSpec::V3(spec) => {
            let protocol = first_server_protocol(spec.servers.first());
            match protocol {
                "amqp://" | "amqps://" => Some(TransportFamily::Amqp),
                "http://" | "https://" => Some(TransportFamily::Http),
                _ => None,
            }
        }
        ApiSpec::V2(spec) => {
            if spec.schemes.iter().any(|s| s == "amqp" || s == "amqps") {
                Some(TransportFamily::Amqp)
            } else if has_http_scheme(&spec.schemes) {
                Some(TransportFamily::Http)
            } else {
                None
            }
        }
    }
}

fn first_server_protocol(server: Option<&Server>) -> &str {
    server.map(|s| s.variable_default("protocol")).unwrap_or("")
}

fn has_http_scheme(schemes: &[String]) -> bool {
    schemes.iter().any(|s| s == "http" || s == "https")
}

/// Whether the host already looks like an absolute URL (`scheme://...`).
fn has_scheme_prefix(host: &str) -> bool {
    match host.find("://") {
        Some(idx) if idx > 0 => host[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::from_json;

    fn v2_spec(host: &str, schemes: &[&str]) -> ApiSpec {
        let schemes = schemes
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(",");
        from_json(&format!(
            r#"{{"swagger": "2.0", "info": {{"title": "t", "version": "1.0.0"}},
                 "host": "{host}", "basePath": "/v1", "schemes": [{schemes}]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn v2_prefixes_https_when_available() {
        let resolved = resolve_server(&v2_spec("api.example.com", &["http", "https"]));
        assert_eq!(resolved.host, "https://api.example.com");
        assert_eq!(resolved.base_path, "/v1");
    }

    #[test]
    fn v2_prefixes_http_when_https_absent() {
        let resolved = resolve_server(&v2_spec("api.example.com", &["http"]));
        assert_eq!(resolved.host, "http://api.example.com");
    }

    #[test]
    fn v2_leaves_absolute_host_alone() {
        let resolved = resolve_server(&v2_spec("http://api.example.com", &["https"]));
        assert_eq!(resolved.host, "http://api.example.com");
    }

    #[test]
    fn v2_empty_host_stays_empty() {
        let resolved = resolve_server(&v2_spec("", &["https"]));
        assert_eq!(resolved.host, "");
    }

    #[test]
    fn v3_concatenates_protocol_and_host_defaults() {
        let spec = from_json(
            r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1.0.0"},
                "servers": [{"url": "{protocol}{host}{basePath}", "variables": {
                    "protocol": {"default": "https://"},
                    "host": {"default": "api.example.com"},
                    "basePath": {"default": "/v2"}
                }}]}"#,
        )
        .unwrap();
        let resolved = resolve_server(&spec);
        assert_eq!(resolved.host, "https://api.example.com");
        assert_eq!(resolved.base_path, "/v2");
    }

    #[test]
    fn v3_missing_variables_resolve_empty() {
        let spec = from_json(
            r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1.0.0"}}"#,
        )
        .unwrap();
        let resolved = resolve_server(&spec);
        assert_eq!(resolved, ResolvedServer::default());
        assert_eq!(transport_family(&spec), None);
    }

    #[test]
    fn transport_families() {
        assert_eq!(
            transport_family(&v2_spec("h", &["https"])),
            Some(TransportFamily::Http)
        );
        assert_eq!(
            transport_family(&v2_spec("h", &["amqps"])),
            Some(TransportFamily::Amqp)
        );
        assert_eq!(transport_family(&v2_spec("h", &["ws"])), None);

        let amqp_v3 = from_json(
            r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1.0.0"},
                "servers": [{"variables": {"protocol": {"default": "amqp://"}}}]}"#,
        )
        .unwrap();
        assert_eq!(transport_family(&amqp_v3), Some(TransportFamily::Amqp));
    }
}
