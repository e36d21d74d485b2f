use std::collections::HashMap;

use crate::context::{PackageMeta, SpecContext};
use crate::error::BuildError;
use crate::spec::ApiSpec;

use super::routes::build_routes;
use super::server::resolve_server;

/// Source-organization prefix stripped from package names before they become
/// module names.
const PACKAGE_PREFIX: &str = "svc-";

/// Tracks module names claimed during one generation run so that distinct
/// (app, version) pairs can never collide silently.
#[derive(Debug, Default)]
pub struct ModuleNameRegistry {
    claimed: HashMap<String, (String, String)>,
}

impl ModuleNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, module: &str, app: &str, version: &str) -> Result<(), BuildError> {
        if let Some((prior_app, prior_version)) = self.claimed.get(module) {
            return Err(BuildError::ModuleNameCollision {
                module: module.to_string(),
                app: app.to_string(),
                version: version.to_string(),
                prior_app: prior_app.clone(),
                prior_version: prior_version.clone(),
            });
        }
        self.claimed
            .insert(module.to_string(), (app.to_string(), version.to_string()));
        Ok(())
    }
}

/// Derive the deterministic module name for one (app, version) pair.
///
/// The conventional `svc-` prefix is stripped from the package name, the
/// remainder lower-cased with its first letter capitalized, and an identity
/// segment `{app}_SDK_{version}` appended with dots in the version replaced
/// by underscores. Remaining non-word characters collapse to underscores.
pub fn module_name(package_name: &str, app: &str, version: &str) -> String {
    let stripped = package_name
        .strip_prefix(PACKAGE_PREFIX)
        .unwrap_or(package_name)
        .to_lowercase();

    let mut service = String::with_capacity(stripped.len());
    let mut chars = stripped.chars();
    if let Some(first) = chars.next() {
        service.extend(first.to_uppercase());
        service.extend(chars);
    }

    let version = version.replace('.', "_");
    sanitize_identifier(&format!("{service}_{app}_SDK_{version}"))
}

/// Replace runs of non-word characters with a single underscore.
fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Assemble the full generation context for one (app, version) pair.
pub fn assemble_context(
    spec: &ApiSpec,
    app: &str,
    package: &PackageMeta,
    registry: &mut ModuleNameRegistry,
) -> Result<SpecContext, BuildError> {
    let routes = build_routes(spec)?;
    let server = resolve_server(spec);
    let version = spec.info().version.clone();

    // V3 specs carry their own app identity; v2 specs are named after the
    // app they were fetched under.
    let identity = match spec {
        ApiSpec::V3(_) => spec.info().app_identity(),
        ApiSpec::V2(_) => app,
    };

    let module_name = module_name(&package.name, identity, &version);
    registry.claim(&module_name, app, &version)?;

    Ok(SpecContext {
        module_name,
        version,
        host: server.host,
        base_path: server.base_path,
        routes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_capitalizes() {
        assert_eq!(
            module_name("svc-depot", "public", "1.2.0"),
            "Depot_public_SDK_1_2_0"
        );
    }

    #[test]
    fn keeps_unprefixed_names() {
        assert_eq!(
            module_name("depot", "public", "2.0"),
            "Depot_public_SDK_2_0"
        );
    }

    #[test]
    fn sanitizes_non_word_characters() {
        assert_eq!(
            module_name("svc-My Depot!", "user-api", "1.0.0"),
            "My_depot_user_api_SDK_1_0_0"
        );
    }

    #[test]
    fn registry_rejects_collisions() {
        let mut registry = ModuleNameRegistry::new();
        registry.claim("Depot_public_SDK_1_0_0", "public", "1.0.0").unwrap();
        let err = registry
            .claim("Depot_public_SDK_1_0_0", "public!", "1.0.0")
            .unwrap_err();
        assert!(matches!(err, BuildError::ModuleNameCollision { .. }));
    }
}
