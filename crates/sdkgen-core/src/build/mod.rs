pub mod classify;
pub mod context;
pub mod routes;
pub mod server;

use indexmap::IndexMap;
use log::warn;

pub use context::{ModuleNameRegistry, assemble_context, module_name};
pub use routes::{build_routes, sanitize_path_name};
pub use server::{ResolvedServer, resolve_server, transport_family};

use crate::context::{AppBundle, PackageMeta};
use crate::error::BuildError;
use crate::spec::ApiSpec;

/// Build the generation bundle for one app from its per-version specs.
///
/// Returns `Ok(None)` when the transport family cannot be determined; the
/// app is skipped and sibling apps keep generating. Any `BuildError` aborts
/// this app entirely.
pub fn build_app(
    app: &str,
    specs: &IndexMap<String, ApiSpec>,
    package: &PackageMeta,
    registry: &mut ModuleNameRegistry,
) -> Result<Option<AppBundle>, BuildError> {
    let Some(first) = specs.values().next() else {
        warn!("app {app}: no specs supplied, skipping");
        return Ok(None);
    };

    let Some(transport) = transport_family(first) else {
        warn!("app {app}: unknown or unsupported protocol, skipping");
        return Ok(None);
    };

    let mut contexts = Vec::with_capacity(specs.len());
    for spec in specs.values() {
        contexts.push(assemble_context(spec, app, package, registry)?);
    }

    Ok(Some(AppBundle {
        app: app.to_string(),
        transport,
        package: package.clone(),
        filename: format!("{}-{}-{}.zip", package.name, app, package.version),
        contexts,
    }))
}
