use minijinja::{Environment, context};
use sdkgen_core::context::AppBundle;

use super::version_module_ident;

/// SDK package version: the runtime interface version with the service
/// version appended as a pre-release segment.
pub fn sdk_package_version(service_version: &str) -> String {
    format!("{}-x.{}", env!("CARGO_PKG_VERSION"), service_version)
}

/// Emit the generated crate's manifest.
pub fn emit_cargo_toml(bundle: &AppBundle) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("Cargo.toml.j2", include_str!("../../templates/Cargo.toml.j2"))?;
    let tmpl = env.get_template("Cargo.toml.j2")?;

    tmpl.render(context! {
        package_name => format!("{}-{}-sdk", bundle.package.name, bundle.app),
        package_version => sdk_package_version(&bundle.package.version),
        app => bundle.app.clone(),
        sdk_version => env!("CARGO_PKG_VERSION"),
    })
}

/// Emit the generated crate's lib.rs listing one module per spec version.
pub fn emit_lib(bundle: &AppBundle) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("lib.rs.j2", include_str!("../../templates/lib.rs.j2"))?;
    let tmpl = env.get_template("lib.rs.j2")?;

    let modules: Vec<String> = bundle
        .contexts
        .iter()
        .map(|ctx| version_module_ident(&ctx.version))
        .collect();

    tmpl.render(context! {
        app => bundle.app.clone(),
        modules => modules,
    })
}
