use heck::ToSnakeCase;
use minijinja::{Environment, context};
use sdkgen_core::context::{RouteDescriptor, SpecContext};

/// Emit one per-version SDK module from its generation context.
pub fn emit_module(spec_context: &SpecContext) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("module.rs.j2", include_str!("../../templates/module.rs.j2"))?;
    let tmpl = env.get_template("module.rs.j2")?;

    let routes: Vec<minijinja::Value> = spec_context.routes.iter().map(route_context).collect();

    tmpl.render(context! {
        module_name => spec_context.module_name.clone(),
        version => spec_context.version.clone(),
        host => spec_context.host.clone(),
        base_path => spec_context.base_path.clone(),
        routes => routes,
    })
}

fn route_context(route: &RouteDescriptor) -> minijinja::Value {
    let path_args: Vec<String> = route
        .path_params
        .iter()
        .map(|param| param.name.to_snake_case())
        .collect();

    context! {
        method_ident => route.sdk_method_name.to_snake_case(),
        method_const => route.method.as_str().to_uppercase(),
        url => route.url.clone(),
        summary => route.summary.clone(),
        has_body => route.has_body,
        path_args => path_args,
    }
}
