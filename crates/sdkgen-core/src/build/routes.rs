use std::collections::HashSet;

use crate::context::{DescriptorParam, RouteDescriptor};
use crate::error::BuildError;
use crate::spec::ApiSpec;
use crate::spec::operation::{HttpMethod, Operation};
use crate::spec::parameter::ParameterLocation;

use super::classify::{body_to_params, filter_params};

/// Build one normalized descriptor per (path, method) pair.
///
/// A duplicate SDK method name aborts the whole spec version, not just the
/// offending route.
pub fn build_routes(spec: &ApiSpec) -> Result<Vec<RouteDescriptor>, BuildError> {
    let allow_legacy = matches!(spec, ApiSpec::V2(_));
    let mut seen_names = HashSet::new();
    let mut routes = Vec::new();

    for (path, item) in spec.paths() {
        for (method, op) in item.operations() {
            routes.push(build_route(path, method, op, allow_legacy, &mut seen_names)?);
        }
    }

    Ok(routes)
}

fn build_route(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    allow_legacy: bool,
    seen_names: &mut HashSet<String>,
) -> Result<RouteDescriptor, BuildError> {
    let sdk_method_name = op
        .resolve_sdk_method_name(allow_legacy)
        .ok_or_else(|| BuildError::MissingSdkMethodName {
            method: method.as_str().to_string(),
            path: path.to_string(),
        })?
        .to_string();

    if !seen_names.insert(sdk_method_name.clone()) {
        return Err(BuildError::DuplicateSdkMethodName {
            name: sdk_method_name,
            method: method.as_str().to_string(),
            path: path.to_string(),
        });
    }

    let query: Vec<DescriptorParam> =
        filter_params(&op.parameters, &[ParameterLocation::Query])
            .into_iter()
            .map(DescriptorParam::from_parameter)
            .collect();

    let body_like = filter_params(
        &op.parameters,
        &[ParameterLocation::Body, ParameterLocation::FormData],
    );

    // A single raw body parameter is flattened to one-level pseudo form
    // fields; any other mix passes through as declared.
    let body_params: Vec<DescriptorParam> =
        if body_like.len() == 1 && body_like[0].location == ParameterLocation::Body {
            body_to_params(body_like[0])
        } else {
            body_like
                .into_iter()
                .map(DescriptorParam::from_parameter)
                .collect()
        };

    let has_body = method.has_body();
    let (data_params, query_params) = if has_body {
        (body_params, query)
    } else {
        (query, Vec::new())
    };

    let path_params: Vec<DescriptorParam> =
        filter_params(&op.parameters, &[ParameterLocation::Path])
            .into_iter()
            .map(|param| {
                let mut desc = DescriptorParam::from_parameter(param);
                // Path param names become positional variable identifiers in
                // generated code.
                desc.name = sanitize_path_name(&desc.name);
                desc
            })
            .collect();

    let header_params: Vec<DescriptorParam> =
        filter_params(&op.parameters, &[ParameterLocation::Header])
            .into_iter()
            .map(DescriptorParam::from_parameter)
            .collect();

    Ok(RouteDescriptor {
        sdk_method_name,
        has_body,
        method,
        url: path.to_string(),
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.as_deref().map(collapse_spaces),
        tags: op.tags.clone(),
        path_params,
        header_params,
        data_params,
        query_params,
        amqp: op.amqp.clone(),
    })
}

/// Replace every run of non-word characters with a single underscore.
pub fn sanitize_path_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Collapse runs of two or more spaces into one.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_spaces = 0usize;
    for ch in text.chars() {
        if ch == ' ' {
            pending_spaces += 1;
        } else {
            if pending_spaces > 0 {
                out.push(' ');
                pending_spaces = 0;
            }
            out.push(ch);
        }
    }
    if pending_spaces > 0 {
        out.push(' ');
    }
    out
}
