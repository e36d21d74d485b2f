use crate::context::DescriptorParam;
use crate::spec::parameter::{Parameter, ParameterLocation};

/// Return the subsequence of parameters declared at any of the given
/// locations. An empty result is a valid outcome, not an error.
pub fn filter_params<'a>(
    params: &'a [Parameter],
    locations: &[ParameterLocation],
) -> Vec<&'a Parameter> {
    params
        .iter()
        .filter(|param| locations.contains(&param.location))
        .collect()
}

/// Flatten a single body-style parameter into one pseudo form parameter per
/// schema property.
///
/// Body payloads in v2 specs are schema objects, but the generated client
/// treats every non-path/non-query input uniformly as a named data field.
/// Flattening stops at one level; nested structure stays opaque in
/// `type`/`format`.
pub fn body_to_params(body: &Parameter) -> Vec<DescriptorParam> {
    let Some(schema) = &body.schema else {
        return Vec::new();
    };

    schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let required = schema.required.iter().any(|r| r == name);
            DescriptorParam::from_body_property(name, required, prop)
        })
        .collect()
}
