use anyhow::{Context, Result, bail};
use log::info;
use serde_json::Value;

use sdkgen_core::spec;

use crate::specset::SpecSet;

/// Fetch remote specifications and group them by app identity.
///
/// The endpoint returns a JSON object of OpenAPI documents keyed by app
/// name. The grouping key comes from each document's own identity, not the
/// wrapper key, so renamed wrapper entries do not leak into module names.
pub fn fetch_specs(url: &str) -> Result<SpecSet> {
    info!("fetching specs from {url}");

    let value: Value = reqwest::blocking::get(url)
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("{url} returned an error status"))?
        .json()
        .with_context(|| format!("{url} did not return valid JSON"))?;

    let Value::Object(entries) = value else {
        bail!("{url}: expected a JSON object keyed by app name");
    };

    let mut set = SpecSet::new();
    for (key, doc) in entries {
        let parsed = spec::from_value(doc).with_context(|| format!("entry {key}"))?;
        let app = parsed.info().app_identity().to_string();
        let version = parsed.info().version.clone();
        set.entry(app).or_default().insert(version, parsed);
    }

    Ok(set)
}
