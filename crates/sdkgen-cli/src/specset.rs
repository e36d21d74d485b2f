use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::Value;

use sdkgen_core::spec::{self, ApiSpec};

/// Specifications grouped as app name → version → document.
pub type SpecSet = IndexMap<String, IndexMap<String, ApiSpec>>;

fn is_spec_document(value: &Value) -> bool {
    value.get("openapi").is_some() || value.get("swagger").is_some()
}

/// Build a spec set from a parsed document.
///
/// Three input shapes are accepted: a bare spec document, a map of app name
/// to spec document, or a map of app name to version-keyed spec documents.
/// A bare document is filed under its own app identity and version.
pub fn from_value(value: Value) -> Result<SpecSet> {
    let mut set = SpecSet::new();

    if is_spec_document(&value) {
        let parsed = spec::from_value(value)?;
        let app = parsed.info().app_identity().to_string();
        let version = parsed.info().version.clone();
        set.entry(app).or_default().insert(version, parsed);
        return Ok(set);
    }

    let Value::Object(apps) = value else {
        bail!("expected a spec document or a map keyed by app name");
    };

    for (app, entry) in apps {
        if is_spec_document(&entry) {
            let parsed = spec::from_value(entry).with_context(|| format!("app {app}"))?;
            let version = parsed.info().version.clone();
            set.entry(app).or_default().insert(version, parsed);
            continue;
        }

        let Value::Object(versions) = entry else {
            bail!("app {app}: expected a spec document or a version map");
        };
        for (version, doc) in versions {
            let parsed = spec::from_value(doc)
                .with_context(|| format!("app {app}, version {version}"))?;
            set.entry(app.clone()).or_default().insert(version, parsed);
        }
    }

    Ok(set)
}

/// Parse a spec set from JSON.
pub fn from_json(input: &str) -> Result<SpecSet> {
    from_value(serde_json::from_str(input)?)
}

/// Parse a spec set from YAML.
pub fn from_yaml(input: &str) -> Result<SpecSet> {
    from_value(serde_yaml_ng::from_str(input)?)
}
