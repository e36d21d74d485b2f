mod fetch;
mod specset;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use sdkgen_core::build::{self, ModuleNameRegistry};
use sdkgen_core::context::PackageMeta;
use sdkgen_core::spec::ApiSpec;
use sdkgen_core::{GeneratedFile, SdkGenerator};
use sdkgen_rust::RustClientGenerator;

use specset::SpecSet;

#[derive(Parser)]
#[command(name = "sdkgen", about = "OpenAPI 2/3 client SDK generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client SDK crates from API specifications
    Generate {
        /// Path to the spec file or bundle (YAML or JSON)
        #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
        input: Option<PathBuf>,

        /// URL returning a JSON object of OpenAPI documents keyed by app
        #[arg(long)]
        url: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "sdk")]
        output: PathBuf,

        /// Name of the service package the SDKs belong to
        #[arg(long)]
        package_name: String,

        /// Version of the service package
        #[arg(long)]
        package_version: String,

        /// Build everything but write nothing
        #[arg(long)]
        dry: bool,
    },

    /// Validate a spec file or bundle
    Validate {
        /// Path to the spec file or bundle
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the route descriptors built from a spec bundle
    Inspect {
        /// Path to the spec file or bundle
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Name of the service package, used for module naming
        #[arg(long, default_value = "svc-api")]
        package_name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            url,
            output,
            package_name,
            package_version,
            dry,
        } => cmd_generate(input, url, output, package_name, package_version, dry),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            package_name,
        } => cmd_inspect(input, format, package_name),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sdkgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_spec_set(path: &Path) -> Result<SpecSet> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    match ext {
        "json" => specset::from_json(&content),
        _ => specset::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    url: Option<String>,
    output: PathBuf,
    package_name: String,
    package_version: String,
    dry: bool,
) -> Result<()> {
    let specs = match (input, url) {
        (Some(path), _) => load_spec_set(&path)?,
        (None, Some(url)) => fetch::fetch_specs(&url)?,
        (None, None) => anyhow::bail!("either --input or --url is required"),
    };

    let package = PackageMeta {
        name: package_name,
        version: package_version,
    };
    let mut registry = ModuleNameRegistry::new();
    let mut generated = 0usize;

    for (app, versions) in &specs {
        let Some(bundle) = build::build_app(app, versions, &package, &mut registry)? else {
            continue;
        };

        let files = RustClientGenerator.generate(&bundle)?;

        let dir = output.join(format!("{}-{}-{}", package.name, app, package.version));
        eprintln!("Generating {} → {}", app, dir.display());

        if dry {
            for file in &files {
                eprintln!("  would write {}", dir.join(&file.path).display());
            }
        } else {
            write_files(&dir, &files)?;
        }

        // Archiving is handled downstream; announce the expected name.
        info!(
            "app {app}: archive {} as {}",
            dir.display(),
            bundle.filename
        );
        generated += 1;
    }

    if generated == 0 {
        eprintln!("Nothing to generate.");
    } else {
        eprintln!("Generated {generated} SDK package(s) in {}", output.display());
    }
    Ok(())
}

fn spec_label(spec: &ApiSpec) -> &'static str {
    match spec {
        ApiSpec::V2(_) => "swagger 2",
        ApiSpec::V3(_) => "openapi 3",
    }
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let specs = load_spec_set(&input)?;

    let package = PackageMeta {
        name: "svc-api".to_string(),
        version: "0.0.0".to_string(),
    };
    let mut registry = ModuleNameRegistry::new();

    for (app, versions) in &specs {
        for (version, spec) in versions {
            eprintln!(
                "{app} {version}: {} paths ({})",
                spec.paths().len(),
                spec_label(spec)
            );
        }

        match build::build_app(app, versions, &package, &mut registry)? {
            Some(bundle) => {
                let routes: usize = bundle.contexts.iter().map(|c| c.routes.len()).sum();
                eprintln!("  {} routes over {} transport", routes, bundle.transport.as_str());
            }
            None => eprintln!("  skipped: unknown or unsupported protocol"),
        }
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat, package_name: String) -> Result<()> {
    let specs = load_spec_set(&input)?;

    let package = PackageMeta {
        name: package_name,
        version: "0.0.0".to_string(),
    };
    let mut registry = ModuleNameRegistry::new();

    let mut summary = serde_json::Map::new();
    for (app, versions) in &specs {
        if let Some(bundle) = build::build_app(app, versions, &package, &mut registry)? {
            summary.insert(app.clone(), serde_json::to_value(&bundle.contexts)?);
        }
    }
    let summary = serde_json::Value::Object(summary);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}
