use sdkgen_core::context::AppBundle;
use sdkgen_core::{GeneratedFile, SdkGenerator};
use thiserror::Error;

use crate::emitters;
use crate::emitters::version_module_ident;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to render template: {0}")]
    Render(#[from] minijinja::Error),
}

/// Generates a Rust crate wrapping `sdkgen-client`, one module per bundled
/// spec version.
pub struct RustClientGenerator;

impl SdkGenerator for RustClientGenerator {
    type Error = GeneratorError;

    fn generate(&self, bundle: &AppBundle) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = vec![
            GeneratedFile {
                path: "Cargo.toml".to_string(),
                content: emitters::scaffold::emit_cargo_toml(bundle)?,
            },
            GeneratedFile {
                path: "src/lib.rs".to_string(),
                content: emitters::scaffold::emit_lib(bundle)?,
            },
        ];

        for context in &bundle.contexts {
            files.push(GeneratedFile {
                path: format!("src/{}.rs", version_module_ident(&context.version)),
                content: emitters::module::emit_module(context)?,
            });
        }

        Ok(files)
    }
}
