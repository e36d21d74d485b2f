pub mod build;
pub mod context;
pub mod error;
pub mod spec;

use context::AppBundle;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce SDK files from an app bundle.
pub trait SdkGenerator {
    type Error: std::error::Error;

    fn generate(&self, bundle: &AppBundle) -> Result<Vec<GeneratedFile>, Self::Error>;
}
