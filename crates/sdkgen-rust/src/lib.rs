pub mod emitters;
pub mod generator;

pub use generator::{GeneratorError, RustClientGenerator};
