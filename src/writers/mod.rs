//! Writer back-ends and format dispatch.

mod catalog;
mod module;

use std::path::PathBuf;

use crate::error::Result;
use crate::model::Package;
use crate::parsers::Format;

pub use catalog::CatalogWriter;
pub use module::StructuredModuleWriter;

/// One named output buffer produced by a writer; the driver persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    pub path: PathBuf,
    pub content: String,
}

/// A writer serializes a [`Package`] for one target language into one or
/// more named text buffers.
pub trait Writer {
    fn run(&self) -> Result<Vec<FileOutput>>;
}

/// Selects the writer for the given format.
pub fn writer_for<'a>(
    format: Format,
    package: &'a Package,
    language: &str,
    default_language: &str,
) -> Box<dyn Writer + 'a> {
    match format {
        Format::Catalog => Box::new(CatalogWriter::new(package, language, default_language)),
        Format::Module => Box::new(StructuredModuleWriter::new(package, language)),
    }
}
