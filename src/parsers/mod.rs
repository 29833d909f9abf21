//! Parser back-ends and format dispatch.
//!
//! Formats form a closed registry: anything that is not a structured module
//! (`.ts`) or a catalog (`.po`/`.pot`) is rejected up front, before any file
//! is read.

mod catalog;
mod module;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Package;

pub use catalog::CatalogParser;
pub use module::StructuredModuleParser;

/// The two textual grammars the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Per-language module exporting one nested key/value literal.
    Module,
    /// Portable-object style translation catalog.
    Catalog,
}

impl Format {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension {
            "ts" => Ok(Format::Module),
            "po" | "pot" => Ok(Format::Catalog),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(extension)
    }
}

/// A parser turns a batch of input paths into one [`Package`].
pub trait Parser {
    fn run(&self) -> Result<Package>;
}

/// Selects the parser for the given format.
pub fn parser_for(
    format: Format,
    package_path: impl Into<PathBuf>,
    file_paths: Vec<PathBuf>,
    default_language: impl Into<String>,
) -> Box<dyn Parser> {
    match format {
        Format::Module => Box::new(StructuredModuleParser::new(
            package_path,
            file_paths,
            default_language,
        )),
        Format::Catalog => Box::new(CatalogParser::new(
            package_path,
            file_paths,
            default_language,
        )),
    }
}
