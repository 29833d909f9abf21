//! Error types for the extraction and round-trip engine.
//!
//! Structural violations of either textual grammar abort the whole run; no
//! partial package is handed to a writer. Everything else (missing
//! translations, unhandled expression kinds, validation findings) degrades
//! gracefully with a diagnostic and never surfaces here.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file name does not match the `<name>.<language>.<extension>` grammar.
    #[error("filename '{0}' doesn't match the <name>.<language>.<extension> format")]
    FileNameFormat(String),

    /// A catalog block violates the entry grammar (msgid/msgstr/header).
    #[error("malformed catalog entry in '{path}': {reason}")]
    CatalogFormat { path: PathBuf, reason: String },

    /// The parser/writer factory was asked for a format it doesn't know.
    #[error("unsupported format '{0}'")]
    UnsupportedFormat(String),

    /// The module source could not be parsed into a syntax tree.
    #[error("failed to parse module '{path}': {message}")]
    ModuleParse { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
