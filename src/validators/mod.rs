//! Post-parse validation over a package.
//!
//! Validators collect findings, they never abort a run; the driver decides
//! what to do with them. Which validators apply depends on the package's
//! source format: only structured-module packages carry the duplicate-text
//! check today, catalog packages have none.

mod duplicate_text;

use std::fmt;

use crate::model::Package;
use crate::parsers::Format;

pub use duplicate_text::DuplicateTextValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One validation diagnostic tied to a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

pub trait Validator {
    fn validate(&self, package: &Package) -> Vec<Finding>;
}

/// The validators that apply to a package of the given format.
pub fn validators_for(format: Format, default_language: &str) -> Vec<Box<dyn Validator>> {
    match format {
        Format::Module => vec![Box::new(DuplicateTextValidator::new(default_language))],
        Format::Catalog => Vec::new(),
    }
}

/// Runs every applicable validator and flattens the findings.
pub fn validate(package: &Package, format: Format, default_language: &str) -> Vec<Finding> {
    validators_for(format, default_language)
        .iter()
        .flat_map(|validator| validator.validate(package))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_packages_have_no_validators() {
        assert!(validators_for(Format::Catalog, "en-US").is_empty());
        assert_eq!(validators_for(Format::Module, "en-US").len(), 1);
    }
}
