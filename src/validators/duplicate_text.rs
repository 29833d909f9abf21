use std::collections::HashMap;

use crate::model::Package;

use super::{Finding, Severity, Validator};

/// Flags messages whose default-language text already appeared earlier in
/// the package.
///
/// The first occurrence is silent; every later occurrence of identical text
/// is reported at its own source position. Literal translations are code
/// references, not content, and are exempt.
pub struct DuplicateTextValidator {
    default_language: String,
}

impl DuplicateTextValidator {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }
}

impl Validator for DuplicateTextValidator {
    fn validate(&self, package: &Package) -> Vec<Finding> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut findings = Vec::new();

        for file in package.files() {
            for message in file.messages() {
                let Some(translation) = message.translation(&self.default_language) else {
                    continue;
                };
                if translation.is_literal() {
                    continue;
                }

                let count = seen.entry(translation.text()).or_insert(0);
                *count += 1;
                if *count > 1 {
                    findings.push(Finding {
                        severity: Severity::Warning,
                        message: format!(
                            "duplicated resource '{}' for {}",
                            translation.text(),
                            self.default_language
                        ),
                        file: Some(file.canonical_name()),
                        line: translation.line(),
                        column: translation.column(),
                    });
                }
            }
        }

        findings
    }
}
