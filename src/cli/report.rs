//! Validation finding formatting and printing.
//!
//! Findings are displayed in cargo-style format. Separate from the engine so
//! tradux can be used as a library without pulling terminal concerns in.

use std::io::{self, Write};

use colored::Colorize;

use crate::validators::{Finding, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings to stdout.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer. Useful for testing or redirection.
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    for finding in findings {
        let severity = match finding.severity {
            Severity::Warning => "warning".yellow().bold(),
            Severity::Error => "error".red().bold(),
        };

        let location = match (&finding.file, finding.line, finding.column) {
            (Some(file), Some(line), Some(column)) => format!("{file}:{line}:{column}"),
            (Some(file), Some(line), None) => format!("{file}:{line}"),
            (Some(file), None, _) => file.clone(),
            (None, ..) => String::new(),
        };

        if location.is_empty() {
            let _ = writeln!(writer, "{severity}: {}", finding.message);
        } else {
            let _ = writeln!(
                writer,
                "{severity}: {} {}",
                finding.message,
                format!("({location})").dimmed()
            );
        }
    }

    if !findings.is_empty() {
        let warnings = findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
            .count();
        let errors = findings.len() - warnings;
        let summary = format!(
            "{FAILURE_MARK} {} ({errors} {}, {warnings} {})",
            "validation findings".bold(),
            if errors == 1 { "error" } else { "errors" },
            if warnings == 1 { "warning" } else { "warnings" },
        );
        let _ = writeln!(writer, "{summary}");
    }
}

/// Print a per-run summary of written outputs.
pub fn print_written(count: usize) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "wrote {count} {}",
            if count == 1 { "file" } else { "files" }
        )
        .green()
    );
}
