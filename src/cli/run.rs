use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::config::{config_path, default_config_json, Config, CONFIG_FILE_NAME};
use crate::parsers::{parser_for, Format};
use crate::validators::{validate, Severity};
use crate::writers::writer_for;

use super::args::{Arguments, Command, CommonArgs};
use super::{report, ExitStatus};

/// Main entry point for the tradux CLI.
///
/// Dispatches to the appropriate command handler based on the parsed
/// arguments. The conversion commands differ only in their output format:
/// `extract` writes catalogs, `generate` writes modules.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => convert(cmd.args, Format::Catalog),
        Some(Command::Generate(cmd)) => convert(cmd.args, Format::Module),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

fn convert(args: CommonArgs, output_format: Format) -> Result<ExitStatus> {
    let config = Config::load(&args.package)?;
    let default_language = args
        .default_language
        .unwrap_or_else(|| config.default_language.clone());

    let inputs = collect_inputs(&args.inputs, &config)?;
    let Some(first) = inputs.first() else {
        bail!("no input files found");
    };

    // The input format decides the parser; unknown extensions are rejected
    // here, before anything is read.
    let input_format = Format::from_path(first)?;

    let parser = parser_for(input_format, &args.package, inputs, &default_language);
    let package = parser.run()?;

    let findings = validate(&package, input_format, &default_language);
    report::report(&findings);

    let languages = if args.languages.is_empty() {
        config.languages.clone()
    } else {
        args.languages
    };
    if languages.is_empty() {
        bail!(
            "no target languages; pass --language or set 'languages' in {}",
            CONFIG_FILE_NAME
        );
    }

    let mut written = 0;
    for language in &languages {
        let writer = writer_for(output_format, &package, language, &default_language);
        for output in writer.run()? {
            let dest = args.out.join(&output.path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&dest, &output.content)
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            written += 1;
        }
    }
    report::print_written(written);

    let failed = findings
        .iter()
        .any(|finding| finding.severity == Severity::Error);
    Ok(if failed {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

/// Expands directory inputs into the contained module/catalog files,
/// skipping ignored paths. Directory entries are visited in file-name order
/// so runs are reproducible; explicit file arguments keep their given order.
fn collect_inputs(inputs: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut collected = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let walker = WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok());
            for entry in walker {
                let path = entry.path();
                if !entry.file_type().is_file() || config.is_ignored(path) {
                    continue;
                }
                if Format::from_path(path).is_ok() {
                    collected.push(path.to_path_buf());
                }
            }
        } else {
            collected.push(input.clone());
        }
    }
    Ok(collected)
}

fn init() -> Result<ExitStatus> {
    let path = config_path(Path::new("."));
    if path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }
    fs::write(&path, default_config_json()?)?;
    Ok(ExitStatus::Success)
}
