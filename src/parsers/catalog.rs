use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::catalog_text::{
    unescape, ADD_REFERENCE_MARK, AUTOMATIC_TRANSLATION_NOTE_ID, PACKAGE_NAME_MARK,
};
use crate::error::{Error, Result};
use crate::model::{File, Message, Package, ParsedFileName, Translation};

use super::module::DEFAULT_LANGUAGE_TOKEN;
use super::Parser;

/// Reads one or more catalog files and reconstructs the package model:
/// files, messages, the msgstr-side translations and reference annotations.
pub struct CatalogParser {
    package_path: PathBuf,
    file_paths: Vec<PathBuf>,
    default_language: String,
}

/// One blank-line-separated catalog block, before model construction.
#[derive(Debug, Default)]
struct RawEntry {
    /// `(import text, owning file path)`; no owner means the reference
    /// applies to every file named by the block's locations.
    references: Vec<(String, Option<String>)>,
    /// `(file path, message id)` pairs from the `#:` lines.
    locations: Vec<(String, String)>,
    automatic: bool,
    description: Option<String>,
    msgid: Option<String>,
    msgstr: Option<String>,
}

impl CatalogParser {
    pub fn new(
        package_path: impl Into<PathBuf>,
        file_paths: Vec<PathBuf>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            package_path: package_path.into(),
            file_paths,
            default_language: default_language.into(),
        }
    }

    fn parse_catalog_file(&self, path: &Path, package: &mut Package) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.parse_catalog_text(path, &text, package)
    }

    /// Parses catalog text. Split out from the I/O so tests can feed text
    /// directly.
    fn parse_catalog_text(&self, path: &Path, text: &str, package: &mut Package) -> Result<()> {
        let mut blocks = split_blocks(text).into_iter();

        let header = blocks.next().unwrap_or_default();
        self.check_header(path, &header, package.name())?;

        for block in blocks {
            let entry = parse_entry(path, &block)?;
            self.apply_entry(path, entry, package)?;
        }

        Ok(())
    }

    /// The first block must be a catalog header; a package-name mismatch is
    /// worth a warning but never aborts the run.
    fn check_header(&self, path: &Path, header: &str, expected: &str) -> Result<()> {
        if !header.lines().any(|line| line.trim() == "msgid \"\"") {
            return Err(Error::CatalogFormat {
                path: path.to_path_buf(),
                reason: "missing catalog header".to_string(),
            });
        }

        let original = header
            .lines()
            .find_map(|line| line.strip_prefix(PACKAGE_NAME_MARK))
            .map(str::trim);
        match original {
            Some(name) if name != expected => {
                warn!(
                    catalog = %path.display(),
                    header = name,
                    expected,
                    "catalog was generated for a different package"
                );
            }
            Some(_) => {}
            None => {
                warn!(catalog = %path.display(), "catalog header carries no package name");
            }
        }
        Ok(())
    }

    /// Turns one parsed block into merged Files/Messages inside the package.
    fn apply_entry(&self, path: &Path, entry: RawEntry, package: &mut Package) -> Result<()> {
        let msgstr = entry.msgstr.unwrap_or_default();

        for (file_path, message_id) in &entry.locations {
            let file_path = Path::new(file_path);
            let parsed = ParsedFileName::parse(file_path, None)?;
            let language = if parsed.language == DEFAULT_LANGUAGE_TOKEN {
                self.default_language.clone()
            } else {
                parsed.language.clone()
            };

            let mut translation = Translation::new(&language, &msgstr);
            if entry.automatic {
                translation = Translation::literal(&language, &msgstr);
            }

            let mut message = Message::new(message_id.clone());
            if let Some(description) = &entry.description {
                message = message.with_description(description.clone());
            }
            message.add_or_update_translation(translation);

            let mut file = File::new(file_path, None)?;
            file.add_or_update_message(message);

            for (import, owner) in &entry.references {
                match owner {
                    None => file.add_or_update_reference(import.clone()),
                    Some(owner_path) => {
                        if paths_refer_to_same_file(owner_path, file_path) {
                            file.add_or_update_reference(import.clone());
                        }
                    }
                }
            }

            package.add_or_update_file(file);
        }

        if entry.locations.is_empty() {
            warn!(catalog = %path.display(), "catalog entry without a location line, skipped");
        }

        Ok(())
    }
}

impl Parser for CatalogParser {
    fn run(&self) -> Result<Package> {
        let mut package = Package::new(&self.package_path);
        for path in &self.file_paths {
            self.parse_catalog_file(path, &mut package)?;
        }
        Ok(package)
    }
}

/// Splits catalog text into blocks on blank-line boundaries.
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

fn parse_entry(path: &Path, block: &str) -> Result<RawEntry> {
    static NOTE_LINE: OnceLock<Regex> = OnceLock::new();
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let note_line =
        NOTE_LINE.get_or_init(|| Regex::new(r"^#\. (\d+) \| (.+)$").expect("note grammar is valid"));
    let quoted =
        QUOTED.get_or_init(|| Regex::new(r#"^(msgctxt|msgid|msgstr) "(.*)"$"#).expect("entry grammar is valid"));

    let malformed = |reason: String| Error::CatalogFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut entry = RawEntry::default();
    for line in block.lines() {
        let line = line.trim_end();

        if let Some(rest) = line.strip_prefix(ADD_REFERENCE_MARK) {
            let rest = rest.trim_start_matches(" |").trim_start();
            let (import, owner) = match rest.split_once(" | ") {
                Some((import, owner)) => (import.trim(), Some(owner.trim().to_string())),
                None => (rest, None),
            };
            entry.references.push((import.to_string(), owner));
        } else if let Some(rest) = line.strip_prefix("#: ") {
            let (file_path, message_id) = rest
                .split_once('#')
                .ok_or_else(|| malformed(format!("location line '{line}' has no message id")))?;
            entry
                .locations
                .push((file_path.trim().to_string(), message_id.trim().to_string()));
        } else if let Some(captures) = note_line.captures(line) {
            let note_id: u32 = captures[1].parse().unwrap_or_default();
            entry.automatic = note_id == AUTOMATIC_TRANSLATION_NOTE_ID;
        } else if line.starts_with("msgctxt") || line.starts_with("msgid") || line.starts_with("msgstr") {
            let captures = quoted
                .captures(line)
                .ok_or_else(|| malformed(format!("malformed entry line '{line}'")))?;
            let value = unescape(&captures[2]);
            match &captures[1] {
                "msgctxt" => entry.description = Some(value),
                "msgid" => entry.msgid = Some(value),
                "msgstr" => entry.msgstr = Some(value),
                _ => unreachable!("regex alternation is closed"),
            }
        } else if line.starts_with('#') {
            // Other catalog comments carry nothing the model needs.
        } else {
            warn!(catalog = %path.display(), line, "unrecognized catalog line, ignored");
        }
    }

    if entry.msgid.is_none() {
        return Err(malformed("entry without msgid".to_string()));
    }
    if entry.msgstr.is_none() {
        return Err(malformed("entry without msgstr".to_string()));
    }

    Ok(entry)
}

/// Scoped references name a file by its translated path; compare on the
/// canonical name so any language variant of the same file matches.
fn paths_refer_to_same_file(owner: &str, location: &Path) -> bool {
    if Path::new(owner) == location {
        return true;
    }
    match (
        File::new(Path::new(owner), None),
        File::new(location, None),
    ) {
        (Ok(a), Ok(b)) => a.canonical_name() == b.canonical_name(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
# tradux translation file
# OriginalPackageName: test
#
msgid \"\"
msgstr \"\"
\"Language: pt-PT \\n\"
\"MIME-Version: 1.0 \\n\"
";

    fn parse(text: &str) -> Package {
        let parser = CatalogParser::new("test", Vec::new(), "en-US");
        let mut package = Package::new("test");
        parser
            .parse_catalog_text(Path::new("test.pt-PT.po"), text, &mut package)
            .unwrap();
        package
    }

    #[test]
    fn entries_rebuild_files_and_translations() {
        let text = format!(
            "{HEADER}\n\
             #: mock.pt-PT.ts#ONE\n\
             msgid \"One\"\n\
             msgstr \"Um\"\n\n\
             #: mock.pt-PT.ts#objects.WIZARD\n\
             msgid \"Wizard\"\n\
             msgstr \"Feiticeiro\"\n"
        );

        let package = parse(&text);
        assert_eq!(package.files().count(), 1);

        let file = package.file("mock.ts").unwrap();
        let one = file.message("ONE").unwrap().translation("pt-PT").unwrap();
        assert_eq!(one.text(), "Um");
        assert!(!one.is_literal());

        let wizard = file
            .message("objects.WIZARD")
            .unwrap()
            .translation("pt-PT")
            .unwrap();
        assert_eq!(wizard.text(), "Feiticeiro");
    }

    #[test]
    fn automatic_translation_note_marks_the_value_literal() {
        let text = format!(
            "{HEADER}\n\
             #: mock.pt-PT.ts#ONE\n\
             #. 1 | automatic translation\n\
             msgid \"i18n.ONE\"\n\
             msgstr \"i18n.ONE\"\n"
        );

        let package = parse(&text);
        let one = package
            .file("mock.ts")
            .unwrap()
            .message("ONE")
            .unwrap()
            .translation("pt-PT")
            .unwrap();
        assert!(one.is_literal());
        assert_eq!(one.text(), "i18n.ONE");
    }

    #[test]
    fn msgctxt_becomes_the_description() {
        let text = format!(
            "{HEADER}\n\
             #: mock.pt-PT.ts#menu.DASHBOARDS\n\
             msgctxt \"This is a comment!\"\n\
             msgid \"Dashboards\"\n\
             msgstr \"Painéis\"\n"
        );

        let package = parse(&text);
        let message = package
            .file("mock.ts")
            .unwrap()
            .message("menu.DASHBOARDS")
            .unwrap();
        assert_eq!(message.description(), Some("This is a comment!"));
    }

    #[test]
    fn unscoped_references_apply_to_every_location_in_the_block() {
        let text = format!(
            "{HEADER}\n\
             # AddReference | import i18n from \"./reference.default\";\n\
             #: mock.pt-PT.ts#ONE\n\
             #: other.pt-PT.ts#ONE\n\
             msgid \"One\"\n\
             msgstr \"Um\"\n"
        );

        let package = parse(&text);
        assert_eq!(
            package.file("mock.ts").unwrap().references(),
            ["import i18n from \"./reference.default\";"]
        );
        assert_eq!(
            package.file("other.ts").unwrap().references(),
            ["import i18n from \"./reference.default\";"]
        );
    }

    #[test]
    fn scoped_references_apply_only_to_the_named_file() {
        let text = format!(
            "{HEADER}\n\
             # AddReference | import i18n from \"./reference.default\"; | mock.pt-PT.ts\n\
             #: mock.pt-PT.ts#ONE\n\
             #: other.pt-PT.ts#ONE\n\
             msgid \"One\"\n\
             msgstr \"Um\"\n"
        );

        let package = parse(&text);
        assert_eq!(
            package.file("mock.ts").unwrap().references(),
            ["import i18n from \"./reference.default\";"]
        );
        assert!(package.file("other.ts").unwrap().references().is_empty());
    }

    #[test]
    fn same_canonical_file_across_blocks_merges_messages() {
        let text = format!(
            "{HEADER}\n\
             #: reference.pt-PT.ts#ONE\n\
             msgid \"One\"\n\
             msgstr \"Um\"\n\n\
             #: reference.pt-PT.ts#TWO\n\
             msgid \"Two\"\n\
             msgstr \"Dois\"\n"
        );

        let package = parse(&text);
        let file = package.file("reference.ts").unwrap();
        assert_eq!(file.messages().count(), 2);
        assert_eq!(
            file.message("TWO").unwrap().translation("pt-PT").unwrap().text(),
            "Dois"
        );
    }

    #[test]
    fn malformed_msgid_is_fatal() {
        let parser = CatalogParser::new("test", Vec::new(), "en-US");
        let mut package = Package::new("test");
        let text = format!(
            "{HEADER}\n\
             #: mock.pt-PT.ts#ONE\n\
             msgid One\n\
             msgstr \"Um\"\n"
        );
        let err = parser
            .parse_catalog_text(Path::new("test.pt-PT.po"), &text, &mut package)
            .unwrap_err();
        assert!(matches!(err, Error::CatalogFormat { .. }));
    }

    #[test]
    fn missing_header_is_fatal() {
        let parser = CatalogParser::new("test", Vec::new(), "en-US");
        let mut package = Package::new("test");
        let text = "#: mock.pt-PT.ts#ONE\nmsgid \"One\"\nmsgstr \"Um\"\n";
        let err = parser
            .parse_catalog_text(Path::new("test.pt-PT.po"), text, &mut package)
            .unwrap_err();
        assert!(matches!(err, Error::CatalogFormat { .. }));
    }

    #[test]
    fn escaped_quotes_survive_the_round_trip() {
        let text = format!(
            "{HEADER}\n\
             #: mock.pt-PT.ts#SIX\n\
             msgid \"6 + \\\"\\\"\"\n\
             msgstr \"6 + \\\"\\\"\"\n"
        );

        let package = parse(&text);
        let six = package
            .file("mock.ts")
            .unwrap()
            .message("SIX")
            .unwrap()
            .translation("pt-PT")
            .unwrap();
        assert_eq!(six.text(), "6 + \"\"");
    }

    #[test]
    fn default_token_in_location_maps_to_default_language() {
        let text = format!(
            "{HEADER}\n\
             #: mock.default.ts#ONE\n\
             msgid \"One\"\n\
             msgstr \"One\"\n"
        );

        let package = parse(&text);
        let one = package.file("mock.ts").unwrap().message("ONE").unwrap();
        assert!(one.has_translation("en-US"));
    }
}
