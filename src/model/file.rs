use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{Error, Result};

use super::Message;

/// Decomposed `<name>.<language>.<extension>` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFileName {
    pub name: String,
    pub language: String,
    pub extension: String,
    /// Directory part, relativized to the package root when one was given.
    pub dir: PathBuf,
}

impl ParsedFileName {
    /// Parses a module/catalog path against the naming grammar.
    ///
    /// The language token is stripped from the base name; the directory is
    /// made relative to `package_root` when the path lives under it.
    pub fn parse(path: &Path, package_root: Option<&Path>) -> Result<Self> {
        static NAME_GRAMMAR: OnceLock<Regex> = OnceLock::new();
        let re = NAME_GRAMMAR.get_or_init(|| {
            Regex::new(r"^(.+)\.(.+?)\.(\w+)$").expect("file name grammar is valid")
        });

        let base = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::FileNameFormat(path.display().to_string()))?;

        let captures = re
            .captures(base)
            .ok_or_else(|| Error::FileNameFormat(path.display().to_string()))?;

        let relative = match package_root {
            Some(root) => path.strip_prefix(root).unwrap_or(path),
            None => path,
        };

        Ok(Self {
            name: captures[1].to_string(),
            language: captures[2].to_string(),
            extension: captures[3].to_string(),
            dir: relative.parent().unwrap_or(Path::new("")).to_path_buf(),
        })
    }
}

/// A logical source file: messages keyed by dotted id plus the ordered,
/// deduplicated list of cross-file reference declarations.
///
/// Identity is the *canonical name* — the file name with the language token
/// removed — so `mock.default.ts` and `mock.pt-PT.ts` are the same File and
/// their per-language parses merge into one.
#[derive(Debug, Clone)]
pub struct File {
    dir: PathBuf,
    stem: String,
    extension: String,
    messages: IndexMap<String, Message>,
    references: Vec<String>,
}

impl File {
    pub fn new(path: &Path, package_root: Option<&Path>) -> Result<Self> {
        let parsed = ParsedFileName::parse(path, package_root)?;
        Ok(Self {
            dir: parsed.dir,
            stem: parsed.name,
            extension: parsed.extension,
            messages: IndexMap::new(),
            references: Vec::new(),
        })
    }

    /// The language-independent identity key of this file.
    pub fn canonical_name(&self) -> String {
        self.join_name(&format!("{}.{}", self.stem, self.extension))
    }

    /// The file name with a language token re-inserted.
    pub fn translated_file_name(&self, language: &str) -> PathBuf {
        PathBuf::from(self.join_name(&format!("{}.{}.{}", self.stem, language, self.extension)))
    }

    fn join_name(&self, base: &str) -> String {
        if self.dir.as_os_str().is_empty() || self.dir == Path::new(".") {
            base.to_string()
        } else {
            self.dir.join(base).display().to_string()
        }
    }

    /// Adds a message, merging translations if the id already exists.
    pub fn add_or_update_message(&mut self, message: Message) {
        match self.messages.get_mut(message.id()) {
            Some(existing) => existing.merge(message),
            None => {
                self.messages.insert(message.id().to_string(), message);
            }
        }
    }

    /// Records a reference declaration; a no-op if it is already present.
    pub fn add_or_update_reference(&mut self, reference: impl Into<String>) {
        let reference = reference.into();
        if !self.references.contains(&reference) {
            self.references.push(reference);
        }
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Unions the other file's messages (merging per id) and references
    /// (deduplicated, insertion order preserved).
    pub fn merge(&mut self, other: File) {
        for (_, message) in other.messages {
            self.add_or_update_message(message);
        }
        for reference in other.references {
            self.add_or_update_reference(reference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Translation;

    #[test]
    fn canonical_name_strips_the_language_token() {
        let file = File::new(Path::new("mock.default.ts"), None).unwrap();
        assert_eq!(file.canonical_name(), "mock.ts");

        let file = File::new(Path::new("mock.pt-PT.ts"), None).unwrap();
        assert_eq!(file.canonical_name(), "mock.ts");
    }

    #[test]
    fn rejects_names_without_a_language_token() {
        let err = File::new(Path::new("mock.ts"), None).unwrap_err();
        assert!(err.to_string().contains("doesn't match"));
    }

    #[test]
    fn multi_dot_names_keep_everything_before_the_language() {
        let parsed = ParsedFileName::parse(Path::new("main.page.default.ts"), None).unwrap();
        assert_eq!(parsed.name, "main.page");
        assert_eq!(parsed.language, "default");
        assert_eq!(parsed.extension, "ts");
    }

    #[test]
    fn package_root_relativizes_the_directory() {
        let file = File::new(
            Path::new("/pkg/src/i18n/mock.default.ts"),
            Some(Path::new("/pkg")),
        )
        .unwrap();
        assert_eq!(file.canonical_name(), "src/i18n/mock.ts");
        assert_eq!(
            file.translated_file_name("pt-PT"),
            PathBuf::from("src/i18n/mock.pt-PT.ts")
        );
    }

    #[test]
    fn references_are_deduplicated_in_insertion_order() {
        let mut file = File::new(Path::new("mock.default.ts"), None).unwrap();
        file.add_or_update_reference("import b from \"./b.default\";");
        file.add_or_update_reference("import a from \"./a.default\";");
        file.add_or_update_reference("import b from \"./b.default\";");

        assert_eq!(
            file.references(),
            [
                "import b from \"./b.default\";",
                "import a from \"./a.default\";"
            ]
        );
    }

    #[test]
    fn merge_unions_messages_by_id() {
        let mut default = File::new(Path::new("mock.default.ts"), None).unwrap();
        let mut msg = Message::new("ONE");
        msg.add_or_update_translation(Translation::new("en-US", "One"));
        default.add_or_update_message(msg);

        let mut translated = File::new(Path::new("mock.pt-PT.ts"), None).unwrap();
        let mut msg = Message::new("ONE");
        msg.add_or_update_translation(Translation::new("pt-PT", "Um"));
        translated.add_or_update_message(msg);

        default.merge(translated);
        let merged = default.message("ONE").unwrap();
        assert!(merged.has_translation("en-US"));
        assert!(merged.has_translation("pt-PT"));
    }
}
