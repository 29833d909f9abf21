use tracing::warn;

use crate::catalog_text::{
    escape, ADD_REFERENCE_MARK, AUTOMATIC_TRANSLATION_NOTE_ID, AUTOMATIC_TRANSLATION_NOTE_TEXT,
    PACKAGE_NAME_MARK,
};
use crate::error::Result;
use crate::model::{File, Message, Package, Translation};

use super::{FileOutput, Writer};

/// Serializes a package, for one target language, into a single catalog
/// buffer named `<package>.<language>.po`.
pub struct CatalogWriter<'a> {
    package: &'a Package,
    language: String,
    default_language: String,
}

impl<'a> CatalogWriter<'a> {
    pub fn new(
        package: &'a Package,
        language: impl Into<String>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            package,
            language: language.into(),
            default_language: default_language.into(),
        }
    }

    fn header(&self) -> String {
        let tool = env!("CARGO_PKG_NAME");
        let version = env!("CARGO_PKG_VERSION");
        format!(
            "# {tool} translation file\n\
             {PACKAGE_NAME_MARK} {package}\n\
             #\n\
             msgid \"\"\n\
             msgstr \"\"\n\
             \"Project-Id-Version: {tool} {version} \\n\"\n\
             \"Language-Team: {tool} \\n\"\n\
             \"Language: {language} \\n\"\n\
             \"MIME-Version: 1.0 \\n\"\n\
             \"Content-Type: text/plain; charset=UTF-8\\n\"",
            package = self.package.name(),
            language = self.language,
        )
    }

    /// Searches the whole package, in file-then-message insertion order, for
    /// another message whose default-language text equals `default_text` and
    /// which carries a usable target-language translation. The first hit
    /// wins; nothing past it is ever considered.
    fn fallback_translation(
        &self,
        current_file: &str,
        current_id: &str,
        default_text: &str,
    ) -> Option<&'a Translation> {
        for file in self.package.files() {
            let canonical = file.canonical_name();
            for message in file.messages() {
                if canonical == current_file && message.id() == current_id {
                    continue;
                }
                let Some(default) = message.translation(&self.default_language) else {
                    continue;
                };
                if default.text() != default_text {
                    continue;
                }
                if let Some(target) = message.translation(&self.language)
                    && !target.text().is_empty()
                {
                    return Some(target);
                }
            }
        }
        None
    }

    /// Builds one catalog entry block, or `None` when the message has no
    /// default-language translation to key it by.
    fn entry_block(&self, file: &File, message: &Message, references: &[String]) -> Option<String> {
        let default = message.translation(&self.default_language)?;

        let direct = message
            .translation(&self.language)
            .filter(|translation| !translation.text().is_empty());
        let resolved = direct.or_else(|| {
            self.fallback_translation(&file.canonical_name(), message.id(), default.text())
        });

        let (output, automatic) = match resolved {
            Some(translation) if translation.is_literal() => (translation.text(), true),
            Some(translation) => (translation.text(), false),
            None if default.is_literal() => (default.text(), true),
            None => ("", false),
        };

        let translated_name = file.translated_file_name(&self.language);
        let mut lines = Vec::new();
        for reference in references {
            lines.push(format!(
                "{ADD_REFERENCE_MARK} | {reference} | {}",
                translated_name.display()
            ));
        }
        lines.push(format!(
            "#: {}#{}",
            translated_name.display(),
            message.id()
        ));
        if automatic {
            lines.push(format!(
                "#. {AUTOMATIC_TRANSLATION_NOTE_ID} | {AUTOMATIC_TRANSLATION_NOTE_TEXT}"
            ));
        }
        if let Some(description) = message.description() {
            lines.push(format!("msgctxt \"{}\"", escape(description)));
        }
        lines.push(format!("msgid \"{}\"", escape(default.text())));
        lines.push(format!("msgstr \"{}\"", escape(output)));

        Some(lines.join("\n"))
    }
}

impl Writer for CatalogWriter<'_> {
    fn run(&self) -> Result<Vec<FileOutput>> {
        let mut sections = vec![self.header()];

        for file in self.package.files() {
            let mut first_entry_of_file = true;
            for message in file.messages() {
                if !message.has_translation(&self.default_language) {
                    warn!(
                        file = %file.canonical_name(),
                        id = message.id(),
                        language = %self.default_language,
                        "message has no default-language translation, omitted from catalog"
                    );
                    continue;
                }

                let references: &[String] = if first_entry_of_file {
                    file.references()
                } else {
                    &[]
                };
                if let Some(block) = self.entry_block(file, message, references) {
                    sections.push(block);
                    first_entry_of_file = false;
                }
            }
        }

        let path = format!("{}.{}.po", self.package.name(), self.language);
        Ok(vec![FileOutput {
            path: path.into(),
            content: sections.join("\n\n") + "\n",
        }])
    }
}
