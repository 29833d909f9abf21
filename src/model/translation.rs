/// A single translated text for one language code.
///
/// Immutable once constructed. A *literal* translation is not end-user
/// content but a reference to another message's value (e.g. `LABEL:
/// i18n.ID`); it is never re-quoted when serialized and is exempt from
/// duplicate-text validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    language: String,
    text: String,
    is_literal: bool,
    line: Option<usize>,
    column: Option<usize>,
}

impl Translation {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
            is_literal: false,
            line: None,
            column: None,
        }
    }

    /// A translation whose text is a code reference rather than content.
    pub fn literal(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            is_literal: true,
            ..Self::new(language, text)
        }
    }

    /// Attach the source position the text was extracted from (1-based).
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_literal(&self) -> bool {
        self.is_literal
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }
}
