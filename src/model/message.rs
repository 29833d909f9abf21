use indexmap::IndexMap;

use super::Translation;

/// A named entry holding at most one [`Translation`] per language code.
///
/// The id is a dotted path (`objects.WIZARD`) and is only meaningful within
/// the [`File`](super::File) that owns the message.
#[derive(Debug, Clone, Default)]
pub struct Message {
    id: String,
    description: Option<String>,
    translations: IndexMap<String, Translation>,
}

impl Message {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            translations: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Adds a translation, replacing any previous one for the same language.
    pub fn add_or_update_translation(&mut self, translation: Translation) {
        self.translations
            .insert(translation.language().to_string(), translation);
    }

    pub fn has_translation(&self, code: &str) -> bool {
        self.translations.contains_key(code)
    }

    pub fn translation(&self, code: &str) -> Option<&Translation> {
        self.translations.get(code)
    }

    pub fn translations(&self) -> impl Iterator<Item = &Translation> {
        self.translations.values()
    }

    /// Unions the other message's translations into this one; the other's
    /// entries win on conflicting language codes. A missing description is
    /// adopted, an existing one is kept.
    pub fn merge(&mut self, other: Message) {
        for (_, translation) in other.translations {
            self.add_or_update_translation(translation);
        }
        if self.description.is_none() {
            self.description = other.description;
        }
    }
}
