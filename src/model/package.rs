use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::File;

/// Top-level unit passed between a parser and a writer: files keyed by
/// canonical name.
///
/// Adding a file whose canonical name is already present merges the two —
/// that is how multiple single-language parses of the same logical file
/// accumulate into one multi-language [`File`].
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    root: PathBuf,
    files: IndexMap<String, File>,
}

impl Package {
    pub fn new(package_path: impl AsRef<Path>) -> Self {
        let root = package_path.as_ref().to_path_buf();
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Self {
            name,
            root,
            files: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_file(&self, file: &File) -> bool {
        self.files.contains_key(&file.canonical_name())
    }

    pub fn add_or_update_file(&mut self, file: File) {
        match self.files.get_mut(&file.canonical_name()) {
            Some(existing) => existing.merge(file),
            None => {
                self.files.insert(file.canonical_name(), file);
            }
        }
    }

    pub fn file(&self, canonical_name: &str) -> Option<&File> {
        self.files.get(canonical_name)
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, Translation};

    #[test]
    fn name_is_the_basename_of_the_package_path() {
        let pack = Package::new("/work/packages/controls");
        assert_eq!(pack.name(), "controls");
        assert_eq!(pack.root(), Path::new("/work/packages/controls"));
    }

    #[test]
    fn language_variants_collapse_into_one_file() {
        let mut pack = Package::new("test");

        let mut default = File::new(Path::new("mock.default.ts"), None).unwrap();
        let mut msg = Message::new("ONE");
        msg.add_or_update_translation(Translation::new("en-US", "One"));
        default.add_or_update_message(msg);
        pack.add_or_update_file(default);

        let mut translated = File::new(Path::new("mock.pt-PT.ts"), None).unwrap();
        let mut msg = Message::new("ONE");
        msg.add_or_update_translation(Translation::new("pt-PT", "Um"));
        translated.add_or_update_message(msg);
        pack.add_or_update_file(translated);

        assert_eq!(pack.files().count(), 1);
        let file = pack.file("mock.ts").unwrap();
        let message = file.message("ONE").unwrap();
        assert!(message.has_translation("en-US"));
        assert!(message.has_translation("pt-PT"));
    }
}
