use tracing::warn;

use crate::error::Result;
use crate::model::{Node, Package, Translation};

use super::{FileOutput, Writer};

const INDENT: &str = "    ";

/// Serializes a package, for one target language, back into per-file module
/// text: one output per [`File`](crate::model::File) at its translated path.
pub struct StructuredModuleWriter<'a> {
    package: &'a Package,
    language: String,
}

impl<'a> StructuredModuleWriter<'a> {
    pub fn new(package: &'a Package, language: impl Into<String>) -> Self {
        Self {
            package,
            language: language.into(),
        }
    }
}

impl Writer for StructuredModuleWriter<'_> {
    fn run(&self) -> Result<Vec<FileOutput>> {
        let mut outputs = Vec::new();

        for file in self.package.files() {
            let mut root = Node::branch();
            for message in file.messages() {
                let Some(translation) = message.translation(&self.language) else {
                    warn!(
                        file = %file.canonical_name(),
                        id = message.id(),
                        language = %self.language,
                        "message has no translation for the target language, skipped"
                    );
                    continue;
                };
                let path: Vec<&str> = message.id().split('.').collect();
                root.insert(&path, translation.clone());
            }

            let mut content = String::new();
            if !file.references().is_empty() {
                content.push_str(&file.references().join("\n"));
                content.push_str("\n\n");
            }
            content.push_str("export default ");
            content.push_str(&render(&root, 0));
            content.push_str(";\n");

            outputs.push(FileOutput {
                path: file.translated_file_name(&self.language),
                content,
            });
        }

        Ok(outputs)
    }
}

fn render(node: &Node, depth: usize) -> String {
    match node {
        Node::Leaf(translation) => render_leaf(translation),
        Node::List(items) => {
            let rendered: Vec<String> = items.iter().map(|item| render(item, depth)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Node::Branch(children) if children.is_empty() => "{}".to_string(),
        Node::Branch(children) => {
            let inner_pad = INDENT.repeat(depth + 1);
            let closing_pad = INDENT.repeat(depth);
            let entries: Vec<String> = children
                .iter()
                .map(|(key, child)| {
                    format!("{inner_pad}{}: {}", render_key(key), render(child, depth + 1))
                })
                .collect();
            format!("{{\n{}\n{closing_pad}}}", entries.join(",\n"))
        }
    }
}

fn render_leaf(translation: &Translation) -> String {
    let text = translation.text();
    if translation.is_literal() {
        // A reference to another constant; quoting it would turn code into
        // content.
        return text.to_string();
    }
    if text.contains("${") {
        format!("`{}`", text.replace('`', "\\`"))
    } else {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        format!("\"{}\"", key.replace('"', "\\\""))
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
