use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swc_common::comments::{Comment, SingleThreadedComments};
use swc_common::{BytePos, FileName, Globals, SourceMap, SourceMapper, Span, Spanned, GLOBALS};
use swc_ecma_ast::{
    BinaryOp, Expr, Lit, ModuleDecl, ModuleItem, ObjectLit, Prop, PropName, PropOrSpread,
};
use swc_ecma_parser::{Parser as SwcParser, StringInput, Syntax, TsSyntax};
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{File, Message, Package, ParsedFileName, Translation};

use super::Parser;

/// Token in the filename grammar that maps to the configured default language.
pub const DEFAULT_LANGUAGE_TOKEN: &str = "default";

/// Reads N per-language module files and builds one merged [`File`] per
/// canonical name inside one [`Package`].
///
/// Each module's sole meaningful statement exports a single nested key/value
/// literal; the walk extracts every leaf into a dotted-id message carrying
/// one [`Translation`] for the module's language.
pub struct StructuredModuleParser {
    package_path: PathBuf,
    file_paths: Vec<PathBuf>,
    default_language: String,
}

impl StructuredModuleParser {
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

    /// Parses one module file into a single-language [`File`].
    fn parse_module_file(&self, path: &Path) -> Result<File> {
        let code = fs::read_to_string(path)?;
        self.parse_module_source(path, code)
    }

    /// Parses module source text. Split out from the I/O so tests can feed
    /// code directly.
    fn parse_module_source(&self, path: &Path, code: String) -> Result<File> {
        let parsed_name = ParsedFileName::parse(path, Some(&self.package_path))?;
        let language = if parsed_name.language == DEFAULT_LANGUAGE_TOKEN {
            self.default_language.clone()
        } else {
            parsed_name.language.clone()
        };

        let mut file = File::new(path, Some(&self.package_path))?;

        GLOBALS.set(&Globals::new(), || {
            let source_map: Arc<SourceMap> = Arc::new(SourceMap::default());
            let source_file =
                source_map.new_source_file(FileName::Real(path.to_path_buf()).into(), code);

            let syntax = Syntax::Typescript(TsSyntax {
                tsx: false,
                ..Default::default()
            });

            let comments = SingleThreadedComments::default();
            let mut parser =
                SwcParser::new(syntax, StringInput::from(&*source_file), Some(&comments));

            let module = parser.parse_module().map_err(|e| Error::ModuleParse {
                path: path.to_path_buf(),
                message: format!("{e:?}"),
            })?;

            // Keep the leading comments past the borrow so the walk can
            // resolve doc comments into descriptions.
            let (leading, _trailing) = comments.borrow_all();
            let leading: HashMap<BytePos, Vec<Comment>> =
                leading.iter().map(|(k, v)| (*k, v.clone())).collect();

            let walk = ModuleWalk {
                source_map: &source_map,
                leading: &leading,
                language: &language,
                path,
            };

            let mut export_seen = false;
            for item in &module.body {
                match item {
                    ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                        // Import declarations are copied verbatim, not parsed.
                        if let Ok(text) = source_map.span_to_snippet(import.span) {
                            file.add_or_update_reference(text);
                        }
                    }
                    ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                        export_seen = true;
                        walk.extract_export(&export.expr, &mut file);
                    }
                    ModuleItem::ModuleDecl(ModuleDecl::TsExportAssignment(assign)) => {
                        export_seen = true;
                        walk.extract_export(&assign.expr, &mut file);
                    }
                    _ => {}
                }
            }

            if !export_seen {
                warn!(path = %path.display(), "module has no export assignment, nothing extracted");
            }

            Ok(file)
        })
    }
}

impl Parser for StructuredModuleParser {
    fn run(&self) -> Result<Package> {
        let mut package = Package::new(&self.package_path);
        for path in &self.file_paths {
            let file = self.parse_module_file(path)?;
            package.add_or_update_file(file);
        }
        Ok(package)
    }
}

/// Per-file context threaded through the literal-tree walk.
struct ModuleWalk<'a> {
    source_map: &'a SourceMap,
    leading: &'a HashMap<BytePos, Vec<Comment>>,
    language: &'a str,
    path: &'a Path,
}

impl ModuleWalk<'_> {
    fn extract_export(&self, expr: &Expr, file: &mut File) {
        match unwrap_ts_expr(expr) {
            Expr::Object(object) => self.walk_object(object, &[], file),
            other => {
                warn!(
                    path = %self.path.display(),
                    "exported value is not an object literal ({}), nothing extracted",
                    expr_kind(other)
                );
            }
        }
    }

    /// Depth-first walk over one object literal level.
    ///
    /// The identifier path is passed by value on descent (a fresh Vec per
    /// branch) so sibling branches can never observe each other's segments.
    fn walk_object(&self, object: &ObjectLit, path: &[String], file: &mut File) {
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                warn!(path = %self.path.display(), "spread in literal object, skipped");
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                warn!(path = %self.path.display(), "non key/value property, skipped");
                continue;
            };
            let Some(key) = prop_key_name(&kv.key) else {
                warn!(path = %self.path.display(), "unsupported property key, skipped");
                continue;
            };

            let value = unwrap_ts_expr(&kv.value);
            if let Expr::Object(nested) = value {
                let mut child_path = path.to_vec();
                child_path.push(key);
                self.walk_object(nested, &child_path, file);
                continue;
            }

            let Some(translation) = self.leaf_translation(value) else {
                warn!(
                    path = %self.path.display(),
                    key = %join_id(path, &key),
                    "unhandled value expression ({}), skipped",
                    expr_kind(value)
                );
                continue;
            };

            let id = join_id(path, &key);
            let mut message = Message::new(id);
            if let Some(description) = self.doc_comment(kv.key.span()) {
                message = message.with_description(description);
            }
            message.add_or_update_translation(translation);
            file.add_or_update_message(message);
        }
    }

    /// Classifies a leaf value expression into a [`Translation`], or `None`
    /// when the expression kind is unhandled.
    fn leaf_translation(&self, value: &Expr) -> Option<Translation> {
        match value {
            // Quoted text literal: the cooked value, outer quotes gone.
            Expr::Lit(Lit::Str(s)) => {
                let text = s.value.as_str()?;
                Some(self.positioned(Translation::new(self.language, text), s.span))
            }
            // Template with interpolation: the raw source minus the backticks.
            Expr::Tpl(tpl) => {
                let snippet = self.snippet(tpl.span)?;
                let text = snippet
                    .strip_prefix('`')
                    .and_then(|s| s.strip_suffix('`'))
                    .unwrap_or(&snippet);
                Some(self.positioned(Translation::new(self.language, text), tpl.span))
            }
            // String concatenation: kept as raw source text.
            Expr::Bin(bin) if bin.op == BinaryOp::Add => {
                let snippet = self.snippet(bin.span)?;
                Some(self.positioned(Translation::new(self.language, snippet), bin.span))
            }
            // Bare identifier or property access: a reference to another
            // constant, stored literal and never re-quoted.
            Expr::Ident(_) | Expr::Member(_) => {
                let snippet = self.snippet(value.span())?;
                Some(self.positioned(Translation::literal(self.language, snippet), value.span()))
            }
            _ => None,
        }
    }

    fn positioned(&self, translation: Translation, span: Span) -> Translation {
        let loc = self.source_map.lookup_char_pos(span.lo);
        translation.at(loc.line, loc.col_display + 1)
    }

    fn snippet(&self, span: Span) -> Option<String> {
        self.source_map.span_to_snippet(span).ok()
    }

    /// The documentation comment directly preceding a key, cleaned of its
    /// `*` decoration, if any.
    fn doc_comment(&self, key_span: Span) -> Option<String> {
        let comments = self.leading.get(&key_span.lo)?;
        let comment = comments.last()?;
        let cleaned = clean_comment_text(&comment.text);
        (!cleaned.is_empty()).then_some(cleaned)
    }
}

fn join_id(path: &[String], key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path.join("."), key)
    }
}

fn prop_key_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Array(_) => "array literal",
        Expr::Call(_) => "call expression",
        Expr::Cond(_) => "conditional expression",
        Expr::Fn(_) | Expr::Arrow(_) => "function expression",
        Expr::Lit(Lit::Num(_)) => "numeric literal",
        Expr::Lit(Lit::Bool(_)) => "boolean literal",
        Expr::Lit(Lit::Null(_)) => "null literal",
        _ => "expression",
    }
}

fn clean_comment_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
