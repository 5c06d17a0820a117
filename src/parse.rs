//! Page Module Parsing
//!
//! Parses one page or guard module with oxc and collects the two facts the
//! route builder needs: the default-exported identifier and the annotation
//! set attached to the first import declaration's leading comment.
//!
//! Annotation grammar (one comment line):
//!
//! ```text
//! // @index @name Home @data {"title":"Home"}
//! ```
//!
//! `@index` is a presence flag, `@name` takes a single token, `@data` takes a
//! single whitespace-delimited JSON token.

use lazy_static::lazy_static;
use oxc_allocator::Allocator;
use oxc_ast::ast::{ExportDefaultDeclaration, Expression, ImportDeclaration};
use oxc_ast::Comment;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    /// `@key` optionally followed by one value token. The value must not
    /// start with `@` so a flag key never swallows the next annotation.
    static ref ANNOTATION_RE: Regex = Regex::new(r"@(\w+)(?:[ \t]+([^@\s]\S*))?").unwrap();
}

/// Metadata recognized in an entry file's leading annotation comment.
/// Parsed fresh per file, per build; never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub index: bool,
    pub name: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// What one parsed page/guard module contributes to the build.
#[derive(Debug, Clone, Default)]
pub struct PageModule {
    /// Identifier bound by `export default`, when one is derivable.
    pub default_export: Option<String>,
    pub annotations: Annotations,
    /// Recoverable per-file problems (bad `@data` JSON). Already printed;
    /// surfaced here so callers can collect them.
    pub diagnostics: Vec<String>,
}

/// AST collector: records the default-export identifier and the position of
/// the first import declaration (annotation comments attach there).
#[derive(Default)]
struct ExportCollector {
    default_export: Option<String>,
    first_import_start: Option<u32>,
}

impl<'a> Visit<'a> for ExportCollector {
    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        if self.default_export.is_none() {
            self.default_export = default_export_name(decl);
        }
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        if self.first_import_start.is_none() {
            self.first_import_start = Some(decl.span.start);
        }
    }
}

/// `export default function Home() {}`, `export default class Admin {}` and
/// `export default Home` all yield an identifier. Anonymous declarations
/// yield `None`.
fn default_export_name(decl: &ExportDefaultDeclaration) -> Option<String> {
    match &decl.declaration {
        oxc_ast::ast::ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
            func.id.as_ref().map(|id| id.name.to_string())
        }
        oxc_ast::ast::ExportDefaultDeclarationKind::ClassDeclaration(class) => {
            class.id.as_ref().map(|id| id.name.to_string())
        }
        other => match other.as_expression() {
            Some(Expression::Identifier(ident)) => Some(ident.name.to_string()),
            _ => None,
        },
    }
}

/// Read and parse one module from disk.
pub fn parse_page_module(path: &Path) -> Result<PageModule, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("failed to read file: {}", e))?;
    parse_page_source(&source, &path.to_string_lossy())
}

/// Parse module source (TSX dialect) and collect export + annotation facts.
///
/// A file that does not parse is an isolated failure: the caller gets an
/// `Err` and decides what the enclosing scan does with it.
pub fn parse_page_source(source: &str, file: &str) -> Result<PageModule, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_typescript(true)
        .with_jsx(true)
        .with_module(true);

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(format!(
            "{} syntax error(s), first: {}",
            ret.errors.len(),
            ret.errors[0]
        ));
    }

    let mut collector = ExportCollector::default();
    collector.visit_program(&ret.program);

    let mut diagnostics = Vec::new();
    let annotations = match collector.first_import_start {
        Some(import_start) => {
            match leading_comment_text(source, &ret.program.comments, import_start) {
                Some(comment) => parse_annotations(&comment, file, &mut diagnostics),
                None => Annotations::default(),
            }
        }
        None => Annotations::default(),
    };

    Ok(PageModule {
        default_export: collector.default_export,
        annotations,
        diagnostics,
    })
}

/// The first comment wholly preceding the first import declaration is
/// treated as that import's leading annotation comment.
fn leading_comment_text(source: &str, comments: &[Comment], import_start: u32) -> Option<String> {
    comments
        .iter()
        .filter(|c| c.span.end <= import_start)
        .min_by_key(|c| c.span.start)
        .map(|c| {
            let raw = &source[c.span.start as usize..c.span.end as usize];
            raw.trim_start_matches("//")
                .trim_start_matches("/*")
                .trim_end_matches("*/")
                .to_string()
        })
}

fn parse_annotations(comment: &str, file: &str, diagnostics: &mut Vec<String>) -> Annotations {
    let mut annotations = Annotations::default();

    for cap in ANNOTATION_RE.captures_iter(comment) {
        let value = cap.get(2).map(|m| m.as_str());
        match (&cap[1], value) {
            ("index", _) => annotations.index = true,
            ("name", Some(token)) => annotations.name = Some(token.to_string()),
            ("data", Some(token)) => match serde_json::from_str(token) {
                Ok(parsed) => annotations.data = Some(parsed),
                Err(err) => {
                    let message = format!("invalid @data JSON in {}: {}", file, err);
                    eprintln!("[AutoRouter] {}", message);
                    diagnostics.push(message);
                }
            },
            _ => {}
        }
    }

    annotations
}
