//! Route Tree Construction
//!
//! Drives discovery over the pages tree and assembles the route table for
//! one build: path computation, not-found rewriting, guard wrapping, lazy
//! import declarations and the synthetic index redirect. The builder owns
//! the in-progress tree, the declaration list and the index-page marker;
//! nothing survives a build except the generated file.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::discovery::{self, DirectoryListing, ENTRY_FILE, GUARD_FILE};
use crate::parse::{parse_page_module, PageModule};
use crate::RouterOptions;

/// Final path segment that becomes a catch-all route.
const NOT_FOUND_SEGMENT: &str = "404";

/// One routable path segment of the generated table.
///
/// `element` is an opaque raw-markup expression; it is emitted unquoted.
/// A node may carry both an element and children (layout route).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub path: String,
    pub element: Option<String>,
    pub children: Vec<RouteNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RouteNode {
    fn new(path: String) -> Self {
        RouteNode {
            path,
            element: None,
            children: Vec::new(),
            name: None,
            data: None,
        }
    }
}

/// A lazy-import binding emitted above the route table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub key: String,
    pub value: String,
}

/// Everything one build produces, ready for the emitter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterBuild {
    pub routes: Vec<RouteNode>,
    pub declarations: Vec<Declaration>,
    pub diagnostics: Vec<String>,
}

/// Scan the pages directory and build the complete route table.
pub fn build_routes(options: &RouterOptions) -> RouterBuild {
    let pages_dir = PathBuf::from(&options.pages_dir);
    let mut builder = RouteBuilder::new(&pages_dir);

    let mut routes = if pages_dir.is_dir() {
        builder.visit_directory(&pages_dir)
    } else {
        builder.report(format!(
            "pages directory {} does not exist, emitting an empty route table",
            pages_dir.display()
        ));
        Vec::new()
    };

    // The redirect is always the last top-level sibling.
    if let Some(target) = builder.index_page.take() {
        let mut redirect = RouteNode::new("/".to_string());
        redirect.element = Some(format!("<Redirect to='{}' />", target));
        routes.push(redirect);
    }

    RouterBuild {
        routes,
        declarations: builder.declarations,
        diagnostics: builder.diagnostics,
    }
}

/// What processing a route directory's entry file produced.
enum EntryOutcome {
    Page(RouteNode),
    /// No derivable default-export identifier: the route is skipped but the
    /// subtree is still scanned (children hoist to the parent).
    NoExport,
    /// The entry file did not parse: the whole directory unit contributes
    /// nothing.
    ParseFailed,
}

struct RouteBuilder<'a> {
    pages_dir: &'a Path,
    declarations: Vec<Declaration>,
    index_page: Option<String>,
    diagnostics: Vec<String>,
}

impl<'a> RouteBuilder<'a> {
    fn new(pages_dir: &'a Path) -> Self {
        RouteBuilder {
            pages_dir,
            declarations: Vec::new(),
            index_page: None,
            diagnostics: Vec::new(),
        }
    }

    /// Depth-first, sequential. Matched child routes nest under this
    /// directory's route when it has one, otherwise they hoist to the
    /// caller's list.
    fn visit_directory(&mut self, dir: &Path) -> Vec<RouteNode> {
        let listing = discovery::scan_directory(dir);

        if listing.has_entry {
            match self.build_route(&listing) {
                EntryOutcome::Page(mut route) => {
                    for sub in &listing.subdirectories {
                        let children = self.visit_directory(sub);
                        route.children.extend(children);
                    }
                    return vec![route];
                }
                EntryOutcome::ParseFailed => return Vec::new(),
                EntryOutcome::NoExport => {}
            }
        }

        let mut hoisted = Vec::new();
        for sub in &listing.subdirectories {
            hoisted.extend(self.visit_directory(sub));
        }
        hoisted
    }

    fn build_route(&mut self, listing: &DirectoryListing) -> EntryOutcome {
        let entry_path = listing.path.join(ENTRY_FILE);
        let module = match parse_page_module(&entry_path) {
            Ok(module) => module,
            Err(err) => {
                self.report(format!("failed to parse {}: {}", entry_path.display(), err));
                return EntryOutcome::ParseFailed;
            }
        };
        self.diagnostics.extend(module.diagnostics.iter().cloned());

        let component = match &module.default_export {
            Some(name) => name.clone(),
            None => {
                self.report(format!(
                    "{} has no identifiable default export, skipping its route",
                    entry_path.display()
                ));
                return EntryOutcome::NoExport;
            }
        };

        let segments = self.relative_segments(&listing.path);
        let mut route = RouteNode::new(route_path(&segments));
        let page_import = import_specifier(&segments);

        self.apply_annotations(&mut route, &module);
        self.push_declaration(
            &component,
            format!("React.lazy(() => import(\"{}\"))", page_import),
        );

        let guard = if listing.has_guard {
            self.guard_component(&listing.path, &page_import)
        } else {
            None
        };
        route.element = Some(match guard {
            Some(guard) => format!(
                "<Suspense><{guard}><{page} /></{guard}></Suspense>",
                guard = guard,
                page = component
            ),
            None => format!("<Suspense><{} /></Suspense>", component),
        });

        EntryOutcome::Page(route)
    }

    /// Parse the guard file and register its lazy import. A guard that
    /// fails to parse or exports nothing nameable degrades to the unguarded
    /// wrapping.
    fn guard_component(&mut self, dir: &Path, page_import: &str) -> Option<String> {
        let guard_path = dir.join(GUARD_FILE);
        let module = match parse_page_module(&guard_path) {
            Ok(module) => module,
            Err(err) => {
                self.report(format!("failed to parse {}: {}", guard_path.display(), err));
                return None;
            }
        };

        match module.default_export {
            Some(guard) => {
                let guard_import = format!("{}/guard", page_import.trim_end_matches('/'));
                self.push_declaration(
                    &guard,
                    format!("React.lazy(() => import(\"{}\"))", guard_import),
                );
                Some(guard)
            }
            None => {
                self.report(format!(
                    "{} has no identifiable default export, leaving the route unguarded",
                    guard_path.display()
                ));
                None
            }
        }
    }

    fn apply_annotations(&mut self, route: &mut RouteNode, module: &PageModule) {
        route.name = module.annotations.name.clone();
        route.data = module.annotations.data.clone();
        // First @index marker discovered wins; later ones are ignored.
        if module.annotations.index && self.index_page.is_none() {
            self.index_page = Some(route.path.clone());
        }
    }

    /// Discovery order is preserved. An exact duplicate is dropped; the
    /// same key bound to a different module keeps the first binding so the
    /// generated file still compiles.
    fn push_declaration(&mut self, key: &str, value: String) {
        if let Some(existing) = self.declarations.iter().find(|d| d.key == key) {
            if existing.value != value {
                self.report(format!(
                    "component name `{}` is exported by more than one module ({} kept, {} ignored)",
                    key, existing.value, value
                ));
            }
            return;
        }
        self.declarations.push(Declaration {
            key: key.to_string(),
            value,
        });
    }

    /// Path segments of `dir` relative to the pages root; empty at the root.
    fn relative_segments(&self, dir: &Path) -> Vec<String> {
        let relative = dir.strip_prefix(self.pages_dir).unwrap_or(dir);
        relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .map(|s| s.to_string())
            .collect()
    }

    fn report(&mut self, message: String) {
        eprintln!("[AutoRouter] {}", message);
        self.diagnostics.push(message);
    }
}

/// `/`-joined absolute route path, with a trailing `404` segment rewritten
/// to the catch-all after path computation.
fn route_path(segments: &[String]) -> String {
    match segments.last().map(String::as_str) {
        Some(NOT_FOUND_SEGMENT) if segments.len() == 1 => "*".to_string(),
        Some(NOT_FOUND_SEGMENT) => {
            format!("/{}/*", segments[..segments.len() - 1].join("/"))
        }
        _ => format!("/{}", segments.join("/")),
    }
}

/// Relative module specifier for the directory's entry module. The import
/// resolves to the directory's `index` module, not a literal file name.
fn import_specifier(segments: &[String]) -> String {
    if segments.is_empty() {
        "./".to_string()
    } else {
        format!("./{}", segments.join("/"))
    }
}
