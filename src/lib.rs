//! # Auto-Router Native Core
//!
//! File-tree-to-route-table compiler for a React pages convention:
//!
//! ```text
//! <pages-root>/
//!   <segment>/
//!     index.tsx      # required - default-exports the page component
//!     guard.tsx      # optional - default-exports a wrapper component
//!     components/    # excluded from route scanning entirely
//!     <nested>/...
//! ```
//!
//! One build is a single sequential pass: discovery lists directories in
//! filesystem order, each entry file is parsed with oxc for its default
//! export and annotation comment, the route tree is assembled with its
//! rewrite rules (index redirect, `404` catch-all, guard wrapping), and the
//! emitter overwrites `routes.tsx` inside the pages root.
//!
//! Failures are isolated per file: a page that does not parse or exports
//! nothing nameable is reported and skipped, and the build still emits the
//! surviving routes. No error escapes a single directory unit.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod codegen;
mod discovery;
mod parse;
mod routes;

#[cfg(test)]
mod parse_tests;

pub use codegen::{emit_routes_module, write_routes_module, OUTPUT_FILE};
pub use discovery::{scan_directory, DirectoryListing, ENTRY_FILE, GUARD_FILE};
pub use parse::{parse_page_module, parse_page_source, Annotations, PageModule};
pub use routes::{build_routes, Declaration, RouteNode, RouterBuild};

/// Build-hook configuration. The pages root and output path flow in
/// explicitly; there is no ambient working-directory state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct RouterOptions {
    /// Root of the pages convention tree.
    pub pages_dir: String,
    /// Where to write the generated module; defaults to
    /// `<pages_dir>/routes.tsx`.
    pub output_file: Option<String>,
    /// When false the build-start hook is a no-op.
    pub auto: bool,
}

impl RouterOptions {
    pub fn output_path(&self) -> PathBuf {
        match &self.output_file {
            Some(file) => PathBuf::from(file),
            None => Path::new(&self.pages_dir).join(OUTPUT_FILE),
        }
    }
}

/// The build-start hook exposed to the bundler plugin.
///
/// Returns `Ok(None)` without touching the filesystem when `auto` is off;
/// otherwise runs one full build, overwrites the output file and returns
/// the build result. Only output-file I/O is a hard error - scan failures
/// surface as diagnostics on the returned build.
pub fn run_build_start(options: &RouterOptions) -> Result<Option<RouterBuild>, String> {
    if !options.auto {
        return Ok(None);
    }

    let build = build_routes(options);
    write_routes_module(&options.output_path(), &build.routes, &build.declarations)?;
    Ok(Some(build))
}

#[cfg(feature = "napi")]
#[napi]
pub fn router_bridge() -> String {
    "AutoRouter Native Bridge Connected".to_string()
}

/// Node-side entry point: runs the hook and hands the route manifest back
/// to the plugin as JSON.
#[cfg(feature = "napi")]
#[napi]
pub fn build_start_native(options: RouterOptions) -> serde_json::Value {
    match run_build_start(&options) {
        Ok(Some(build)) => serde_json::to_value(&build).unwrap_or(serde_json::Value::Null),
        Ok(None) => serde_json::Value::Null,
        Err(err) => {
            eprintln!("[AutoRouter] {}", err);
            serde_json::Value::Null
        }
    }
}
