//! Route Module Code Generation
//!
//! Serializes declarations and the route tree into the generated
//! `routes.tsx`. The writer is structured: `path`, `name` and `data` are
//! JSON-safe fields escaped through serde_json, while `element` is raw
//! markup written unquoted. There is no serialize-then-fixup pass.

use std::fs;
use std::path::Path;

use crate::routes::{Declaration, RouteNode};

/// Fixed output file name inside the pages root.
pub const OUTPUT_FILE: &str = "routes.tsx";

/// Everything above the declarations: generated-file banner, runtime
/// imports and the inline redirect helper used by the index route.
const PREAMBLE: &str = r#"/* eslint-disable */
/**
 * Generated by the auto-router plugin. Do not edit by hand.
 */
import React, { Suspense, useEffect } from "react";
import { RouteObject, useNavigate } from "react-router-dom";

function Redirect({ to }: { to: string }) {
  const navigate = useNavigate();
  useEffect(() => {
    navigate(to);
  });
  return null;
}

"#;

/// Render the complete generated module.
pub fn emit_routes_module(routes: &[RouteNode], declarations: &[Declaration]) -> String {
    let mut code = String::from(PREAMBLE);

    for decl in declarations {
        code.push_str("const ");
        code.push_str(&decl.key);
        code.push_str(" = ");
        code.push_str(&decl.value);
        code.push_str(";\n");
    }

    code.push_str("\nconst routes: RouteObject[] = ");
    write_route_array(&mut code, routes, 0);
    code.push_str(";\n\nexport default routes;\n");
    code
}

/// Overwrite the output file. No diffing; every build rewrites it.
pub fn write_routes_module(
    output: &Path,
    routes: &[RouteNode],
    declarations: &[Declaration],
) -> Result<(), String> {
    let code = emit_routes_module(routes, declarations);
    fs::write(output, code).map_err(|e| format!("failed to write {}: {}", output.display(), e))
}

fn write_route_array(out: &mut String, routes: &[RouteNode], depth: usize) {
    if routes.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    for route in routes {
        out.push_str(&indent(depth + 1));
        write_route_object(out, route, depth + 1);
        out.push_str(",\n");
    }
    out.push_str(&indent(depth));
    out.push(']');
}

fn write_route_object(out: &mut String, route: &RouteNode, depth: usize) {
    let pad = indent(depth + 1);

    out.push_str("{\n");
    out.push_str(&pad);
    out.push_str("path: ");
    out.push_str(&json_string(&route.path));
    out.push_str(",\n");

    if let Some(element) = &route.element {
        // Raw markup, deliberately unquoted.
        out.push_str(&pad);
        out.push_str("element: ");
        out.push_str(element);
        out.push_str(",\n");
    }
    if let Some(name) = &route.name {
        out.push_str(&pad);
        out.push_str("name: ");
        out.push_str(&json_string(name));
        out.push_str(",\n");
    }
    if let Some(data) = &route.data {
        out.push_str(&pad);
        out.push_str("data: ");
        out.push_str(&data.to_string());
        out.push_str(",\n");
    }
    if !route.children.is_empty() {
        out.push_str(&pad);
        out.push_str("children: ");
        write_route_array(out, &route.children, depth + 1);
        out.push_str(",\n");
    }

    out.push_str(&indent(depth));
    out.push('}');
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn json_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
