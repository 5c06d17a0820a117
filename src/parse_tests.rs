#[cfg(test)]
mod tests {
    use crate::parse::parse_page_source;
    use serde_json::json;

    #[test]
    fn test_named_function_export() {
        let src = r#"
import React from "react";

export default function Home() {
  return <div>home</div>;
}
"#;
        let module = parse_page_source(src, "home/index.tsx").unwrap();
        assert_eq!(module.default_export.as_deref(), Some("Home"));
        assert!(!module.annotations.index);
        assert!(module.diagnostics.is_empty());
    }

    #[test]
    fn test_identifier_export() {
        let src = r#"
import React from "react";

const Login = () => <div>login</div>;

export default Login;
"#;
        let module = parse_page_source(src, "login/index.tsx").unwrap();
        assert_eq!(module.default_export.as_deref(), Some("Login"));
    }

    #[test]
    fn test_class_export() {
        let src = r#"
import React from "react";

export default class AdminPage extends React.Component {
  render() {
    return <div />;
  }
}
"#;
        let module = parse_page_source(src, "admin/index.tsx").unwrap();
        assert_eq!(module.default_export.as_deref(), Some("AdminPage"));
    }

    #[test]
    fn test_anonymous_export_has_no_name() {
        let src = r#"
import React from "react";

export default () => <div />;
"#;
        let module = parse_page_source(src, "anon/index.tsx").unwrap();
        assert_eq!(module.default_export, None);
    }

    #[test]
    fn test_full_annotation_comment() {
        let src = r#"
// @index @name Home @data {"title":"Home"}
import React from "react";

export default function Home() {
  return <div />;
}
"#;
        let module = parse_page_source(src, "home/index.tsx").unwrap();
        assert!(module.annotations.index);
        assert_eq!(module.annotations.name.as_deref(), Some("Home"));
        assert_eq!(module.annotations.data, Some(json!({"title": "Home"})));
        assert!(module.diagnostics.is_empty());
    }

    #[test]
    fn test_data_annotation_deep_value() {
        let src = r#"
// @data {"a":1}
import React from "react";

export default function Page() {
  return <div />;
}
"#;
        let module = parse_page_source(src, "page/index.tsx").unwrap();
        assert_eq!(module.annotations.data, Some(json!({"a": 1})));
    }

    #[test]
    fn test_bad_data_json_is_recoverable() {
        let src = r#"
// @name Broken @data {bad
import React from "react";

export default function Broken() {
  return <div />;
}
"#;
        let module = parse_page_source(src, "broken/index.tsx").unwrap();
        // The rest of the annotation set survives.
        assert_eq!(module.annotations.name.as_deref(), Some("Broken"));
        assert_eq!(module.annotations.data, None);
        assert_eq!(module.diagnostics.len(), 1);
        assert!(module.diagnostics[0].contains("broken/index.tsx"));
    }

    #[test]
    fn test_annotations_require_an_import() {
        let src = r#"
// @index @name Nowhere
export default function Nowhere() {
  return null;
}
"#;
        let module = parse_page_source(src, "nowhere/index.tsx").unwrap();
        assert!(!module.annotations.index);
        assert_eq!(module.annotations.name, None);
    }

    #[test]
    fn test_comment_after_import_is_not_leading() {
        let src = r#"
import React from "react";
// @index
export default function Late() {
  return <div />;
}
"#;
        let module = parse_page_source(src, "late/index.tsx").unwrap();
        assert!(!module.annotations.index);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let src = "import React from \"react\";\nexport default function {\n";
        let err = parse_page_source(src, "bad/index.tsx").unwrap_err();
        assert!(err.contains("syntax error"));
    }
}
