//! Rendering options.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    64
}

/// Options shared by the markdown bridge and the HTML host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Whether to enable GitHub Flavored Markdown constructs (tables,
    /// strikethrough, task lists, autolinks).
    #[serde(default = "default_true")]
    pub gfm: bool,
    /// Whether to wrap documents in the `wrapper` tag so a context can
    /// supply a page layout.
    #[serde(default = "default_true")]
    pub wrap_root: bool,
    /// Maximum component nesting depth before rendering fails.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            wrap_root: true,
            max_depth: default_max_depth(),
        }
    }
}

impl RenderOptions {
    /// Converts to markdown-rs `ParseOptions`.
    pub fn to_markdown(&self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: true,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RenderOptions::default());
        assert!(options.gfm);
        assert_eq!(options.max_depth, 64);
    }

    #[test]
    fn test_camel_case_fields() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"wrapRoot": false, "maxDepth": 8}"#).unwrap();
        assert!(!options.wrap_root);
        assert_eq!(options.max_depth, 8);
    }

    #[test]
    fn test_gfm_constructs() {
        let on = RenderOptions::default().to_markdown();
        assert!(on.constructs.gfm_table);

        let off = RenderOptions {
            gfm: false,
            ..Default::default()
        }
        .to_markdown();
        assert!(!off.constructs.gfm_table);
        assert!(off.constructs.frontmatter);
    }
}
