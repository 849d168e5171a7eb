//! Default registry configuration for documentation pages.
//!
//! Provides the component mappings used when no custom registry is given:
//! code blocks, inline code, tables, callouts and links get docs styling
//! while every other tag stays a plain host element.

use super::types::{ComponentDefinition, RegistryConfig};
use std::collections::BTreeMap;

/// Creates the default docs registry configuration.
///
/// # Example
///
/// ```
/// use mdxr_html::registry::default_docs_registry;
///
/// let registry = default_docs_registry();
/// assert_eq!(registry.get_component("pre").map(|c| c.name.as_str()), Some("CodeBlock"));
/// ```
pub fn default_docs_registry() -> RegistryConfig {
    RegistryConfig {
        components: vec![
            definition("pre", "CodeBlock", "pre", Some("code-block")),
            definition("inlineCode", "InlineCode", "code", Some("inline-code")),
            definition("table", "DataTable", "table", Some("data-table")),
            ComponentDefinition {
                inject_props: BTreeMap::from([("role".to_string(), "note".to_string())]),
                ..definition("blockquote", "Callout", "aside", Some("callout"))
            },
            definition("a", "Link", "a", Some("link")),
        ],
    }
}

fn definition(tag: &str, name: &str, render_as: &str, class: Option<&str>) -> ComponentDefinition {
    ComponentDefinition {
        tag: tag.to_string(),
        name: name.to_string(),
        render_as: render_as.to_string(),
        class: class.map(str::to_string),
        inject_props: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_valid() {
        let registry = default_docs_registry();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.components.len(), 5);
    }

    #[test]
    fn test_default_registry_mappings() {
        let registry = default_docs_registry();
        let callout = registry.get_component("blockquote").unwrap();
        assert_eq!(callout.name, "Callout");
        assert_eq!(callout.render_as, "aside");
        assert_eq!(callout.inject_props.get("role").map(String::as_str), Some("note"));

        let ctx = registry.to_context();
        assert!(ctx.contains("inlineCode"));
        assert!(!ctx.contains("p"));
    }
}
