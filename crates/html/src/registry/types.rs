//! Registry type definitions for tag to component mappings.

use crate::host::is_valid_name;
use mdxr_core::{
    Component, ComponentContext, Node, Origin, Props, Renderer, is_reserved_prop,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Errors raised while loading or validating a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// JSON registry failed to parse.
    #[error("Registry JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML registry failed to parse.
    #[error("Registry YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A definition has an empty tag.
    #[error("Component {name:?} has an empty tag")]
    EmptyTag {
        /// Component name
        name: String,
    },
    /// A definition has an empty component name.
    #[error("Component for tag {tag:?} has an empty name")]
    EmptyName {
        /// Tag being mapped
        tag: String,
    },
    /// A tag is neither a valid name nor a `parent.tag` pair.
    #[error("Component {name:?} has invalid tag {tag:?}")]
    InvalidTag {
        /// Component name
        name: String,
        /// Offending tag
        tag: String,
    },
    /// Two definitions map the same tag.
    #[error("Tag {0:?} is mapped more than once")]
    DuplicateTag(String),
    /// `renderAs` is not a valid HTML tag name.
    #[error("Component {name:?} renders as invalid tag {render_as:?}")]
    InvalidRenderAs {
        /// Component name
        name: String,
        /// Offending host tag
        render_as: String,
    },
}

/// Configuration for the component registry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Component definitions.
    pub components: Vec<ComponentDefinition>,
}

/// A single component definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Context key, a tag (`pre`) or a scoped tag (`blockquote.p`).
    pub tag: String,
    /// Component name (e.g., "CodeBlock").
    pub name: String,
    /// Host tag the component renders as.
    pub render_as: String,
    /// CSS class prepended to any author-supplied class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Literal props placed under the call-site props.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inject_props: BTreeMap<String, String>,
}

impl RegistryConfig {
    /// Parses and validates a JSON registry.
    pub fn from_json(source: &str) -> Result<Self, RegistryError> {
        let config: RegistryConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML registry.
    pub fn from_yaml(source: &str) -> Result<Self, RegistryError> {
        let config: RegistryConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks for empty fields, malformed or duplicate tags and invalid
    /// host tags.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for def in &self.components {
            if def.tag.trim().is_empty() {
                return Err(RegistryError::EmptyTag {
                    name: def.name.clone(),
                });
            }
            if def.name.trim().is_empty() {
                return Err(RegistryError::EmptyName {
                    tag: def.tag.clone(),
                });
            }
            if !is_valid_tag(&def.tag) {
                return Err(RegistryError::InvalidTag {
                    name: def.name.clone(),
                    tag: def.tag.clone(),
                });
            }
            if !is_valid_name(&def.render_as) {
                return Err(RegistryError::InvalidRenderAs {
                    name: def.name.clone(),
                    render_as: def.render_as.clone(),
                });
            }
            if !seen.insert(def.tag.as_str()) {
                return Err(RegistryError::DuplicateTag(def.tag.clone()));
            }
        }
        Ok(())
    }

    /// Get the definition mapped to a tag.
    pub fn get_component(&self, tag: &str) -> Option<&ComponentDefinition> {
        self.components.iter().find(|c| c.tag == tag)
    }

    /// Builds the component context for this registry.
    pub fn to_context(&self) -> ComponentContext {
        self.components
            .iter()
            .map(|def| {
                (
                    def.tag.clone(),
                    Renderer::component(RegistryComponent::from(def)),
                )
            })
            .collect()
    }
}

/// Accepts `tag` or `parent.tag`, each part a valid name.
fn is_valid_tag(tag: &str) -> bool {
    let parts: Vec<&str> = tag.split('.').collect();
    parts.len() <= 2 && parts.iter().all(|part| is_valid_name(part))
}

/// Component built from a registry definition.
///
/// Renders a host element with the definition's class and injected props,
/// forwarding the author props and children.
#[derive(Debug, Clone)]
pub struct RegistryComponent {
    name: String,
    render_as: String,
    class: Option<String>,
    inject_props: Props,
}

impl From<&ComponentDefinition> for RegistryComponent {
    fn from(def: &ComponentDefinition) -> Self {
        Self {
            name: def.name.clone(),
            render_as: def.render_as.clone(),
            class: def.class.clone(),
            inject_props: def
                .inject_props
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl Component for RegistryComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &Props, children: &[Node]) -> Node {
        let mut merged = self.inject_props.clone();
        for (key, value) in props.iter() {
            if !is_reserved_prop(key) {
                merged.insert(key, value.clone());
            }
        }

        merged.normalize_class();
        if let Some(class) = &self.class {
            let combined = match merged.text("class") {
                Some(existing) if !existing.is_empty() => format!("{} {}", class, existing),
                _ => class.clone(),
            };
            merged.insert("class", combined);
        }

        Node::Element(mdxr_core::Element {
            renderer: Renderer::host(self.render_as.as_str()),
            props: merged,
            children: children.to_vec(),
            origin: Origin::Original,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HtmlRenderer;
    use mdxr_core::ElementFactory;

    const YAML: &str = r#"
components:
  - tag: pre
    name: CodeBlock
    renderAs: pre
    class: code-block
  - tag: blockquote.p
    name: QuoteLine
    renderAs: span
    injectProps:
      role: note
"#;

    #[test]
    fn test_from_yaml() {
        let config = RegistryConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.components.len(), 2);
        let quote = config.get_component("blockquote.p").unwrap();
        assert_eq!(quote.render_as, "span");
        assert_eq!(quote.inject_props.get("role").map(String::as_str), Some("note"));
    }

    #[test]
    fn test_from_json() {
        let config = RegistryConfig::from_json(
            r#"{"components":[{"tag":"a","name":"Link","renderAs":"a","class":"link"}]}"#,
        )
        .unwrap();
        assert_eq!(config.get_component("a").unwrap().name, "Link");
        assert!(config.get_component("pre").is_none());
    }

    #[test]
    fn test_validation_errors() {
        let dup = r#"{"components":[
            {"tag":"a","name":"Link","renderAs":"a"},
            {"tag":"a","name":"Other","renderAs":"a"}]}"#;
        assert!(matches!(
            RegistryConfig::from_json(dup),
            Err(RegistryError::DuplicateTag(tag)) if tag == "a"
        ));

        let empty_tag = r#"{"components":[{"tag":" ","name":"Link","renderAs":"a"}]}"#;
        assert!(matches!(
            RegistryConfig::from_json(empty_tag),
            Err(RegistryError::EmptyTag { .. })
        ));

        let empty_name = r#"{"components":[{"tag":"a","name":"","renderAs":"a"}]}"#;
        assert!(matches!(
            RegistryConfig::from_json(empty_name),
            Err(RegistryError::EmptyName { .. })
        ));

        let bad_host = r#"{"components":[{"tag":"a","name":"Link","renderAs":"<a>"}]}"#;
        assert!(matches!(
            RegistryConfig::from_json(bad_host),
            Err(RegistryError::InvalidRenderAs { .. })
        ));

        for tag in ["a b", "blockquote.", ".p", "ol.li.p", "<a>"] {
            let config = RegistryConfig {
                components: vec![ComponentDefinition {
                    tag: tag.to_string(),
                    name: "Link".into(),
                    render_as: "a".into(),
                    class: None,
                    inject_props: BTreeMap::new(),
                }],
            };
            assert!(
                matches!(config.validate(), Err(RegistryError::InvalidTag { .. })),
                "{tag:?} should be rejected"
            );
        }

        assert!(matches!(
            RegistryConfig::from_json("{"),
            Err(RegistryError::Json(_))
        ));
    }

    #[test]
    fn test_component_renders_host_with_class() {
        let config = RegistryConfig::from_yaml(YAML).unwrap();
        let ctx = config.to_context();
        let factory = ElementFactory::new(&ctx);

        let pre = factory.render(
            "pre",
            Props::new().with("className", "shell"),
            vec![Node::text("solido --help")],
        );
        let html = HtmlRenderer::default().render(&pre.into()).unwrap();
        assert_eq!(html, r#"<pre class="code-block shell">solido --help</pre>"#);
    }

    #[test]
    fn test_scoped_and_camel_case_tags_are_valid() {
        assert!(is_valid_tag("blockquote.p"));
        assert!(is_valid_tag("inlineCode"));
        assert!(RegistryConfig::from_yaml(YAML).is_ok());
    }

    #[test]
    fn test_author_class_spellings_are_kept() {
        let config = RegistryConfig::from_yaml(YAML).unwrap();
        let ctx = config.to_context();
        let factory = ElementFactory::new(&ctx);

        let pre = factory.render(
            "pre",
            Props::new().with("class", "wide").with("className", "shell"),
            vec![Node::text("x")],
        );
        let html = HtmlRenderer::default().render(&pre.into()).unwrap();
        assert_eq!(html, r#"<pre class="code-block wide shell">x</pre>"#);

        // components handed raw props still fold both spellings
        let component = RegistryComponent::from(config.get_component("pre").unwrap());
        let raw = Props::new().with("class", "wide").with("className", "shell");
        let node = component.render(&raw, &[]);
        let html = HtmlRenderer::default().render(&node).unwrap();
        assert_eq!(html, r#"<pre class="code-block wide shell"></pre>"#);
    }

    #[test]
    fn test_author_props_override_injected() {
        let config = RegistryConfig::from_yaml(YAML).unwrap();
        let ctx = config.to_context();
        let factory = ElementFactory::new(&ctx);

        let line = factory.render_request(
            "p",
            mdxr_core::RenderRequest::new()
                .parent("blockquote")
                .props(Props::new().with("role", "doc-tip"))
                .child("x"),
        );
        let html = HtmlRenderer::default().render(&line.into()).unwrap();
        assert_eq!(html, r#"<span role="doc-tip">x</span>"#);
    }
}
