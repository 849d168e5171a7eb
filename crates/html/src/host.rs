//! Static HTML host for element trees.
//!
//! Host elements are serialized directly, fragments contribute only their
//! children, and components are asked for their replacement node, which is
//! rendered in turn.

use crate::options::RenderOptions;
use mdxr_core::{Element, Node, PropValue, RenderError, Renderer, is_reserved_prop};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns true for elements that never have children or a closing tag.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Returns true if `name` can be emitted as an HTML tag or attribute name.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

fn attribute_name(key: &str) -> &str {
    match key {
        "htmlFor" => "for",
        other => other,
    }
}

/// Serializes element trees to HTML.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    max_depth: usize,
}

impl HtmlRenderer {
    /// Creates a renderer using the options' depth limit.
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    /// Renders a node tree to an HTML string.
    pub fn render(&self, node: &Node) -> Result<String, RenderError> {
        let mut out = String::with_capacity(4096);
        self.write_node(node, 0, &mut out)?;
        Ok(out)
    }

    fn write_node(&self, node: &Node, depth: usize, out: &mut String) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Fragment(children) => self.write_children(children, depth, out)?,
            Node::Element(element) => self.write_element(element, depth, out)?,
        }
        Ok(())
    }

    fn write_children(
        &self,
        children: &[Node],
        depth: usize,
        out: &mut String,
    ) -> Result<(), RenderError> {
        for child in children {
            self.write_node(child, depth, out)?;
        }
        Ok(())
    }

    fn write_element(
        &self,
        element: &Element,
        depth: usize,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match &element.renderer {
            Renderer::Fragment => self.write_children(&element.children, depth, out),
            Renderer::Host(tag) => {
                if !is_valid_name(tag) {
                    return Err(RenderError::invalid_tag(tag.as_str()));
                }
                out.push('<');
                out.push_str(tag);
                write_attributes(element, out)?;
                out.push('>');

                if is_void_element(tag) {
                    return Ok(());
                }

                self.write_children(&element.children, depth, out)?;
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                Ok(())
            }
            Renderer::Component(component) => {
                if depth >= self.max_depth {
                    return Err(RenderError::DepthExceeded {
                        max_depth: self.max_depth,
                        component: component.name().to_string(),
                    });
                }
                let replacement = component.render(&element.props, &element.children);
                self.write_node(&replacement, depth + 1, out)
            }
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}

fn write_attributes(element: &Element, out: &mut String) -> Result<(), RenderError> {
    // elements built by hand may still carry `className`
    let normalized;
    let props = if element.props.contains_key("className") {
        let mut props = element.props.clone();
        props.normalize_class();
        normalized = props;
        &normalized
    } else {
        &element.props
    };

    for (key, value) in props.iter() {
        if is_reserved_prop(key) {
            continue;
        }
        let name = attribute_name(key);
        if !is_valid_name(name) {
            return Err(RenderError::invalid_attribute(key));
        }

        match value {
            PropValue::Text(text) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(text));
                out.push('"');
            }
            PropValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            PropValue::Bool(false) => {}
            PropValue::Number(number) => {
                out.push(' ');
                out.push_str(name);
                out.push_str(&format!("=\"{}\"", number));
            }
            PropValue::Expression(expr) => {
                log::debug!("Skipping expression prop {}={{{}}} in static output", key, expr);
            }
        }
    }
    Ok(())
}
