//! Renderer references and the component trait.

use crate::element::Node;
use crate::props::Props;
use std::fmt;
use std::sync::Arc;

/// A user-supplied renderer for a tag.
///
/// Components receive the merged props and the element's children and return
/// the node that replaces the element. Implementations must be shareable
/// across threads so contexts can be used from batch workers.
pub trait Component: Send + Sync {
    /// Component name, used for diagnostics and metadata.
    fn name(&self) -> &str;

    /// Produces the replacement node for an element.
    fn render(&self, props: &Props, children: &[Node]) -> Node;
}

type RenderFn = dyn Fn(&Props, &[Node]) -> Node + Send + Sync;

/// Closure-backed component.
pub struct FnComponent {
    name: String,
    render: Box<RenderFn>,
}

impl FnComponent {
    /// Wraps a closure as a named component.
    pub fn new(
        name: impl Into<String>,
        render: impl Fn(&Props, &[Node]) -> Node + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            render: Box::new(render),
        }
    }
}

impl Component for FnComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &Props, children: &[Node]) -> Node {
        (self.render)(props, children)
    }
}

/// Shorthand for a closure-backed component renderer.
///
/// ```
/// use mdxr_core::{Node, component_fn};
///
/// let shout = component_fn("Shout", |_, children| Node::Fragment(children.to_vec()));
/// assert_eq!(shout.name(), "Shout");
/// ```
pub fn component_fn(
    name: impl Into<String>,
    render: impl Fn(&Props, &[Node]) -> Node + Send + Sync + 'static,
) -> Renderer {
    Renderer::Component(Arc::new(FnComponent::new(name, render)))
}

/// What an element renders through.
#[derive(Clone)]
pub enum Renderer {
    /// Host-native element, emitted as-is (pass-through).
    Host(String),
    /// Renders only its children.
    Fragment,
    /// User component.
    Component(Arc<dyn Component>),
}

impl Renderer {
    /// Host pass-through renderer for `tag`.
    pub fn host(tag: impl Into<String>) -> Self {
        Renderer::Host(tag.into())
    }

    /// Wraps a component instance.
    pub fn component(component: impl Component + 'static) -> Self {
        Renderer::Component(Arc::new(component))
    }

    /// Display name: the host tag, `Fragment`, or the component name.
    pub fn name(&self) -> &str {
        match self {
            Renderer::Host(tag) => tag,
            Renderer::Fragment => "Fragment",
            Renderer::Component(component) => component.name(),
        }
    }

    /// Returns the tag for host renderers.
    pub fn host_tag(&self) -> Option<&str> {
        match self {
            Renderer::Host(tag) => Some(tag),
            _ => None,
        }
    }

    /// Returns true for user components.
    pub fn is_component(&self) -> bool {
        matches!(self, Renderer::Component(_))
    }
}

impl PartialEq for Renderer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Renderer::Host(a), Renderer::Host(b)) => a == b,
            (Renderer::Fragment, Renderer::Fragment) => true,
            (Renderer::Component(a), Renderer::Component(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderer::Host(tag) => f.debug_tuple("Host").field(tag).finish(),
            Renderer::Fragment => f.write_str("Fragment"),
            Renderer::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}
