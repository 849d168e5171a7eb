//! Element descriptions and the element factory.

use crate::context::ComponentContext;
use crate::props::{PropValue, Props};
use crate::renderer::Renderer;
use crate::resolver::{fallback, resolve_in};

/// Prop carrying the tag an element was requested as.
pub const MDX_TYPE_PROP: &str = "mdxType";
/// Prop carrying the host tag the resolved renderer stands in for.
pub const ORIGINAL_TYPE_PROP: &str = "originalType";

/// Returns true for props injected by the factory rather than the author.
pub fn is_reserved_prop(key: &str) -> bool {
    key == MDX_TYPE_PROP || key == ORIGINAL_TYPE_PROP
}

/// Whether an element was built from a tag name or a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Created directly from a renderer.
    Original,
    /// Created from a tag name and resolved through a context.
    Synthesized,
}

/// Description of one element, ready for a host pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Renderer chosen for the element.
    pub renderer: Renderer,
    /// Merged props, including injected metadata for synthesized elements.
    pub props: Props,
    /// Children in call order.
    pub children: Vec<Node>,
    /// How the element was created.
    pub origin: Origin,
}

impl Element {
    /// Tag the element was requested as, for synthesized elements.
    pub fn mdx_type(&self) -> Option<&str> {
        self.props.text(MDX_TYPE_PROP)
    }

    /// Appends a child.
    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Props with the injected metadata removed.
    pub fn author_props(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props.iter().filter(|(key, _)| !is_reserved_prop(key))
    }
}

/// A node in an element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element.
    Element(Element),
    /// Text content.
    Text(String),
    /// A list of sibling nodes with no wrapper.
    Fragment(Vec<Node>),
}

impl Node {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);
        buffer
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            Node::Text(text) => buffer.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(buffer);
                }
            }
            Node::Fragment(children) => {
                for child in children {
                    child.collect_text(buffer);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Full set of inputs for one factory call.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Tag of the enclosing element, for scoped lookups.
    pub parent: Option<String>,
    /// Props handed down by the enclosing element.
    pub parent_props: Props,
    /// Props given at the call site.
    pub props: Props,
    /// Renderer that bypasses the context.
    pub explicit: Option<Renderer>,
    /// Children in call order.
    pub children: Vec<Node>,
}

impl RenderRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enclosing element's tag.
    pub fn parent(mut self, tag: impl Into<String>) -> Self {
        self.parent = Some(tag.into());
        self
    }

    /// Sets the props handed down by the enclosing element.
    pub fn parent_props(mut self, props: Props) -> Self {
        self.parent_props = props;
        self
    }

    /// Sets the call-site props.
    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Sets an explicit renderer.
    pub fn explicit(mut self, renderer: Renderer) -> Self {
        self.explicit = Some(renderer);
        self
    }

    /// Appends children in order.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends one child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Builds element descriptions against a borrowed context.
#[derive(Debug, Clone, Copy)]
pub struct ElementFactory<'a> {
    context: &'a ComponentContext,
}

impl<'a> ElementFactory<'a> {
    /// Creates a factory bound to `context`.
    pub fn new(context: &'a ComponentContext) -> Self {
        Self { context }
    }

    /// The bound context.
    pub fn context(&self) -> &'a ComponentContext {
        self.context
    }

    /// Builds an element for `tag`, resolving its renderer through the context.
    pub fn render(&self, tag: &str, props: Props, children: Vec<Node>) -> Element {
        self.render_request(
            tag,
            RenderRequest {
                props,
                children,
                ..RenderRequest::default()
            },
        )
    }

    /// Builds an element for `tag` from a full request.
    ///
    /// Props are merged in order parent props, call-site props, metadata;
    /// later sources win. `className` is then folded into `class`.
    pub fn render_request(&self, tag: &str, request: RenderRequest) -> Element {
        let RenderRequest {
            parent,
            parent_props,
            props,
            explicit,
            children,
        } = request;

        let resolution = resolve_in(tag, parent.as_deref(), self.context, explicit.as_ref());

        let mut merged = Props::merge(&parent_props, &props);
        merged.normalize_class();
        merged.insert(MDX_TYPE_PROP, tag);
        merged.insert(ORIGINAL_TYPE_PROP, fallback(tag).name());

        Element {
            renderer: resolution.renderer,
            props: merged,
            children,
            origin: Origin::Synthesized,
        }
    }

    /// Builds an element directly from a renderer, skipping resolution.
    pub fn create(&self, renderer: Renderer, mut props: Props, children: Vec<Node>) -> Element {
        props.normalize_class();
        Element {
            renderer,
            props,
            children,
            origin: Origin::Original,
        }
    }
}
