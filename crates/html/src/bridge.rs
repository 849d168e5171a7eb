//! Markdown to element tree, resolved through the component context.
//!
//! mdast nodes are mapped to the tag names MDX uses (`p`, `h2`, `inlineCode`,
//! `pre` > `code`, `wrapper`, ...) and built with the element factory, so a
//! context entry for any of those tags replaces the default host element.

use crate::options::RenderOptions;
use markdown::mdast::{self, AlignKind};
use markdown::message::{Message, Place};
use mdxr_core::{ElementFactory, Node, Props, RenderError, RenderRequest, SourceLocation};
use std::collections::HashMap;

/// Parses `source` and builds its element tree.
pub fn markdown_to_node(
    source: &str,
    factory: &ElementFactory<'_>,
    options: &RenderOptions,
) -> Result<Node, RenderError> {
    let root = markdown::to_mdast(source, &options.to_markdown()).map_err(|err| {
        RenderError::Parse {
            message: err.reason.clone(),
            location: message_location(&err),
        }
    })?;

    let mut definitions = HashMap::new();
    collect_definitions(&root, &mut definitions);

    let builder = TreeBuilder {
        factory,
        definitions,
    };
    let children = match &root {
        mdast::Node::Root(root) => builder.children(&root.children, None, false),
        other => builder.node(other, None, false).into_iter().collect(),
    };

    if options.wrap_root {
        Ok(factory.render("wrapper", Props::new(), children).into())
    } else {
        Ok(Node::Fragment(children))
    }
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

/// Link reference definitions by normalized identifier. The first
/// definition of an identifier wins.
fn collect_definitions<'a>(
    node: &'a mdast::Node,
    out: &mut HashMap<String, &'a mdast::Definition>,
) {
    if let mdast::Node::Definition(definition) = node {
        out.entry(definition.identifier.to_lowercase()).or_insert(definition);
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, out);
        }
    }
}

struct TreeBuilder<'f, 'c, 'd> {
    factory: &'f ElementFactory<'c>,
    definitions: HashMap<String, &'d mdast::Definition>,
}

impl TreeBuilder<'_, '_, '_> {
    fn element(
        &self,
        tag: &str,
        parent: Option<&str>,
        props: Props,
        children: Vec<Node>,
    ) -> Node {
        let mut request = RenderRequest::new().props(props).children(children);
        if let Some(parent) = parent {
            request = request.parent(parent);
        }
        self.factory.render_request(tag, request).into()
    }

    /// Converts siblings; `tight` unwraps paragraphs as in tight list items.
    fn children(&self, nodes: &[mdast::Node], parent: Option<&str>, tight: bool) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            if tight && let mdast::Node::Paragraph(paragraph) = node {
                out.extend(self.children(&paragraph.children, parent, false));
                continue;
            }
            out.extend(self.node(node, parent, tight));
        }
        out
    }

    fn node(&self, node: &mdast::Node, parent: Option<&str>, tight: bool) -> Option<Node> {
        let built = match node {
            mdast::Node::Text(text) => Node::text(text.value.as_str()),
            mdast::Node::Paragraph(p) => self.container("p", parent, Props::new(), &p.children),
            mdast::Node::Heading(h) => {
                let tag = format!("h{}", h.depth.clamp(1, 6));
                self.container(&tag, parent, Props::new(), &h.children)
            }
            mdast::Node::Emphasis(e) => self.container("em", parent, Props::new(), &e.children),
            mdast::Node::Strong(s) => self.container("strong", parent, Props::new(), &s.children),
            mdast::Node::Delete(d) => self.container("del", parent, Props::new(), &d.children),
            mdast::Node::Blockquote(b) => {
                self.container("blockquote", parent, Props::new(), &b.children)
            }
            mdast::Node::Break(_) => self.element("br", parent, Props::new(), vec![]),
            mdast::Node::ThematicBreak(_) => self.element("hr", parent, Props::new(), vec![]),
            mdast::Node::InlineCode(code) => self.element(
                "inlineCode",
                parent,
                Props::new(),
                vec![Node::text(code.value.as_str())],
            ),
            mdast::Node::Code(code) => self.code_block(code, parent),
            mdast::Node::Link(link) => {
                let mut props = Props::new().with("href", link.url.as_str());
                if let Some(title) = &link.title {
                    props.insert("title", title.as_str());
                }
                self.container("a", parent, props, &link.children)
            }
            mdast::Node::Image(image) => {
                let mut props = Props::new()
                    .with("src", image.url.as_str())
                    .with("alt", image.alt.as_str());
                if let Some(title) = &image.title {
                    props.insert("title", title.as_str());
                }
                self.element("img", parent, props, vec![])
            }
            mdast::Node::LinkReference(reference) => {
                match self.definition(&reference.identifier) {
                    Some(definition) => self.container(
                        "a",
                        parent,
                        link_props("href", definition),
                        &reference.children,
                    ),
                    None => Node::Fragment(self.children(&reference.children, parent, false)),
                }
            }
            mdast::Node::ImageReference(reference) => {
                match self.definition(&reference.identifier) {
                    Some(definition) => {
                        let props =
                            link_props("src", definition).with("alt", reference.alt.as_str());
                        self.element("img", parent, props, vec![])
                    }
                    None => Node::text(reference.alt.as_str()),
                }
            }
            mdast::Node::List(list) => {
                let tag = if list.ordered { "ol" } else { "ul" };
                let mut props = Props::new();
                if list.ordered
                    && let Some(start) = list.start
                    && start != 1
                {
                    props.insert("start", start);
                }
                // one spread item makes the whole list loose
                let loose = list.spread
                    || list.children.iter().any(|child| match child {
                        mdast::Node::ListItem(item) => item.spread,
                        _ => false,
                    });
                let items = list
                    .children
                    .iter()
                    .filter_map(|item| self.node(item, Some(tag), !loose))
                    .collect();
                self.element(tag, parent, props, items)
            }
            mdast::Node::ListItem(item) => self.list_item(item, parent, tight),
            mdast::Node::Table(table) => self.table(table, parent),
            mdast::Node::Html(html) => {
                log::warn!("Raw HTML is rendered as text: {:?}", html.value);
                Node::text(html.value.as_str())
            }
            mdast::Node::Yaml(_) | mdast::Node::Toml(_) | mdast::Node::Definition(_) => {
                return None;
            }
            other => {
                log::warn!("Unhandled markdown node type: {:?}", other);
                return None;
            }
        };
        Some(built)
    }

    fn definition(&self, identifier: &str) -> Option<&mdast::Definition> {
        self.definitions.get(&identifier.to_lowercase()).copied()
    }

    fn container(
        &self,
        tag: &str,
        parent: Option<&str>,
        props: Props,
        children: &[mdast::Node],
    ) -> Node {
        let children = self.children(children, Some(tag), false);
        self.element(tag, parent, props, children)
    }

    fn code_block(&self, code: &mdast::Code, parent: Option<&str>) -> Node {
        let mut props = Props::new();
        if let Some(lang) = &code.lang {
            props.insert("className", format!("language-{}", lang));
        }
        if let Some(meta) = &code.meta {
            props.insert("data-meta", meta.as_str());
        }
        let inner = self.element(
            "code",
            Some("pre"),
            props,
            vec![Node::text(code.value.as_str())],
        );
        self.element("pre", parent, Props::new(), vec![inner])
    }

    fn list_item(&self, item: &mdast::ListItem, parent: Option<&str>, tight: bool) -> Node {
        let mut props = Props::new();
        let mut children = Vec::new();
        if let Some(checked) = item.checked {
            props.insert("className", "task-list-item");
            let checkbox = Props::new()
                .with("type", "checkbox")
                .with("disabled", true)
                .with("checked", checked);
            children.push(self.element("input", Some("li"), checkbox, vec![]));
            children.push(Node::text(" "));
        }
        children.extend(self.children(&item.children, Some("li"), tight));
        self.element("li", parent, props, children)
    }

    fn table(&self, table: &mdast::Table, parent: Option<&str>) -> Node {
        let mut rows = table.children.iter().filter_map(|row| match row {
            mdast::Node::TableRow(row) => Some(row),
            _ => None,
        });

        let mut sections = Vec::new();
        if let Some(head) = rows.next() {
            let row = self.table_row(head, "thead", "th", &table.align);
            sections.push(self.element("thead", Some("table"), Props::new(), vec![row]));
        }
        let body: Vec<Node> = rows
            .map(|row| self.table_row(row, "tbody", "td", &table.align))
            .collect();
        if !body.is_empty() {
            sections.push(self.element("tbody", Some("table"), Props::new(), body));
        }
        self.element("table", parent, Props::new(), sections)
    }

    fn table_row(
        &self,
        row: &mdast::TableRow,
        section: &str,
        cell_tag: &str,
        align: &[AlignKind],
    ) -> Node {
        let cells = row
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| match cell {
                mdast::Node::TableCell(cell) => {
                    let mut props = Props::new();
                    if let Some(value) = align.get(index).and_then(align_value) {
                        props.insert("align", value);
                    }
                    Some(self.container(cell_tag, Some("tr"), props, &cell.children))
                }
                _ => None,
            })
            .collect();
        self.element("tr", Some(section), Props::new(), cells)
    }
}

fn link_props(url_key: &str, definition: &mdast::Definition) -> Props {
    let mut props = Props::new().with(url_key, definition.url.as_str());
    if let Some(title) = &definition.title {
        props.insert("title", title.as_str());
    }
    props
}

fn align_value(align: &AlignKind) -> Option<&'static str> {
    match align {
        AlignKind::Left => Some("left"),
        AlignKind::Right => Some("right"),
        AlignKind::Center => Some("center"),
        AlignKind::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HtmlRenderer;
    use mdxr_core::{ComponentContext, Element, Renderer, component_fn};

    fn to_html(source: &str, ctx: &ComponentContext) -> String {
        let factory = ElementFactory::new(ctx);
        let node = markdown_to_node(source, &factory, &RenderOptions::default()).unwrap();
        HtmlRenderer::default().render(&node).unwrap()
    }

    #[test]
    fn test_paragraph() {
        let html = to_html("This is a paragraph.", &ComponentContext::new());
        assert_eq!(html, "<p>This is a paragraph.</p>");
    }

    #[test]
    fn test_inline_markup() {
        let html = to_html(
            "Use **solido** with `--config` and [docs](https://example.com \"Docs\").",
            &ComponentContext::new(),
        );
        assert_eq!(
            html,
            r#"<p>Use <strong>solido</strong> with <code>--config</code> and <a href="https://example.com" title="Docs">docs</a>.</p>"#
        );
    }

    #[test]
    fn test_code_block() {
        let html = to_html(
            "```bash title=\"deploy\"\nsolido deploy\n```",
            &ComponentContext::new(),
        );
        assert_eq!(
            html,
            r#"<pre><code class="language-bash" data-meta="title=&quot;deploy&quot;">solido deploy</code></pre>"#
        );
    }

    #[test]
    fn test_tight_and_task_lists() {
        let html = to_html("- one\n- [x] two\n", &ComponentContext::new());
        assert_eq!(
            html,
            r#"<ul><li>one</li><li class="task-list-item"><input checked disabled type="checkbox"> two</li></ul>"#
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let html = to_html("3. three\n4. four\n", &ComponentContext::new());
        assert_eq!(html, r#"<ol start="3"><li>three</li><li>four</li></ol>"#);
    }

    #[test]
    fn test_table_alignment() {
        let html = to_html(
            "| Name | Address |\n|:-----|--------:|\n| a | b |\n",
            &ComponentContext::new(),
        );
        assert_eq!(
            html,
            concat!(
                r#"<table><thead><tr><th align="left">Name</th><th align="right">Address</th></tr></thead>"#,
                r#"<tbody><tr><td align="left">a</td><td align="right">b</td></tr></tbody></table>"#
            )
        );
    }

    #[test]
    fn test_context_overrides_apply() {
        let quote_p = component_fn("QuoteLine", |_, children| {
            Node::Element(Element {
                renderer: Renderer::host("q"),
                props: Props::new(),
                children: children.to_vec(),
                origin: mdxr_core::Origin::Original,
            })
        });
        let ctx = ComponentContext::new()
            .with("blockquote.p", quote_p)
            .with("h1", Renderer::host("h2"));

        let html = to_html("# Title\n\n> quoted\n\nplain", &ctx);
        assert_eq!(
            html,
            "<h2>Title</h2><blockquote><q>quoted</q></blockquote><p>plain</p>"
        );
    }

    #[test]
    fn test_wrapper_component() {
        let layout = component_fn("Layout", |_, children| {
            Node::Element(Element {
                renderer: Renderer::host("article"),
                props: Props::new(),
                children: children.to_vec(),
                origin: mdxr_core::Origin::Original,
            })
        });
        let ctx = ComponentContext::new().with("wrapper", layout);
        assert_eq!(to_html("hi", &ctx), "<article><p>hi</p></article>");
    }

    #[test]
    fn test_frontmatter_and_html() {
        let html = to_html("---\ntitle: x\n---\n\n<b>raw</b>\n", &ComponentContext::new());
        assert_eq!(html, "<p>&lt;b&gt;raw&lt;/b&gt;</p>");
    }

    #[test]
    fn test_reference_links_and_images() {
        let html = to_html(
            "See [the docs][Docs] and ![logo][img].\n\n[docs]: https://example.com \"Docs\"\n[img]: /logo.png\n",
            &ComponentContext::new(),
        );
        assert_eq!(
            html,
            r#"<p>See <a href="https://example.com" title="Docs">the docs</a> and <img alt="logo" src="/logo.png">.</p>"#
        );
    }

    #[test]
    fn test_first_definition_wins() {
        let html = to_html(
            "[docs]\n\n[docs]: /first\n[docs]: /second\n",
            &ComponentContext::new(),
        );
        assert_eq!(html, r#"<p><a href="/first">docs</a></p>"#);
    }

    #[test]
    fn test_reference_without_definition_keeps_content() {
        let ctx = ComponentContext::new();
        let factory = ElementFactory::new(&ctx);
        let builder = TreeBuilder {
            factory: &factory,
            definitions: HashMap::new(),
        };

        let link = mdast::Node::LinkReference(mdast::LinkReference {
            children: vec![mdast::Node::Text(mdast::Text {
                value: "the docs".into(),
                position: None,
            })],
            position: None,
            reference_kind: mdast::ReferenceKind::Full,
            identifier: "missing".into(),
            label: Some("missing".into()),
        });
        let image = mdast::Node::ImageReference(mdast::ImageReference {
            alt: "logo".into(),
            position: None,
            reference_kind: mdast::ReferenceKind::Full,
            identifier: "missing".into(),
            label: Some("missing".into()),
        });

        let nodes: Vec<Node> = [link, image]
            .iter()
            .filter_map(|node| builder.node(node, Some("p"), false))
            .collect();
        let html = HtmlRenderer::default()
            .render(&Node::Fragment(nodes))
            .unwrap();
        assert_eq!(html, "the docslogo");
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        let html = to_html("- a\n\n  b\n- c\n", &ComponentContext::new());
        assert_eq!(html, "<ul><li><p>a</p><p>b</p></li><li><p>c</p></li></ul>");
    }

    #[test]
    fn test_inline_html_inside_paragraph() {
        let html = to_html("Press <kbd>Ctrl</kbd> now.", &ComponentContext::new());
        assert_eq!(html, "<p>Press &lt;kbd&gt;Ctrl&lt;/kbd&gt; now.</p>");
    }

    #[test]
    fn test_strikethrough() {
        let html = to_html("~~gone~~ kept", &ComponentContext::new());
        assert_eq!(html, "<p><del>gone</del> kept</p>");
    }

    #[test]
    fn test_without_wrapper() {
        let ctx = ComponentContext::new();
        let factory = ElementFactory::new(&ctx);
        let options = RenderOptions {
            wrap_root: false,
            ..Default::default()
        };
        let node = markdown_to_node("a\n\nb", &factory, &options).unwrap();
        match node {
            Node::Fragment(children) => assert_eq!(children.len(), 2),
            other => panic!("Expected fragment, got {:?}", other),
        }
    }
}
