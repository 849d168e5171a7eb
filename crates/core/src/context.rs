//! Component context and the scoped context store.
//!
//! A [`ComponentContext`] maps tag names to renderers. Contexts are values:
//! extending one yields a new context and leaves the original untouched, so a
//! parent scope can hand its context to any number of children.

use crate::element::ElementFactory;
use crate::renderer::Renderer;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Mapping from tag name (or `parent.tag` scoped name) to renderer.
#[derive(Clone, Default, PartialEq)]
pub struct ComponentContext {
    entries: Arc<BTreeMap<String, Renderer>>,
}

impl ComponentContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Only used while assembling a context; a context
    /// that has been shared is copied before the insert.
    pub fn with(mut self, tag: impl Into<String>, renderer: Renderer) -> Self {
        Arc::make_mut(&mut self.entries).insert(tag.into(), renderer);
        self
    }

    /// Looks up the renderer registered for a tag.
    pub fn get(&self, tag: &str) -> Option<&Renderer> {
        self.entries.get(tag)
    }

    /// Returns true if the tag has an entry.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Renderer)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a new context with `overrides` applied key-wise.
    ///
    /// Entries in `overrides` win on collision. `self` is not modified.
    pub fn extend(&self, overrides: &ComponentContext) -> ComponentContext {
        if overrides.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return overrides.clone();
        }
        let mut entries = (*self.entries).clone();
        for (tag, renderer) in overrides.entries.iter() {
            entries.insert(tag.clone(), renderer.clone());
        }
        ComponentContext {
            entries: Arc::new(entries),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Renderer)> for ComponentContext {
    fn from_iter<I: IntoIterator<Item = (K, Renderer)>>(iter: I) -> Self {
        ComponentContext {
            entries: Arc::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.name())))
            .finish()
    }
}

type ComputeFn = dyn Fn(&ComponentContext) -> ComponentContext + Send + Sync;

/// How a nested scope derives its context from the enclosing one.
#[derive(Clone)]
pub enum Provider {
    /// Parent context extended with these overrides.
    Merge(ComponentContext),
    /// Function of the parent context.
    Compute(Arc<ComputeFn>),
    /// Parent context ignored entirely.
    Isolate(ComponentContext),
}

impl Provider {
    /// Wraps a closure as a computing provider.
    pub fn compute(
        f: impl Fn(&ComponentContext) -> ComponentContext + Send + Sync + 'static,
    ) -> Self {
        Provider::Compute(Arc::new(f))
    }

    /// Derives the scope's context from its parent.
    pub fn apply(&self, parent: &ComponentContext) -> ComponentContext {
        match self {
            Provider::Merge(overrides) => parent.extend(overrides),
            Provider::Compute(f) => f(parent),
            Provider::Isolate(context) => context.clone(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Merge(ctx) => f.debug_tuple("Merge").field(ctx).finish(),
            Provider::Compute(_) => f.write_str("Compute(..)"),
            Provider::Isolate(ctx) => f.debug_tuple("Isolate").field(ctx).finish(),
        }
    }
}

/// Active context for one rendering scope.
///
/// Built at the rendering root and passed by reference; nested scopes are
/// opened with [`ContextStore::provide`], which returns a new store.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    current: ComponentContext,
    depth: usize,
}

impl ContextStore {
    /// Creates a root store with the given default context.
    pub fn new(root: ComponentContext) -> Self {
        Self {
            current: root,
            depth: 0,
        }
    }

    /// Currently active context.
    pub fn get(&self) -> &ComponentContext {
        &self.current
    }

    /// Active context extended with `overrides`, leaving the store unchanged.
    pub fn extend(&self, overrides: &ComponentContext) -> ComponentContext {
        self.current.extend(overrides)
    }

    /// Opens a nested scope.
    pub fn provide(&self, provider: &Provider) -> ContextStore {
        ContextStore {
            current: provider.apply(&self.current),
            depth: self.depth + 1,
        }
    }

    /// Number of scopes between this store and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Element factory bound to the active context.
    pub fn factory(&self) -> ElementFactory<'_> {
        ElementFactory::new(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::component_fn;
    use crate::element::Node;

    fn named(name: &str) -> Renderer {
        component_fn(name, |_, children| Node::Fragment(children.to_vec()))
    }

    #[test]
    fn test_extend_does_not_mutate() {
        let code = named("Code");
        let pre = named("Pre");
        let base = ComponentContext::new()
            .with("code", code.clone())
            .with("pre", pre.clone());
        let snapshot = base.clone();

        let replacement = named("Highlight");
        let overrides = ComponentContext::new()
            .with("code", replacement.clone())
            .with("table", Renderer::host("table"));

        let extended = base.extend(&overrides);

        assert_eq!(base, snapshot);
        assert_eq!(base.get("code"), Some(&code));
        assert!(!base.contains("table"));

        // every override key with its value
        for (tag, renderer) in overrides.iter() {
            assert_eq!(extended.get(tag), Some(renderer));
        }
        // plus every base key not overridden
        assert_eq!(extended.get("pre"), Some(&pre));
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn test_extend_with_empty_sides() {
        let base = ComponentContext::new().with("a", named("A"));
        assert_eq!(base.extend(&ComponentContext::new()), base);
        assert_eq!(ComponentContext::new().extend(&base), base);
    }

    #[test]
    fn test_with_after_share_copies() {
        let base = ComponentContext::new().with("a", named("A"));
        let shared = base.clone();
        let grown = base.with("b", named("B"));
        assert_eq!(shared.len(), 1);
        assert_eq!(grown.len(), 2);
    }

    #[test]
    fn test_store_scopes() {
        let root = ContextStore::new(ComponentContext::new().with("code", named("Code")));
        let callout = named("Callout");

        let nested = root.provide(&Provider::Merge(
            ComponentContext::new().with("blockquote", callout.clone()),
        ));
        assert_eq!(nested.depth(), 1);
        assert!(nested.get().contains("code"));
        assert_eq!(nested.get().get("blockquote"), Some(&callout));
        assert!(!root.get().contains("blockquote"));

        let isolated = nested.provide(&Provider::Isolate(ComponentContext::new()));
        assert!(isolated.get().is_empty());
        assert_eq!(isolated.depth(), 2);
    }

    #[test]
    fn test_compute_provider_sees_parent() {
        let root = ContextStore::new(
            ComponentContext::new()
                .with("code", named("Code"))
                .with("pre", named("Pre")),
        );
        let only_code = Provider::compute(|parent| {
            parent
                .iter()
                .filter(|(tag, _)| *tag == "code")
                .map(|(tag, r)| (tag.to_string(), r.clone()))
                .collect()
        });

        let scoped = root.provide(&only_code);
        assert_eq!(scoped.get().tags().collect::<Vec<_>>(), vec!["code"]);
    }

    #[test]
    fn test_store_extend_leaves_store() {
        let root = ContextStore::new(ComponentContext::new());
        let extended = root.extend(&ComponentContext::new().with("a", Renderer::host("b")));
        assert_eq!(extended.len(), 1);
        assert!(root.get().is_empty());
    }

    #[test]
    fn test_debug_lists_renderer_names() {
        let ctx = ComponentContext::new().with("code", named("Code"));
        assert_eq!(format!("{:?}", ctx), r#"{"code": "Code"}"#);
    }
}
