//! Tag to renderer resolution.
//!
//! Lookup order, highest priority first:
//!
//! 1. an explicit override supplied at the call site
//! 2. a parent-scoped context entry (`blockquote.p`), when a parent is known
//! 3. the context entry for the tag
//! 4. the built-in fallback table (`inlineCode` renders as `code`)
//! 5. the tag itself as a host element
//!
//! Resolution never fails; a tag nobody mapped is a host element.

use crate::context::ComponentContext;
use crate::renderer::Renderer;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUILTIN_FALLBACKS: Lazy<HashMap<&'static str, Renderer>> = Lazy::new(|| {
    HashMap::from([
        ("inlineCode", Renderer::host("code")),
        ("wrapper", Renderer::Fragment),
    ])
});

/// Which rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    /// Explicit override from the call site.
    Override,
    /// `parent.tag` context entry.
    Scoped,
    /// Plain context entry.
    Context,
    /// Built-in fallback table.
    Builtin,
    /// Tag emitted as a host element.
    PassThrough,
}

/// Resolved renderer plus the rule that picked it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The renderer to use.
    pub renderer: Renderer,
    /// The rule that picked it.
    pub from: ResolvedFrom,
}

/// Context key for a tag nested directly inside `parent`.
pub fn scoped_key(parent: &str, tag: &str) -> String {
    format!("{}.{}", parent, tag)
}

/// Renderer used when neither an override nor the context covers `tag`.
pub fn fallback(tag: &str) -> Renderer {
    BUILTIN_FALLBACKS
        .get(tag)
        .cloned()
        .unwrap_or_else(|| Renderer::host(tag))
}

/// Picks the renderer for `tag`.
///
/// ```
/// use mdxr_core::{ComponentContext, Renderer, resolve};
///
/// let ctx = ComponentContext::new().with("code", Renderer::host("samp"));
/// assert_eq!(resolve("code", &ctx, None), Renderer::host("samp"));
/// assert_eq!(resolve("em", &ctx, None), Renderer::host("em"));
/// ```
pub fn resolve(tag: &str, context: &ComponentContext, explicit: Option<&Renderer>) -> Renderer {
    resolve_in(tag, None, context, explicit).renderer
}

/// Picks the renderer for `tag` nested inside `parent`, reporting which rule applied.
pub fn resolve_in(
    tag: &str,
    parent: Option<&str>,
    context: &ComponentContext,
    explicit: Option<&Renderer>,
) -> Resolution {
    if let Some(renderer) = explicit {
        return Resolution {
            renderer: renderer.clone(),
            from: ResolvedFrom::Override,
        };
    }

    if let Some(parent) = parent
        && let Some(renderer) = context.get(&scoped_key(parent, tag))
    {
        return Resolution {
            renderer: renderer.clone(),
            from: ResolvedFrom::Scoped,
        };
    }

    if let Some(renderer) = context.get(tag) {
        return Resolution {
            renderer: renderer.clone(),
            from: ResolvedFrom::Context,
        };
    }

    let from = if BUILTIN_FALLBACKS.contains_key(tag) {
        ResolvedFrom::Builtin
    } else {
        ResolvedFrom::PassThrough
    };
    log::debug!("No component for <{}>, using {:?} fallback", tag, from);
    Resolution {
        renderer: fallback(tag),
        from,
    }
}
