//! Page rendering entry points and parallel batch rendering.

use crate::bridge::markdown_to_node;
use crate::deployments::{Deployments, deployments_node};
use crate::host::HtmlRenderer;
use crate::options::RenderOptions;
use mdxr_core::{ContextStore, Node, Props, RenderError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Renders a markdown document to HTML through the store's context.
pub fn render_page(
    source: &str,
    store: &ContextStore,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let factory = store.factory();
    let node = markdown_to_node(source, &factory, options)?;
    HtmlRenderer::new(options).render(&node)
}

/// Renders the deployments page to HTML through the store's context.
pub fn render_deployments_page(
    deployments: &Deployments,
    store: &ContextStore,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let factory = store.factory();
    let body = deployments_node(deployments, &factory);
    let node: Node = if options.wrap_root {
        factory.render("wrapper", Props::new(), vec![body]).into()
    } else {
        body
    };
    HtmlRenderer::new(options).render(&node)
}

/// Input for batch processing - a single document to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown source content.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Document identifier matching the input.
    pub id: String,
    /// Rendered HTML (present on success).
    pub html: Option<String>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Total number of documents processed.
    pub total: usize,
    /// Number of successfully rendered documents.
    pub succeeded: usize,
    /// Number of failed documents.
    pub failed: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    #[serde(default)]
    pub max_threads: Option<usize>,
    /// Render options applied to every document.
    #[serde(default)]
    pub render: RenderOptions,
}

/// Result of batch processing containing all results and statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProcessingResult {
    /// Individual results, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders many documents in parallel against one context.
///
/// A failing document does not stop the batch; its error is reported in
/// its result, with parse errors located by the input id.
pub fn render_batch(
    inputs: &[BatchInput],
    store: &ContextStore,
    options: &BatchOptions,
) -> BatchProcessingResult {
    let start = Instant::now();

    let run = || -> Vec<BatchResult> {
        inputs
            .par_iter()
            .map(|input| match render_page(&input.source, store, &options.render)
                .map_err(|err| err.in_file(input.id.as_str()))
            {
                Ok(html) => BatchResult {
                    id: input.id.clone(),
                    html: Some(html),
                    error: None,
                },
                Err(err) => BatchResult {
                    id: input.id.clone(),
                    html: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    };

    let results = match options.max_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(err) => {
                log::warn!("Falling back to global thread pool: {}", err);
                run()
            }
        },
        None => run(),
    };

    let succeeded = results.iter().filter(|r| r.error.is_none()).count();
    let stats = BatchStats {
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    BatchProcessingResult { results, stats }
}
