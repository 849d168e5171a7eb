//! Deployment address tables rendered as documentation content.
//!
//! The data is reference content only: symbolic names mapped to base58
//! public keys, grouped per network. Nothing here interprets the keys.

use mdxr_core::{ElementFactory, Node, Props, RenderRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors emitted while loading deployment content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content file failed to parse.
    #[error("Deployment content JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Addresses for one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDeployment {
    /// Program and account keys by symbolic name (`solido_program_id`).
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Related addresses by symbolic name.
    #[serde(default)]
    pub related: BTreeMap<String, String>,
    /// Multisig owner address to owner label.
    #[serde(default)]
    pub multisig_owners: BTreeMap<String, String>,
}

/// All deployments, keyed by network name (`testnet`, `mainnet-beta`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments {
    networks: BTreeMap<String, NetworkDeployment>,
}

impl Deployments {
    /// Parses deployment content from JSON.
    pub fn from_json(source: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Addresses for a network.
    pub fn network(&self, name: &str) -> Option<&NetworkDeployment> {
        self.networks.get(name)
    }

    /// Networks in name order.
    pub fn networks(&self) -> impl Iterator<Item = (&str, &NetworkDeployment)> {
        self.networks.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Builds the deployments page body.
///
/// Each network becomes an `h2` followed by one `h3` and table per
/// non-empty category. Addresses render through `inlineCode`.
pub fn deployments_node(deployments: &Deployments, factory: &ElementFactory<'_>) -> Node {
    let mut children = Vec::new();
    for (network, deployment) in deployments.networks() {
        children.push(
            factory
                .render("h2", Props::new(), vec![Node::text(network)])
                .into(),
        );

        let categories = [
            ("Config keys", ("Name", "Address"), &deployment.config, false),
            ("Related addresses", ("Name", "Address"), &deployment.related, false),
            ("Multisig owners", ("Owner", "Address"), &deployment.multisig_owners, true),
        ];
        for (title, headers, entries, address_keyed) in categories {
            if entries.is_empty() {
                continue;
            }
            children.push(
                factory
                    .render("h3", Props::new(), vec![Node::text(title)])
                    .into(),
            );
            children.push(address_table(factory, headers, entries, address_keyed));
        }
    }
    Node::Fragment(children)
}

fn address_table(
    factory: &ElementFactory<'_>,
    headers: (&str, &str),
    entries: &BTreeMap<String, String>,
    address_keyed: bool,
) -> Node {
    let cell = |tag: &str, content: Node| -> Node {
        factory
            .render_request(tag, RenderRequest::new().parent("tr").child(content))
            .into()
    };
    let row = |section: &str, cells: Vec<Node>| -> Node {
        factory
            .render_request("tr", RenderRequest::new().parent(section).children(cells))
            .into()
    };
    let address = |value: &str| -> Node {
        factory
            .render("inlineCode", Props::new(), vec![Node::text(value)])
            .into()
    };

    let head = row(
        "thead",
        vec![
            cell("th", Node::text(headers.0)),
            cell("th", Node::text(headers.1)),
        ],
    );

    let body_rows = entries
        .iter()
        .map(|(key, value)| {
            let (label, addr) = if address_keyed {
                (value.as_str(), key.as_str())
            } else {
                (key.as_str(), value.as_str())
            };
            row(
                "tbody",
                vec![
                    cell("td", Node::text(label)),
                    cell("td", address(addr)),
                ],
            )
        })
        .collect::<Vec<_>>();

    let thead = factory.render_request("thead", RenderRequest::new().parent("table").child(head));
    let tbody = factory.render_request(
        "tbody",
        RenderRequest::new().parent("table").children(body_rows),
    );
    factory
        .render("table", Props::new(), vec![thead.into(), tbody.into()])
        .into()
}
