//! Rendering decoded lists for humans and tools.

use anyhow::{Context, Result};
use serde::Serialize;

use randlist_core::{List, NodeId};
use randlist_wire::{hash_hex, Digest};

/// Serializable projection of a list.
#[derive(Debug, Serialize)]
pub struct ListView {
    pub count: usize,
    pub digest: String,
    pub nodes: Vec<NodeView>,
}

#[derive(Debug, Serialize)]
pub struct NodeView {
    pub index: usize,
    pub data: String,
    pub rand: Option<NodeId>,
}

impl ListView {
    pub fn new(list: &List, digest: &Digest) -> Self {
        let nodes = list
            .iter()
            .enumerate()
            .map(|(index, (_, node))| NodeView {
                index,
                data: node.data_lossy().into_owned(),
                rand: node.rand(),
            })
            .collect();
        Self {
            count: list.count(),
            digest: hash_hex(digest),
            nodes,
        }
    }
}

/// One line per node: `Node {i}: data = {payload}, rand = {target payload | none}`.
pub fn render_nodes(list: &List) -> String {
    let mut out = String::new();
    for (index, (_, node)) in list.iter().enumerate() {
        let rand = node
            .rand()
            .and_then(|id| list.get(id))
            .map(|target| target.data_lossy().into_owned())
            .unwrap_or_else(|| "none".to_string());
        out.push_str(&format!(
            "Node {index}: data = {}, rand = {rand}\n",
            node.data_lossy()
        ));
    }
    out
}

/// Node lines followed by a summary footer.
pub fn render_text(list: &List, digest: &Digest) -> String {
    let mut out = render_nodes(list);
    out.push_str(&format!("  Nodes:  {}\n", list.count()));
    out.push_str(&format!("  SHA256: {}\n", hash_hex(digest)));
    out
}

pub fn render_json(list: &List, digest: &Digest) -> Result<String> {
    serde_json::to_string_pretty(&ListView::new(list, digest)).context("serializing list view")
}
