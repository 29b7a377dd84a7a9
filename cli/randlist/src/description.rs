//! TOML list descriptions consumed by `randlist pack`.
//!
//! ```toml
//! [[node]]
//! data = "Node1"
//! rand = 2
//!
//! [[node]]
//! data = "Node2"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use randlist_core::List;

/// An ordered set of node descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDescription {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeDescription>,
}

/// One node: its payload and the 0-based position of its `rand` target.
///
/// `rand` is signed so that `-1`, the wire encoding of "no link", is
/// accepted like any other out-of-range position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rand: Option<i64>,
}

impl ListDescription {
    /// Read and parse a description file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Describe an existing list.
    ///
    /// Descriptions hold text, so a list with a non-UTF-8 payload is rejected
    /// rather than described lossily.
    pub fn from_list(list: &List) -> Result<Self> {
        let mut nodes = Vec::with_capacity(list.count());
        for (index, (_, node)) in list.iter().enumerate() {
            let data = match std::str::from_utf8(node.data()) {
                Ok(text) => text.to_string(),
                Err(e) => bail!("node {index} payload is not valid UTF-8: {e}"),
            };
            let rand = match node.rand() {
                Some(id) => Some(
                    i64::try_from(id.index())
                        .with_context(|| format!("node {index} rand position"))?,
                ),
                None => None,
            };
            nodes.push(NodeDescription { data, rand });
        }
        Ok(Self { nodes })
    }

    /// Build the described list. `rand` positions outside the list are
    /// skipped with a warning.
    pub fn build(&self) -> List {
        let mut list = List::with_capacity(self.nodes.len());
        list.extend(self.nodes.iter().map(|n| n.data.as_str()));

        for (index, node) in self.nodes.iter().enumerate() {
            let Some(target) = node.rand else {
                continue;
            };
            let applied = usize::try_from(target)
                .map(|position| list.set_rand(index, position))
                .unwrap_or(false);
            if !applied {
                warn!(index, target, count = list.count(), "rand target out of range; ignored");
            }
        }
        list
    }
}
