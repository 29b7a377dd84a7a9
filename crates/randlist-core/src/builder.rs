//! Build-then-commit construction of lists from positional records.
//!
//! Where [`List::append`] grows a live list one node at a time, a
//! [`ListBuilder`] collects payloads and positional `rand` indices first and
//! only wires links once every record is known. This is how a list is
//! reconstructed from a flat stream, where a `rand` index may point forward
//! at a node that has not been materialized yet.
//!
//! # Example
//!
//! ```rust
//! use randlist_core::ListBuilder;
//!
//! let mut builder = ListBuilder::new();
//! builder.push("a", Some(1));
//! builder.push("b", None);
//! builder.push("c", Some(7)); // no such node: resolves to no link
//!
//! let list = builder.finish();
//! assert_eq!(list.count(), 3);
//! assert_eq!(list.rand_index(0), Some(1));
//! assert_eq!(list.rand_index(2), None);
//! ```

use crate::list::node::{Node, NodeId};
use crate::list::List;

/// Collects node payloads and `rand` positions, then links them in one pass.
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    nodes: Vec<Node>,
    /// Announced `rand` position per node, resolved in [`finish`](Self::finish).
    rand: Vec<Option<usize>>,
}

impl ListBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            rand: Vec::with_capacity(capacity),
        }
    }

    /// Record a node holding `data` whose `rand` link should point at chain
    /// position `rand`. The position is not checked until [`finish`](Self::finish).
    pub fn push(&mut self, data: impl Into<Vec<u8>>, rand: Option<usize>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::detached(data.into()));
        self.rand.push(rand);
        id
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of recorded `rand` positions that point past the last record.
    /// These resolve to "no link" in [`finish`](Self::finish).
    pub fn unresolved_rand_count(&self) -> usize {
        let count = self.nodes.len();
        self.rand
            .iter()
            .filter(|r| matches!(r, Some(i) if *i >= count))
            .count()
    }

    /// Wire `prev`/`next` by position, resolve `rand` positions, and publish
    /// the result as a [`List`].
    pub fn finish(self) -> List {
        let Self { mut nodes, rand } = self;
        let count = nodes.len();

        for (i, node) in nodes.iter_mut().enumerate() {
            node.prev = i.checked_sub(1).map(NodeId::new);
            node.next = (i + 1 < count).then(|| NodeId::new(i + 1));
        }

        for (node, target) in nodes.iter_mut().zip(rand) {
            node.rand = target.filter(|&t| t < count).map(NodeId::new);
        }

        List::from_linked(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_yields_empty_list() {
        let list = ListBuilder::new().finish();
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn forward_rand_references_resolve() {
        let mut builder = ListBuilder::with_capacity(3);
        builder.push("first", Some(2));
        builder.push("second", Some(0));
        builder.push("third", Some(2));
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.unresolved_rand_count(), 0);

        let list = builder.finish();
        assert!(list.validate().is_ok());
        assert_eq!(list.rand_index(0), Some(2));
        assert_eq!(list.rand_index(1), Some(0));
        assert_eq!(list.rand_index(2), Some(2));
    }

    #[test]
    fn matches_incremental_construction() {
        let mut built = ListBuilder::new();
        let mut appended = List::new();
        for (data, rand) in [("x", Some(1)), ("y", None), ("z", Some(0))] {
            built.push(data, rand);
            appended.append(data);
        }
        appended.set_rand(0, 1);
        appended.set_rand(2, 0);

        assert_eq!(built.finish(), appended);
    }

    #[test]
    fn out_of_range_rand_becomes_absent() {
        let mut builder = ListBuilder::new();
        builder.push("a", Some(1));
        builder.push("b", Some(2));
        assert_eq!(builder.unresolved_rand_count(), 1);

        let list = builder.finish();
        assert_eq!(list.rand_index(0), Some(1));
        assert_eq!(list.rand_index(1), None);
        assert!(list.validate().is_ok());
    }
}
