//! The list container.
//!
//! A [`List`] exclusively owns its nodes in an arena. The `next`/`prev` chain
//! is a single acyclic sequence starting at `head`, and every `rand` link
//! refers to a node of the same list. Because nodes are only appended at the
//! tail and are released all at once, arena order and chain order coincide,
//! which gives O(1) positional access.

pub mod node;

use std::iter::FusedIterator;

use thiserror::Error;

use self::node::{Node, NodeId};

/// Structural invariant violations reported by [`List::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("head/tail mismatch: list has {count} node(s) but head={head:?}, tail={tail:?}")]
    EndpointMismatch {
        count: usize,
        head: Option<NodeId>,
        tail: Option<NodeId>,
    },

    #[error("node {node} has prev {found:?}, expected {expected:?}")]
    BrokenBackLink {
        node: NodeId,
        expected: Option<NodeId>,
        found: Option<NodeId>,
    },

    #[error("forward traversal from head visited {visited} node(s), expected {count}")]
    CountMismatch { visited: usize, count: usize },

    #[error("forward traversal ended at {found:?}, but tail is {tail:?}")]
    TailMismatch {
        found: Option<NodeId>,
        tail: Option<NodeId>,
    },

    #[error("node {node} has rand link to {target}, which is not in the list")]
    DanglingRand { node: NodeId, target: NodeId },

    #[error("link to {0} points outside the arena")]
    DanglingLink(NodeId),
}

/// Doubly-linked list whose nodes may carry one auxiliary reference each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl List {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Assemble a list from nodes that are already linked in arena order.
    pub(crate) fn from_linked(nodes: Vec<Node>) -> Self {
        let tail = nodes.len().checked_sub(1).map(NodeId::new);
        let head = tail.map(|_| NodeId::new(0));
        Self { nodes, head, tail }
    }

    /// Append a node holding `data` at the tail and return its id.
    pub fn append(&mut self, data: impl Into<Vec<u8>>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let mut node = Node::detached(data.into());
        match self.tail {
            Some(old_tail) => {
                node.prev = Some(old_tail);
                self.nodes[old_tail.index()].next = Some(id);
            }
            None => self.head = Some(id),
        }
        self.nodes.push(node);
        self.tail = Some(id);
        id
    }

    /// Point the `rand` link of the node at `node_index` to the node at
    /// `target_index` (both 0-based chain positions).
    ///
    /// Out-of-range indices leave the list untouched. Returns whether the
    /// link was applied.
    pub fn set_rand(&mut self, node_index: usize, target_index: usize) -> bool {
        let count = self.nodes.len();
        if node_index >= count || target_index >= count {
            return false;
        }
        self.nodes[node_index].rand = Some(NodeId::new(target_index));
        true
    }

    /// Remove the `rand` link of the node at `node_index`, if any.
    pub fn clear_rand(&mut self, node_index: usize) -> bool {
        match self.nodes.get_mut(node_index) {
            Some(node) => {
                node.rand = None;
                true
            }
            None => false,
        }
    }

    /// Release every node. Safe to call on an empty list.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Number of nodes in the list.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node by its 0-based chain position.
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Chain position of the `rand` target of the node at `index`.
    pub fn rand_index(&self, index: usize) -> Option<usize> {
        self.node_at(index)?.rand.map(NodeId::index)
    }

    /// Iterate nodes in chain order, following `next` links from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.nodes.len(),
            forward: true,
        }
    }

    /// Iterate nodes in reverse chain order, following `prev` links from the tail.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.tail,
            remaining: self.nodes.len(),
            forward: false,
        }
    }

    /// Check every structural invariant of the list.
    pub fn validate(&self) -> Result<(), ListError> {
        let count = self.nodes.len();
        if (count == 0) != self.head.is_none() || (count == 0) != self.tail.is_none() {
            return Err(ListError::EndpointMismatch {
                count,
                head: self.head,
                tail: self.tail,
            });
        }

        let mut expected_prev = None;
        let mut cursor = self.head;
        let mut visited = 0;
        while let Some(id) = cursor {
            if visited == count {
                return Err(ListError::CountMismatch {
                    visited: visited + 1,
                    count,
                });
            }
            let node = self.get(id).ok_or(ListError::DanglingLink(id))?;
            if node.prev != expected_prev {
                return Err(ListError::BrokenBackLink {
                    node: id,
                    expected: expected_prev,
                    found: node.prev,
                });
            }
            if let Some(target) = node.rand {
                if target.index() >= count {
                    return Err(ListError::DanglingRand { node: id, target });
                }
            }
            expected_prev = Some(id);
            cursor = node.next;
            visited += 1;
        }

        if visited != count {
            return Err(ListError::CountMismatch { visited, count });
        }
        if expected_prev != self.tail {
            return Err(ListError::TailMismatch {
                found: expected_prev,
                tail: self.tail,
            });
        }
        Ok(())
    }
}

impl<T: Into<Vec<u8>>> Extend<T> for List {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.append(data);
        }
    }
}

impl<T: Into<Vec<u8>>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = (NodeId, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Link-following iterator over a [`List`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    list: &'a List,
    cursor: Option<NodeId>,
    remaining: usize,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        let node = self.list.get(id)?;
        self.cursor = if self.forward { node.next } else { node.prev };
        self.remaining -= 1;
        Some((id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> List {
        let mut list: List = ["Node1", "Node2", "Node3", "Node4", "Node5"]
            .into_iter()
            .collect();
        for (i, r) in [2, 4, 0, 3, 1].into_iter().enumerate() {
            assert!(list.set_rand(i, r));
        }
        list
    }

    #[test]
    fn empty_list() {
        let list = List::new();
        assert_eq!(list.count(), 0);
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
        assert_eq!(list.iter().count(), 0);
        assert!(list.validate().is_ok());
    }

    #[test]
    fn append_links_prev_and_next() {
        let mut list = List::new();
        let a = list.append("a");
        let b = list.append("b");
        let c = list.append("c");

        assert_eq!(list.count(), 3);
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(c));

        let node_b = list.get(b).unwrap();
        assert_eq!(node_b.prev(), Some(a));
        assert_eq!(node_b.next(), Some(c));
        assert!(list.get(a).unwrap().is_head());
        assert!(list.get(c).unwrap().is_tail());
        assert!(list.validate().is_ok());
    }

    #[test]
    fn forward_and_backward_visit_same_nodes() {
        let list = sample_list();
        let forward: Vec<NodeId> = list.iter().map(|(id, _)| id).collect();
        let mut backward: Vec<NodeId> = list.iter_rev().map(|(id, _)| id).collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.count());
        assert_eq!(list.iter().len(), 5);
    }

    #[test]
    fn set_rand_by_position() {
        let list = sample_list();
        let targets: Vec<Option<usize>> = (0..list.count()).map(|i| list.rand_index(i)).collect();
        assert_eq!(
            targets,
            vec![Some(2), Some(4), Some(0), Some(3), Some(1)]
        );
        let third = list.node_at(2).unwrap();
        let target = list.get(third.rand().unwrap()).unwrap();
        assert_eq!(target.data(), b"Node1");
    }

    #[test]
    fn set_rand_out_of_range_is_noop() {
        let mut list = sample_list();
        let before = list.clone();

        assert!(!list.set_rand(5, 0));
        assert!(!list.set_rand(0, 5));
        assert!(!list.set_rand(usize::MAX, usize::MAX));
        assert_eq!(list, before);

        let mut empty = List::new();
        assert!(!empty.set_rand(0, 0));
        assert!(empty.is_empty());
    }

    #[test]
    fn self_reference() {
        let mut list = List::new();
        list.append("SingleNode");
        assert!(list.set_rand(0, 0));
        assert_eq!(list.rand_index(0), Some(0));
        assert!(list.validate().is_ok());
    }

    #[test]
    fn clear_rand_removes_link() {
        let mut list = sample_list();
        assert!(list.clear_rand(1));
        assert_eq!(list.rand_index(1), None);
        assert!(!list.clear_rand(10));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut list = sample_list();
        list.clear();
        assert_eq!(list.count(), 0);
        assert!(list.head().is_none() && list.tail().is_none());
        list.clear();
        assert_eq!(list.count(), 0);
        assert!(list.validate().is_ok());

        // The list stays usable after clearing.
        let id = list.append("again");
        assert_eq!(id.index(), 0);
        assert_eq!(list.head(), Some(id));
    }

    #[test]
    fn validate_detects_broken_back_link() {
        let mut list = sample_list();
        list.nodes[3].prev = Some(NodeId::new(0));
        assert!(matches!(
            list.validate(),
            Err(ListError::BrokenBackLink { .. })
        ));
    }

    #[test]
    fn validate_detects_dangling_rand() {
        let mut list = sample_list();
        list.nodes[0].rand = Some(NodeId::new(99));
        assert!(matches!(
            list.validate(),
            Err(ListError::DanglingRand { .. })
        ));
    }

    #[test]
    fn validate_detects_cycle_in_chain() {
        let mut list = sample_list();
        list.nodes[4].next = Some(NodeId::new(0));
        assert!(list.validate().is_err());
    }

    #[test]
    fn from_linked_sets_endpoints() {
        let list = List::from_linked(Vec::new());
        assert!(list.head().is_none() && list.tail().is_none());

        let list = List::from_linked(vec![Node::detached(b"only".to_vec())]);
        assert_eq!(list.head(), Some(NodeId::new(0)));
        assert_eq!(list.tail(), Some(NodeId::new(0)));
        assert!(list.validate().is_ok());
    }
}
