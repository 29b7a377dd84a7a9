//! Node and node identifier types.
//!
//! A node carries an opaque byte payload plus three non-owning links into the
//! arena of the list that owns it.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena index of a node inside its owning [`List`](super::List).
///
/// Nodes are only ever appended at the tail and released all at once, so the
/// arena index of a node is also its 0-based position in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The 0-based chain position this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single list element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) data: Vec<u8>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) rand: Option<NodeId>,
}

impl Node {
    /// Create an unlinked node holding `data`.
    pub(crate) fn detached(data: Vec<u8>) -> Self {
        Self {
            data,
            prev: None,
            next: None,
            rand: None,
        }
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The payload as text, replacing invalid UTF-8 sequences.
    pub fn data_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Previous node in chain order; `None` for the head.
    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    /// Next node in chain order; `None` for the tail.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Auxiliary reference, if set.
    pub fn rand(&self) -> Option<NodeId> {
        self.rand
    }

    pub fn is_head(&self) -> bool {
        self.prev.is_none()
    }

    pub fn is_tail(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_node_has_no_links() {
        let node = Node::detached(b"payload".to_vec());
        assert_eq!(node.data(), b"payload");
        assert!(node.is_head());
        assert!(node.is_tail());
        assert!(node.rand().is_none());
    }

    #[test]
    fn lossy_text_replaces_invalid_utf8() {
        let node = Node::detached(vec![b'o', b'k', 0xFF]);
        assert_eq!(node.data_lossy(), "ok\u{FFFD}");
    }

    #[test]
    fn node_id_serializes_as_plain_index() {
        let json = serde_json::to_string(&NodeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index(), 7);
        assert_eq!(back.to_string(), "#7");
    }
}
