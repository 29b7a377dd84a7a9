//! Core data model for lists with auxiliary node references.
//!
//! A [`List`] is a doubly-linked sequence of [`Node`]s in which every node may
//! additionally point at any other node of the same list (its `rand` link).
//! Nodes live in an arena owned by the list; `prev`, `next` and `rand` are
//! non-owning [`NodeId`] indices into that arena.

pub mod builder;
pub mod list;

pub use builder::ListBuilder;
pub use list::node::{Node, NodeId};
pub use list::{Iter, List, ListError};
