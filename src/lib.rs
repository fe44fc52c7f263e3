//! An unbalanced binary search tree with parent links and stable node handles.
//!
//! This crate provides [`Tree`], an ordered key-value container stored as a plain (never
//! rebalanced) binary search tree. Every node knows its parent, so you can step from any node
//! to its neighbours in key order, and every node is addressed by a [`NodeHandle`] that stays
//! valid until that node is deleted:
//!
//! - [`search`](Tree::search), [`minimum`](Tree::minimum), [`maximum`](Tree::maximum) - Find a node
//! - [`successor`](Tree::successor), [`predecessor`](Tree::predecessor) - Step through key order
//! - [`delete`](Tree::delete) - Remove one particular node, even among equal keys
//! - [`walk`](Tree::walk) - Snapshot every entry in key order
//!
//! # Example
//!
//! ```
//! use linkwood::Tree;
//!
//! let mut tree = Tree::new();
//! let a = tree.insert(5, "five").unwrap();
//! tree.insert(2, "two").unwrap();
//! tree.insert(8, "eight").unwrap();
//!
//! // Equal keys are kept, after the existing ones.
//! let b = tree.insert(5, "another five").unwrap();
//! assert_eq!(tree.successor(a), Some(b));
//! assert_eq!(tree.search(&5), Some(a));
//!
//! // Delete exactly the node you mean.
//! assert_eq!(tree.delete(a), Some("five"));
//! assert_eq!(tree.search(&5), Some(b));
//!
//! assert_eq!(tree.walk(), [(2, "two"), (5, "another five"), (8, "eight")]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable handles** - Handles are generation-checked, so a handle to a deleted node is
//!   rejected rather than silently reused
//! - **Fallible insertion** - Running out of memory is an [`InsertError`], never an abort
//! - **No recursion** - Clone, drop, walks, and merges are iterative, so even a list-shaped tree
//!   of sorted keys is safe
//!
//! # Implementation
//!
//! Nodes live in an arena of slots and link to each other by slot index. Deletion follows the
//! textbook transplant scheme: a node with two children is replaced by its successor. Nothing
//! ever rotates, so the shape of the tree is entirely determined by the insertion order.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod error;
mod raw;

pub mod tree;

pub use error::InsertError;
pub use raw::NodeHandle;
pub use tree::Tree;
