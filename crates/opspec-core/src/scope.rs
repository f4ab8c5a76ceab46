//! Scope tree tracking per-step free input variables.
//!
//! [`ScopeNode`] is an ordered tree: the root lists every global name, and
//! each child holds the free input names of the positionally-matching
//! contract block. For a specification with N blocks the root has exactly N
//! children and `children[i]` belongs to `apis[i]`; the assembler maintains
//! that correspondence, and every downstream consumer relies on it to know
//! which names are scenario inputs requiring concrete values.
//!
//! Children are exclusively owned by their parent; dropping the root drops
//! the whole tree.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A node in the scope tree: an ordered set of local names plus owned
/// children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeNode {
    locals: IndexSet<String>,
    children: Vec<ScopeNode>,
}

impl ScopeNode {
    /// Creates an empty node.
    pub fn new() -> Self {
        ScopeNode {
            locals: IndexSet::new(),
            children: Vec::new(),
        }
    }

    /// Inserts a local name. Idempotent: re-inserting an existing name
    /// leaves the set (and its order) unchanged. Returns `true` if the
    /// name was newly inserted.
    pub fn insert_local(&mut self, name: impl Into<String>) -> bool {
        self.locals.insert(name.into())
    }

    /// `true` if `name` is a local of this node.
    pub fn has_local(&self, name: &str) -> bool {
        self.locals.contains(name)
    }

    /// The local names in insertion order.
    pub fn locals(&self) -> impl Iterator<Item = &str> {
        self.locals.iter().map(|s| s.as_str())
    }

    /// Number of locals in this node.
    pub fn local_count(&self) -> usize {
        self.locals.len()
    }

    /// Appends a child, taking ownership. Returns the child's index.
    pub fn push_child(&mut self, child: ScopeNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// The children in appended order.
    pub fn children(&self) -> &[ScopeNode] {
        &self.children
    }

    /// Looks up a child by index.
    pub fn child(&self, index: usize) -> Option<&ScopeNode> {
        self.children.get(index)
    }

    /// Resolves `name` lexically from the node at `path` (a chain of child
    /// indices starting at this node): the innermost node is checked first,
    /// then each ancestor up to and including this node.
    ///
    /// Returns `false` if the path is invalid or no node on it binds `name`.
    pub fn resolve(&self, path: &[usize], name: &str) -> bool {
        let mut chain = vec![self];
        let mut node = self;
        for &i in path {
            match node.children.get(i) {
                Some(child) => {
                    chain.push(child);
                    node = child;
                }
                None => return false,
            }
        }
        chain.iter().rev().any(|n| n.has_local(name))
    }
}
