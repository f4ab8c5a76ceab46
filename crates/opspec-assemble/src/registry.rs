//! Name-keyed registry of scenario builders.
//!
//! The registry is an explicit value: the host process constructs it at
//! startup, registers every builder, and passes it by reference into the
//! assembler. This keeps registration order and contents observable and
//! testable in isolation.
//!
//! A builder appends one contract block and one matching scope child per
//! step it models, in order, and must not mutate or reorder entries
//! appended by earlier builders -- that discipline is what allows several
//! builders' output to be concatenated into one specification.

use std::sync::Arc;

use indexmap::IndexMap;

use opspec_core::{ApiContract, ScopeNode};

/// A scenario builder: appends contract blocks and matching scope children.
pub type BuilderFn = dyn Fn(&mut Vec<ApiContract>, &mut ScopeNode) + Send + Sync;

/// Explicit name -> builder table.
///
/// Registration is last-write-wins; lookups are exact string matches. Once
/// generation begins the registry is only read, so independent `generate`
/// calls may share it by reference.
#[derive(Default)]
pub struct BuilderRegistry {
    builders: IndexMap<String, Arc<BuilderFn>>,
}

impl BuilderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        BuilderRegistry {
            builders: IndexMap::new(),
        }
    }

    /// Registers `builder` under `name`. Re-registering a name replaces the
    /// previous builder (last write wins).
    pub fn register<F>(&mut self, name: impl Into<String>, builder: F)
    where
        F: Fn(&mut Vec<ApiContract>, &mut ScopeNode) + Send + Sync + 'static,
    {
        self.builders.insert(name.into(), Arc::new(builder));
    }

    /// Looks up a builder by name. The returned handle is identical (by
    /// pointer) across calls until the name is re-registered.
    pub fn get(&self, name: &str) -> Option<Arc<BuilderFn>> {
        self.builders.get(name).cloned()
    }

    /// `true` if a builder is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered names in first-registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(|s| s.as_str())
    }

    /// Number of registered builders.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// `true` if no builder is registered.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}
