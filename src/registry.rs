//! Dependency tracking for one generation run.
//!
//! Records which comparator macros relational assertions need, which headers
//! emitted macros include, and which macros have been emitted. All sets keep
//! first-seen order so output does not depend on hashing.

use crate::assembler::MacroBlock;
use crate::compare::CompareSynthesizer;
use crate::types::{CompareSpec, COMPARE_SUFFIX};
use indexmap::{IndexMap, IndexSet};

/// Comparators that can be generated without being asked for.
pub const BUILTIN_COMPARATORS: [&str; 2] = ["Number_compare", "String_compare"];

/// A dependency still missing at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub name: String,
    /// Macros that referenced it, in order.
    pub requested_by: Vec<String>,
}

impl Unresolved {
    /// Operand type when the name follows the `<Type>_compare` convention.
    pub fn comparator_type(&self) -> Option<&str> {
        self.name
            .strip_suffix(COMPARE_SUFFIX)
            .filter(|type_tag| !type_tag.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct DependencyRegistry {
    needed: IndexMap<String, Vec<String>>,
    includes: IndexSet<String>,
    defined: IndexSet<String>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` is needed. No-op once it is defined.
    pub fn require(&mut self, name: &str) {
        if !self.defined.contains(name) {
            self.needed.entry(name.to_string()).or_default();
        }
    }

    /// Record that `requester` needs `name`.
    pub fn require_by(&mut self, name: &str, requester: &str) {
        if self.defined.contains(name) {
            return;
        }
        let requesters = self.needed.entry(name.to_string()).or_default();
        if !requesters.iter().any(|r| r == requester) {
            requesters.push(requester.to_string());
        }
    }

    /// Mark `name` as emitted. Returns false if it already was.
    pub fn define(&mut self, name: &str) -> bool {
        self.needed.shift_remove(name);
        self.defined.insert(name.to_string())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    pub fn is_needed(&self, name: &str) -> bool {
        self.needed.contains_key(name)
    }

    pub fn require_include(&mut self, header: &str) {
        if !self.includes.contains(header) {
            self.includes.insert(header.to_string());
        }
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    pub fn defined(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }

    /// Generate every needed built-in comparator that is not yet defined.
    ///
    /// Returns the generated blocks in the order they were first needed.
    pub fn resolve_builtins(&mut self, synth: &CompareSynthesizer<'_>) -> Vec<MacroBlock> {
        let pending: Vec<String> = self
            .needed
            .keys()
            .filter(|name| BUILTIN_COMPARATORS.contains(&name.as_str()))
            .cloned()
            .collect();

        let mut blocks = Vec::new();
        for name in pending {
            if self.is_defined(&name) {
                self.needed.shift_remove(&name);
                continue;
            }
            let type_tag = &name[..name.len() - COMPARE_SUFFIX.len()];
            tracing::info!(comparator = %name, "resolving built-in comparator");
            blocks.push(synth.synthesize(&CompareSpec::new(type_tag), self));
        }
        blocks
    }

    /// Dependencies needed but never defined, in first-needed order.
    pub fn unresolved(&self) -> Vec<Unresolved> {
        self.needed
            .iter()
            .filter(|(name, _)| !self.defined.contains(name.as_str()))
            .map(|(name, requested_by)| Unresolved {
                name: name.clone(),
                requested_by: requested_by.clone(),
            })
            .collect()
    }
}
