//! Candidate registry
//!
//! Collects interface declarations across every scanned location of a run,
//! keyed by name, so ambiguous names can be reported once scanning is done.

use std::collections::BTreeMap;

use crate::ir::Declaration;

/// An interface declaration and the module it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub module: String,
    pub declaration: Declaration,
}

/// Registry of interface candidates for one extraction run
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    by_name: BTreeMap<String, Vec<Candidate>>,
}

impl CandidateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a candidate. The same module seen twice is recorded once.
    pub fn register(&mut self, module: &str, declaration: &Declaration) {
        let entries = self.by_name.entry(declaration.name.clone()).or_default();
        if entries.iter().any(|c| c.module == module) {
            return;
        }
        entries.push(Candidate {
            module: module.to_string(),
            declaration: declaration.clone(),
        });
    }

    /// Candidate names in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All definitions registered under `name`
    pub fn get(&self, name: &str) -> &[Candidate] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Modules defining `name`, when more than one does
    pub fn ambiguity(&self, name: &str) -> Option<Vec<String>> {
        let entries = self.get(name);
        (entries.len() > 1).then(|| entries.iter().map(|c| c.module.clone()).collect())
    }

    /// Whether any candidate name matches `name` ignoring case
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.by_name.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
