//! Import resolution
//!
//! Collects the module qualifiers used by a set of declarations and assigns
//! each module a unique alias. Standard library modules are aliased first so
//! they keep their natural names.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::ast::Decl;

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Identifiers the generated code uses unqualified
const RESERVED: &[&str] = &["m", "f", "c", "i", "hook", "behavior", "history", "trailing", "val"];

/// A single import line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
    pub alias: String,
}

impl Import {
    /// Whether the alias must be spelled out in the import line
    pub fn needs_alias(&self) -> bool {
        last_segment(&self.path) != self.alias
    }

    /// Standard library modules have no dot in their first path segment
    pub fn is_std(&self) -> bool {
        is_std(&self.path)
    }
}

/// Module to alias mapping for one output file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    aliases: BTreeMap<String, String>,
}

impl ImportSet {
    /// Collect every module referenced by `decls`, plus `always`
    pub fn collect(decls: &[Decl], always: &[&str]) -> Self {
        let mut modules: BTreeSet<&str> = always.iter().copied().collect();
        for decl in decls {
            decl.walk_qualifiers(&mut |m| {
                modules.insert(m);
            });
        }

        let (std, other): (Vec<&str>, Vec<&str>) = modules.into_iter().partition(|m| is_std(m));

        let mut taken: HashSet<String> = RESERVED.iter().map(|s| s.to_string()).collect();
        let mut aliases = BTreeMap::new();
        for module in std.into_iter().chain(other) {
            let alias = unique_alias(&sanitize(package_segment(module)), &taken);
            taken.insert(alias.clone());
            aliases.insert(module.to_string(), alias);
        }

        Self { aliases }
    }

    /// Alias assigned to `module`
    pub fn alias(&self, module: &str) -> Option<&str> {
        self.aliases.get(module).map(String::as_str)
    }

    /// Import lines, standard library first, each group sorted by path
    pub fn imports(&self) -> (Vec<Import>, Vec<Import>) {
        self.aliases
            .iter()
            .map(|(path, alias)| Import {
                path: path.clone(),
                alias: alias.clone(),
            })
            .partition(Import::is_std)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

fn is_std(path: &str) -> bool {
    !path.split('/').next().unwrap_or(path).contains('.')
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Segment naming the package: `github.com/go-redis/redis/v8` is `redis`
fn package_segment(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    match segments.next() {
        Some(parent) if is_major_version(last) => parent,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Turn a path segment into a Go identifier: `go-yaml.v3` becomes `goyaml`
fn sanitize(segment: &str) -> String {
    let head = segment.split('.').next().unwrap_or(segment);
    let mut ident: String = head
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, 'x');
    }
    ident
}

fn unique_alias(base: &str, taken: &HashSet<String>) -> String {
    let usable = |name: &str| !taken.contains(name) && !GO_KEYWORDS.contains(&name);
    if usable(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| usable(candidate))
        .unwrap_or_else(|| base.to_string())
}
