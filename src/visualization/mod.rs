use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::errors::IncludeGraphError;
use crate::graph::{Adjacency, IncludeGraph};
use crate::query::{Query, RootsQuery};
use crate::utils::paths::display_relative;

const TAIL: &str = "└── ";
const BRANCH: &str = "├── ";
const BLANK: &str = "    ";
const PIPE: &str = "│   ";
const CYCLE: &str = "  (cycle)";

/// Which mapping a rendering walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Roots first, then what they include.
    Normal,
    /// Every document, then what includes it.
    Reverse,
}

/// `tree`-style text rendering of an include graph.
///
/// Paths are printed relative to `base`; a document outside `base` makes the
/// whole rendering fail rather than print a partial tree.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    base: PathBuf,
}

impl TreeRenderer {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    /// Render either view.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a printed path is not below the base.
    pub fn render(&self, graph: &IncludeGraph, view: View) -> Result<String, IncludeGraphError> {
        match view {
            View::Normal => self.render_normal(graph),
            View::Reverse => self.render_reverse(graph),
        }
    }

    /// Each root unindented, followed by the tree of its includes.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a printed path is not below the base.
    pub fn render_normal(&self, graph: &IncludeGraph) -> Result<String, IncludeGraphError> {
        let mut out = String::new();
        for root in RootsQuery::new().run(graph) {
            let _ = writeln!(out, "{}", display_relative(&root, &self.base)?);
            let children = graph.includes_of(&root);
            for (i, child) in children.iter().enumerate() {
                let mut visited = HashSet::new();
                let last = i == children.len() - 1;
                self.render_node(&mut out, child, &graph.includes, "", last, &mut visited)?;
            }
        }
        Ok(out)
    }

    /// Each scanned document, sorted by relative path, followed by the chain of
    /// documents including it.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a printed path is not below the base.
    pub fn render_reverse(&self, graph: &IncludeGraph) -> Result<String, IncludeGraphError> {
        let parents = graph.invert();
        let mut docs: Vec<(String, &PathBuf)> = graph
            .documents
            .iter()
            .map(|d| display_relative(d, &self.base).map(|rel| (rel, d)))
            .collect::<Result<_, _>>()?;
        docs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (rel, doc) in docs {
            let _ = writeln!(out, "{rel}");
            let includers = parents.get(doc).map(Vec::as_slice).unwrap_or_default();
            for (i, parent) in includers.iter().enumerate() {
                let mut visited = HashSet::new();
                let last = i == includers.len() - 1;
                self.render_node(&mut out, parent, &parents, "", last, &mut visited)?;
            }
        }
        Ok(out)
    }

    /// Print `node` under `prefix`, then its neighbours in `mapping`.
    ///
    /// A node already in `visited` is printed once more with the cycle marker and
    /// not expanded; this is the only thing stopping the recursion, so it also
    /// covers a document including itself.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a printed path is not below the base.
    pub fn render_node(
        &self,
        out: &mut String,
        node: &Path,
        mapping: &Adjacency,
        prefix: &str,
        is_tail: bool,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<(), IncludeGraphError> {
        let rel = display_relative(node, &self.base)?;
        let connector = if is_tail { TAIL } else { BRANCH };
        let seen = visited.contains(node);
        let _ = writeln!(out, "{prefix}{connector}{rel}{}", if seen { CYCLE } else { "" });
        if seen {
            return Ok(());
        }
        visited.insert(node.to_path_buf());

        let Some(children) = mapping.get(node) else {
            return Ok(());
        };
        let child_prefix = format!("{prefix}{}", if is_tail { BLANK } else { PIPE });
        for (i, child) in children.iter().enumerate() {
            let last = i == children.len() - 1;
            self.render_node(out, child, mapping, &child_prefix, last, visited)?;
        }
        Ok(())
    }
}

/// Machine-readable form of one view, paths relative to `base`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub base: String,
    pub view: View,
    /// Scanned documents, sorted.
    pub documents: Vec<String>,
    /// Roots of the forward graph, in scan order.
    pub roots: Vec<String>,
    /// Includes (normal view) or includers (reverse view) of every scanned document.
    pub edges: BTreeMap<String, Vec<String>>,
}

impl JsonReport {
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a path is not below `base`.
    pub fn build(graph: &IncludeGraph, view: View, base: &Path) -> Result<Self, IncludeGraphError> {
        let mut documents = relative_all(&graph.documents, base)?;
        documents.sort();
        let roots = relative_all(&RootsQuery::new().run(graph), base)?;

        let reverse = match view {
            View::Normal => None,
            View::Reverse => Some(graph.invert()),
        };
        let mut edges = BTreeMap::new();
        for doc in &graph.documents {
            let targets = match &reverse {
                None => graph.includes_of(doc),
                Some(parents) => parents.get(doc).map(Vec::as_slice).unwrap_or_default(),
            };
            edges.insert(display_relative(doc, base)?, relative_all(targets, base)?);
        }

        Ok(Self { base: base.display().to_string(), view, documents, roots, edges })
    }

    /// # Errors
    /// Returns `IncludeGraphError::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, IncludeGraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Graphviz digraph of the include graph, labels relative to `base`.
    ///
    /// Edges point includer → included in the normal view and the other way in
    /// the reverse view. Targets that were never scanned are drawn dashed.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if a path is not below `base`.
    pub fn generate_dot(
        &self,
        graph: &IncludeGraph,
        view: View,
        base: &Path,
    ) -> Result<String, IncludeGraphError> {
        let mut s = String::new();
        s.push_str("digraph includes {\n");
        let _ = writeln!(s, "  rankdir={};", if view == View::Normal { "LR" } else { "RL" });
        s.push_str("  node [shape=box, fontsize=10];\n");

        let mut nodes: Vec<String> =
            graph.documents.iter().map(|d| display_relative(d, base)).collect::<Result<_, _>>()?;
        nodes.sort();
        for n in &nodes {
            let _ = writeln!(s, "  \"{}\";", escape(n));
        }

        let mut dangling: HashSet<&Path> = HashSet::new();
        let mut edges = String::new();
        for doc in &graph.documents {
            let from = escape(&display_relative(doc, base)?);
            for target in graph.includes_of(doc) {
                if !graph.contains(target) && dangling.insert(target.as_path()) {
                    let _ = writeln!(
                        s,
                        "  \"{}\" [style=dashed];",
                        escape(&display_relative(target, base)?)
                    );
                }
                let to = escape(&display_relative(target, base)?);
                let _ = match view {
                    View::Normal => writeln!(edges, "  \"{from}\" -> \"{to}\";"),
                    View::Reverse => writeln!(edges, "  \"{to}\" -> \"{from}\";"),
                };
            }
        }
        s.push_str(&edges);
        s.push_str("}\n");
        Ok(s)
    }
}

fn relative_all(paths: &[PathBuf], base: &Path) -> Result<Vec<String>, IncludeGraphError> {
    paths.iter().map(|p| display_relative(p, base)).collect()
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
