use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::graph::IncludeGraph;

/// Query trait implemented by all query types.
///
/// Given an immutable reference to an `IncludeGraph`, returns a result of type `R`.
pub trait Query<R> {
    fn run(&self, graph: &IncludeGraph) -> R;
}

/// Entry points of the forward view: documents no other document includes.
///
/// When every document is included by some other one (the whole set is made of
/// cycles), all documents are returned so that the normal view still prints
/// something.
#[derive(Debug, Default)]
pub struct RootsQuery;

impl RootsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<Vec<PathBuf>> for RootsQuery {
    fn run(&self, graph: &IncludeGraph) -> Vec<PathBuf> {
        let included: HashSet<&Path> =
            graph.includes.values().flatten().map(PathBuf::as_path).collect();
        let roots: Vec<PathBuf> =
            graph.documents.iter().filter(|d| !included.contains(d.as_path())).cloned().collect();
        if roots.is_empty() {
            graph.documents.clone()
        } else {
            roots
        }
    }
}

/// Includes whose target was never scanned.
///
/// Returns `(includer, target)` pairs in discovery order; a target missing from
/// several documents is reported once per includer.
#[derive(Debug, Default)]
pub struct DanglingQuery;

impl DanglingQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<Vec<(PathBuf, PathBuf)>> for DanglingQuery {
    fn run(&self, graph: &IncludeGraph) -> Vec<(PathBuf, PathBuf)> {
        let mut seen: HashSet<(&Path, &Path)> = HashSet::new();
        let mut out = Vec::new();
        for doc in &graph.documents {
            for target in graph.includes_of(doc) {
                if !graph.contains(target) && seen.insert((doc.as_path(), target.as_path())) {
                    out.push((doc.clone(), target.clone()));
                }
            }
        }
        out
    }
}
