//! Include graph model and builder.
//!
//! An [`IncludeGraph`] maps every scanned document (canonical absolute path) to
//! the documents it includes, in file order. Targets may be documents that were
//! never scanned (dangling includes); they appear only as values.
//!
//! Build one with `IncludeGraph::build_from_directory*`, derive the reverse
//! mapping with [`IncludeGraph::invert`], and hand either to the renderers in
//! `crate::visualization`.
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{IncludeGraphError, ParseError};
use crate::parser::IncludeParser;
use crate::utils::{file_walker, paths};

/// Document → ordered list of neighbours (includes or includers).
pub type Adjacency = HashMap<PathBuf, Vec<PathBuf>>;

/// Scan settings for [`IncludeGraph::build_from_directory_opts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Document extension without the leading dot.
    pub extension: String,
    /// Honor `.gitignore`/`.ignore` files during discovery.
    pub respect_ignore: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { extension: "asc".to_string(), respect_ignore: false }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct IncludeGraph {
    /// Scanned documents in scan order.
    pub documents: Vec<PathBuf>,
    /// Forward edges. Keys are exactly `documents`.
    pub includes: Adjacency,
    /// Documents that could not be read; they stay in the graph with no includes.
    #[serde(skip)]
    pub unreadable: Vec<(PathBuf, String)>,
}

impl IncludeGraph {
    /// Build from `root` with default options (`.asc`, ignore files not consulted).
    ///
    /// # Errors
    /// See [`IncludeGraph::build_from_directory_opts`].
    pub fn build_from_directory(root: &Path) -> Result<Self, IncludeGraphError> {
        Self::build_from_directory_opts(root, &ScanOptions::default())
    }

    /// Scan `root` and extract the include edges of every document found.
    ///
    /// Documents are read one at a time and keyed by their canonical path; a
    /// document that cannot be read is kept as a key with no includes and
    /// recorded in `unreadable`.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::NotADirectory` if `root` is not a directory and
    /// `IncludeGraphError::NoDocuments` if no document with the extension exists below it.
    pub fn build_from_directory_opts(
        root: &Path,
        opts: &ScanOptions,
    ) -> Result<Self, IncludeGraphError> {
        if !root.is_dir() {
            return Err(IncludeGraphError::NotADirectory(root.to_path_buf()));
        }
        let files = file_walker::documents_with_options(root, &opts.extension, opts.respect_ignore);
        if files.is_empty() {
            return Err(IncludeGraphError::NoDocuments {
                root: root.to_path_buf(),
                extension: opts.extension.trim_start_matches('.').to_string(),
            });
        }

        let parser = IncludeParser::new();
        let mut graph = Self::default();
        for file in files {
            // Includes resolve against the walked location, so a symlinked
            // document sees its link's siblings, not its target's.
            let targets = match parser.parse_path(&file) {
                Ok(t) => t,
                Err(ParseError::Io { file: path, source }) => {
                    graph.unreadable.push((path, source.to_string()));
                    Vec::new()
                }
            };
            graph.replace(paths::resolve(&file), targets);
        }
        Ok(graph)
    }

    /// Build from in-memory `(document, includes)` pairs, keeping their order.
    ///
    /// A document listed twice has its include lists concatenated.
    pub fn from_edges<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PathBuf, Vec<PathBuf>)>,
    {
        let mut graph = Self::default();
        for (doc, targets) in entries {
            graph.insert(doc, targets);
        }
        graph
    }

    /// Later scans of the same canonical document (two links to one file)
    /// overwrite the earlier include list but keep its scan position.
    fn replace(&mut self, doc: PathBuf, targets: Vec<PathBuf>) {
        if let Some(existing) = self.includes.get_mut(&doc) {
            *existing = targets;
        } else {
            self.documents.push(doc.clone());
            self.includes.insert(doc, targets);
        }
    }

    fn insert(&mut self, doc: PathBuf, targets: Vec<PathBuf>) {
        if let Some(existing) = self.includes.get_mut(&doc) {
            existing.extend(targets);
        } else {
            self.documents.push(doc.clone());
            self.includes.insert(doc, targets);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of include edges, duplicates counted.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.includes.values().map(Vec::len).sum()
    }

    /// Whether `doc` was scanned.
    #[must_use]
    pub fn contains(&self, doc: &Path) -> bool {
        self.includes.contains_key(doc)
    }

    /// Direct includes of `doc`; empty for dangling or unknown documents.
    #[must_use]
    pub fn includes_of(&self, doc: &Path) -> &[PathBuf] {
        self.includes.get(doc).map(Vec::as_slice).unwrap_or_default()
    }

    /// Reverse mapping: document → documents including it.
    ///
    /// Includers are listed in discovery order (documents in scan order, then each
    /// one's includes in file order). Every scanned document is a key, possibly
    /// with an empty list.
    #[must_use]
    pub fn invert(&self) -> Adjacency {
        let mut parents: Adjacency = HashMap::with_capacity(self.documents.len());
        for parent in &self.documents {
            for child in self.includes_of(parent) {
                parents.entry(child.clone()).or_default().push(parent.clone());
            }
        }
        for doc in &self.documents {
            parents.entry(doc.clone()).or_default();
        }
        parents
    }
}
