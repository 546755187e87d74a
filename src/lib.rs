//! asc-tree — Asciidoctor include graph explorer
//!
//! Scan a directory of Asciidoctor documents, follow their `include::`
//! directives, and print the resulting graph as a tree.
//!
//! # Features
//! - Forward view: documents nobody includes, then what they include
//! - Reverse view: every document, then the chain of documents including it
//! - Cycle-safe traversal: a revisited document is marked `(cycle)` and not expanded
//! - Text, JSON and DOT output
//!
//! # Quickstart (Library)
//! ```no_run
//! use asc_tree::graph::IncludeGraph;
//! use asc_tree::visualization::{TreeRenderer, View};
//!
//! let root = std::path::Path::new("docs");
//! let graph = IncludeGraph::build_from_directory(root).expect("build graph");
//! let base = std::env::current_dir().expect("cwd").canonicalize().expect("canonical cwd");
//! let tree = TreeRenderer::new(base).render(&graph, View::Normal).expect("render");
//! print!("{tree}");
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! asc-tree docs
//! asc-tree --reverse docs
//! asc-tree --format json docs
//! ```
//!
//! # Limitations
//! Include lines are matched one at a time with no awareness of comments,
//! conditionals or listing blocks: every line starting with `include::path[`
//! is an edge.
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod query;
pub mod utils;
pub mod visualization;
