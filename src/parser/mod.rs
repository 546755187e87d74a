use crate::errors::ParseError;
use crate::utils::paths;
use regex::Regex;
use std::path::{Path, PathBuf};

/// One `include::target[...]` line found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Raw target text between `include::` and the first `[`.
    pub target: String,
    /// 1-based line number.
    pub line: usize,
}

#[derive(Debug, Default)]
pub struct IncludeParser {
    patterns: RegexPatterns,
}

#[derive(Debug)]
pub struct RegexPatterns {
    pub include: Regex,
}

impl RegexPatterns {
    #[must_use]
    pub fn compile() -> Self {
        // Single line, anchored; no attempt at nested attribute syntax
        let include = Regex::new(r"^\s*include::([^\[]+)\[").expect("include pattern is valid");
        Self { include }
    }
}

impl Default for RegexPatterns {
    fn default() -> Self {
        Self::compile()
    }
}

impl IncludeParser {
    #[must_use]
    pub fn new() -> Self {
        Self { patterns: RegexPatterns::compile() }
    }

    /// Every line matching the include directive, in file order.
    ///
    /// Comments, conditionals and verbatim blocks are not recognized: a matching
    /// line inside a `----` listing still counts as an include.
    #[must_use]
    pub fn extract_targets(&self, content: &str) -> Vec<IncludeDirective> {
        content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let cap = self.patterns.include.captures(line)?;
                let target = cap.get(1)?.as_str().to_string();
                Some(IncludeDirective { target, line: i + 1 })
            })
            .collect()
    }

    /// Resolve the includes of `content` against the directory of `path`.
    ///
    /// Returned paths are canonical, so the same file reached through different
    /// relative spellings yields the same key.
    #[must_use]
    pub fn parse_file(&self, content: &str, path: &Path) -> Vec<PathBuf> {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.extract_targets(content)
            .into_iter()
            .map(|d| paths::resolve(&dir.join(&d.target)))
            .collect()
    }

    /// Read `path` leniently and resolve its includes.
    ///
    /// # Errors
    /// Returns `ParseError::Io` when the file cannot be read at all. Invalid UTF-8
    /// is replaced, never reported.
    pub fn parse_path(&self, path: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let bytes = std::fs::read(path)
            .map_err(|source| ParseError::Io { file: path.to_path_buf(), source })?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(self.parse_file(&content, path))
    }
}
