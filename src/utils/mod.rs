pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::IncludeGraphError;

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct ScanConfig {
        pub extension: Option<String>,
        pub respect_ignore: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct OutputConfig {
        pub format: Option<String>, // "text" | "json" | "dot"
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub scan: Option<ScanConfig>,
        pub output: Option<OutputConfig>,
    }

    #[must_use]
    pub fn default_config_path(root: &Path) -> PathBuf {
        root.join("asc-tree.toml")
    }

    /// Load and parse a TOML configuration file.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::Config` if the file cannot be read or is not valid TOML
    /// for `Config`.
    pub fn load_config_at(path: &Path) -> Result<Config, IncludeGraphError> {
        let data = fs::read_to_string(path).map_err(|e| IncludeGraphError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str::<Config>(&data).map_err(|e| IncludeGraphError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look for `asc-tree.toml` directly inside `root`.
    ///
    /// Returns `None` when no such file exists.
    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Result<Config, IncludeGraphError>> {
        let p = default_config_path(root);
        if p.is_file() {
            Some(load_config_at(&p))
        } else {
            None
        }
    }
}

pub mod file_walker {
    use std::ffi::OsStr;
    use std::fs::FileType;
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    fn has_extension(path: &Path, extension: &str) -> bool {
        path.extension() == Some(OsStr::new(extension))
    }

    // A symlink counts when it points at a regular file; linked directories are not entered.
    fn is_document_file(file_type: FileType, path: &Path) -> bool {
        file_type.is_file() || (file_type.is_symlink() && path.is_file())
    }

    /// Discover documents under `root` whose extension is `extension` (no leading dot).
    ///
    /// The plain walk visits every file, hidden ones included, without descending
    /// into symlinked directories. With `respect_ignore`, `.gitignore`/`.ignore`
    /// files are honored (parents included, global git excludes off). Entries are
    /// sorted by file name and returned as walked, below `root`; symlinked files
    /// keep the link's path.
    #[must_use]
    pub fn documents_with_options(root: &Path, extension: &str, respect_ignore: bool) -> Vec<PathBuf> {
        let extension = extension.trim_start_matches('.');
        let mut out = Vec::new();
        if respect_ignore {
            let mut walker = ignore::WalkBuilder::new(root);
            walker
                .follow_links(false)
                .hidden(false)
                .git_ignore(true)
                .git_global(false)
                .git_exclude(false)
                .ignore(true)
                .parents(true)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b));
            for entry in walker.build().flatten() {
                if entry.file_type().is_some_and(|t| is_document_file(t, entry.path()))
                    && has_extension(entry.path(), extension)
                {
                    out.push(entry.into_path());
                }
            }
        } else {
            for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
                let Ok(entry) = entry else { continue };
                if is_document_file(entry.file_type(), entry.path())
                    && has_extension(entry.path(), extension)
                {
                    out.push(entry.into_path());
                }
            }
        }
        out
    }
}

pub mod paths {
    use std::fs;
    use std::path::{Component, Path, PathBuf};

    use crate::errors::IncludeGraphError;

    /// Canonicalize `path`, tolerating components that do not exist.
    ///
    /// The deepest existing ancestor is canonicalized and the rest is applied
    /// lexically, so `a/missing/../b.asc` and `a/b.asc` resolve to the same key
    /// whether or not `b.asc` exists.
    #[must_use]
    pub fn resolve(path: &Path) -> PathBuf {
        if let Ok(p) = fs::canonicalize(path) {
            return p;
        }
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        };

        let mut tail: Vec<Component<'_>> = Vec::new();
        let mut head: &Path = &absolute;
        let mut base = loop {
            if let Ok(p) = fs::canonicalize(head) {
                break p;
            }
            match (head.parent(), head.components().next_back()) {
                (Some(parent), Some(last)) => {
                    tail.push(last);
                    head = parent;
                }
                // Nothing on disk at all; fall back to a purely lexical walk
                _ => break PathBuf::new(),
            }
        };

        for comp in tail.into_iter().rev() {
            match comp {
                Component::CurDir => {}
                Component::ParentDir => {
                    base.pop();
                }
                other => base.push(other.as_os_str()),
            }
        }
        base
    }

    /// `path` relative to `base`.
    ///
    /// # Errors
    /// Returns `IncludeGraphError::OutsideBase` if `path` is not below `base`.
    pub fn relative_to(path: &Path, base: &Path) -> Result<PathBuf, IncludeGraphError> {
        path.strip_prefix(base).map(Path::to_path_buf).map_err(|_| IncludeGraphError::OutsideBase {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })
    }

    /// String form of [`relative_to`], used for display and ordering.
    ///
    /// # Errors
    /// Same as [`relative_to`].
    pub fn display_relative(path: &Path, base: &Path) -> Result<String, IncludeGraphError> {
        relative_to(path, base).map(|p| p.to_string_lossy().into_owned())
    }
}
