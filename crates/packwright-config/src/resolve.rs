//! Module specifier resolution.
//!
//! Three specifier shapes are recognized:
//!
//! - **Aliased** (`@pages/Sample`): the longest alias prefix that matches on a
//!   path-segment boundary is replaced by its base directory. The result is
//!   not checked for existence; that is the build engine's concern.
//! - **Relative** (`./x`, `../x`): joined onto the importing file's directory,
//!   which the caller supplies.
//! - **Bare** (`react`, `components/Button`): tried against each search root
//!   in order; the first root whose join the [`CandidateProbe`] accepts wins.
//!
//! Resolution is a pure function of its inputs. The only source of variation
//! is the probe, and the Assembler never uses a filesystem-backed one.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigError, Result};

/// One `prefix -> base` alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub prefix: String,
    pub base: PathBuf,
}

/// Alias prefixes with unique keys, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Build a table, rejecting empty and duplicate keys.
    ///
    /// # Example
    ///
    /// ```
    /// use packwright_config::AliasTable;
    /// use std::path::PathBuf;
    ///
    /// let table = AliasTable::new([("@pages", "/src/pages")]).unwrap();
    /// assert_eq!(table.lookup("@pages/Sample"), Some(PathBuf::from("/src/pages/Sample")));
    /// ```
    pub fn new<I, K, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        let mut table = Self::default();
        for (prefix, base) in entries {
            table.insert(prefix.into(), base.into())?;
        }
        Ok(table)
    }

    fn insert(&mut self, prefix: String, base: PathBuf) -> Result<()> {
        if prefix.trim().is_empty() {
            return Err(ConfigError::EmptyAlias);
        }
        if self.entries.iter().any(|e| e.prefix == prefix) {
            return Err(ConfigError::DuplicateAlias(prefix));
        }
        self.entries.push(AliasEntry { prefix, base });
        Ok(())
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute the longest matching alias prefix, if any.
    pub fn lookup(&self, specifier: &str) -> Option<PathBuf> {
        let entry = self
            .entries
            .iter()
            .filter(|e| prefix_matches(&e.prefix, specifier))
            .max_by_key(|e| e.prefix.len())?;

        let rest = specifier[entry.prefix.len()..].trim_start_matches('/');
        if rest.is_empty() {
            Some(entry.base.clone())
        } else {
            Some(entry.base.join(rest))
        }
    }
}

/// `@pages` matches `@pages` and `@pages/x`, never `@pagesx`.
fn prefix_matches(prefix: &str, specifier: &str) -> bool {
    match specifier.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => prefix.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// Ordered directories consulted for bare specifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchRoots(Vec<PathBuf>);

impl SearchRoots {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(roots.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decides whether `root/specifier` counts as a hit for a bare specifier.
pub trait CandidateProbe {
    fn is_candidate(&self, path: &Path) -> bool;
}

/// Every join is a candidate, so the first search root always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyCandidate;

impl CandidateProbe for AnyCandidate {
    fn is_candidate(&self, _path: &Path) -> bool {
        true
    }
}

/// Only paths from an explicit, known set are candidates.
#[derive(Debug, Clone, Default)]
pub struct DeclaredCandidates(BTreeSet<PathBuf>);

impl DeclaredCandidates {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl CandidateProbe for DeclaredCandidates {
    fn is_candidate(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

/// Filesystem-backed probe: the path exists as given or with one of the
/// configured extensions appended.
#[derive(Debug, Clone, Default)]
pub struct FsProbe {
    extensions: Vec<String>,
}

impl FsProbe {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

impl CandidateProbe for FsProbe {
    fn is_candidate(&self, path: &Path) -> bool {
        if path.exists() {
            return true;
        }
        self.extensions.iter().any(|ext| {
            let mut with_ext = path.as_os_str().to_owned();
            with_ext.push(ext);
            Path::new(&with_ext).exists()
        })
    }
}

fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Resolve `specifier` to a concrete path.
///
/// `context_dir` is the directory of the importing file and is only used for
/// relative specifiers.
///
/// # Errors
///
/// Returns [`ConfigError::Resolution`] when a bare specifier has no candidate
/// under any search root, or when the specifier is empty.
pub fn resolve(
    specifier: &str,
    context_dir: &Path,
    aliases: &AliasTable,
    roots: &SearchRoots,
    probe: &dyn CandidateProbe,
) -> Result<PathBuf> {
    if specifier.is_empty() {
        return Err(ConfigError::Resolution {
            specifier: String::new(),
        });
    }

    if let Some(path) = aliases.lookup(specifier) {
        trace!(specifier, path = %path.display(), "resolved via alias");
        return Ok(path);
    }

    if is_relative_specifier(specifier) {
        return Ok(path_clean::clean(context_dir.join(specifier)));
    }

    if Path::new(specifier).is_absolute() {
        return Ok(path_clean::clean(specifier));
    }

    for root in roots.iter() {
        let candidate = root.join(specifier);
        if probe.is_candidate(&candidate) {
            trace!(specifier, root = %root.display(), "resolved via search root");
            return Ok(candidate);
        }
    }

    Err(ConfigError::Resolution {
        specifier: specifier.to_string(),
    })
}
