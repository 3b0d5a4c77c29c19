//! # Link forms
//!
//! Documents link to each other with hrefs relative to the project root. One
//! target can be spelled several ways:
//!
//! ```text
//! notes/a.html            exact path
//! notes/a                 extension-less ("pretty") link
//! notes/sub               directory link, for notes/sub/index.html
//! ```
//!
//! [`LinkFormSet`] enumerates those spellings for one path and
//! [`RewriteTable`] pairs every old spelling with its new one when a path moves.
//! Matching downstream is plain string equality against these forms.

use crate::config::ZkConfig;
use crate::error::{Result, ZkError};
use crate::root::normalize;
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Project-relative, `/`-separated form of `path` (no leading slash).
///
/// Fails with [`ZkError::PathOutsideRoot`] unless `path` lies strictly below
/// `root`.
pub fn relative_to(root: &Path, path: &Path) -> Result<String> {
    let root = normalize(root);
    let path = normalize(path);
    let outside = || ZkError::PathOutsideRoot {
        path: path.clone(),
        root: root.clone(),
    };

    let rel = path.strip_prefix(&root).map_err(|_| outside())?;
    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            _ => return Err(outside()),
        }
    }

    if segments.is_empty() {
        return Err(outside());
    }
    Ok(segments.join("/"))
}

/// Every href that can legitimately point at one project-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFormSet {
    exact: String,
    directory: Option<String>,
    pretty: Option<String>,
}

impl LinkFormSet {
    pub fn for_path(relative: &str, config: &ZkConfig) -> Self {
        let (parent, last) = match relative.rsplit_once('/') {
            Some((parent, last)) => (Some(parent), last),
            None => (None, relative),
        };

        // An index file at the top level has no directory spelling: the
        // empty href would point at whatever page contains it.
        let directory = match parent {
            Some(parent) if last == config.index_file && !parent.is_empty() => {
                Some(parent.to_string())
            }
            _ => None,
        };

        let ext = config.document_ext.as_str();
        let pretty = if last.len() > ext.len() && last.ends_with(ext) {
            Some(relative[..relative.len() - ext.len()].to_string())
        } else {
            None
        };

        Self {
            exact: relative.to_string(),
            directory,
            pretty,
        }
    }

    pub fn exact(&self) -> &str {
        &self.exact
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub fn pretty(&self) -> Option<&str> {
        self.pretty.as_deref()
    }

    /// The form written back when links are pointed at this path: index files
    /// collapse to their directory, everything else is the exact path.
    pub fn canonical(&self) -> &str {
        self.directory.as_deref().unwrap_or(&self.exact)
    }

    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.exact.as_str())
            .chain(self.directory.as_deref())
            .chain(self.pretty.as_deref())
    }
}

pub fn canonical_write_form(relative: &str, config: &ZkConfig) -> String {
    LinkFormSet::for_path(relative, config).canonical().to_string()
}

/// Old href → new href, for every form of every moved path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteTable {
    entries: BTreeMap<String, String>,
}

impl RewriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for moving `from` to `to`. `descendants` lists paths below `from`
    /// (relative to `from`) when a whole directory moves.
    pub fn for_move(from: &str, to: &str, descendants: &[String], config: &ZkConfig) -> Self {
        let mut table = Self::new();
        table.add(
            &LinkFormSet::for_path(from, config),
            &LinkFormSet::for_path(to, config),
        );
        for sub in descendants {
            table.add(
                &LinkFormSet::for_path(&format!("{}/{}", from, sub), config),
                &LinkFormSet::for_path(&format!("{}/{}", to, sub), config),
            );
        }
        table
    }

    /// Each old spelling maps to the same spelling of the new location when
    /// one exists, otherwise to its canonical form.
    pub fn add(&mut self, from: &LinkFormSet, to: &LinkFormSet) {
        let canonical = to.canonical();
        self.insert(from.exact(), canonical);
        if let Some(dir) = from.directory() {
            self.insert(dir, to.directory().unwrap_or(canonical));
        }
        if let Some(pretty) = from.pretty() {
            self.insert(pretty, to.pretty().unwrap_or(canonical));
        }
    }

    fn insert(&mut self, from: &str, to: &str) {
        self.entries
            .entry(from.to_string())
            .or_insert_with(|| to.to_string());
    }

    pub fn lookup(&self, href: &str) -> Option<&str> {
        self.entries.get(href).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
