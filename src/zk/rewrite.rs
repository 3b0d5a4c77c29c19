//! # Reference rewriting
//!
//! Walks every document below the project root and points anchors at their
//! new targets. Documents are streamed through an HTML rewriter that only
//! touches `href` attributes of `<a>` elements; all other bytes pass through
//! unchanged. A document is written back only when at least one href changed.
//!
//! Failures on individual documents (unreadable, not UTF-8, rewriter error,
//! failed write) do not stop the walk. They are collected in
//! [`RewriteReport::failures`] and it is up to the caller to decide what a
//! partial rewrite means.

use crate::config::ZkConfig;
use crate::links::RewriteTable;
use html_escape::decode_html_entities;
use lol_html::errors::RewritingError;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of running one document through the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRewrite {
    pub text: String,
    pub links_rewritten: usize,
}

impl DocumentRewrite {
    pub fn is_dirty(&self) -> bool {
        self.links_rewritten > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub path: PathBuf,
    pub links_rewritten: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub documents_scanned: usize,
    pub changed: Vec<DocumentChange>,
    pub failures: Vec<DocumentFailure>,
}

impl RewriteReport {
    pub fn links_rewritten(&self) -> usize {
        self.changed.iter().map(|c| c.links_rewritten).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rewrite the anchors of a single HTML document. Only hrefs that are an
/// exact key of `table` change.
pub fn rewrite_document(
    html: &str,
    table: &RewriteTable,
) -> std::result::Result<DocumentRewrite, RewritingError> {
    let mut links_rewritten = 0;

    let text = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("a[href]", |el| {
                // Attribute values come back as written; `&amp;` must match `&`
                let target = el
                    .get_attribute("href")
                    .and_then(|href| table.lookup(&decode_html_entities(&href)));
                if let Some(new_href) = target {
                    el.set_attribute("href", new_href)?;
                    links_rewritten += 1;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(DocumentRewrite {
        text,
        links_rewritten,
    })
}

pub struct ReferenceRewriter<'a> {
    root: &'a Path,
    table: &'a RewriteTable,
    config: &'a ZkConfig,
    dry_run: bool,
}

impl<'a> ReferenceRewriter<'a> {
    pub fn new(root: &'a Path, table: &'a RewriteTable, config: &'a ZkConfig) -> Self {
        Self {
            root,
            table,
            config,
            dry_run: false,
        }
    }

    /// Compute the report without writing any document.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn rewrite_all(&self) -> RewriteReport {
        let mut report = RewriteReport::default();

        for entry in WalkDir::new(self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.to_path_buf());
                    record_failure(&mut report, path, err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.is_document(&entry.file_name().to_string_lossy()) {
                continue;
            }

            report.documents_scanned += 1;
            match self.rewrite_file(entry.path()) {
                Ok(0) => {
                    tracing::trace!(path = %entry.path().display(), "no matching links");
                }
                Ok(links_rewritten) => {
                    tracing::debug!(
                        path = %entry.path().display(),
                        links_rewritten,
                        dry_run = self.dry_run,
                        "rewrote links"
                    );
                    report.changed.push(DocumentChange {
                        path: entry.path().to_path_buf(),
                        links_rewritten,
                    });
                }
                Err(reason) => record_failure(&mut report, entry.path().to_path_buf(), reason),
            }
        }

        report
    }

    fn rewrite_file(&self, path: &Path) -> std::result::Result<usize, String> {
        let html = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let rewrite = rewrite_document(&html, self.table).map_err(|e| e.to_string())?;

        // Writing through the existing file keeps its permissions
        if rewrite.is_dirty() && !self.dry_run {
            fs::write(path, rewrite.text.as_bytes()).map_err(|e| e.to_string())?;
        }
        Ok(rewrite.links_rewritten)
    }
}

fn record_failure(report: &mut RewriteReport, path: PathBuf, reason: String) {
    tracing::warn!(path = %path.display(), %reason, "skipping document");
    report.failures.push(DocumentFailure { path, reason });
}
