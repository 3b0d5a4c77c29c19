//! `zk mv`: rename a note (or a directory of notes) and repoint every link
//! to it.
//!
//! The sequence is straight-line: resolve the root, validate both paths,
//! rewrite referencing documents, rename. Validation failures leave the tree
//! untouched. Rewriting happens before the rename and is not rolled back if
//! the rename fails afterwards.

use super::{CmdMessage, CmdResult};
use crate::config::ZkConfig;
use crate::error::{Result, ZkError};
use crate::links::{relative_to, RewriteTable};
use crate::rewrite::{ReferenceRewriter, RewriteReport};
use crate::root::{find_project_root, normalize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Report what would change without writing documents or renaming
    pub dry_run: bool,
}

/// A validated move inside one zettelkasten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub root: PathBuf,
}

impl MoveRequest {
    /// Resolve `from` and `to` against `working_dir` and check that the move
    /// can happen. Touches nothing on disk.
    pub fn new(working_dir: &Path, from: &Path, to: &Path) -> Result<Self> {
        let source = normalize(&working_dir.join(from));
        let destination = normalize(&working_dir.join(to));

        let search_start = source.parent().unwrap_or(source.as_path());
        let root = find_project_root(search_start)?;

        if fs::symlink_metadata(&source).is_err() {
            return Err(ZkError::SourceNotFound(source));
        }
        relative_to(&root, &source)?;
        relative_to(&root, &destination)?;

        if destination.starts_with(&source) {
            return Err(ZkError::MoveIntoSelf(source));
        }
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(ZkError::DestinationExists(destination));
        }
        match destination.parent() {
            Some(parent) if parent.is_dir() => {}
            parent => {
                let parent = parent.map(Path::to_path_buf).unwrap_or_else(|| destination.clone());
                return Err(ZkError::DestinationParentMissing(parent));
            }
        }

        Ok(Self {
            source,
            destination,
            root,
        })
    }

    /// Old-href → new-href table for this move. A directory source also
    /// contributes every entry below it.
    pub fn rewrite_table(&self, config: &ZkConfig) -> Result<RewriteTable> {
        let from = relative_to(&self.root, &self.source)?;
        let to = relative_to(&self.root, &self.destination)?;

        let mut descendants = Vec::new();
        if self.source.is_dir() {
            for entry in WalkDir::new(&self.source).min_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| ZkError::Io(e.into()))?;
                descendants.push(relative_to(&self.source, entry.path())?);
            }
        }

        Ok(RewriteTable::for_move(&from, &to, &descendants, config))
    }
}

#[derive(Debug)]
pub struct MoveReport {
    pub request: MoveRequest,
    pub rewrite: RewriteReport,
    pub renamed: bool,
}

/// Validate, rewrite references, then rename.
///
/// Document failures during the rewrite stop the move before the rename with
/// [`ZkError::RewriteIncomplete`]; documents rewritten up to then keep their
/// new links.
pub fn execute(
    working_dir: &Path,
    from: &Path,
    to: &Path,
    options: MoveOptions,
) -> Result<MoveReport> {
    let request = MoveRequest::new(working_dir, from, to)?;
    let config = ZkConfig::load(&request.root)?;
    let table = request.rewrite_table(&config)?;

    tracing::info!(
        root = %request.root.display(),
        source = %request.source.display(),
        destination = %request.destination.display(),
        forms = table.len(),
        dry_run = options.dry_run,
        "moving"
    );

    let rewrite = ReferenceRewriter::new(&request.root, &table, &config)
        .dry_run(options.dry_run)
        .rewrite_all();

    if !rewrite.is_clean() {
        return Err(ZkError::RewriteIncomplete {
            failures: rewrite.failures,
        });
    }

    let renamed = if options.dry_run {
        false
    } else {
        fs::rename(&request.source, &request.destination).map_err(|source| {
            ZkError::Rename {
                from: request.source.clone(),
                to: request.destination.clone(),
                source,
            }
        })?;
        tracing::info!(destination = %request.destination.display(), "renamed");
        true
    };

    Ok(MoveReport {
        request,
        rewrite,
        renamed,
    })
}

pub fn run(working_dir: &Path, from: &Path, to: &Path, options: MoveOptions) -> Result<CmdResult> {
    let report = execute(working_dir, from, to, options)?;
    let root = report.request.root.clone();
    let display = |path: &Path| {
        relative_to(&root, path).unwrap_or_else(|_| path.display().to_string())
    };

    let mut result = CmdResult::default();
    let verb = if options.dry_run { "Would update" } else { "Updated" };
    for change in &report.rewrite.changed {
        result.add_message(CmdMessage::info(format!(
            "{} {} ({} {})",
            verb,
            display(&change.path),
            change.links_rewritten,
            plural(change.links_rewritten, "link")
        )));
    }

    let links = report.rewrite.links_rewritten();
    let documents = report.rewrite.changed.len();
    let summary = format!(
        "{} {} to {}, {} {} in {} {}",
        if report.renamed { "Moved" } else { "Would move" },
        display(&report.request.source),
        display(&report.request.destination),
        links,
        plural(links, "link"),
        documents,
        plural(documents, "document")
    );
    if report.renamed {
        result.add_message(CmdMessage::success(summary));
    } else {
        result.add_message(CmdMessage::info(summary));
    }

    Ok(result.with_root(root).with_move_report(report))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
