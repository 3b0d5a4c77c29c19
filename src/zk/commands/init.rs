use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::root::{find_project_root, normalize, ZK_ROOT_FILENAME};
use std::fs;
use std::path::Path;

/// Mark `dir` as the root of a zettelkasten by creating an empty `.zk-root`.
pub fn run(dir: &Path) -> Result<CmdResult> {
    let dir = normalize(dir);
    let marker = dir.join(ZK_ROOT_FILENAME);
    let mut result = CmdResult::default();

    if marker.exists() {
        result.add_message(CmdMessage::info(format!(
            "Zettelkasten already initialized at {}",
            dir.display()
        )));
        return Ok(result.with_root(dir));
    }

    if let Some(outer) = dir.parent().and_then(|parent| find_project_root(parent).ok()) {
        result.add_message(CmdMessage::warning(format!(
            "Nested inside the zettelkasten at {}; links below {} now resolve from here",
            outer.display(),
            dir.display()
        )));
    }

    fs::write(&marker, "")?;
    result.add_message(CmdMessage::success(format!(
        "Initialized zettelkasten at {}",
        dir.display()
    )));
    Ok(result.with_root(dir))
}
