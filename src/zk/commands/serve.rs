use crate::config::ZkConfig;
use crate::error::Result;
use crate::root::{find_project_root, normalize};
use crate::server::{self, StaticSite};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Where and how `zk serve` will listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeTarget {
    pub root: PathBuf,
    pub port: u16,
    pub config: ZkConfig,
}

/// Find the zettelkasten containing `dir` (relative to `working_dir`) and
/// settle on a port: the explicit one, else the project's configured one.
pub fn resolve(working_dir: &Path, dir: &Path, port: Option<u16>) -> Result<ServeTarget> {
    let root = find_project_root(&normalize(&working_dir.join(dir)))?;
    let config = ZkConfig::load(&root)?;
    let port = port.unwrap_or(config.port);
    Ok(ServeTarget { root, port, config })
}

pub fn run<F>(target: ServeTarget, on_ready: F) -> Result<()>
where
    F: FnOnce(SocketAddr),
{
    let site = StaticSite::new(target.root, &target.config);
    server::serve(site, target.port, on_ready)
}
