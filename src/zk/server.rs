//! Static file server over a zettelkasten.
//!
//! The router is an ordinary value built by [`router`]; nothing is registered
//! globally. Requests are read-only and independent of each other.

use crate::config::ZkConfig;
use crate::error::{Result, ZkError};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use std::ffi::OsString;
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

/// What a request path maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Listing(PathBuf),
    Redirect(String),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct StaticSite {
    root: PathBuf,
    document_ext: String,
    index_file: String,
}

impl StaticSite {
    pub fn new(root: PathBuf, config: &ZkConfig) -> Self {
        Self {
            root,
            document_ext: config.document_ext.clone(),
            index_file: config.index_file.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a URL path, or `None` if it would leave the root.
    pub fn local_path(&self, url_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(url_path).ok()?;
        let mut path = self.root.clone();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                s if s.contains('\\') || s.contains('\0') => return None,
                s => path.push(s),
            }
        }
        Some(path)
    }

    pub fn resolve(&self, url_path: &str) -> Resolved {
        let Some(path) = self.local_path(url_path) else {
            return Resolved::NotFound;
        };

        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => {
                if !url_path.ends_with('/') {
                    return Resolved::Redirect(format!("{}/", url_path));
                }
                let index = path.join(&self.index_file);
                if index.is_file() {
                    Resolved::File(index)
                } else {
                    Resolved::Listing(path)
                }
            }
            Ok(meta) if meta.is_file() => Resolved::File(path),
            _ if !url_path.ends_with('/') => {
                // Extension-less links: /notes/a serves notes/a.html
                let mut pretty = OsString::from(path.as_os_str());
                pretty.push(&self.document_ext);
                let pretty = PathBuf::from(pretty);
                if pretty.is_file() {
                    Resolved::File(pretty)
                } else {
                    Resolved::NotFound
                }
            }
            _ => Resolved::NotFound,
        }
    }

    /// Minimal HTML index of a directory, directories first marked with `/`.
    pub fn listing(&self, dir: &Path) -> std::io::Result<String> {
        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let mut name = entry.file_name().to_string_lossy().into_owned();
                if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    name.push('/');
                }
                name
            })
            .collect();
        names.sort();

        let mut html = String::from("<!DOCTYPE html>\n<pre>\n");
        for name in names {
            let (stem, slash) = match name.strip_suffix('/') {
                Some(stem) => (stem, "/"),
                None => (name.as_str(), ""),
            };
            html.push_str(&format!(
                "<a href=\"{}{}\">{}</a>\n",
                urlencoding::encode(stem),
                slash,
                escape_html(&name)
            ));
        }
        html.push_str("</pre>\n");
        Ok(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "text/xml; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

async fn serve_path(State(site): State<Arc<StaticSite>>, uri: Uri) -> Response {
    match site.resolve(uri.path()) {
        Resolved::File(path) => match tokio::fs::read(&path).await {
            Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to read file");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Resolved::Listing(dir) => match site.listing(&dir) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::warn!(path = %dir.display(), %err, "failed to list directory");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Resolved::Redirect(location) => Redirect::permanent(&location).into_response(),
        Resolved::NotFound => (StatusCode::NOT_FOUND, "404 page not found\n").into_response(),
    }
}

pub fn router(site: StaticSite) -> Router {
    Router::new()
        .fallback(get(serve_path))
        .with_state(Arc::new(site))
}

/// Bind `localhost:port` and serve until the process ends. `on_ready` runs
/// once the socket is bound.
pub fn serve<F>(site: StaticSite, port: u16, on_ready: F) -> Result<()>
where
    F: FnOnce(SocketAddr),
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_server(site, port, on_ready))
}

async fn run_server<F>(site: StaticSite, port: u16, on_ready: F) -> Result<()>
where
    F: FnOnce(SocketAddr),
{
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
        .await
        .map_err(|e| ZkError::Server(e.to_string()))?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, root = %site.root().display(), "serving zettelkasten");
    on_ready(addr);

    axum::serve(listener, router(site))
        .await
        .map_err(|e| ZkError::Server(e.to_string()))
}
