//! Static file server for local UI development.
//!
//! Serves the contents of one root directory over plain HTTP GET. Each
//! request ends in exactly one of:
//!   - 200 — file contents, MIME type by extension
//!   - 403 — decoded path escapes the root
//!   - 404 — everything else (missing, unreadable, directory without index)
//!
//! No ranges, caching headers or compression: the whole file is read into
//! memory and written in one response.

pub mod resolve;

use std::path::{Path, PathBuf};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use resolve::{content_type_for, has_trailing_separator, Resolution, INDEX_DOCUMENT};

pub const DEFAULT_PORT: u16 = 5500;
pub const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Invalid static root {path}: {source}")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Static server settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub root: PathBuf,
    pub host: String,
    pub port: u16,
    /// Component-wise root containment instead of the string-prefix check.
    pub strict_root: bool,
}

impl ServeConfig {
    /// Config for `root` with default host/port and the string-prefix guard.
    ///
    /// `root` is used as given; callers serving real traffic should pass an
    /// absolute path (see `from_env`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            strict_root: false,
        }
    }

    /// Build from `root_arg` (CLI), then `STATIC_ROOT`, then the current
    /// directory. Also reads `PORT`, `STATIC_HOST`, `STATIC_STRICT_ROOT`.
    ///
    /// The root is canonicalised so the prefix check compares absolute paths.
    pub fn from_env(root_arg: Option<&str>) -> Result<Self, ServeError> {
        let raw_root = root_arg
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("STATIC_ROOT")
                    .ok()
                    .filter(|r| !r.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from("."));
        let root = std::fs::canonicalize(&raw_root).map_err(|source| ServeError::InvalidRoot {
            path: raw_root.clone(),
            source,
        })?;

        let port = match std::env::var("PORT") {
            Ok(p) if !p.trim().is_empty() => p
                .trim()
                .parse::<u16>()
                .map_err(|_| ServeError::InvalidPort(p.clone()))?,
            _ => DEFAULT_PORT,
        };
        let host = std::env::var("STATIC_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let strict_root = std::env::var("STATIC_STRICT_ROOT")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            root,
            host,
            port,
            strict_root,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Router serving every GET path from the configured root.
pub fn router(config: ServeConfig) -> Router {
    Router::new()
        .route("/", get(serve_static))
        .route("/*path", get(serve_static))
        .with_state(config)
}

/// Bind and serve until the process exits.
pub async fn run(config: ServeConfig) -> Result<(), ServeError> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    log::info!("[SERVE] Serving {}", config.root.display());
    log::info!("[SERVE] Static server running at http://localhost:{}/", config.port);
    if config.strict_root {
        log::info!("[SERVE] Strict root containment enabled");
    }

    axum::serve(listener, router(config)).await?;
    Ok(())
}

async fn serve_static(State(config): State<ServeConfig>, uri: Uri) -> Response {
    let candidate = match resolve::resolve(&config.root, uri.path(), config.strict_root) {
        Resolution::Candidate(path) => path,
        Resolution::Forbidden => {
            log::warn!("[SERVE] 403 {} escapes root", uri.path());
            return forbidden();
        }
        Resolution::Undecodable => {
            log::debug!("[SERVE] 404 {} (bad percent-encoding)", uri.path());
            return not_found();
        }
    };

    // A file requested with a trailing slash falls through to the index
    // lookup below, which cannot succeed under a file.
    let target = match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_dir() => candidate.join(INDEX_DOCUMENT),
        Ok(_) if !has_trailing_separator(&candidate) => candidate,
        _ => {
            let alt = candidate.join(INDEX_DOCUMENT);
            match tokio::fs::metadata(&alt).await {
                Ok(meta) if meta.is_file() => alt,
                _ => {
                    log::debug!("[SERVE] 404 {}", uri.path());
                    return not_found();
                }
            }
        }
    };

    serve_file(&target).await
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let mime = content_type_for(path);
            log::debug!("[SERVE] 200 {} ({}, {} bytes)", path.display(), mime, bytes.len());
            (StatusCode::OK, [(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Err(e) => {
            log::debug!("[SERVE] 404 {}: {}", path.display(), e);
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], "404 Not Found").into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, [(header::CONTENT_TYPE, "text/plain")], "403 Forbidden").into_response()
}
