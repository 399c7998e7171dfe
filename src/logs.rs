//! Append-only access and error logs.
//!
//! Every line is written with a single `write_all` on a file opened in append
//! mode, so concurrent connection tasks never interleave within a line.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::http::request::Request;

const ACCESS_LOG: &str = "access.log";
const ERROR_LOG: &str = "error.log";

#[derive(Debug, Clone)]
pub struct ServerLog {
    access: PathBuf,
    error: PathBuf,
}

impl ServerLog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            access: dir.join(ACCESS_LOG),
            error: dir.join(ERROR_LOG),
        }
    }

    pub fn access_path(&self) -> &Path {
        &self.access
    }

    pub fn error_path(&self) -> &Path {
        &self.error
    }

    /// Records one request line: `[timestamp] - method, target, version`.
    ///
    /// The target is written as received.
    pub async fn access(&self, req: &Request) {
        let mut line = format!("[{}] - {}, ", timestamp(), req.method).into_bytes();
        line.extend_from_slice(&req.path);
        line.extend_from_slice(format!(", {}\n", req.version).as_bytes());
        append(&self.access, &line).await;
    }

    /// Records one fatal error: `[timestamp] - message`.
    pub async fn error(&self, message: impl Display) {
        let line = format!("[{}] - {}\n", timestamp(), message);
        append(&self.error, line.as_bytes()).await;
    }
}

// ctime(3) layout without the trailing newline
fn timestamp() -> String {
    Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

async fn append(path: &Path, line: &[u8]) {
    if let Err(e) = try_append(path, line).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to write log line");
    }
}

async fn try_append(path: &Path, line: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(0o664);

    let mut file = options.open(path).await?;
    file.write_all(line).await?;
    file.flush().await
}
