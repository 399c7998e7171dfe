#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use docserve::config::Config;
use tempfile::TempDir;

pub const PAGE_404: &str = "<html><body>404 Not Found</body></html>";
pub const PAGE_405: &str = "<html><body>405 Method Not Allowed</body></html>";
pub const PAGE_415: &str = "<html><body>415 Unsupported Media Type</body></html>";
pub const PAGE_500: &str = "<html><body>500 Internal Server Error</body></html>";

/// A throwaway `/var/www` lookalike: document root, error pages and logs.
pub struct Site {
    pub dir: TempDir,
    pub cfg: Config,
}

impl Site {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let htdocs = dir.path().join("htdocs");
        let responses = dir.path().join("responses");
        let logs = dir.path().join("logs");
        for d in [&htdocs, &responses, &logs] {
            fs::create_dir_all(d).unwrap();
        }

        fs::write(responses.join("404.html"), PAGE_404).unwrap();
        fs::write(responses.join("405.html"), PAGE_405).unwrap();
        fs::write(responses.join("415.html"), PAGE_415).unwrap();
        fs::write(responses.join("500.html"), PAGE_500).unwrap();

        let mut cfg = Config::default();
        cfg.static_files.document_root = htdocs;
        cfg.static_files.responses_dir = responses;
        cfg.logging.dir = logs;

        Self { dir, cfg }
    }

    /// Root with `index.html` and `img/` holding `a.png` and `b.gif`.
    pub fn with_sample_tree() -> Self {
        let site = Self::new();
        site.write("index.html", b"<h1>home</h1>");
        site.mkdir("img");
        site.write("img/a.png", b"\x89PNG\r\n\x1a\nfake-png");
        site.write("img/b.gif", b"GIF89a-fake");
        site
    }

    pub fn root(&self) -> &Path {
        &self.cfg.static_files.document_root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &[u8]) {
        fs::write(self.path(rel), contents).unwrap();
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.path(rel)).unwrap();
    }

    pub fn access_log(&self) -> String {
        fs::read_to_string(self.cfg.logging.dir.join("access.log")).unwrap_or_default()
    }

    pub fn error_log(&self) -> String {
        fs::read_to_string(self.cfg.logging.dir.join("error.log")).unwrap_or_default()
    }
}

/// Splits a raw response into its header block and body.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(raw[..end + 4].to_vec()).unwrap();
    (head, raw[end + 4..].to_vec())
}

pub fn listing_body(names: &[&str]) -> String {
    let items: String = names.iter().map(|n| format!("<li>{n}</li>")).collect();
    format!("<!DOCTYPE html><html><body><ul>{items}</ul></body></html>")
}
