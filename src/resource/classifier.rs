use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;

/// What a request target denotes on disk.
///
/// Computed fresh for every request; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The bare document root was requested
    Root,
    /// A directory below the document root
    Directory(PathBuf),
    /// A regular file whose name matches the extension table
    Supported { path: PathBuf, content_type: String },
    /// A regular file with no matching extension
    Unsupported(PathBuf),
    /// Nothing servable at this target
    Missing,
}

/// Joins `target`, minus its leading `/`, onto the document root.
///
/// Returns `None` for the bare root. Targets that would leave the document
/// root (a `..` component, or an absolute remainder such as `//etc`) never
/// resolve. The target bytes become the file name as is; on unix no decoding
/// happens at all.
pub fn resolve(document_root: &Path, target: &[u8]) -> Option<Resolved> {
    let relative = target.strip_prefix(b"/").unwrap_or(target);
    if relative.is_empty() {
        return None;
    }
    let relative = os_str_from_bytes(relative);
    let escapes = Path::new(&relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Some(Resolved::Escapes);
    }
    Some(Resolved::Path(document_root.join(&*relative)))
}

#[cfg(unix)]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => Cow::Borrowed(OsStr::new(s)),
        Cow::Owned(s) => Cow::Owned(s.into()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Path(PathBuf),
    Escapes,
}

/// Classifies `target`. First match wins: root, directory, regular file
/// (supported or not), missing.
///
/// Links are not followed. "Absent" covers both `ENOENT` and `ENOTDIR`: a
/// target that continues below a regular file (`/index.html/x`) is a 404
/// rather than a server error, which is wider than a strict `ENOENT` check.
/// Any other metadata error is returned as is: it may hide a permission or
/// I/O problem and must not be reported as a 404.
pub async fn classify(cfg: &StaticFilesConfig, target: &[u8]) -> io::Result<Resource> {
    let path = match resolve(&cfg.document_root, target) {
        None => return Ok(Resource::Root),
        Some(Resolved::Escapes) => return Ok(Resource::Missing),
        Some(Resolved::Path(path)) => path,
    };

    let meta = match tokio::fs::symlink_metadata(&path).await {
        Ok(meta) => meta,
        Err(e) if is_absent(&e) => return Ok(Resource::Missing),
        Err(e) => return Err(e),
    };

    let file_type = meta.file_type();
    if file_type.is_dir() {
        return Ok(Resource::Directory(path));
    }
    if !file_type.is_file() {
        return Ok(Resource::Missing);
    }

    let content_type = cfg
        .content_type_for(path.as_os_str().as_encoded_bytes())
        .map(str::to_string);
    match content_type {
        Some(content_type) => Ok(Resource::Supported { path, content_type }),
        None => Ok(Resource::Unsupported(path)),
    }
}

fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
