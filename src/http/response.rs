use std::ffi::OsString;
use std::io;
use std::path::Path;

use tokio::fs::File;

pub const TEXT_HTML: &str = "text/html";

/// HTTP status codes the server answers with.
///
/// - `Ok` (200): Listing or file served
/// - `NotFound` (404): Nothing servable at the target
/// - `MethodNotAllowed` (405): Method other than GET
/// - `UnsupportedMediaType` (415): Regular file with an unknown extension
/// - `InternalServerError` (500): I/O failure while handling the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the reason phrase sent on the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Where the body bytes come from.
///
/// The source is prepared (directory read, file opened) before anything is
/// written to the client, so a failure here can still become a clean 500.
#[derive(Debug)]
pub enum Body {
    /// Sorted entry names rendered as an HTML list, bytes as on disk
    Listing(Vec<OsString>),
    /// An open file streamed in chunks
    File(File),
}

/// A response ready to be streamed to the client.
///
/// There is no Content-Length: the end of the body is signaled by closing
/// the connection.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Body,
}

impl Response {
    /// 200 with a directory listing.
    pub fn listing(names: Vec<OsString>) -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: TEXT_HTML.to_string(),
            body: Body::Listing(names),
        }
    }

    /// 200 with the bytes of `path`.
    pub async fn file(path: &Path, content_type: impl Into<String>) -> io::Result<Self> {
        let file = File::open(path).await?;
        Ok(Self {
            status: StatusCode::Ok,
            content_type: content_type.into(),
            body: Body::File(file),
        })
    }

    /// An error status whose body is the fixed page at `page`.
    pub async fn error_page(status: StatusCode, page: &Path) -> io::Result<Self> {
        let file = File::open(page).await?;
        Ok(Self {
            status,
            content_type: TEXT_HTML.to_string(),
            body: Body::File(file),
        })
    }
}
