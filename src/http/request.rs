use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// HTTP request method.
///
/// Only retrieval is served. Every other token is kept verbatim so it can be
/// echoed into the access log before the request is answered with
/// 405 Method Not Allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// Any other token, including the empty one
    Other(String),
}

impl Method {
    /// Parses a method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::Get);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request line.
///
/// Only the three tokens of the first line are kept. Headers and body are
/// never looked at. A missing token is empty.
///
/// The target is kept as raw bytes: file names need not be UTF-8, and a
/// target must name the same file the listing showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request method
    pub method: Method,
    /// The request target as sent (e.g., "/img/a.png")
    pub path: Bytes,
    /// Protocol version token, only used for the access log
    pub version: String,
}

impl Request {
    pub fn new(method: &str, path: impl Into<Bytes>, version: impl Into<String>) -> Self {
        Self {
            method: Method::parse(method),
            path: path.into(),
            version: version.into(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    /// The target for display in messages; invalid UTF-8 is replaced.
    pub fn path_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.path)
    }
}
