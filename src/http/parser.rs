use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::request::Request;

/// Reads the request with one bounded read of at most `limit` bytes.
///
/// Nothing is accumulated across reads: a request line split over several
/// segments, or longer than `limit`, is parsed from whatever arrived first.
pub async fn read_request_bytes<S>(stream: &mut S, limit: usize) -> std::io::Result<Bytes>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::zeroed(limit);
    let n = stream.read(&mut buf[..]).await?;
    buf.truncate(n);
    Ok(buf.freeze())
}

/// Tokenizes the first line into method, target and version.
///
/// The target is copied byte for byte; method and version are only ever
/// compared or logged, so they are decoded lossily.
pub fn parse_request_line(buf: &[u8]) -> Request {
    let line_end = buf.iter().position(|&b| b == b'\n').unwrap_or(buf.len());

    let mut parts = buf[..line_end]
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty());
    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default();

    Request::new(
        &String::from_utf8_lossy(method),
        Bytes::copy_from_slice(path),
        String::from_utf8_lossy(version),
    )
}
