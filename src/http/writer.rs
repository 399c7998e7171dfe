use std::ffi::OsString;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

const LISTING_HEADER: &str = "<!DOCTYPE html><html><body><ul>";
const LISTING_FOOTER: &str = "</ul></body></html>";

/// Status line, Content-Type and the blank line, nothing else.
pub fn serialize_header(status: StatusCode, content_type: &str) -> Vec<u8> {
    format!(
        "{} {} {}\r\nContent-Type: {}\r\n\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase(),
        content_type
    )
    .into_bytes()
}

/// Writes the whole header with a single write call.
pub async fn write_header<S>(stream: &mut S, status: StatusCode, content_type: &str) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&serialize_header(status, content_type)).await
}

/// Streams one response: header first, then the body.
pub struct ResponseWriter {
    response: Response,
    chunk_size: usize,
}

impl ResponseWriter {
    pub fn new(response: Response, chunk_size: usize) -> Self {
        Self {
            response,
            chunk_size,
        }
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        write_header(stream, self.response.status, &self.response.content_type)
            .await
            .context("can't send data to client")?;

        match &mut self.response.body {
            Body::Listing(names) => write_listing(stream, names).await,
            Body::File(file) => {
                let mut chunk = vec![0u8; self.chunk_size];
                loop {
                    let n = file.read(&mut chunk).await.context("can't read file")?;
                    if n == 0 {
                        break;
                    }
                    stream
                        .write_all(&chunk[..n])
                        .await
                        .context("can't send data to client")?;
                }
                Ok(())
            }
        }
    }
}

async fn write_listing<S>(stream: &mut S, names: &[OsString]) -> anyhow::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let result: std::io::Result<()> = async {
        stream.write_all(LISTING_HEADER.as_bytes()).await?;
        for name in names {
            let name = name.as_encoded_bytes();
            let mut item = Vec::with_capacity(name.len() + 9);
            item.extend_from_slice(b"<li>");
            item.extend_from_slice(name);
            item.extend_from_slice(b"</li>");
            stream.write_all(&item).await?;
        }
        stream.write_all(LISTING_FOOTER.as_bytes()).await
    }
    .await;

    result.context("can't send data to client")
}
