use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::http::parser::{parse_request_line, read_request_bytes};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode, TEXT_HTML};
use crate::http::writer::{ResponseWriter, write_header};
use crate::logs::ServerLog;
use crate::resource::{Resource, classify, read_listing};

/// One accepted client, handled for exactly one request.
pub struct Connection<S> {
    stream: S,
    cfg: Arc<Config>,
    log: ServerLog,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, cfg: Arc<Config>, log: ServerLog) -> Self {
        Self {
            stream,
            cfg,
            log,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to completion and closes it.
    ///
    /// On any failure the error is logged and a 500 is attempted. The stream
    /// is shut down on every path and closed when `self` is dropped.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.serve().await;

        if let Err(e) = &result {
            self.log.error(format!("{e:#}")).await;
            self.send_internal_error().await;
        }

        if let Err(e) = self.stream.shutdown().await {
            let e = anyhow::Error::new(e).context("can't close the connection");
            self.log.error(format!("{e:#}")).await;
            return result.and(Err(e));
        }

        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let req = self.read_request().await?;
                    self.log.access(&req).await;
                    self.state = ConnectionState::Processing(req);
                }

                ConnectionState::Processing(req) => {
                    let response = build_response(&req, &self.cfg).await?;
                    tracing::info!(
                        method = %req.method,
                        path = %req.path_lossy(),
                        status = response.status.as_u16(),
                        "Serving request"
                    );
                    let writer = ResponseWriter::new(response, self.cfg.server.chunk_size);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Request> {
        let limit = self.cfg.server.request_buffer_size;
        let bytes = read_request_bytes(&mut self.stream, limit)
            .await
            .context("can't read request from client")?;

        Ok(parse_request_line(&bytes))
    }

    async fn send_internal_error(&mut self) {
        let page = self.cfg.error_page(StatusCode::InternalServerError.as_u16());

        let result = match Response::error_page(StatusCode::InternalServerError, &page).await {
            Ok(response) => {
                ResponseWriter::new(response, self.cfg.server.chunk_size)
                    .write_to_stream(&mut self.stream)
                    .await
            }
            Err(e) => {
                self.log
                    .error(format!("can't open file {}: {e}", page.display()))
                    .await;
                write_header(&mut self.stream, StatusCode::InternalServerError, TEXT_HTML)
                    .await
                    .map_err(anyhow::Error::from)
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to send 500 response");
        }
    }
}

/// Maps a request onto the response it gets.
///
/// 405 for any method but GET, then by classification: listing for the
/// root and directories, the file for supported types, 415 and 404 pages
/// otherwise.
pub async fn build_response(req: &Request, cfg: &Config) -> anyhow::Result<Response> {
    if !req.is_get() {
        return error_response(StatusCode::MethodNotAllowed, cfg).await;
    }

    let resource = classify(&cfg.static_files, &req.path)
        .await
        .with_context(|| {
            format!("can't decide if {} is a file or a directory", req.path_lossy())
        })?;

    match resource {
        Resource::Root => listing_response(&cfg.static_files.document_root).await,
        Resource::Directory(path) => listing_response(&path).await,
        Resource::Supported { path, content_type } => Response::file(&path, content_type)
            .await
            .with_context(|| format!("can't open file {}", path.display())),
        Resource::Unsupported(_) => error_response(StatusCode::UnsupportedMediaType, cfg).await,
        Resource::Missing => error_response(StatusCode::NotFound, cfg).await,
    }
}

async fn listing_response(dir: &Path) -> anyhow::Result<Response> {
    let names = read_listing(dir)
        .await
        .with_context(|| format!("can't read directory {}", dir.display()))?;

    Ok(Response::listing(names))
}

async fn error_response(status: StatusCode, cfg: &Config) -> anyhow::Result<Response> {
    let page = cfg.error_page(status.as_u16());
    Response::error_page(status, &page)
        .await
        .with_context(|| format!("can't open file {}", page.display()))
}
