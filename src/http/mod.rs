//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, only
//! the request line is read, only GET is served, and the response carries a
//! status line and a Content-Type header. The body ends when the connection
//! closes.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine and request dispatch
//! - **`parser`**: Single bounded read and request line tokenization
//! - **`request`**: The parsed request line
//! - **`response`**: Status codes and body sources
//! - **`writer`**: Header framing and body streaming
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read of the request
//!        └──────┬──────┘
//!               │ Request line parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate method, classify target
//!        └──────┬───────────┘
//!               │ Body source ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Header, then listing or file chunks
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Shutdown, then drop
//!        └──────────────────┘
//! ```
//!
//! A failure in any state sends a best-effort 500 before closing.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
