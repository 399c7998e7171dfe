//! docserve - minimal document-root file server
//!
//! Core library: configuration, request handling, resource classification
//! and the accept loop.

pub mod cli;
pub mod config;
pub mod http;
pub mod logs;
pub mod resource;
pub mod server;
