//! Resolution of request targets against the document root.
//!
//! - **`classifier`**: decides what a target denotes on disk
//! - **`listing`**: reads the visible entries of a directory

pub mod classifier;
pub mod listing;

pub use classifier::{Resolved, Resource, classify, resolve};
pub use listing::read_listing;
