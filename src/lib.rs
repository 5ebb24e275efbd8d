//! payman - Payload snippet manager
//!
//! Keeps reusable text payloads in a folder/file tree stored as a single
//! JSON document, with deduplicating line-level edits.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::PayloadError;
