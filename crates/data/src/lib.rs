//! Access to the ArchiveChain explorer backend.
//!
//! This crate provides:
//! - The [`ExplorerApi`] trait describing the backend REST collaborator
//! - [`HttpExplorerClient`], its `reqwest` implementation
//! - Client configuration loaded from the environment
//! - Retrieval of archived files with client-side content-type sniffing

/// HTTP client for the explorer backend.
pub mod client;
/// Client configuration.
pub mod config;
/// Error types.
pub mod error;
/// Archived file retrieval and content sniffing.
pub mod file_viewer;
/// Backend collaborator trait.
pub mod provider;

pub use client::HttpExplorerClient;
pub use config::ExplorerConfig;
pub use error::{ApiError, Result};
pub use file_viewer::{DisplayKind, FileView, RetrievedFile, sniff_content_type};
pub use provider::ExplorerApi;
