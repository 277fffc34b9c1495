//! Blur QA Adapters - External adapters for blur-qa.
//!
//! This crate provides adapters for:
//! - Filesystem image listing and loading
//! - HTTP image download
//! - In-memory decoding of received uploads

pub mod fs;
pub mod http;
pub mod memory;
pub mod url;

pub use fs::{FsImageLoader, FsImageSource};
pub use http::{HttpImageLoader, DEFAULT_TIMEOUT};
pub use memory::MemoryImageLoader;
pub use url::{is_remote, UrlImageLoader};
