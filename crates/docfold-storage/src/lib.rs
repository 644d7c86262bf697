//! Storage abstraction for the docfold documentation engine.
//!
//! This crate provides a [`Storage`] trait for abstracting content scanning
//! and retrieval from the underlying backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between registry logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, `exists()` and `mtime()` methods
//! - [`FsStorage`] implementation for filesystem backends with mtime-cached
//!   title extraction
//! - [`MockStorage`] for testing (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docfold_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let documents = storage.scan()?;
//! for doc in documents {
//!     println!("{}: {}", doc.route, doc.title);
//! }
//! ```

mod frontmatter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use frontmatter::{Frontmatter, split_frontmatter};
pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, Storage, StorageError, StorageErrorKind};
