//! # archive-exec
//!
//! Archive extraction backend for a configuration-management resource.
//!
//! Given an archive path and the target OS family, this crate picks the external
//! tool that extracts it (`tar`, `gunzip`, `unzip`, `7z`, ...), builds a shell-safe
//! command line, and runs it in a destination directory, optionally as another
//! user and group. It also computes archive checksums.
//!
//! ## Resolution
//!
//! - **Custom command** - a caller-supplied command always wins; `%s` marks the path
//! - **Windows** - 7-zip when installed, otherwise a PowerShell script for `.zip`
//! - **Everything else** - an ordered suffix table; `.tar.gz` is piped through
//!   `gunzip` on Solaris and AIX, whose `tar` has no `z` flag
//!
//! ## Quick Start
//!
//! ```no_run
//! use archive_exec::{Archive, ExtractionOptions, FlagOptions, SystemLocator};
//! use std::path::Path;
//!
//! let archive = Archive::for_current_platform("/tmp/app.tar.gz")?;
//! let options = ExtractionOptions {
//!     options: FlagOptions::from("xzvf"),
//!     uid: Some(1000),
//!     ..Default::default()
//! };
//!
//! let outcome = archive.extract(Some(Path::new("/opt/app")), &options, &SystemLocator::default())?;
//! println!("{}", outcome.output);
//! # Ok::<(), archive_exec::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archive handle and extraction entry point
pub mod archive;
/// Archive digests
pub mod checksum;
/// Extraction command resolution
pub mod command;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Shell execution of extraction commands
pub mod executor;
/// Shell path sanitization
pub mod sanitize;
/// Core types
pub mod types;

// Re-export commonly used types
pub use archive::Archive;
pub use command::{SevenZipLocator, SystemLocator};
pub use config::{Config, ExtractionOptions, FlagOptions, ToolsConfig};
pub use error::{Error, Result};
pub use types::{ChecksumType, ExecutionOutcome, OsFamily};
