//! The archive handle used by the calling resource manager

use crate::checksum;
use crate::command::{SevenZipLocator, SystemLocator, resolve_command};
use crate::config::{Config, ExtractionOptions};
use crate::error::{Error, Result};
use crate::executor::execute;
use crate::sanitize::sanitize_path;
use crate::types::{ChecksumType, ExecutionOutcome, OsFamily};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An archive on disk bound to the platform it will be extracted on
///
/// The shell-safe form of the path is computed once in [`Archive::new`] and reused
/// for every command built from this value. There are no setters: a different
/// path means a different `Archive`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archive {
    path: PathBuf,
    raw: String,
    sanitized: String,
    family: OsFamily,
}

impl Archive {
    /// Create a handle for `path` on the given OS family
    ///
    /// # Errors
    /// [`Error::NonUtf8Path`] if `path` is not valid UTF-8, since the command line
    /// would otherwise name a different file than the one on disk.
    pub fn new(path: impl AsRef<Path>, family: OsFamily) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = path
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(path.clone()))?
            .to_string();
        let sanitized = sanitize_path(&raw, &family);
        Ok(Self {
            path,
            raw,
            sanitized,
            family,
        })
    }

    /// Create a handle for `path` on the platform this crate runs on
    pub fn for_current_platform(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(path, OsFamily::current())
    }

    /// Archive path as given
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path quoted for the target shell
    pub fn sanitized_path(&self) -> &str {
        &self.sanitized
    }

    /// Target OS family
    pub fn os_family(&self) -> &OsFamily {
        &self.family
    }

    /// Hex digest of the archive, `None` for [`ChecksumType::None`]
    pub fn checksum(&self, algorithm: ChecksumType) -> Result<Option<String>> {
        checksum::checksum(&self.path, algorithm)
    }

    /// Compare the archive's digest with `expected`
    pub fn verify_checksum(&self, algorithm: ChecksumType, expected: &str) -> Result<()> {
        checksum::verify_checksum(&self.path, algorithm, expected)
    }

    /// Command line that would extract this archive
    pub fn command(
        &self,
        options: &ExtractionOptions,
        locator: &dyn SevenZipLocator,
    ) -> Result<String> {
        resolve_command(&self.raw, &self.sanitized, &self.family, options, locator)
    }

    /// Extract the archive into `dest` (the filesystem root when `None`).
    ///
    /// When `uid` or `gid` is set the archive is first made world-readable so the
    /// de-escalated process can open it.
    ///
    /// # Errors
    /// Any error from command resolution, plus [`crate::Error::Io`] and
    /// [`crate::Error::ExecutionFailed`] from running the command.
    pub fn extract(
        &self,
        dest: Option<&Path>,
        options: &ExtractionOptions,
        locator: &dyn SevenZipLocator,
    ) -> Result<ExecutionOutcome> {
        let dest = dest
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root_dir(&self.family));
        let command = self.command(options, locator)?;

        info!(archive = ?self.path, ?dest, "extracting archive");

        if options.changes_identity() {
            self.make_readable()?;
        }

        execute(&command, &dest, options.uid, options.gid)
    }

    /// Extract using the default options and tool settings from `config`
    pub fn extract_with_config(&self, dest: Option<&Path>, config: &Config) -> Result<ExecutionOutcome> {
        let locator = SystemLocator::new(config.tools.clone());
        self.extract(dest, &config.extract, &locator)
    }

    #[cfg(unix)]
    fn make_readable(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        debug!(archive = ?self.path, "relaxing archive permissions to 0644");
        std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o644))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn make_readable(&self) -> Result<()> {
        Ok(())
    }
}

/// Default extraction directory for a family
pub fn root_dir(family: &OsFamily) -> PathBuf {
    if family.is_windows() {
        PathBuf::from(r"C:\")
    } else {
        PathBuf::from("/")
    }
}
