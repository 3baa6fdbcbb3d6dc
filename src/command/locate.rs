//! 7-zip discovery for Windows extraction

use crate::config::ToolsConfig;
use std::path::PathBuf;
use tracing::debug;

/// Finds a 7-zip compatible executable
///
/// The resolver only asks for a locator on Windows; tests substitute a closure
/// to simulate an installed or missing tool.
pub trait SevenZipLocator {
    /// Command (bare name or full path) that runs 7-zip, `None` if unavailable
    fn locate(&self) -> Option<String>;
}

impl<F> SevenZipLocator for F
where
    F: Fn() -> Option<String>,
{
    fn locate(&self) -> Option<String> {
        self()
    }
}

/// Locator backed by the real filesystem and `PATH`
///
/// Search order: explicit `sevenzip_path`, then `7z` on `PATH` (when
/// `search_path` is enabled), then `7z.exe` in each configured install directory.
#[derive(Clone, Debug, Default)]
pub struct SystemLocator {
    tools: ToolsConfig,
}

impl SystemLocator {
    /// Create a locator from tool settings
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    fn find(&self) -> Option<PathBuf> {
        if let Some(path) = &self.tools.sevenzip_path
            && path.is_file()
        {
            return Some(path.clone());
        }

        if self.tools.search_path
            && let Ok(path) = which::which("7z")
        {
            return Some(path);
        }

        self.tools
            .sevenzip_dirs
            .iter()
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join("7z.exe"))
    }
}

impl SevenZipLocator for SystemLocator {
    fn locate(&self) -> Option<String> {
        let found = self.find();
        debug!(?found, "7-zip lookup");
        found.map(|path| path.to_string_lossy().into_owned())
    }
}
