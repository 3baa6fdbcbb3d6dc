//! Extraction command resolution
//!
//! Turns an archive name, its sanitized path and the target OS family into the
//! shell command line that extracts it.
//!
//! ## Resolution order
//!
//! 1. A `custom_command` containing `%s` is used as a template for the path.
//! 2. A `custom_command` without `%s` is a prefix: `<custom> <flags> <path>`.
//! 3. On Windows: 7-zip (`x -aoa`), or a PowerShell script for `.zip` files.
//! 4. Elsewhere: the first matching rule of the extension table.

mod flags;
mod locate;
mod rules;
pub mod script;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use flags::resolve_flags;
pub use locate::{SevenZipLocator, SystemLocator};

use crate::config::ExtractionOptions;
use crate::error::{Error, Result};
use crate::types::OsFamily;
use std::path::PathBuf;
use tracing::debug;

/// Placeholder in `custom_command` replaced by the sanitized archive path
pub const PATH_PLACEHOLDER: &str = "%s";

/// Default 7-zip flags: extract with full paths, overwrite without prompting
const SEVENZIP_DEFAULT_FLAGS: &str = "x -aoa";

/// Resolve the command line extracting `file`.
///
/// # Arguments
/// * `file` - Archive path as given by the caller; its suffix selects the tool
/// * `safe_path` - The same path, already sanitized for `family`
/// * `family` - Target OS family
/// * `options` - Custom command and flag overrides
/// * `locator` - 7-zip lookup, consulted on Windows only
///
/// # Errors
/// * [`Error::InvalidOptions`] - options cannot be applied to the selected tool,
///   or `custom_command` is blank
/// * [`Error::UnknownFiletype`] - no rule matches `file` (non-Windows)
/// * [`Error::ToolNotFound`] - no 7-zip and not a `.zip` (Windows)
///
/// # Example
/// ```
/// use archive_exec::command::resolve_command;
/// use archive_exec::{ExtractionOptions, OsFamily};
///
/// let no_7zip = || -> Option<String> { None };
/// let cmd = resolve_command(
///     "/tmp/app.tar.gz",
///     "/tmp/app.tar.gz",
///     &OsFamily::Solaris,
///     &ExtractionOptions::default(),
///     &no_7zip,
/// )?;
/// assert_eq!(cmd, "gunzip -dc /tmp/app.tar.gz | tar xf -");
/// # Ok::<(), archive_exec::Error>(())
/// ```
pub fn resolve_command(
    file: &str,
    safe_path: &str,
    family: &OsFamily,
    options: &ExtractionOptions,
    locator: &dyn SevenZipLocator,
) -> Result<String> {
    if let Some(custom) = &options.custom_command {
        return custom_command(custom, safe_path, options);
    }

    if family.is_windows() {
        windows_command(file, safe_path, options, locator)
    } else {
        let rule = rules::find_rule(file).ok_or_else(|| Error::UnknownFiletype(PathBuf::from(file)))?;
        debug!(file, rule = rule.name, %family, "matched extraction rule");
        rule.build(safe_path, family, &options.options)
    }
}

fn custom_command(custom: &str, safe_path: &str, options: &ExtractionOptions) -> Result<String> {
    if custom.trim().is_empty() {
        return Err(Error::invalid_options(
            "custom_command",
            "custom command must not be blank",
        ));
    }

    if custom.contains(PATH_PLACEHOLDER) {
        return Ok(custom.replacen(PATH_PLACEHOLDER, safe_path, 1));
    }

    let flags = flags::custom_prefix_flags(&options.options)?;
    Ok(format!("{custom} {flags} {safe_path}"))
}

fn windows_command(
    file: &str,
    safe_path: &str,
    options: &ExtractionOptions,
    locator: &dyn SevenZipLocator,
) -> Result<String> {
    if let Some(tool) = locator.locate() {
        let flags = resolve_flags(SEVENZIP_DEFAULT_FLAGS, &options.options, "7z")?;
        debug!(file, tool = %tool, "extracting with 7-zip");
        return Ok(format!("{} {flags} {safe_path}", quote_tool(&tool)));
    }

    if file.ends_with(".zip") {
        debug!(file, "7-zip not found, falling back to PowerShell zip extraction");
        return Ok(script::zip_fallback_command(safe_path));
    }

    Err(Error::ToolNotFound(format!(
        "7z.exe not available to extract {}",
        file
    )))
}

/// Quote a tool path containing spaces (e.g. under `C:\Program Files`)
fn quote_tool(tool: &str) -> String {
    if tool.contains(' ') && !tool.starts_with('"') {
        format!("\"{tool}\"")
    } else {
        tool.to_string()
    }
}
