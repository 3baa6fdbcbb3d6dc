//! Merging caller options with a tool's default flags

use crate::config::FlagOptions;
use crate::error::{Error, Result};

/// Effective flags for one tool invocation.
///
/// - [`FlagOptions::Unset`] keeps `default`
/// - [`FlagOptions::Literal`] replaces the flags of every tool verbatim
/// - [`FlagOptions::PerTool`] picks the entry for `tool`; a missing entry is an
///   [`Error::InvalidOptions`] rather than silently running with no flags
///
/// # Examples
///
/// ```
/// use archive_exec::command::resolve_flags;
/// use archive_exec::FlagOptions;
///
/// assert_eq!(resolve_flags("xf", &FlagOptions::Unset, "tar").unwrap(), "xf");
/// assert_eq!(resolve_flags("xf", &FlagOptions::from("xvf"), "tar").unwrap(), "xvf");
/// ```
pub fn resolve_flags(default: &str, options: &FlagOptions, tool: &str) -> Result<String> {
    match options {
        FlagOptions::Unset => Ok(default.to_string()),
        FlagOptions::Literal(flags) => Ok(flags.clone()),
        FlagOptions::PerTool(per_tool) => per_tool.get(tool).cloned().ok_or_else(|| {
            Error::invalid_options(
                tool,
                format!(
                    "no entry for '{}' in options mapping (keys: {})",
                    tool,
                    per_tool.keys().cloned().collect::<Vec<_>>().join(", ")
                ),
            )
        }),
    }
}

/// Flags placed between a custom command prefix and the archive path.
///
/// There is no tool to look up here, so only unset (empty) or literal flags apply.
pub(crate) fn custom_prefix_flags(options: &FlagOptions) -> Result<String> {
    match options {
        FlagOptions::Unset => Ok(String::new()),
        FlagOptions::Literal(flags) => Ok(flags.clone()),
        FlagOptions::PerTool(_) => Err(Error::invalid_options(
            "",
            "a per-tool options mapping cannot be applied to a custom command",
        )),
    }
}
