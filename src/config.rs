//! Configuration types for archive-exec

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Caller-supplied flags for the underlying extraction tool
///
/// Serialized untagged: `null` is [`FlagOptions::Unset`], a string is
/// [`FlagOptions::Literal`] and an object is [`FlagOptions::PerTool`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagOptions {
    /// Use each tool's default flags
    #[default]
    Unset,
    /// Replace the flags of every tool invocation with this string
    Literal(String),
    /// Flags per tool key (`tar`, `gunzip`, `bunzip`, `bunzip2`, `unxz`, `zip`, `7z`)
    PerTool(BTreeMap<String, String>),
}

impl FlagOptions {
    /// Build options from a loosely-typed JSON value
    ///
    /// Anything other than `null`, a string, or an object of strings is rejected
    /// with [`Error::InvalidOptions`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(FlagOptions::Unset),
            Value::String(flags) => Ok(FlagOptions::Literal(flags)),
            Value::Object(entries) => {
                let mut per_tool = BTreeMap::new();
                for (tool, flags) in entries {
                    match flags {
                        Value::String(flags) => {
                            per_tool.insert(tool, flags);
                        }
                        other => {
                            return Err(Error::invalid_options(
                                tool,
                                format!("expected a flag string, got {}", other),
                            ));
                        }
                    }
                }
                Ok(FlagOptions::PerTool(per_tool))
            }
            other => Err(Error::invalid_options(
                "",
                format!(
                    "expected a flag string or a mapping of tool name to flags, got {}",
                    other
                ),
            )),
        }
    }

    /// Whether no flags were supplied
    pub fn is_unset(&self) -> bool {
        matches!(self, FlagOptions::Unset)
    }
}

impl From<&str> for FlagOptions {
    fn from(flags: &str) -> Self {
        FlagOptions::Literal(flags.to_string())
    }
}

impl<'de> Deserialize<'de> for FlagOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        FlagOptions::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Options controlling a single extraction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Full replacement command; `%s` is substituted with the sanitized archive path,
    /// otherwise the command is used as a prefix followed by flags and path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_command: Option<String>,

    /// Flags merged into the derived command (default: unset)
    #[serde(default, skip_serializing_if = "FlagOptions::is_unset")]
    pub options: FlagOptions,

    /// Run the extraction as this user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,

    /// Run the extraction as this group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
}

impl ExtractionOptions {
    /// Whether the subprocess drops to another identity
    pub fn changes_identity(&self) -> bool {
        self.uid.is_some() || self.gid.is_some()
    }
}

/// External tool discovery (7-zip on Windows)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to a 7-zip executable (auto-detected if None)
    #[serde(default)]
    pub sevenzip_path: Option<PathBuf>,

    /// Whether to search PATH for 7-zip if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Install directories checked for `7z.exe` after PATH
    #[serde(default = "default_sevenzip_dirs")]
    pub sevenzip_dirs: Vec<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            sevenzip_path: None,
            search_path: true,
            sevenzip_dirs: default_sevenzip_dirs(),
        }
    }
}

/// Main configuration for archive extraction
///
/// Tool settings are flattened so the JSON format stays a single level deep:
///
/// ```json
/// { "search_path": false, "extract": { "options": { "tar": "xvf" } } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// External tool discovery
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// Default extraction options
    #[serde(default)]
    pub extract: ExtractionOptions,
}

impl Config {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check settings that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.tools.sevenzip_path
            && path.as_os_str().is_empty()
        {
            return Err(Error::Config {
                message: "sevenzip_path must not be empty".to_string(),
                key: Some("sevenzip_path".to_string()),
            });
        }

        if let Some(custom) = &self.extract.custom_command
            && custom.trim().is_empty()
        {
            return Err(Error::Config {
                message: "custom_command must not be blank".to_string(),
                key: Some("custom_command".to_string()),
            });
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_sevenzip_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from(r"C:\Program Files\7-Zip"),
        PathBuf::from(r"C:\Program Files (x86)\7-Zip"),
    ]
}
