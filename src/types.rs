//! Core types shared across the resolver, executor and checksum modules

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating system family the extraction command is built for
///
/// The family is an external fact handed to the resolver; nothing in this crate
/// queries it behind the caller's back except [`OsFamily::current`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OsFamily {
    /// Windows family (7-zip or PowerShell based extraction)
    Windows,
    /// Solaris, whose `tar` has no built-in decompression flags
    Solaris,
    /// AIX, whose `tar` has no built-in decompression flags
    Aix,
    /// Any other POSIX-like family (Linux distributions, BSDs, macOS)
    ///
    /// Build families from fact strings with `OsFamily::from`, which maps
    /// `windows`, `solaris` and `aix` to their own variants. A `Posix` value
    /// carrying one of those names is still treated as that family.
    Posix(String),
}

impl OsFamily {
    /// Family of the platform this crate was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else if cfg!(target_os = "solaris") || cfg!(target_os = "illumos") {
            OsFamily::Solaris
        } else if cfg!(target_os = "aix") {
            OsFamily::Aix
        } else {
            OsFamily::Posix(std::env::consts::OS.to_string())
        }
    }

    /// Whether this is the Windows family
    pub fn is_windows(&self) -> bool {
        match self {
            OsFamily::Windows => true,
            OsFamily::Posix(name) => name.eq_ignore_ascii_case("windows"),
            _ => false,
        }
    }

    /// Whether `tar` must be fed through a separate decompressor
    pub fn needs_tar_pipe(&self) -> bool {
        match self {
            OsFamily::Solaris | OsFamily::Aix => true,
            OsFamily::Posix(name) => {
                name.eq_ignore_ascii_case("solaris") || name.eq_ignore_ascii_case("aix")
            }
            OsFamily::Windows => false,
        }
    }

    /// Fact string for this family
    pub fn as_str(&self) -> &str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Solaris => "Solaris",
            OsFamily::Aix => "AIX",
            OsFamily::Posix(name) => name,
        }
    }
}

impl From<&str> for OsFamily {
    fn from(fact: &str) -> Self {
        match fact.to_ascii_lowercase().as_str() {
            "windows" => OsFamily::Windows,
            "solaris" => OsFamily::Solaris,
            "aix" => OsFamily::Aix,
            _ => OsFamily::Posix(fact.to_string()),
        }
    }
}

impl From<String> for OsFamily {
    fn from(fact: String) -> Self {
        OsFamily::from(fact.as_str())
    }
}

impl From<OsFamily> for String {
    fn from(family: OsFamily) -> Self {
        family.as_str().to_string()
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest algorithm used to fingerprint an archive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumType {
    /// MD5 (128-bit)
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// No verification
    #[default]
    None,
}

impl ChecksumType {
    /// Lowercase algorithm name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumType::Md5 => "md5",
            ChecksumType::Sha1 => "sha1",
            ChecksumType::Sha256 => "sha256",
            ChecksumType::Sha384 => "sha384",
            ChecksumType::Sha512 => "sha512",
            ChecksumType::None => "none",
        }
    }

    /// Length of the hex-encoded digest, `None` for [`ChecksumType::None`]
    pub fn hex_len(&self) -> Option<usize> {
        match self {
            ChecksumType::Md5 => Some(32),
            ChecksumType::Sha1 => Some(40),
            ChecksumType::Sha256 => Some(64),
            ChecksumType::Sha384 => Some(96),
            ChecksumType::Sha512 => Some(128),
            ChecksumType::None => None,
        }
    }
}

impl FromStr for ChecksumType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(ChecksumType::Md5),
            "sha1" => Ok(ChecksumType::Sha1),
            "sha256" => Ok(ChecksumType::Sha256),
            "sha384" => Ok(ChecksumType::Sha384),
            "sha512" => Ok(ChecksumType::Sha512),
            "none" => Ok(ChecksumType::None),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful command execution
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code reported by the shell
    pub exit_code: i32,
    /// Whether the command succeeded (always true when returned by the executor)
    pub success: bool,
    /// Combined stdout and stderr, in the order the child wrote them
    pub output: String,
}
