//! Extension dispatch table for non-Windows platforms
//!
//! Rules are checked in order and the first whose suffix matches the archive name
//! wins, so the compressed-tar rules must stay ahead of `.gz` and `.bz2`.

use super::flags::resolve_flags;
use crate::config::FlagOptions;
use crate::error::Result;
use crate::types::OsFamily;

/// Builds the command line for a matched rule from the sanitized path
type Builder = fn(&str, &OsFamily, &FlagOptions) -> Result<String>;

/// One entry of the dispatch table
pub(crate) struct Rule {
    /// Short name used in logs
    pub name: &'static str,
    /// Case-sensitive filename suffixes handled by this rule
    pub suffixes: &'static [&'static str],
    build: Builder,
}

impl Rule {
    pub(crate) fn matches(&self, file: &str) -> bool {
        self.suffixes.iter().any(|suffix| file.ends_with(suffix))
    }

    pub(crate) fn build(
        &self,
        safe_path: &str,
        family: &OsFamily,
        options: &FlagOptions,
    ) -> Result<String> {
        (self.build)(safe_path, family, options)
    }
}

pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "tar",
        suffixes: &[".tar"],
        build: tar,
    },
    Rule {
        name: "tar+gzip",
        suffixes: &[".tgz", ".tar.gz"],
        build: tar_gzip,
    },
    Rule {
        name: "tar+bzip2",
        suffixes: &[".tbz", ".tar.bz2"],
        build: tar_bzip2,
    },
    Rule {
        name: "tar+xz",
        suffixes: &[".txz", ".tar.xz"],
        build: tar_xz,
    },
    Rule {
        name: "gzip",
        suffixes: &[".gz"],
        build: gzip,
    },
    Rule {
        name: "zip",
        suffixes: &[".zip", ".war", ".jar"],
        build: zip,
    },
    Rule {
        name: "bzip2",
        suffixes: &[".bz2"],
        build: bzip2,
    },
    Rule {
        name: "tar+compress",
        suffixes: &[".tar.Z"],
        build: tar_compress,
    },
];

/// First rule matching `file`, if any
pub(crate) fn find_rule(file: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(file))
}

/// `<decompressor> <flags> <path> | tar <flags> -`
fn piped_tar(decompressor: &str, flags: &str, safe_path: &str, options: &FlagOptions) -> Result<String> {
    let tar_flags = resolve_flags("xf", options, "tar")?;
    Ok(format!("{decompressor} {flags} {safe_path} | tar {tar_flags} -"))
}

fn tar(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    let flags = resolve_flags("xf", options, "tar")?;
    Ok(format!("tar {flags} {safe_path}"))
}

// Solaris and AIX tar cannot decompress on its own.
fn tar_gzip(safe_path: &str, family: &OsFamily, options: &FlagOptions) -> Result<String> {
    if family.needs_tar_pipe() {
        let flags = resolve_flags("-dc", options, "gunzip")?;
        piped_tar("gunzip", &flags, safe_path, options)
    } else {
        let flags = resolve_flags("xzf", options, "tar")?;
        Ok(format!("tar {flags} {safe_path}"))
    }
}

fn tar_bzip2(safe_path: &str, family: &OsFamily, options: &FlagOptions) -> Result<String> {
    if family.needs_tar_pipe() {
        let flags = resolve_flags("-dc", options, "bunzip")?;
        piped_tar("bunzip2", &flags, safe_path, options)
    } else {
        let flags = resolve_flags("xjf", options, "tar")?;
        Ok(format!("tar {flags} {safe_path}"))
    }
}

fn tar_xz(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    let flags = resolve_flags("-dc", options, "unxz")?;
    piped_tar("unxz", &flags, safe_path, options)
}

fn gzip(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    let flags = resolve_flags("-d", options, "gunzip")?;
    Ok(format!("gunzip {flags} {safe_path}"))
}

fn zip(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    let flags = resolve_flags("-o", options, "zip")?;
    Ok(format!("unzip {flags} {safe_path}"))
}

fn bzip2(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    let flags = resolve_flags("-d", options, "bunzip2")?;
    Ok(format!("bunzip2 {flags} {safe_path}"))
}

fn tar_compress(safe_path: &str, _: &OsFamily, options: &FlagOptions) -> Result<String> {
    piped_tar("uncompress", "-c", safe_path, options)
}
