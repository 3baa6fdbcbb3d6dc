use crate::command::*;
use crate::config::{ExtractionOptions, FlagOptions};
use crate::error::Error;
use crate::sanitize::sanitize_path;
use crate::types::OsFamily;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn linux() -> OsFamily {
    OsFamily::from("Debian")
}

fn no_sevenzip() -> Option<String> {
    None
}

fn sevenzip_on_path() -> Option<String> {
    Some("7z.exe".to_string())
}

fn sevenzip_in_program_files() -> Option<String> {
    Some(r"C:\Program Files\7-Zip\7z.exe".to_string())
}

/// Resolve with the path used both as name and (sanitized) command argument
fn resolve(file: &str, family: &OsFamily, options: &ExtractionOptions) -> crate::Result<String> {
    let safe = sanitize_path(file, family);
    resolve_command(file, &safe, family, options, &no_sevenzip)
}

fn resolve_default(file: &str, family: &OsFamily) -> String {
    resolve(file, family, &ExtractionOptions::default()).unwrap()
}

fn with_options(options: FlagOptions) -> ExtractionOptions {
    ExtractionOptions {
        options,
        ..ExtractionOptions::default()
    }
}

fn per_tool(entries: &[(&str, &str)]) -> FlagOptions {
    FlagOptions::PerTool(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    )
}

// ---------------------------------------------------------------------------
// Default dispatch table (generic POSIX)
// ---------------------------------------------------------------------------

#[test]
fn test_posix_default_commands() {
    let cases = [
        ("/tmp/a.tar", "tar xf /tmp/a.tar"),
        ("/tmp/a.tgz", "tar xzf /tmp/a.tgz"),
        ("/tmp/a.tar.gz", "tar xzf /tmp/a.tar.gz"),
        ("/tmp/a.tbz", "tar xjf /tmp/a.tbz"),
        ("/tmp/a.tar.bz2", "tar xjf /tmp/a.tar.bz2"),
        ("/tmp/a.txz", "unxz -dc /tmp/a.txz | tar xf -"),
        ("/tmp/a.tar.xz", "unxz -dc /tmp/a.tar.xz | tar xf -"),
        ("/tmp/a.gz", "gunzip -d /tmp/a.gz"),
        ("/tmp/a.zip", "unzip -o /tmp/a.zip"),
        ("/tmp/a.war", "unzip -o /tmp/a.war"),
        ("/tmp/a.jar", "unzip -o /tmp/a.jar"),
        ("/tmp/a.bz2", "bunzip2 -d /tmp/a.bz2"),
        ("/tmp/a.tar.Z", "uncompress -c /tmp/a.tar.Z | tar xf -"),
    ];

    for (file, expected) in cases {
        assert_eq!(resolve_default(file, &linux()), expected, "{}", file);
    }
}

#[test]
fn test_solaris_and_aix_pipe_compressed_tar() {
    for family in [OsFamily::Solaris, OsFamily::Aix] {
        assert_eq!(
            resolve_default("/tmp/a.tar.gz", &family),
            "gunzip -dc /tmp/a.tar.gz | tar xf -"
        );
        assert_eq!(
            resolve_default("/tmp/a.tgz", &family),
            "gunzip -dc /tmp/a.tgz | tar xf -"
        );
        assert_eq!(
            resolve_default("/tmp/a.tar.bz2", &family),
            "bunzip2 -dc /tmp/a.tar.bz2 | tar xf -"
        );
        assert_eq!(
            resolve_default("/tmp/a.tbz", &family),
            "bunzip2 -dc /tmp/a.tbz | tar xf -"
        );
    }
}

#[test]
fn test_solaris_other_rules_unchanged() {
    assert_eq!(resolve_default("/tmp/a.tar", &OsFamily::Solaris), "tar xf /tmp/a.tar");
    assert_eq!(
        resolve_default("/tmp/a.tar.xz", &OsFamily::Aix),
        "unxz -dc /tmp/a.tar.xz | tar xf -"
    );
    assert_eq!(resolve_default("/tmp/a.zip", &OsFamily::Aix), "unzip -o /tmp/a.zip");
}

#[test]
fn test_sanitized_path_used_in_command() {
    let file = "/tmp/my app's.tar.gz";
    assert_eq!(
        resolve_default(file, &linux()),
        r"tar xzf /tmp/my\ app\'s.tar.gz"
    );
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let err = resolve("/tmp/A.TAR", &linux(), &ExtractionOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownFiletype(_)));

    // `.Z` only matters for `.tar.Z`; `.tar.z` is not compress(1) output
    let err = resolve("/tmp/a.tar.z", &linux(), &ExtractionOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownFiletype(_)));
}

#[test]
fn test_unknown_filetype_names_file() {
    let err = resolve("archive.rar", &linux(), &ExtractionOptions::default()).unwrap_err();
    match err {
        Error::UnknownFiletype(path) => assert_eq!(path.to_str(), Some("archive.rar")),
        other => panic!("Expected UnknownFiletype, got: {:?}", other),
    }
}

#[test]
fn test_rule_order_first_match_wins() {
    // `.tar.gz` also ends in `.gz`; the compressed-tar rule must win
    assert!(resolve_default("/tmp/a.tar.gz", &linux()).starts_with("tar "));
    assert!(resolve_default("/tmp/a.tar.bz2", &linux()).starts_with("tar "));
}

// ---------------------------------------------------------------------------
// Option merging through the table
// ---------------------------------------------------------------------------

#[test]
fn test_literal_options_replace_every_tool() {
    let opts = with_options(FlagOptions::from("-v"));
    assert_eq!(
        resolve("/tmp/a.tar.gz", &OsFamily::Solaris, &opts).unwrap(),
        "gunzip -v /tmp/a.tar.gz | tar -v -"
    );
    assert_eq!(resolve("/tmp/a.zip", &linux(), &opts).unwrap(), "unzip -v /tmp/a.zip");
}

#[test]
fn test_per_tool_options_select_by_key() {
    let opts = with_options(per_tool(&[("gunzip", "-dcf"), ("tar", "xvf")]));
    assert_eq!(
        resolve("/tmp/a.tgz", &OsFamily::Aix, &opts).unwrap(),
        "gunzip -dcf /tmp/a.tgz | tar xvf -"
    );
    assert_eq!(
        resolve("/tmp/a.tgz", &linux(), &opts).unwrap(),
        "tar xvf /tmp/a.tgz"
    );
}

#[test]
fn test_per_tool_option_keys() {
    let opts = with_options(per_tool(&[
        ("bunzip", "-dcq"),
        ("bunzip2", "-dq"),
        ("unxz", "-dcT0"),
        ("zip", "-qo"),
        ("gunzip", "-dq"),
        ("tar", "xpf"),
    ]));

    assert_eq!(
        resolve("/tmp/a.tbz", &OsFamily::Solaris, &opts).unwrap(),
        "bunzip2 -dcq /tmp/a.tbz | tar xpf -"
    );
    assert_eq!(resolve("/tmp/a.bz2", &linux(), &opts).unwrap(), "bunzip2 -dq /tmp/a.bz2");
    assert_eq!(
        resolve("/tmp/a.txz", &linux(), &opts).unwrap(),
        "unxz -dcT0 /tmp/a.txz | tar xpf -"
    );
    assert_eq!(resolve("/tmp/a.jar", &linux(), &opts).unwrap(), "unzip -qo /tmp/a.jar");
    assert_eq!(resolve("/tmp/a.gz", &linux(), &opts).unwrap(), "gunzip -dq /tmp/a.gz");
    assert_eq!(
        resolve("/tmp/a.tar.Z", &linux(), &opts).unwrap(),
        "uncompress -c /tmp/a.tar.Z | tar xpf -"
    );
}

#[test]
fn test_per_tool_missing_key_fails() {
    let opts = with_options(per_tool(&[("tar", "xvf")]));
    let err = resolve("/tmp/a.tar.gz", &OsFamily::Solaris, &opts).unwrap_err();
    match err {
        Error::InvalidOptions { tool, .. } => assert_eq!(tool, "gunzip"),
        other => panic!("Expected InvalidOptions, got: {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Custom commands
// ---------------------------------------------------------------------------

#[test]
fn test_custom_command_template() {
    let opts = ExtractionOptions {
        custom_command: Some("unrar x -y %s extracted/".to_string()),
        options: FlagOptions::from("ignored"),
        ..ExtractionOptions::default()
    };
    assert_eq!(
        resolve("/tmp/my file.rar", &linux(), &opts).unwrap(),
        r"unrar x -y /tmp/my\ file.rar extracted/"
    );
}

#[test]
fn test_custom_command_template_substitutes_once() {
    let opts = ExtractionOptions {
        custom_command: Some("echo %s %s".to_string()),
        ..ExtractionOptions::default()
    };
    assert_eq!(
        resolve("/tmp/a.tar", &linux(), &opts).unwrap(),
        "echo /tmp/a.tar %s"
    );
}

#[test]
fn test_custom_command_prefix() {
    let opts = ExtractionOptions {
        custom_command: Some("7za x".to_string()),
        options: FlagOptions::from("-y"),
        ..ExtractionOptions::default()
    };
    assert_eq!(
        resolve("/tmp/a.7z", &linux(), &opts).unwrap(),
        "7za x -y /tmp/a.7z"
    );
}

#[test]
fn test_custom_command_prefix_unset_options() {
    let opts = ExtractionOptions {
        custom_command: Some("7za x".to_string()),
        ..ExtractionOptions::default()
    };
    assert_eq!(resolve("/tmp/a.7z", &linux(), &opts).unwrap(), "7za x  /tmp/a.7z");
}

#[test]
fn test_custom_command_bypasses_unknown_filetype() {
    let opts = ExtractionOptions {
        custom_command: Some("cpio -id < %s".to_string()),
        ..ExtractionOptions::default()
    };
    assert_eq!(
        resolve("/tmp/initrd.cpio", &linux(), &opts).unwrap(),
        "cpio -id < /tmp/initrd.cpio"
    );
}

#[test]
fn test_custom_command_on_windows_skips_locator() {
    let opts = ExtractionOptions {
        custom_command: Some("expand %s -F:*".to_string()),
        ..ExtractionOptions::default()
    };
    let file = r"C:\tmp\drivers.cab";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let panicking = || -> Option<String> { panic!("locator must not be consulted") };
    assert_eq!(
        resolve_command(file, &safe, &OsFamily::Windows, &opts, &panicking).unwrap(),
        r#"expand "C:\tmp\drivers.cab" -F:*"#
    );
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

#[test]
fn test_windows_sevenzip_default_flags() {
    let file = r"C:\tmp\app.tar";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let cmd = resolve_command(
        file,
        &safe,
        &OsFamily::Windows,
        &ExtractionOptions::default(),
        &sevenzip_on_path,
    )
    .unwrap();
    assert_eq!(cmd, r#"7z.exe x -aoa "C:\tmp\app.tar""#);
}

#[test]
fn test_windows_sevenzip_path_with_spaces_quoted() {
    let file = r"C:\tmp\app.zip";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let opts = with_options(per_tool(&[("7z", "x -y")]));
    let cmd = resolve_command(file, &safe, &OsFamily::Windows, &opts, &sevenzip_in_program_files)
        .unwrap();
    assert_eq!(
        cmd,
        r#""C:\Program Files\7-Zip\7z.exe" x -y "C:\tmp\app.zip""#
    );
}

#[test]
fn test_windows_sevenzip_per_tool_without_7z_key_fails() {
    let file = r"C:\tmp\app.zip";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let opts = with_options(per_tool(&[("tar", "xvf"), ("unzip", "-o")]));
    let err = resolve_command(file, &safe, &OsFamily::Windows, &opts, &sevenzip_in_program_files)
        .unwrap_err();
    match err {
        Error::InvalidOptions { tool, reason } => {
            assert_eq!(tool, "7z");
            assert!(reason.contains("tar, unzip"));
        }
        other => panic!("Expected InvalidOptions, got: {:?}", other),
    }
}

#[test]
fn test_windows_zip_fallback_without_sevenzip() {
    let file = r"C:\tmp\site.zip";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let opts = with_options(FlagOptions::from("ignored"));
    let cmd = resolve_command(file, &safe, &OsFamily::Windows, &opts, &no_sevenzip).unwrap();

    assert_eq!(cmd, script::zip_fallback_command(&safe));
    assert!(cmd.starts_with("powershell -command "));
    assert!(!cmd.contains("ignored"));
}

#[test]
fn test_windows_non_zip_without_sevenzip_fails() {
    let file = r"C:\tmp\app.tar.gz";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let err = resolve_command(
        file,
        &safe,
        &OsFamily::Windows,
        &ExtractionOptions::default(),
        &no_sevenzip,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ToolNotFound(_)));
}

#[test]
fn test_windows_ignores_extension_table() {
    // Windows never consults the table, so unknown extensions go to 7-zip as well
    let file = r"C:\tmp\app.rar";
    let safe = sanitize_path(file, &OsFamily::Windows);
    let cmd = resolve_command(
        file,
        &safe,
        &OsFamily::Windows,
        &ExtractionOptions::default(),
        &sevenzip_on_path,
    )
    .unwrap();
    assert_eq!(cmd, r#"7z.exe x -aoa "C:\tmp\app.rar""#);
}

#[test]
fn test_blank_custom_command_rejected() {
    for custom in ["", "   "] {
        let opts = ExtractionOptions {
            custom_command: Some(custom.to_string()),
            ..ExtractionOptions::default()
        };
        for family in [linux(), OsFamily::Windows] {
            let err = resolve("/tmp/app.tar", &family, &opts).unwrap_err();
            match err {
                Error::InvalidOptions { tool, .. } => assert_eq!(tool, "custom_command"),
                other => panic!("Expected InvalidOptions, got: {:?}", other),
            }
        }
    }
}

#[test]
fn test_posix_variant_named_solaris_uses_pipe() {
    let family = OsFamily::Posix("Solaris".to_string());
    assert_eq!(
        resolve_default("/tmp/app.tar.gz", &family),
        "gunzip -dc /tmp/app.tar.gz | tar xf -"
    );
}
