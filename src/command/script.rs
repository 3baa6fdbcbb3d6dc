//! PowerShell fallback for `.zip` archives on Windows hosts without 7-zip
//!
//! `ZipFile.ExtractToDirectory` refuses to overwrite existing files, so the
//! script walks the entries and extracts each one with overwrite enabled.

/// Script extracting the zip at `safe_path` into the current directory.
///
/// `safe_path` is expected to be double-quoted already.
pub fn zip_fallback_script(safe_path: &str) -> String {
    let lines = [
        "try {".to_string(),
        r#"Add-Type -AssemblyName System.IO.Compression.FileSystem -ErrorAction "SilentlyContinue""#
            .to_string(),
        format!("$zipFile = [System.IO.Compression.ZipFile]::OpenRead({safe_path})"),
        "foreach ($zipFileEntry in $zipFile.Entries) {".to_string(),
        r#"$pwd = (Get-Item -Path ".\").FullName"#.to_string(),
        "$outputFile = [io.path]::Combine($pwd, $zipFileEntry.FullName)".to_string(),
        "$dir = ([io.fileinfo]$outputFile).DirectoryName".to_string(),
        "if (-not(Test-Path -Type Container -Path $dir)) {".to_string(),
        "mkdir $dir".to_string(),
        "}".to_string(),
        r#"if ($zipFileEntry.Name -ne "") {"#.to_string(),
        r#"Write-Host "[extract] Zip entry $($zipFileEntry.FullName)""#.to_string(),
        "[System.IO.Compression.ZipFileExtensions]::ExtractToFile($zipFileEntry, $outputFile, $true)"
            .to_string(),
        "}".to_string(),
        "}".to_string(),
        "$zipFile.Dispose()".to_string(),
        "} catch [System.InvalidOperationException] {".to_string(),
        r#"Write-Error "Your OS does not support System.IO.Compression.FileSystem - please install 7zip""#
            .to_string(),
        "}".to_string(),
    ];
    lines.join("\n")
}

/// Collapse a multi-line script into one `powershell -command` line.
///
/// Double quotes are backslash-escaped for the outer command line and line
/// breaks become statement separators.
pub fn powershell_command(script: &str) -> String {
    let body = script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace('"', "\\\""))
        .collect::<Vec<_>>()
        .join("; ");
    format!("powershell -command {body}")
}

/// Full fallback command line for the zip at `safe_path`
pub fn zip_fallback_command(safe_path: &str) -> String {
    powershell_command(&zip_fallback_script(safe_path))
}
