//! Path quoting for inclusion in a shell command line

use crate::types::OsFamily;

/// Quote `raw` so it reaches the extraction tool as exactly one argument.
///
/// On Windows the path is wrapped in double quotes; paths there never contain `"`.
/// Everywhere else the path is escaped as a single POSIX shell word.
///
/// # Examples
///
/// ```
/// use archive_exec::sanitize::sanitize_path;
/// use archive_exec::OsFamily;
///
/// assert_eq!(
///     sanitize_path("/tmp/my file.tar", &OsFamily::from("Debian")),
///     r"/tmp/my\ file.tar"
/// );
/// assert_eq!(
///     sanitize_path(r"C:\tmp\my file.zip", &OsFamily::Windows),
///     r#""C:\tmp\my file.zip""#
/// );
/// ```
pub fn sanitize_path(raw: &str, family: &OsFamily) -> String {
    if family.is_windows() {
        format!("\"{}\"", raw)
    } else {
        shell_escape(raw)
    }
}

/// Escape a string as one POSIX shell word.
///
/// Characters outside the portable safe set are backslash-escaped. A newline
/// cannot be backslash-escaped (the shell treats `\<newline>` as a line
/// continuation) so it is emitted as a single-quoted `'\n'` instead.
pub fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "''".to_string();
    }

    let mut escaped = String::with_capacity(raw.len() * 2);
    for c in raw.chars() {
        match c {
            '\n' => escaped.push_str("'\n'"),
            c if is_shell_safe(c) => escaped.push(c),
            c => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }
    escaped
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | ':' | '+' | '/' | '@')
}
