//! Shell execution of resolved extraction commands
//!
//! Commands run through `sh -c` (or `cmd /C` on Windows) with stdout and stderr
//! joined into one pipe, so the captured output interleaves exactly as a user
//! would have seen it in a terminal. Any non-zero exit is an
//! [`Error::ExecutionFailed`] carrying that output.

use crate::error::{Error, Result};
use crate::types::ExecutionOutcome;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Builder for a single extraction command execution.
///
/// # Example
/// ```no_run
/// use archive_exec::executor::Executor;
///
/// let outcome = Executor::new("tar xzf /tmp/app.tar.gz")
///     .dir("/opt/app")
///     .uid(1000)
///     .gid(1000)
///     .run()?;
/// println!("{}", outcome.output);
/// # Ok::<(), archive_exec::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Executor {
    command: String,
    cwd: Option<PathBuf>,
    uid: Option<u32>,
    gid: Option<u32>,
}

impl Executor {
    /// Create an executor for a shell command line
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            uid: None,
            gid: None,
        }
    }

    /// Set the working directory for the command.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Run the command as this user id.
    pub fn uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Run the command as this group id.
    pub fn gid(mut self, gid: u32) -> Self {
        self.gid = Some(gid);
        self
    }

    #[cfg(unix)]
    fn build_command(&self) -> Command {
        use std::os::unix::process::CommandExt;

        let mut cmd = Command::new("sh");
        cmd.args(["-c", &self.command]);
        if let Some(gid) = self.gid {
            cmd.gid(gid);
        }
        if let Some(uid) = self.uid {
            cmd.uid(uid);
        }
        cmd
    }

    #[cfg(windows)]
    fn build_command(&self) -> Command {
        use std::os::windows::process::CommandExt;

        if self.uid.is_some() || self.gid.is_some() {
            warn!(
                uid = ?self.uid,
                gid = ?self.gid,
                "uid/gid are not supported on Windows, running as current user"
            );
        }

        let mut cmd = Command::new("cmd");
        cmd.arg("/C").raw_arg(&self.command);
        cmd
    }

    /// Run the command to completion.
    ///
    /// # Errors
    /// * [`Error::Io`] - the shell could not be started or its output read
    /// * [`Error::ExecutionFailed`] - the command exited non-zero or was killed
    pub fn run(&self) -> Result<ExecutionOutcome> {
        debug!(
            command = %self.command,
            cwd = ?self.cwd,
            uid = ?self.uid,
            gid = ?self.gid,
            "executing extraction command"
        );

        let (mut reader, writer) = std::io::pipe()?;

        // The Command holds copies of the write end; it must be dropped before
        // reading or the pipe never reaches EOF.
        let mut child = {
            let mut cmd = self.build_command();
            if let Some(cwd) = &self.cwd {
                cmd.current_dir(cwd);
            }
            cmd.stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            cmd.spawn()?
        };

        let mut raw = Vec::new();
        let read_result = reader.read_to_end(&mut raw);
        let status = child.wait()?;
        read_result?;

        let output = String::from_utf8_lossy(&raw).into_owned();

        if !status.success() {
            warn!(
                command = %self.command,
                code = ?status.code(),
                "extraction command failed"
            );
            return Err(Error::ExecutionFailed {
                command: self.command.clone(),
                code: status.code(),
                output,
            });
        }

        Ok(ExecutionOutcome {
            exit_code: status.code().unwrap_or(0),
            success: true,
            output,
        })
    }
}

/// Run `command_line` in `working_dir`, optionally as another user/group.
///
/// The caller is responsible for making the archive readable by `uid`/`gid`
/// beforehand (see [`crate::Archive::extract`], which does so).
pub fn execute(
    command_line: &str,
    working_dir: &Path,
    uid: Option<u32>,
    gid: Option<u32>,
) -> Result<ExecutionOutcome> {
    let mut executor = Executor::new(command_line).dir(working_dir);
    if let Some(uid) = uid {
        executor = executor.uid(uid);
    }
    if let Some(gid) = gid {
        executor = executor.gid(gid);
    }
    executor.run()
}
