//! Running the external transaction executor

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use url::Url;

/// **How to invoke the transaction executor**
///
/// Runs `<interpreter> <tool> --transactionFile=<file> --privateKey=<key> --server=<url>`,
/// or the tool alone when there's no interpreter.
#[derive(Clone, Debug)]
pub struct ToolCommand {
    interpreter: Option<String>,
    tool: PathBuf,
    server: String,
}

/// What the executor printed
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Anything on stderr counts as a failure; the exit status doesn't.
    pub fn had_error(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

impl ToolCommand {
    pub fn new(interpreter: Option<String>, tool: PathBuf, server: &Url) -> Self {
        Self {
            interpreter: interpreter.filter(|i| !i.trim().is_empty()),
            tool,
            server: server.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// The program and its arguments, in order.
    pub fn argv(&self, private_key: &str, transaction_file: &Path) -> (OsString, Vec<OsString>) {
        let mut args: Vec<OsString> = vec![];

        let program = match &self.interpreter {
            Some(interpreter) => {
                args.push(self.tool.clone().into_os_string());
                OsString::from(interpreter)
            }
            None => self.tool.clone().into_os_string(),
        };

        let mut file_arg = OsString::from("--transactionFile=");
        file_arg.push(transaction_file);
        args.push(file_arg);
        args.push(format!("--privateKey={private_key}").into());
        args.push(format!("--server={}", self.server).into());

        (program, args)
    }

    /// A printable rendition of the command line, for logs.
    pub fn display(&self, private_key: &str, transaction_file: &Path) -> String {
        let (program, args) = self.argv(private_key, transaction_file);
        std::iter::once(program)
            .chain(args)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// **Runs the executor to completion and captures its output**
    ///
    /// # Errors
    /// Only if the process can't be started or waited on.
    pub async fn execute(
        &self,
        private_key: &str,
        transaction_file: &Path,
    ) -> io::Result<ToolOutput> {
        let (program, args) = self.argv(private_key, transaction_file);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
