use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Output, Stdio};

use crate::error::JqError;

const JQ: &str = "jq";

fn spawn_jq(filter: &str) -> Result<Child, JqError> {
    Command::new(JQ)
        .arg(filter)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => JqError::NotFound,
            _ => JqError::Spawn(e),
        })
}

/// Run `json` through `jq <filter>` and return what it prints.
pub(crate) fn filter_json(json: &str, filter: &str) -> Result<String, JqError> {
    let mut child = spawn_jq(filter)?;

    // The pipe is dropped at the end of this block so jq sees EOF
    if let Some(mut input) = child.stdin.take() {
        input.write_all(json.as_bytes()).map_err(JqError::Stdin)?;
    }

    let Output {
        status,
        stdout,
        stderr,
    } = child.wait_with_output().map_err(JqError::Wait)?;
    if !status.success() {
        let message = String::from_utf8_lossy(&stderr).trim().to_owned();
        log::debug!("jq exited with {status}: {message}");
        return Err(JqError::Filter(message));
    }
    String::from_utf8(stdout).map_err(JqError::Utf8)
}
