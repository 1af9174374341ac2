//! Decides whether a finished compiler run succeeded.
//!
//! idlj exits with 0 for some argument errors, so besides the exit code the captured
//! stderr is searched for `"Invalid argument"`. That substring check is specific to idlj's
//! wording and can misfire on other compilers or locales.

use super::invocation::Invocation;
use crate::loader::CapturedOutput;
use crate::Error;

const INVALID_ARGUMENT: &str = "Invalid argument";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

/// Logs whatever the compiler printed: stdout at info, stderr at error level.
pub fn log_captured(output: &CapturedOutput) {
    let stdout = output.stdout_text();
    if !stdout.is_empty() {
        log::info!("{}", stdout);
    }
    let stderr = output.stderr_text();
    if !stderr.is_empty() {
        log::error!("{}", stderr);
    }
}

pub fn judge(stderr: &str, exit_code: i32, fail_on_error: bool) -> Verdict {
    if fail_on_error && (exit_code != 0 || stderr.contains(INVALID_ARGUMENT)) {
        Verdict::Failed
    } else {
        Verdict::Passed
    }
}

/// Logs the captured output and turns a failing verdict into `CompilationFailed`.
pub fn classify(invocation: &Invocation, fail_on_error: bool) -> Result<(), Error> {
    log_captured(&invocation.output);

    let stderr = invocation.output.stderr_text();
    match judge(&stderr, invocation.exit_code, fail_on_error) {
        Verdict::Passed => Ok(()),
        Verdict::Failed => Err(Error::CompilationFailed {
            message: format!(
                "IDL compilation failed (exit code {}): {}",
                invocation.exit_code,
                stderr.trim()
            ),
            source: None,
        }),
    }
}
