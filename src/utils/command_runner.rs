use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Runs `program` with `args`, capturing stdout and stderr.
///
/// Unlike a plain `Command::output`, a non-zero exit status is *not* an error here:
/// the wrapped Java tools report problems through both exit codes and stderr text,
/// so callers inspect the returned `Output` themselves.
pub fn run_command(
    program: &Path,
    args: &[impl AsRef<OsStr>],
    current_dir: Option<&Path>,
) -> Result<Output, std::io::Error> {
    log::debug!(
        "Running command: {} {} (in {:?})",
        program.display(),
        args.iter().map(|a| a.as_ref().to_string_lossy()).collect::<Vec<_>>().join(" "),
        current_dir.unwrap_or_else(|| Path::new("."))
    );

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(dir) = current_dir {
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!(
                "Failed to execute command '{}': {}. Is it installed and in your PATH?",
                program.display(),
                e
            ),
        )
    })?;

    log::trace!(
        "Command '{}' finished with {}. Stdout: {}",
        program.display(),
        output.status,
        String::from_utf8_lossy(&output.stdout)
    );
    Ok(output)
}

/// Locates `tool` among `candidates`, falling back to the bare name (resolved through `PATH`).
pub fn resolve_tool(tool: &str, candidates: &[std::path::PathBuf]) -> std::path::PathBuf {
    let exe = format!("{}{}", tool, std::env::consts::EXE_SUFFIX);
    for dir in candidates {
        let path = dir.join(&exe);
        if path.is_file() {
            return path;
        }
    }
    log::debug!("'{}' not found in {:?}, relying on PATH", tool, candidates);
    std::path::PathBuf::from(tool)
}
