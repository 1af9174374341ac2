use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::Error;

pub fn ensure_dir_exists(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            Error::Io(io::Error::new(
                e.kind(),
                format!("Failed to create directory {:?}: {}", path, e),
            ))
        })?;
        log::info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Replaces every `\` with `/`.
pub fn fix_separator(filename: &str) -> String {
    filename.replace('\\', "/")
}

/// Returns the unique path to `path`, which need not exist yet.
///
/// Components are resolved against the file system for as long as they exist, so
/// symlinks are followed before a later `..` is applied. Once a component is missing
/// the rest of the path is collapsed lexically.
pub fn canonical_path(path: &Path) -> PathBuf {
    let mut canonical = PathBuf::new();
    let mut on_disk = true;
    for component in path.components() {
        if component == Component::CurDir {
            continue;
        }
        if on_disk {
            match canonical.join(component.as_os_str()).canonicalize() {
                Ok(resolved) => {
                    canonical = resolved;
                    continue;
                }
                Err(_) => on_disk = false,
            }
        }
        match component {
            Component::ParentDir => match canonical.components().next_back() {
                Some(Component::Normal(_)) => {
                    canonical.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => canonical.push(".."),
            },
            other => canonical.push(other.as_os_str()),
        }
    }
    canonical
}

/// Computes the path of `to_dir` relative to `from_dir`, with `/` separators.
///
/// Yields `"."` when both name the same directory and the canonical absolute path
/// of `to_dir` when it does not live below `from_dir`. With `replace_slashes_with_dashes`
/// the result is flattened into a single token by turning `/` and `:` into `-`.
pub fn to_relative_and_fix_separator(
    from_dir: &Path,
    to_dir: &Path,
    replace_slashes_with_dashes: bool,
) -> String {
    let to_dir = if to_dir.is_absolute() {
        to_dir.to_path_buf()
    } else {
        from_dir.join(to_dir)
    };

    let basedir_path = canonical_path(from_dir);
    let absolute_path = canonical_path(&to_dir);

    let relative = if absolute_path == basedir_path {
        ".".to_string()
    } else if let Ok(rest) = absolute_path.strip_prefix(&basedir_path) {
        rest.to_string_lossy().into_owned()
    } else {
        absolute_path.to_string_lossy().into_owned()
    };

    let mut relative = fix_separator(&relative);
    if replace_slashes_with_dashes {
        relative = relative.replace('/', "-").replace(':', "-");
    }
    relative
}

/// Lists every `.idl` file below `dir`, sorted so compilation order is stable.
pub fn find_idl_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("Error reading directory entry under {:?}: {}", dir, e),
            ))
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == "idl")
        {
            files.push(entry.into_path());
        }
    }
    log::debug!("Found {} IDL file(s) under {:?}", files.len(), dir);
    Ok(files)
}
