//! File utilities
//!
//! Locating files next to the executable, expanding user-supplied paths and
//! creating directory trees.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(windows)]
pub const PATH_SEPARATOR: char = '\\';
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = '/';

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected executable path: {0:?}")]
    UnexpectedExecutablePath(PathBuf),
}

pub type FileResult<T> = Result<T, FileError>;

/// Absolute path of the running executable
pub fn executable_path() -> FileResult<PathBuf> {
    Ok(std::env::current_exe()?)
}

/// Absolute path of a file in the same directory as the executable
pub fn local_path(name: impl AsRef<Path>) -> FileResult<PathBuf> {
    let executable = executable_path()?;
    match executable.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.join(name)),
        _ => {
            tracing::error!(
                "Unexpected executable path: {:?} (it should contain a '{}')",
                executable,
                PATH_SEPARATOR
            );
            Err(FileError::UnexpectedExecutablePath(executable))
        }
    }
}

/// Indicate if the file exists and is not a directory
pub fn is_regular(path: impl AsRef<Path>) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.is_dir())
        .unwrap_or(false)
}

/// Indicate if an executable named `file` can be found in `$PATH`
#[cfg(unix)]
pub fn executable_exists(file: &str) -> bool {
    match std::env::var_os("PATH") {
        Some(path) => executable_exists_in(file, &path),
        None => false,
    }
}

#[cfg(unix)]
fn executable_exists_in(file: &str, path_var: &std::ffi::OsStr) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::env::split_paths(path_var)
        .map(|dir| dir.join(file))
        .any(|candidate| match std::fs::metadata(&candidate) {
            Ok(m) => m.is_file() && m.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        })
}

/// Recursively create directories (`mkdir -p`)
///
/// Existing directories are not an error.
pub fn mkdirs(path: impl AsRef<Path>) -> FileResult<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Expand a user-supplied path
///
/// - a leading `~` becomes `$HOME`
/// - `$VAR` and `${VAR}` are replaced by the variable value, or by an empty
///   string if unset
/// - a relative result is made absolute against the current directory
pub fn expand_path(path: &str) -> FileResult<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(expand_path_with(path, env_lookup, &cwd))
}

fn env_lookup(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(_) if name == "HOME" => dirs::home_dir().map(|p| p.to_string_lossy().into_owned()),
        Err(_) => None,
    }
}

/// Same as [`expand_path`], with explicit environment and current directory
pub fn expand_path_with<F>(path: &str, lookup: F, cwd: &Path) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(path.len());
    let mut rest = path;

    if let Some(after) = path.strip_prefix('~') {
        if after.is_empty() || after.starts_with('/') || after.starts_with(PATH_SEPARATOR) {
            expanded.push_str(&lookup("HOME").unwrap_or_default());
            rest = after;
        }
    }

    expand_vars(rest, &lookup, &mut expanded);

    let expanded = PathBuf::from(expanded);
    if expanded.is_relative() {
        cwd.join(expanded)
    } else {
        expanded
    }
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn expand_vars<F>(input: &str, lookup: &F, out: &mut String)
where
    F: Fn(&str) -> Option<String>,
{
    let mut rest = input;
    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        let name_and_tail = match after.strip_prefix('{') {
            Some(braced) => braced
                .find('}')
                .map(|end| (&braced[..end], &braced[end + 1..]))
                .filter(|(name, _)| !name.is_empty() && name.chars().all(is_var_char)),
            None => {
                let len = after.find(|c: char| !is_var_char(c)).unwrap_or(after.len());
                (len > 0).then(|| (&after[..len], &after[len..]))
            }
        };

        match name_and_tail {
            Some((name, tail)) => {
                out.push_str(&lookup(name).unwrap_or_default());
                rest = tail;
            }
            None => {
                // Not a variable reference, keep the '$'
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
}
