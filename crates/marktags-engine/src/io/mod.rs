use glob::Pattern;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

/// Read a document as text. Undecodable bytes are replaced with U+FFFD so
/// one badly-encoded file never aborts a batch.
pub fn read_file(relative_path: &RelativePath, vault_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(vault_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let bytes = fs::read(&absolute_path).map_err(IoError::Io)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write document text back, creating parent directories if needed.
pub fn write_file(
    relative_path: &RelativePath,
    vault_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(vault_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Copy the current version of a document to the backup root, mirroring its
/// relative path, before it gets overwritten. Returns the backup path.
pub fn backup_file(
    relative_path: &RelativePath,
    vault_root: &Path,
    backup_root: &Path,
) -> Result<PathBuf, IoError> {
    let source = relative_path.to_path(vault_root);
    if !source.exists() {
        return Err(IoError::NotFound(source));
    }

    let target = relative_path.to_path(backup_root);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::copy(&source, &target).map_err(IoError::Io)?;
    Ok(target)
}

/// Collect the documents whose file name matches `include_glob`, relative
/// to the vault root and sorted for a deterministic batch order.
pub fn scan_vault(
    vault_root: &Path,
    recursive: bool,
    include_glob: &str,
) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_vault_dir(vault_root)?;

    let pattern = Pattern::new(include_glob).map_err(|source| IoError::InvalidPattern {
        pattern: include_glob.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    if recursive {
        scan_directory_recursive(vault_root, &pattern, &mut files)?;
    } else {
        for entry in fs::read_dir(vault_root).map_err(IoError::Io)? {
            let path = entry.map_err(IoError::Io)?.path();
            if path.is_file() && matches_name(&path, &pattern) {
                files.push(path);
            }
        }
    }
    files.sort();

    files
        .into_iter()
        .map(|path| {
            let relative = path.strip_prefix(vault_root).unwrap_or(&path);
            RelativePathBuf::from_path(relative).map_err(|_| IoError::NonUtf8Path(path.clone()))
        })
        .collect()
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidVaultDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

fn scan_directory_recursive(
    dir: &Path,
    pattern: &Pattern,
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, pattern, files)?;
        } else if matches_name(&path, pattern) {
            files.push(path);
        }
    }

    Ok(())
}

fn matches_name(path: &Path, pattern: &Pattern) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| pattern.matches(name))
}
