use crate::analysis::LogInput;
use crate::error::{Error, Result};
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads a whole log file. The file name becomes the input name, so two
/// files with the same name in different folders count as duplicates.
pub fn read_log_file<P: AsRef<Path>>(path: P) -> Result<LogInput> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|source| Error::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file
        .metadata()
        .map_err(|source| Error::OpenFile {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if len == 0 {
        return Ok(LogInput::new(name, String::new()));
    }

    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| Error::MapFile {
        path: path.to_path_buf(),
        source,
    })?;
    let text = match String::from_utf8_lossy(&mmap) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::warn!(path = %path.display(), "log file is not valid UTF-8, decoded lossily");
            text
        }
    };

    tracing::debug!(path = %path.display(), bytes = len, "read log file");
    Ok(LogInput::new(name, text))
}

pub fn read_log_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LogInput>> {
    paths.iter().map(read_log_file).collect()
}

/// Relative paths are taken from the configured log directory.
pub fn resolve_path(log_directory: &str, path: &str) -> PathBuf {
    let given_path = Path::new(path);
    if given_path.is_relative() && !log_directory.is_empty() {
        Path::new(log_directory).join(given_path)
    } else {
        given_path.to_path_buf()
    }
}
