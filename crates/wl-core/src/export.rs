//! Atomic CSV export.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::reader::LogError;
use crate::report::{Report, write_csv};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode CSV for {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Log(e) if e.is_not_found())
    }
}

/// Writes the CSV report to `path`, replacing any previous file.
///
/// The report is staged in a uniquely named temporary file in the same
/// directory and renamed into place, so a concurrent reader sees either the
/// old report or the new one, never a partial file. The staging file is
/// removed when it is dropped on any error path.
pub fn write_csv_atomic(report: &Report, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(io_err)?;
            parent
        }
        None => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(&mut staged);
        write_csv(report, &mut writer).map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
    }
    staged.as_file().sync_all().map_err(io_err)?;

    staged.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
