use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Failure while persisting a driver artifact.
///
/// Reported to the caller with the offending path; a failed write never
/// aborts other, independent runs.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes a trace as newline-delimited values to `{run_id}_{call_id}.txt`
/// under `dir`, creating the directory if needed.
///
/// Unreached slots are written as the -1 sentinel, so the file always has one
/// line per budgeted step.
pub fn write_trace(
    dir: &Path,
    run_id: &str,
    call_id: &str,
    trace: &[f64],
) -> Result<PathBuf, OutputError> {
    let path = dir.join(format!("{}_{}.txt", run_id, call_id));
    let io_err = |source| OutputError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    let file = File::create(&path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for value in trace {
        writeln!(writer, "{}", value).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    log::info!("wrote trace of {} entries to {}", trace.len(), path.display());
    Ok(path)
}

/// Serializes a driver artifact (run parameters, aggregated estimates) as
/// pretty-printed JSON under `dir`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, OutputError> {
    let path = dir.join(name);

    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    let encoded = serde_json::to_string_pretty(value).map_err(|source| OutputError::Encode {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, encoded).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;

    log::info!("wrote {}", path.display());
    Ok(path)
}
