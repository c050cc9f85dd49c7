//! Output sinks: where generated files go and how they get formatted

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::error::{DbStructError, Result};

/// A generated file, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Destination for generated files
pub trait OutputSink: Send + Sync {
    /// Create `dir` and all missing parents. Must succeed if it already exists.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| DbStructError::WriteError {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|source| DbStructError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Collects files in memory instead of writing them
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<OutputFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written so far, sorted by path
    pub fn files(&self) -> Vec<OutputFile> {
        let mut files = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}

impl OutputSink for MemorySink {
    fn create_dir_all(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        files.retain(|f| f.path != path);
        files.push(OutputFile {
            path: path.to_path_buf(),
            contents: contents.to_string(),
        });
        Ok(())
    }
}

/// Post-processing step run on each written file. Callers ignore failures.
pub trait Formatter: Send + Sync {
    fn format(&self, path: &Path) -> Result<()>;
}

/// Runs `<program> -w <file>`, e.g. `gofmt -w model/user.go`
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("-w")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(DbStructError::IoError(std::io::Error::other(format!(
                "{} exited with {}",
                self.program, status
            ))))
        }
    }
}

/// Leaves files untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let sink = FsSink;

        sink.create_dir_all(&nested).unwrap();
        sink.create_dir_all(&nested).unwrap();

        let file = nested.join("x.go");
        sink.write_file(&file, "package a\n").unwrap();
        sink.write_file(&file, "package b\n").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "package b\n");
    }

    #[test]
    fn test_fs_sink_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("missing_dir/x.go");
        let err = FsSink.write_file(&file, "package a\n").unwrap_err();
        match err {
            DbStructError::WriteError { path, .. } => assert_eq!(path, file),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_memory_sink_keeps_latest_write() {
        let sink = MemorySink::new();
        sink.write_file(Path::new("b.go"), "1").unwrap();
        sink.write_file(Path::new("a.go"), "2").unwrap();
        sink.write_file(Path::new("b.go"), "3").unwrap();

        let files = sink.files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("a.go"));
        assert_eq!(files[1].contents, "3");
    }

    #[test]
    fn test_missing_formatter_is_an_error() {
        let formatter = CommandFormatter::new("dbstruct-no-such-formatter");
        assert!(formatter.format(Path::new("x.go")).is_err());
        assert!(NoopFormatter.format(Path::new("x.go")).is_ok());
    }
}
