//! The injected file source interface.
//!
//! The evaluator performs no I/O itself; the I/O-bearing standard library
//! functions (`read_*`, `write_*`, `glob`, `size`, `stdout`, `stderr`) go
//! through a [`FileSource`] supplied by the caller.

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::anyhow;

use crate::Value;

/// A source of files for the I/O-bearing standard library functions.
pub trait FileSource {
    /// Reads the contents of the file at the given path.
    fn read(&self, path: &str) -> anyhow::Result<String>;

    /// Writes contents to a fresh file, returning its path.
    ///
    /// The prefix hints at the writing function for debuggability of the
    /// produced file names.
    fn write(&self, prefix: &str, contents: &str) -> anyhow::Result<String>;

    /// Expands a glob pattern into the matching file paths.
    ///
    /// The returned paths are sorted.
    fn glob(&self, pattern: &str) -> anyhow::Result<Vec<String>>;

    /// Gets the size in bytes of the file at the given path.
    fn size(&self, path: &str) -> anyhow::Result<u64>;

    /// Gets the `File` value of the command's standard output, if available.
    fn stdout(&self) -> Option<Value> {
        None
    }

    /// Gets the `File` value of the command's standard error, if available.
    fn stderr(&self) -> Option<Value> {
        None
    }
}

/// A file source rooted in a local directory.
///
/// Relative paths resolve against the root; written files go to a
/// temporary directory.
#[derive(Debug)]
pub struct LocalFileSource {
    /// The directory relative paths resolve against.
    root: PathBuf,
    /// The directory written files are created in.
    tmp: PathBuf,
    /// The `File` value of the command's standard output, if set.
    stdout: Option<Value>,
    /// The `File` value of the command's standard error, if set.
    stderr: Option<Value>,
}

impl LocalFileSource {
    /// Creates a new local file source rooted in the given directory.
    ///
    /// Written files are placed in `tmp`, which must exist.
    pub fn new(root: impl Into<PathBuf>, tmp: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tmp: tmp.into(),
            stdout: None,
            stderr: None,
        }
    }

    /// Sets the `File` value returned by `stdout()`.
    pub fn with_stdout(mut self, stdout: Value) -> Self {
        self.stdout = Some(stdout);
        self
    }

    /// Sets the `File` value returned by `stderr()`.
    pub fn with_stderr(mut self, stderr: Value) -> Self {
        self.stderr = Some(stderr);
        self
    }

    /// Resolves a path against the root directory.
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSource for LocalFileSource {
    fn read(&self, path: &str) -> anyhow::Result<String> {
        let path = self.resolve(path);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read file `{path}`", path = path.display()))
    }

    fn write(&self, prefix: &str, contents: &str) -> anyhow::Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".tmp")
            .tempfile_in(&self.tmp)
            .context("failed to create a temporary file")?;
        file.write_all(contents.as_bytes())
            .context("failed to write temporary file contents")?;
        let (_, path) = file
            .keep()
            .context("failed to persist the temporary file")?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn glob(&self, pattern: &str) -> anyhow::Result<Vec<String>> {
        let pattern = self
            .resolve(pattern)
            .to_str()
            .ok_or_else(|| anyhow!("glob pattern is not valid UTF-8"))?
            .to_string();
        let mut paths = Vec::new();
        for entry in
            glob::glob(&pattern).with_context(|| format!("invalid glob pattern `{pattern}`"))?
        {
            let path = entry.context("failed to read a glob match")?;
            if path.is_file() {
                paths.push(path.to_string_lossy().into_owned());
            }
        }
        Ok(paths)
    }

    fn size(&self, path: &str) -> anyhow::Result<u64> {
        let path = self.resolve(path);
        Ok(std::fs::metadata(&path)
            .with_context(|| format!("failed to read metadata of `{path}`", path = path.display()))?
            .len())
    }

    fn stdout(&self) -> Option<Value> {
        self.stdout.clone()
    }

    fn stderr(&self) -> Option<Value> {
        self.stderr.clone()
    }
}
