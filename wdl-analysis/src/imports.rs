//! Resolution of import statements.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::anyhow;
use anyhow::bail;
use path_clean::PathClean;
use url::Url;

/// A source of imported documents.
///
/// The analysis itself performs no I/O; readers are injected by the caller.
pub trait SourceReader {
    /// Reads the document identified by the given URI.
    ///
    /// Returns the document text along with the canonical form of the URI;
    /// cycle detection and caching key off the canonical URI.
    fn read(&self, uri: &Url) -> anyhow::Result<(String, Url)>;
}

/// A reader that reads `file` URIs from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceReader;

impl SourceReader for LocalSourceReader {
    fn read(&self, uri: &Url) -> anyhow::Result<(String, Url)> {
        if uri.scheme() != "file" {
            bail!("unsupported URI scheme `{scheme}`", scheme = uri.scheme());
        }

        let path: PathBuf = uri
            .to_file_path()
            .map_err(|_| anyhow!("URI `{uri}` is not a valid file path"))?
            .clean();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{path}`", path = path.display()))?;
        let canonical = Url::from_file_path(&path)
            .map_err(|_| anyhow!("path `{path}` is not absolute", path = path.display()))?;
        Ok((text, canonical))
    }
}

/// A reader for documents that import nothing.
///
/// Every read fails; useful for analyzing standalone documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSourceReader;

impl SourceReader for NoSourceReader {
    fn read(&self, uri: &Url) -> anyhow::Result<(String, Url)> {
        bail!("no source reader was provided to resolve `{uri}`")
    }
}
