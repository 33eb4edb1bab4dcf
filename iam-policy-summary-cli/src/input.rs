//! Reading policy text from files or stdin.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::warn;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Default upper bound on the size of one input document (5 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Where one policy document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `None` and `-` both mean stdin.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => Self::File(path),
            _ => Self::Stdin,
        }
    }

    /// Sources for a list of positional arguments; stdin when the list is empty.
    pub fn from_args(paths: Vec<PathBuf>) -> Vec<Self> {
        if paths.is_empty() {
            return vec![Self::Stdin];
        }
        paths.into_iter().map(|p| Self::from_arg(Some(p))).collect()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read the full text of `source`, refusing anything over `max_bytes`.
pub async fn read_source(source: &Source, max_bytes: u64) -> Result<String> {
    match source {
        Source::File(path) => read_file(path, max_bytes).await,
        Source::Stdin => read_stdin(max_bytes).await,
    }
}

async fn read_file(path: &Path, max_bytes: u64) -> Result<String> {
    let file = fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open policy file: {}", path.display()))?;

    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        warn!("{} does not have a .json extension", path.display());
    }

    let buf = read_bounded(file, max_bytes)
        .await
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
    let Some(buf) = buf else {
        bail!(
            "Policy file {} is larger than the {} byte limit",
            path.display(),
            max_bytes
        );
    };

    String::from_utf8(buf)
        .with_context(|| format!("Policy file {} is not valid UTF-8", path.display()))
}

async fn read_stdin(max_bytes: u64) -> Result<String> {
    let Some(buf) = read_bounded(tokio::io::stdin(), max_bytes)
        .await
        .context("Failed to read policy from stdin")?
    else {
        bail!("Policy on stdin is larger than the {} byte limit", max_bytes);
    };

    String::from_utf8(buf).context("Policy on stdin is not valid UTF-8")
}

/// Read at most `max_bytes`; `None` when the reader holds more than that.
async fn read_bounded<R>(reader: R, max_bytes: u64) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .await?;

    Ok((buf.len() as u64 <= max_bytes).then_some(buf))
}
