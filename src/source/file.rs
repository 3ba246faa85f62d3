//! File-based session store.
//!
//! Reads newline-delimited JSON records from a session file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::ChannelOnly;
use super::{Record, Records, SessionStore};
use crate::error::{Error, Result};

/// File extension appended to session names.
pub const SESSION_EXTENSION: &str = "bag.jsonl";

/// A session stored as one JSON record per line.
///
/// The file is reopened for every [`records`](SessionStore::records) and
/// [`channel_counts`](SessionStore::channel_counts) call, so each channel
/// scan starts from the first line. Blank lines are skipped.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    name: String,
    description: String,
}

impl FileSession {
    /// Open the session at `path`.
    ///
    /// Fails with [`Error::SessionUnavailable`] when the file cannot be
    /// opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let opened = if path.is_dir() {
            Err(std::io::Error::other("is a directory"))
        } else {
            File::open(&path).map(drop)
        };
        opened.map_err(|source| Error::SessionUnavailable {
            path: path.clone(),
            source,
        })?;

        let name = session_name(&path);
        let description = format!("file: {}", path.display());
        debug!(path = %path.display(), session = %name, "Opened session");

        Ok(Self {
            path,
            name,
            description,
        })
    }

    /// Resolve a session name to a path and open it.
    ///
    /// If `name` already points at an existing file it is used as-is,
    /// otherwise the session is looked up as `<dir>/<name>.bag.jsonl`.
    pub fn resolve<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Self::open(direct);
        }
        Self::open(dir.as_ref().join(format!("{name}.{SESSION_EXTENSION}")))
    }

    /// Returns the path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session name: the file name without its session extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn lines(&self) -> Result<impl Iterator<Item = (usize, std::io::Result<String>)>> {
        let file = File::open(&self.path)?;
        Ok(BufReader::new(file)
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line)))
    }
}

impl SessionStore for FileSession {
    fn description(&self) -> &str {
        &self.description
    }

    fn channel_counts(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for (line_no, line) in self.lines()? {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let header: ChannelOnly = serde_json::from_str(&line).map_err(|source| {
                Error::MalformedRecord {
                    line: line_no,
                    source,
                }
            })?;
            *counts.entry(header.channel).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn records<'a>(&'a self, channel: &'a str) -> Result<Records<'a>> {
        let iter = self.lines()?.filter_map(move |(line_no, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            if line.trim().is_empty() {
                return None;
            }
            match serde_json::from_str::<Record>(&line) {
                Ok(record) if record.channel == channel => Some(Ok(record)),
                Ok(_) => None,
                Err(source) => Some(Err(Error::MalformedRecord {
                    line: line_no,
                    source,
                })),
            }
        });
        Ok(Box::new(iter))
    }
}

/// Strip the session extension (or failing that, the last extension).
fn session_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(stem) = file_name.strip_suffix(&format!(".{SESSION_EXTENSION}")) {
        return stem.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    }
}
