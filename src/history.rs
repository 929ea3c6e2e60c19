//! # Commit Log Streams
//!
//! Lazy, newest-first readers over `git log` output.
//!
//! - **`LogLines`** yields the raw lines of a log, either from a running `git`
//!   child process or from any in-memory `BufRead`.
//! - **`CommitLog`** sits on top of `LogLines` and yields one `CommitId` per
//!   non-blank line, as produced by `git log --pretty=%H`.
//!
//! Both streams are forward-only and cannot be restarted. They do not
//! deduplicate anything. When the stream is backed by a child process, the
//! exit status is checked once stdout is exhausted, so a repository that
//! cannot be read surfaces as an error at the end of the stream rather than
//! as a silently empty history.

use std::fmt;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::PathBuf;
use std::process::Child;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque commit identifier.
///
/// No ordering is defined between identifiers; only the position in a log
/// stream carries meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Line-by-line reader over a repository's log output.
pub struct LogLines {
    location: PathBuf,
    lines: Lines<Box<dyn BufRead>>,
    child: Option<Child>,
    /// Collects the child's stderr so a chatty failure cannot fill the pipe.
    stderr: Option<JoinHandle<String>>,
    finished: bool,
}

impl LogLines {
    /// Reads log text from an arbitrary reader. `location` is only used in
    /// error messages.
    pub fn from_reader<R>(location: impl Into<PathBuf>, reader: R) -> Self
    where
        R: BufRead + 'static,
    {
        let reader: Box<dyn BufRead> = Box::new(reader);
        Self {
            location: location.into(),
            lines: reader.lines(),
            child: None,
            stderr: None,
            finished: false,
        }
    }

    /// Streams the stdout of a spawned `git log` process.
    ///
    /// The child must have been spawned with a piped stdout.
    pub fn from_child(location: impl Into<PathBuf>, mut child: Child) -> Result<Self> {
        let location = location.into();
        let stdout = child.stdout.take().ok_or_else(|| Error::SourceUnavailable {
            location: location.clone(),
            message: "git log was started without a stdout pipe".to_string(),
        })?;
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut text = String::new();
                let _ = pipe.read_to_string(&mut text);
                text
            })
        });
        let reader: Box<dyn BufRead> = Box::new(BufReader::new(stdout));
        Ok(Self {
            location,
            lines: reader.lines(),
            child: Some(child),
            stderr,
            finished: false,
        })
    }

    /// Reaps the child process and turns a failed exit into an error.
    fn finish(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait().map_err(|e| Error::LogUnreadable {
            location: self.location.clone(),
            message: e.to_string(),
        })?;
        if status.success() {
            return Ok(());
        }

        let stderr = self
            .stderr
            .take()
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        Err(Error::SourceUnavailable {
            location: self.location.clone(),
            message: if stderr.trim().is_empty() {
                format!("git log exited with {}", status)
            } else {
                stderr.trim().to_string()
            },
        })
    }
}

impl Iterator for LogLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(Error::LogUnreadable {
                    location: self.location.clone(),
                    message: e.to_string(),
                }))
            }
            None => {
                self.finished = true;
                self.finish().err().map(Err)
            }
        }
    }
}

impl Drop for LogLines {
    fn drop(&mut self) {
        // Stopped early (a match was found): don't leave git running.
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Newest-first stream of commit identifiers.
pub struct CommitLog {
    lines: LogLines,
}

impl CommitLog {
    pub fn new(lines: LogLines) -> Self {
        Self { lines }
    }

    /// Builds a commit stream over text holding one identifier per line.
    pub fn from_reader<R>(location: impl Into<PathBuf>, reader: R) -> Self
    where
        R: BufRead + 'static,
    {
        Self::new(LogLines::from_reader(location, reader))
    }
}

impl Iterator for CommitLog {
    type Item = Result<CommitId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    let id = line.trim();
                    if id.is_empty() {
                        continue;
                    }
                    return Some(Ok(CommitId::new(id)));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
