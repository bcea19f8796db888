use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ticket::TicketEntry;
use crate::error::AppResult;

/// The plain-text Org file tickets are recorded in.
pub struct TicketFile {
    path: PathBuf,
}

impl TicketFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `entry` as exactly one line.
    pub fn append(&self, entry: &TicketEntry) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)?;

        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&entry.to_org_line());
        line.push('\n');

        file.write_all(line.as_bytes())?;
        debug!(path = %self.path.display(), branch = %entry.branch, "appended ticket entry");
        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> AppResult<bool> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
