//! Append-only ticket log
//!
//! Every successfully claimed ticket is appended to a plain text file as its
//! human-readable representation followed by a blank line. The file is an
//! audit trail for the operator, not a machine-readable store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::Ticket;

/// Writer for the persistent ticket log
pub struct TicketLog {
    path: PathBuf,
}

impl TicketLog {
    /// Create a log writer, making sure the parent directory exists
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Append one claimed ticket, separated from the previous entry by a
    /// blank line
    pub fn append(&self, ticket: &Ticket) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{ticket}\n")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
