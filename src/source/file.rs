//! File-backed source
//!
//! Wraps a read/write `std::fs::File`.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};

use super::ByteSource;

/// A [`ByteSource`] over a file on disk
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    /// `None` once closed
    file: Option<File>,
}

impl FileSource {
    /// Open a file for reading and writing
    pub fn open(path: &Path, config: &ChannelConfig) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(config.create)
            .truncate(config.truncate)
            .open(path)?;

        debug!(path = %path.display(), "Opened file source");

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    /// Wrap an already opened file
    pub fn from_file(file: File, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Some(file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(ChannelError::Closed)
    }
}

impl ByteSource for FileSource {
    fn position(&mut self, index: u64) -> Result<()> {
        self.file()?.seek(SeekFrom::Start(index))?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let file = self.file()?;
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.file()?.write_all(buf)?;
        Ok(())
    }

    fn size(&mut self) -> Result<u64> {
        Ok(self.file()?.metadata()?.len())
    }

    fn truncate(&mut self, new_size: u64) -> Result<()> {
        self.file()?.set_len(new_size)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let file = self.file()?;
        file.flush()?;
        file.sync_data()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            debug!(path = %self.path.display(), "Closed file source");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }
}
