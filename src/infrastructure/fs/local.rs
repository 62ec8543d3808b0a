//! Local File System
//!
//! Atomic writes and hashed copies on local disk. Every write lands in a
//! temp file beside the destination and is renamed into place, so readers
//! never observe a half-written file.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::value_objects::{Digest, HashingWriter};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Replace `path` with `content` in one rename
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut temp = self.temp_beside(path)?;
        temp.write_all(content)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Stream `reader` into `path` atomically, hashing the bytes on the way
    pub fn stream_atomic(&self, path: &Path, reader: &mut dyn Read) -> io::Result<Digest> {
        let temp = self.temp_beside(path)?;
        let mut writer = HashingWriter::new(BufWriter::new(temp));
        io::copy(reader, &mut writer)?;
        let (buffered, digest) = writer.finish();
        let temp = buffered.into_inner().map_err(|err| err.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;
        Ok(digest)
    }

    /// Copy `from` to `to` atomically and return the digest of the copy
    pub fn copy_hashed(&self, from: &Path, to: &Path) -> io::Result<Digest> {
        let mut reader = BufReader::new(File::open(from)?);
        self.stream_atomic(to, &mut reader)
    }

    pub fn hash_file(&self, path: &Path) -> io::Result<Digest> {
        let mut reader = BufReader::new(File::open(path)?);
        Digest::from_reader(&mut reader)
    }

    fn temp_beside(&self, path: &Path) -> io::Result<NamedTempFile> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        NamedTempFile::new_in(parent)
    }
}
