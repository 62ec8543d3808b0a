//! Content digest value objects
//!
//! [`Digest`] is the SHA-256 we compute ourselves over artifact bytes and
//! record in the lockfile. [`DeclaredDigest`] is what a remote side claims,
//! possibly listing several algorithms (`sha1:...;sha256:...`).

use std::fmt;
use std::io::{self, Read, Write};

use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Lowercase hex SHA-256 of an artifact's bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Prefix used when a digest is written in multi-digest form
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap an existing hex string (with or without the `sha256:` prefix)
    pub fn new(hex: &str) -> Self {
        Self(hex.strip_prefix(Self::PREFIX).unwrap_or(hex).to_ascii_lowercase())
    }

    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(content)))
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut writer = HashingWriter::new(io::sink());
        io::copy(reader, &mut writer)?;
        Ok(writer.finish().1)
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every digest computed over one stream of bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    pub sha256: Digest,
    pub sha1: String,
}

impl Checksums {
    pub fn from_bytes(content: &[u8]) -> Self {
        Self {
            sha256: Digest::from_bytes(content),
            sha1: format!("{:x}", Sha1::digest(content)),
        }
    }
}

/// Writer adapter that hashes everything passing through it
pub struct HashingWriter<W> {
    inner: W,
    sha256: Sha256,
    sha1: Sha1,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            sha256: Sha256::new(),
            sha1: Sha1::new(),
        }
    }

    pub fn finish(self) -> (W, Digest) {
        let (inner, checksums) = self.finish_all();
        (inner, checksums.sha256)
    }

    pub fn finish_all(self) -> (W, Checksums) {
        let checksums = Checksums {
            sha256: Digest(format!("{:x}", self.sha256.finalize())),
            sha1: format!("{:x}", self.sha1.finalize()),
        };
        (self.inner, checksums)
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.sha256.update(&buf[..written]);
        self.sha1.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Hash algorithms that may appear in a declared digest, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestParseError {
    #[error("is empty")]
    Empty,
    #[error("uses unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("contains malformed hex '{0}'")]
    InvalidHex(String),
}

/// A digest as reported by a remote side, in canonical comparable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDigest {
    entries: Vec<(DigestAlgorithm, String)>,
}

impl DeclaredDigest {
    /// Parse `hex`, `alg:hex` or a `;`-separated list of either
    pub fn parse(declared: &str) -> Result<Self, DigestParseError> {
        let mut entries = Vec::new();
        for part in declared.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (algorithm, hex) = match part.split_once(':') {
                Some((prefix, hex)) => (
                    DigestAlgorithm::from_prefix(prefix)
                        .ok_or_else(|| DigestParseError::UnknownAlgorithm(prefix.to_string()))?,
                    hex,
                ),
                None => (
                    DigestAlgorithm::from_hex_len(part.len())
                        .ok_or_else(|| DigestParseError::InvalidHex(part.to_string()))?,
                    part,
                ),
            };
            if hex.len() != algorithm.hex_len() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(DigestParseError::InvalidHex(hex.to_string()));
            }
            entries.push((algorithm, hex.to_ascii_lowercase()));
        }

        if entries.is_empty() {
            return Err(DigestParseError::Empty);
        }
        Ok(Self { entries })
    }

    /// The SHA-256 member, if one was declared
    pub fn sha256(&self) -> Option<Digest> {
        self.member(DigestAlgorithm::Sha256).map(|hex| Digest(hex.to_string()))
    }

    pub fn member(&self, algorithm: DigestAlgorithm) -> Option<&str> {
        self.entries
            .iter()
            .find(|(alg, _)| *alg == algorithm)
            .map(|(_, hex)| hex.as_str())
    }

    /// Strongest declared member among `supported`
    pub fn strongest_of(&self, supported: &[DigestAlgorithm]) -> Option<(DigestAlgorithm, &str)> {
        self.entries
            .iter()
            .filter(|(alg, _)| supported.contains(alg))
            .max_by_key(|(alg, _)| *alg)
            .map(|(alg, hex)| (*alg, hex.as_str()))
    }

    pub fn algorithms(&self) -> impl Iterator<Item = DigestAlgorithm> + '_ {
        self.entries.iter().map(|(alg, _)| *alg)
    }
}
