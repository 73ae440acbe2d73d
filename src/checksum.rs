//! File content checksums.
//! Streams the file through a RustCrypto digest in 1 MiB chunks and returns
//! the digest as lowercase hex.

use anyhow::Result;
use digest::Digest;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::errors::RenameError;
use crate::fs_ops::io_error_with_help;

const CHUNK_SIZE: usize = 1024 * 1024;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    Md2,
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Md2 => "md2",
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = RenameError;
    /// Accepts `sha256`, `SHA-256`, `Sha_256` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "md2" => Ok(Algorithm::Md2),
            "md5" => Ok(Algorithm::Md5),
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(RenameError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Hex digest of the file at `path`.
pub fn file_digest(path: &Path, algorithm: Algorithm) -> Result<String> {
    let file = File::open(path).map_err(io_error_with_help("open file for checksum", path))?;
    let hex = match algorithm {
        Algorithm::Md2 => hash_reader::<md2::Md2, _>(file),
        Algorithm::Md5 => hash_reader::<md5::Md5, _>(file),
        Algorithm::Sha1 => hash_reader::<sha1::Sha1, _>(file),
        Algorithm::Sha256 => hash_reader::<sha2::Sha256, _>(file),
        Algorithm::Sha384 => hash_reader::<sha2::Sha384, _>(file),
        Algorithm::Sha512 => hash_reader::<sha2::Sha512, _>(file),
    }
    .map_err(io_error_with_help("read file for checksum", path))?;
    debug!(path = %path.display(), %algorithm, digest = %hex, "checksum computed");
    Ok(hex)
}

fn hash_reader<D: Digest, R: Read>(mut reader: R) -> io::Result<String>
where
    digest::Output<D>: fmt::LowerHex,
{
    let mut hasher = D::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
