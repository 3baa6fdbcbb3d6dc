//! Archive digests
//!
//! Streams a file through the requested algorithm and returns the lowercase hex
//! digest. [`ChecksumType::None`] short-circuits without opening the file.

use crate::error::{Error, Result};
use crate::types::ChecksumType;
use sha2::Digest;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Chunk size for reading files during hashing (64KB)
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the hex digest of `path`.
///
/// Returns `Ok(None)` for [`ChecksumType::None`] without touching the file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use archive_exec::checksum::checksum;
/// use archive_exec::ChecksumType;
/// use std::path::Path;
///
/// let digest = checksum(Path::new("/tmp/app.tar.gz"), ChecksumType::Sha256)?;
/// println!("{:?}", digest);
/// # Ok::<(), archive_exec::Error>(())
/// ```
pub fn checksum(path: &Path, algorithm: ChecksumType) -> Result<Option<String>> {
    let open = || {
        debug!(?path, %algorithm, "computing archive checksum");
        std::fs::File::open(path)
    };

    let digest = match algorithm {
        ChecksumType::None => return Ok(None),
        ChecksumType::Md5 => hash_md5(&mut open()?)?,
        ChecksumType::Sha1 => hash_with::<sha1::Sha1>(&mut open()?)?,
        ChecksumType::Sha256 => hash_with::<sha2::Sha256>(&mut open()?)?,
        ChecksumType::Sha384 => hash_with::<sha2::Sha384>(&mut open()?)?,
        ChecksumType::Sha512 => hash_with::<sha2::Sha512>(&mut open()?)?,
    };

    Ok(Some(digest))
}

/// Compute the digest of `path` and compare it to `expected` (case-insensitive).
///
/// [`ChecksumType::None`] always passes. An `expected` value that cannot be a
/// digest of `algorithm` is rejected before the file is read.
///
/// # Errors
///
/// Returns [`Error::Config`] when `expected` has the wrong length or non-hex
/// characters, [`Error::ChecksumMismatch`] when the digests differ, or
/// [`Error::Io`] if the file cannot be read.
pub fn verify_checksum(path: &Path, algorithm: ChecksumType, expected: &str) -> Result<()> {
    let Some(len) = algorithm.hex_len() else {
        return Ok(());
    };

    let expected = expected.trim().to_lowercase();
    if expected.len() != len || !expected.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Config {
            message: format!(
                "expected a {algorithm} checksum of {len} hex characters, got {expected:?}"
            ),
            key: Some("checksum_value".to_string()),
        });
    }

    let Some(actual) = checksum(path, algorithm)? else {
        return Ok(());
    };

    if actual != expected {
        return Err(Error::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    debug!(?path, %algorithm, "archive checksum verified");
    Ok(())
}

/// Stream a reader through any RustCrypto digest
fn hash_with<D: Digest>(reader: &mut impl Read) -> Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// MD5 through the `md5` crate's streaming context (separate API)
fn hash_md5(reader: &mut impl Read) -> Result<String> {
    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        context.consume(&buffer[..n]);
    }

    Ok(hex::encode(context.compute().0))
}
