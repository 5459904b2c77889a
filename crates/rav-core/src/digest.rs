//! SHA-512 digests of release artifacts.
//!
//! Artifacts can be large (installers, disk images), so digests are computed
//! over fixed-size chunks and memory use stays bounded regardless of file
//! size.

use anyhow::{Context, Result};
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-512 of a file and return the digest as lowercase hex
/// (128 characters).
pub fn sha512_file(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    sha512_reader(&mut f).with_context(|| format!("read {}", path.display()))
}

/// Stream a reader through SHA-512 in `BUF_SIZE` chunks.
fn sha512_reader<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha512::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
