use crate::error::{PruneError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn compute_blake3_hash<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        log::error!("Failed to open file for hashing: {}: {}", path.display(), e);
        e
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Fails unless `path` exists and hashes to `expected_hash`.
pub fn verify_destination<P: AsRef<Path>>(path: P, expected_hash: &str) -> Result<()> {
    let path = path.as_ref();

    let matches = path.exists() && compute_blake3_hash(path)?.eq_ignore_ascii_case(expected_hash);
    if !matches {
        return Err(PruneError::DestinationVerification {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
