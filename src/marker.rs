//! Marker value derivation.
//!
//! Markers are `<binding>-<hash8>` where the hash is SHA-256 over
//! `module_path#binding`. The same declaration therefore always gets the same
//! marker, across re-imports and across runs with the same module path.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref UNSAFE_MARKER_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

const HASH_LEN: usize = 8;

pub fn derive_marker(module_path: &str, binding: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(module_path.as_bytes());
    hasher.update(b"#");
    hasher.update(binding.as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    let name = UNSAFE_MARKER_CHARS.replace_all(binding, "_");
    format!("{}-{}", name, &digest[..HASH_LEN])
}
