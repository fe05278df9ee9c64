use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an import finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - source file path (repo-relative)
/// - import specifier
///
/// Line numbers are left out so findings keep their identity when code moves.
pub fn fingerprint_for_import(
    check_id: &str,
    code: &str,
    source_path: &str,
    specifier: &str,
) -> String {
    let canonical = [check_id, code, source_path, specifier].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
