/// Lowercase, fully-qualified form of `name` (always ends with a single dot).
///
/// This is the only shape of key the record store holds, so every lookup and
/// every write goes through it.
pub fn normalize_fqdn(name: &str) -> String {
    let trimmed = name.trim().trim_end_matches('.');
    let mut fqdn = trimmed.to_ascii_lowercase();
    fqdn.push('.');
    fqdn
}

/// Zone apex the responder answers for, e.g. `"example"` -> `"example."`.
pub fn suffix_zone(suffix: &str) -> String {
    let trimmed = suffix.trim().trim_matches('.');
    if trimmed.is_empty() {
        return ".".to_string();
    }
    format!("{}.", trimmed)
}
