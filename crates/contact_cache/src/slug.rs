#![forbid(unsafe_code)]

/// Derives the local cache key from a first name. Case-normalizing and
/// separator-collapsing so that visually-equivalent names collide: every run
/// of non-alphanumeric characters becomes a single `-`, leading/trailing
/// separators are dropped. Idempotent on its own output.
pub fn slugify(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    mapped
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
