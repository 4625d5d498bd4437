/// Folder-safe slug: lowercase ASCII alphanumerics, every other run of
/// characters collapsed to a single `-`, no leading or trailing `-`.
#[must_use]
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
