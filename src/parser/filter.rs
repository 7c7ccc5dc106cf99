use std::path::Path;

/// Return true if the path carries a `.json` extension (case-insensitive)
pub fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Heuristic for CLI input that is an inline document rather than a path
pub fn looks_like_inline_json(input: &str) -> bool {
    let trimmed = input.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}
