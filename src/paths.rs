use std::path::PathBuf;

pub const PATH_DELIMITER: char = ',';

/// Value parser for a single raw token of a path-list option.
///
/// A token may carry several paths joined by `,`. Empty segments (`a,,b`,
/// `a,`, `,a`, or an empty token) are rejected so a malformed list never
/// reaches the configuration.
pub fn path_list_token(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("path list must not be empty".to_string());
    }
    if s.split(PATH_DELIMITER).any(str::is_empty) {
        return Err(format!(
            "path list '{s}' contains an empty entry; remove the stray '{PATH_DELIMITER}'"
        ));
    }
    Ok(s.to_string())
}

/// Flattens the raw tokens of one option into an ordered list of paths:
/// token by token, then left to right within a token. No deduplication.
pub fn split_path_list(tokens: &[String]) -> Vec<PathBuf> {
    tokens
        .iter()
        .flat_map(|token| token.split(PATH_DELIMITER))
        .map(PathBuf::from)
        .collect()
}
