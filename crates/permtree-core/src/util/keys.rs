//! Key and dot-path utilities.
//!
//! Permission paths are dot-separated key sequences (`files.read`). Keys
//! derived from identifiers (naming schemes) are normalized to kebab-case.

use crate::{Error, Result};

/// Path separator between node keys.
pub const PATH_SEPARATOR: char = '.';

/// Split a dot-notated path into its keys.
///
/// Fails with [`Error::InvalidArgument`] when the path is empty or contains
/// an empty segment (`files..read`, `.files`, `files.`).
///
/// # Examples
///
/// ```
/// use permtree_core::split_path;
///
/// assert_eq!(split_path("files.read").unwrap(), vec!["files", "read"]);
/// assert!(split_path("").is_err());
/// assert!(split_path("files..read").is_err());
/// ```
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(Error::invalid_argument(
            "Path should contain at least 1 fragment",
        ));
    }

    let keys: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if keys.iter().any(|key| key.is_empty()) {
        return Err(Error::invalid_argument(format!(
            "Path '{path}' contains an empty fragment"
        )));
    }
    Ok(keys)
}

/// Normalize an identifier to lowercase kebab-case.
///
/// Performs the following transformations:
/// 1. Splits on any non-alphanumeric character (collapsing runs)
/// 2. Splits camelCase and PascalCase word boundaries
/// 3. Keeps acronyms together (`XMLParser` → `xml-parser`)
/// 4. Lowercases every word and joins with hyphens
///
/// # Examples
///
/// ```
/// use permtree_core::kebab_case;
///
/// assert_eq!(kebab_case("readFiles"), "read-files");
/// assert_eq!(kebab_case("UserProfile"), "user-profile");
/// assert_eq!(kebab_case("non_chord_tone"), "non-chord-tone");
/// assert_eq!(kebab_case("XMLParser"), "xml-parser");
/// ```
pub fn kebab_case(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words.join("-")
}
