//! Line-oriented `key = value` configuration parsing.
//!
//! The preferences file keeps one entry per line so that comments and
//! unknown lines written by hand survive a rewrite by the store.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Split a `key = value` line.
///
/// Inputs:
/// - `line`: Raw line from the file
///
/// Output:
/// - `Some((key, value))` borrowed from `line`, or `None` for comments, blanks and lines without `=`
///
/// Details:
/// - Splits on the first `=`; trims both sides
/// - Keys are case-sensitive (`darkMode` and `darkmode` are different entries)
/// - Values may themselves contain `=`
#[must_use]
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    if skip_comment_or_empty(line) {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// What: Find the value for `key` in file content.
///
/// Inputs:
/// - `content`: Whole file content
/// - `key`: Entry to look for
///
/// Output:
/// - Value of the last matching entry, or `None` when absent
#[must_use]
pub fn lookup<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content
        .lines()
        .filter_map(split_entry)
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .last()
}

/// What: Replace or append `key = value` while preserving every other line.
///
/// Inputs:
/// - `content`: Existing file content (may be empty)
/// - `key`: Entry to write
/// - `value`: New value
///
/// Output:
/// - Updated content, always ending with a newline
///
/// Details:
/// - Every existing line for `key` is rewritten so that duplicates cannot shadow the new value
/// - Missing keys are appended at the end
#[must_use]
pub fn upsert(content: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| match split_entry(line) {
            Some((k, _)) if k == key => {
                replaced = true;
                format!("{key} = {value}")
            }
            _ => line.to_string(),
        })
        .collect();
    if !replaced {
        lines.push(format!("{key} = {value}"));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Entry splitting skips comments and keeps `=` inside values.
    ///
    /// - Input: Comment, blank, entry and entry with `=` in value
    /// - Output: `None` for comment/blank; trimmed pairs otherwise
    fn config_split_entry() {
        assert_eq!(split_entry("# darkMode = true"), None);
        assert_eq!(split_entry("   "), None);
        assert_eq!(split_entry("no equals sign"), None);
        assert_eq!(split_entry(" = orphan"), None);
        assert_eq!(split_entry("darkMode = true"), Some(("darkMode", "true")));
        assert_eq!(split_entry("note=a=b"), Some(("note", "a=b")));
    }

    #[test]
    /// What: Lookup returns the last matching entry only for exact keys.
    ///
    /// - Input: Content with duplicate and similarly-named keys
    /// - Output: Last value wins; case-sensitive match
    fn config_lookup() {
        let content = "language = en\nLanguage = xx\nlanguage = tl\n";
        assert_eq!(lookup(content, "language"), Some("tl"));
        assert_eq!(lookup(content, "darkMode"), None);
    }

    #[test]
    /// What: Upsert rewrites existing entries in place and appends new ones.
    ///
    /// - Input: Content with a comment and one entry
    /// - Output: Comment preserved, entry replaced, new key appended
    fn config_upsert() {
        let content = "# preferences\ndarkMode = false\n";
        let updated = upsert(content, "darkMode", "true");
        assert_eq!(updated, "# preferences\ndarkMode = true\n");
        let appended = upsert(&updated, "language", "tl");
        assert_eq!(appended, "# preferences\ndarkMode = true\nlanguage = tl\n");
        assert_eq!(upsert("", "language", "en"), "language = en\n");
    }
}
