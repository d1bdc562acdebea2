//! Frontmatter scanning for skill and agent definition files.
//!
//! This is line-oriented text scanning, not YAML parsing:
//! anything that looks like `key: value` between the `---` markers is
//! captured verbatim, and malformed input degrades to an empty mapping
//! instead of an error.

use std::collections::BTreeMap;

/// Parsed frontmatter result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// Raw text between the `---` markers, if a block was found.
    pub block: Option<&'a str>,
    /// Field name to raw value. Empty when no block was found.
    pub fields: BTreeMap<String, String>,
    /// The markdown body after the frontmatter.
    pub body: &'a str,
}

impl Frontmatter<'_> {
    /// Returns the raw value of `key`, or `""` when absent.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }
}

/// Splits `content` into the frontmatter block and the body.
///
/// The opener must be the very first line and be exactly `---`; the
/// block ends at the next line that is exactly `---`. Returns `None`
/// when there is no opener or the closer is missing.
#[must_use]
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let (opener, line_ending) = if content.starts_with("---\r\n") {
        ("---\r\n", "\r\n")
    } else if content.starts_with("---\n") {
        ("---\n", "\n")
    } else {
        return None;
    };

    let after_opener = &content[opener.len()..];
    let empty_closer = format!("---{line_ending}");
    let closer = format!("{line_ending}---{line_ending}");
    let closer_eof = format!("{line_ending}---");

    if let Some(body) = after_opener.strip_prefix(empty_closer.as_str()) {
        Some(("", body))
    } else if let Some(pos) = after_opener.find(&closer) {
        Some((&after_opener[..pos], &after_opener[pos + closer.len()..]))
    } else if let Some(block) = after_opener.strip_suffix(closer_eof.as_str()) {
        Some((block, ""))
    } else if after_opener == "---" {
        Some(("", ""))
    } else {
        None
    }
}

/// Parses frontmatter from markdown content. Never fails.
///
/// Every line of the block containing a colon is split once on the first
/// colon; key and value are trimmed. Later duplicates overwrite earlier
/// ones. Content without a complete block yields an empty mapping and the
/// whole text as body.
#[must_use]
pub fn parse_frontmatter(content: &str) -> Frontmatter<'_> {
    match split_frontmatter(content) {
        Some((block, body)) => Frontmatter {
            block: Some(block),
            fields: parse_fields(block),
            body,
        },
        None => Frontmatter {
            block: None,
            fields: BTreeMap::new(),
            body: content,
        },
    }
}

/// Scans `key: value` lines from a frontmatter block.
#[must_use]
pub fn parse_fields(block: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), value.trim().to_string());
    }
    fields
}

/// Continuation-aware variant of [`parse_fields`].
///
/// A field starts on a line that contains a colon and does not begin with
/// a space. Lines beginning with a space belong to the current field and
/// are kept verbatim, each on its own line after the inline value. The
/// inline part is trimmed; trailing whitespace of the whole value is
/// dropped. A value spanning several lines therefore starts with `\n`
/// when nothing followed the colon.
#[must_use]
pub fn parse_fields_folded(block: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for line in block.lines() {
        if !line.starts_with(' ')
            && let Some((key, value)) = line.split_once(':')
        {
            if let Some((k, v)) = current.take() {
                fields.insert(k, v.trim_end().to_string());
            }
            current = Some((key.trim().to_string(), value.trim().to_string()));
        } else if line.starts_with(' ')
            && let Some((_, value)) = current.as_mut()
        {
            value.push('\n');
            value.push_str(line);
        }
    }

    if let Some((k, v)) = current {
        fields.insert(k, v.trim_end().to_string());
    }
    fields
}

/// Returns the first `max_chars` characters of `value`.
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
