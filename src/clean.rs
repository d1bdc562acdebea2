//! Frontmatter cleaning and compliance reporting for `SKILL.md` files.
//!
//! Cleaning drops every frontmatter field outside [`ALLOWED_FIELDS`],
//! writes the survivors back in that order, and leaves the body alone.
//! Files that are already compliant are never rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::discovery::SKILL_FILE_NAME;
use crate::error::Result;
use crate::frontmatter::{parse_fields_folded, split_frontmatter};

/// Frontmatter fields a skill may carry, in output order.
pub const ALLOWED_FIELDS: &[&str] = &[
    "name",
    "description",
    "allowed-tools",
    "model",
    "context",
    "agent",
    "hooks",
    "user-invocable",
    "disable-model-invocation",
];

/// Returns `true` if `field` is in [`ALLOWED_FIELDS`].
#[must_use]
pub fn is_allowed_field(field: &str) -> bool {
    ALLOWED_FIELDS.contains(&field)
}

/// Returns the cleaned file content, or `None` if nothing needs to change.
///
/// Content without a complete frontmatter block is left untouched. The
/// rebuilt block uses the line ending of the opening `---` line.
#[must_use]
pub fn clean_content(content: &str) -> Option<String> {
    let (block, body) = split_frontmatter(content)?;
    let fields = parse_fields_folded(block);

    if fields.keys().all(|k| is_allowed_field(k)) {
        return None;
    }

    let eol = if content.starts_with("---\r\n") { "\r\n" } else { "\n" };
    let mut out = format!("---{eol}");
    for &field in ALLOWED_FIELDS {
        let Some(value) = fields.get(field) else {
            continue;
        };
        let value = value.replace('\n', eol);
        if value.is_empty() || value.starts_with(eol) {
            out.push_str(&format!("{field}:{value}{eol}"));
        } else {
            out.push_str(&format!("{field}: {value}{eol}"));
        }
    }
    out.push_str(&format!("---{eol}"));
    out.push_str(body);
    Some(out)
}

/// Cleans one file in place. Returns `true` if it was rewritten.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or written.
pub fn clean_file(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    match clean_content(&content) {
        Some(cleaned) => {
            fs::write(path, cleaned)?;
            info!(path = %path.display(), "cleaned frontmatter");
            Ok(true)
        }
        None => {
            debug!(path = %path.display(), "frontmatter already clean");
            Ok(false)
        }
    }
}

/// Outcome of cleaning a skills directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    /// Number of `SKILL.md` files visited.
    pub total: usize,
    /// Files that were rewritten.
    pub cleaned: Vec<PathBuf>,
}

/// Every `SKILL.md` below `dir`, sorted.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be walked.
pub fn find_skill_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == SKILL_FILE_NAME {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Cleans every `SKILL.md` below `dir`.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be
/// read or written.
pub fn clean_skills(dir: &Path) -> Result<CleanSummary> {
    let files = find_skill_files(dir)?;
    let mut summary = CleanSummary {
        total: files.len(),
        cleaned: Vec::new(),
    };
    for file in files {
        if clean_file(&file)? {
            summary.cleaned.push(file);
        }
    }
    Ok(summary)
}

/// Compliance of one `SKILL.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Compliance {
    /// No complete frontmatter block.
    NoFrontmatter,
    /// Every field is allowed.
    Valid { fields: Vec<String> },
    /// Some fields are outside the allow-list.
    Invalid { invalid_fields: Vec<String> },
}

impl Compliance {
    /// Checks the frontmatter of `content`.
    #[must_use]
    pub fn of(content: &str) -> Self {
        let Some((block, _)) = split_frontmatter(content) else {
            return Self::NoFrontmatter;
        };
        let fields = parse_fields_folded(block);
        let invalid_fields: Vec<String> = fields
            .keys()
            .filter(|k| !is_allowed_field(k))
            .cloned()
            .collect();
        if invalid_fields.is_empty() {
            Self::Valid {
                fields: fields.into_keys().collect(),
            }
        } else {
            Self::Invalid { invalid_fields }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// One line of the compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceEntry {
    pub path: PathBuf,
    pub compliance: Compliance,
}

/// Checks every `SKILL.md` below `dir` without modifying anything.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be read.
pub fn compliance_report(dir: &Path) -> Result<Vec<ComplianceEntry>> {
    find_skill_files(dir)?
        .into_iter()
        .map(|path| -> Result<ComplianceEntry> {
            let content = fs::read_to_string(&path)?;
            Ok(ComplianceEntry {
                compliance: Compliance::of(&content),
                path,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compliant_content_is_untouched() {
        let content = "---\nname: a\ndescription: Use when x\n---\nBody\n";
        assert_eq!(clean_content(content), None);
    }

    #[test]
    fn content_without_frontmatter_is_untouched() {
        assert_eq!(clean_content("# Title\n"), None);
    }

    #[test]
    fn drops_unknown_fields_and_reorders() {
        let content = "---\nversion: 2\nmodel: opus\nname: a\ntriggers: x\n---\n# Body\n\n---\nkept\n";
        let cleaned = clean_content(content).unwrap();
        assert_eq!(cleaned, "---\nname: a\nmodel: opus\n---\n# Body\n\n---\nkept\n");
    }

    #[test]
    fn keeps_multiline_values_verbatim() {
        let content =
            "---\nname: a\nhooks:\n  PreToolUse:\n    - matcher: Bash\ntags: [x]\n---\nBody";
        let cleaned = clean_content(content).unwrap();
        assert_eq!(
            cleaned,
            "---\nname: a\nhooks:\n  PreToolUse:\n    - matcher: Bash\n---\nBody"
        );
    }

    #[test]
    fn crlf_content_keeps_crlf_line_endings() {
        let content = "---\r\nname: a\r\nhooks:\r\n  Stop: []\r\nx: 1\r\n---\r\nBody\r\nline2\r\n";
        let cleaned = clean_content(content).unwrap();
        assert_eq!(
            cleaned,
            "---\r\nname: a\r\nhooks:\r\n  Stop: []\r\n---\r\nBody\r\nline2\r\n"
        );
        assert!(!cleaned.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn clean_skills_walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        let dirty = dir.path().join("group/dirty/SKILL.md");
        let clean = dir.path().join("clean/SKILL.md");
        fs::create_dir_all(dirty.parent().unwrap()).unwrap();
        fs::create_dir_all(clean.parent().unwrap()).unwrap();
        fs::write(&dirty, "---\nname: dirty\nauthor: me\n---\nBody").unwrap();
        fs::write(&clean, "---\nname: clean\n---\nBody").unwrap();

        let summary = clean_skills(dir.path()).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.cleaned, vec![dirty.clone()]);
        assert_eq!(
            fs::read_to_string(&dirty).unwrap(),
            "---\nname: dirty\n---\nBody"
        );
        assert_eq!(
            fs::read_to_string(&clean).unwrap(),
            "---\nname: clean\n---\nBody"
        );
    }

    #[test]
    fn compliance_classifies_files() {
        assert_eq!(Compliance::of("no block"), Compliance::NoFrontmatter);
        assert_eq!(
            Compliance::of("---\nname: a\nmodel: b\n---\n"),
            Compliance::Valid {
                fields: vec!["model".into(), "name".into()]
            }
        );
        assert_eq!(
            Compliance::of("---\nname: a\nversion: 1\n---\n"),
            Compliance::Invalid {
                invalid_fields: vec!["version".into()]
            }
        );
    }

    #[test]
    fn compliance_report_does_not_modify_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/SKILL.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "---\nname: a\nextra: 1\n---\n").unwrap();

        let report = compliance_report(dir.path()).unwrap();
        assert_eq!(report.len(), 1);
        assert!(!report[0].compliance.is_valid());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\nname: a\nextra: 1\n---\n"
        );
    }
}
