//! Skill metadata validation for proposed `SKILL.md` writes.
//!
//! Like the gap analyzer, validation collects every issue it finds
//! instead of stopping at the first one.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::discovery::SKILL_FILE_NAME;

// Issue code constants for machine-readable classification.

/// Content does not start with a frontmatter block.
pub const CODE_FRONTMATTER_MISSING: &str = "skill.frontmatter.missing";

/// No `name` field in frontmatter.
pub const CODE_SKILL_NAME_MISSING: &str = "skill.name.missing";

/// `name` contains characters outside `[a-z0-9-]`.
pub const CODE_SKILL_NAME_FORMAT: &str = "skill.name.format";

/// `name` is longer than [`SKILL_NAME_MAX_LEN`].
pub const CODE_SKILL_NAME_LENGTH: &str = "skill.name.length";

/// No `description` field in frontmatter.
pub const CODE_SKILL_DESCRIPTION_MISSING: &str = "skill.description.missing";

/// `description` does not begin with "Use when".
pub const CODE_SKILL_DESCRIPTION_PREFIX: &str = "skill.description.prefix";

/// `description` is longer than [`SKILL_DESCRIPTION_MAX_LEN`].
pub const CODE_SKILL_DESCRIPTION_LENGTH: &str = "skill.description.length";

/// Maximum skill name length in characters.
pub const SKILL_NAME_MAX_LEN: usize = 64;

/// Maximum skill description length in characters.
pub const SKILL_DESCRIPTION_MAX_LEN: usize = 1024;

/// Allowed skill name characters.
pub const SKILL_NAME_REGEX: &str = r"^[a-z0-9-]+$";

/// Required (case-insensitive) description prefix.
pub const DESCRIPTION_PREFIX: &str = "use when";

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\n(.*?)\n---").expect("valid frontmatter regex")
});

static NAME_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^name:\s*(.+)$").expect("valid name field regex"));

static DESCRIPTION_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^description:\s*(.+)$").expect("valid description field regex")
});

static SKILL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SKILL_NAME_REGEX).expect("valid skill name regex"));

/// A problem found in a skill's metadata.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The frontmatter field the issue is about.
    pub field: &'static str,
    /// Human-readable description of the issue.
    pub message: String,
    /// Machine-readable issue code. See the `CODE_*` constants.
    pub code: &'static str,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            field,
            message: message.into(),
            code,
        }
    }
}

/// The tool call a pre-write hook receives on stdin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolEvent {
    pub tool_input: ToolInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolInput {
    pub file_path: String,
    pub content: String,
}

impl ToolEvent {
    /// Validates the written content if the target is a `SKILL.md`.
    ///
    /// Returns `None` when the event writes any other file.
    #[must_use]
    pub fn validate(&self) -> Option<Vec<ValidationIssue>> {
        self.tool_input
            .file_path
            .ends_with(SKILL_FILE_NAME)
            .then(|| validate_skill_content(&self.tool_input.content))
    }
}

/// Validates the frontmatter of a proposed `SKILL.md`.
///
/// An empty result means the metadata is valid.
#[must_use]
pub fn validate_skill_content(content: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !content.starts_with("---") {
        issues.push(ValidationIssue::new(
            "frontmatter",
            "Missing YAML frontmatter (must start with ---)",
            CODE_FRONTMATTER_MISSING,
        ));
    }

    let Some(block) = FRONTMATTER_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return issues;
    };

    match field_value(&NAME_FIELD_RE, block) {
        Some(name) => issues.extend(validate_name(name)),
        None => issues.push(ValidationIssue::new(
            "name",
            "Missing required 'name' field in frontmatter",
            CODE_SKILL_NAME_MISSING,
        )),
    }

    match field_value(&DESCRIPTION_FIELD_RE, block) {
        Some(description) => issues.extend(validate_description(description)),
        None => issues.push(ValidationIssue::new(
            "description",
            "Missing required 'description' field in frontmatter",
            CODE_SKILL_DESCRIPTION_MISSING,
        )),
    }

    issues
}

fn field_value<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

fn validate_name(name: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !SKILL_NAME_RE.is_match(name) {
        issues.push(ValidationIssue::new(
            "name",
            format!("Invalid name '{name}': use lowercase letters, numbers, hyphens only"),
            CODE_SKILL_NAME_FORMAT,
        ));
    }

    let len = name.chars().count();
    if len > SKILL_NAME_MAX_LEN {
        issues.push(ValidationIssue::new(
            "name",
            format!("Name too long ({len} chars): max {SKILL_NAME_MAX_LEN} characters"),
            CODE_SKILL_NAME_LENGTH,
        ));
    }

    issues
}

fn validate_description(description: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !description.to_lowercase().starts_with(DESCRIPTION_PREFIX) {
        issues.push(ValidationIssue::new(
            "description",
            "Description should start with 'Use when...'",
            CODE_SKILL_DESCRIPTION_PREFIX,
        ));
    }

    let len = description.chars().count();
    if len > SKILL_DESCRIPTION_MAX_LEN {
        issues.push(ValidationIssue::new(
            "description",
            format!(
                "Description too long ({len} chars): max {SKILL_DESCRIPTION_MAX_LEN} characters"
            ),
            CODE_SKILL_DESCRIPTION_LENGTH,
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(issues: &[ValidationIssue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn valid_metadata_has_no_issues() {
        let content = "---\nname: tdd-loop\ndescription: Use when writing tests first\n---\nBody";
        assert!(validate_skill_content(content).is_empty());
    }

    #[test]
    fn missing_frontmatter_is_reported() {
        let issues = validate_skill_content("# Title\nname: x");
        assert_eq!(codes(&issues), vec![CODE_FRONTMATTER_MISSING]);
    }

    #[test]
    fn uppercase_name_is_rejected() {
        let content = "---\nname: My_Skill\ndescription: Use when x\n---\n";
        let issues = validate_skill_content(content);
        assert_eq!(codes(&issues), vec![CODE_SKILL_NAME_FORMAT]);
        assert!(issues[0].message.contains("My_Skill"));
    }

    #[test]
    fn long_name_is_rejected() {
        let name = "a".repeat(65);
        let content = format!("---\nname: {name}\ndescription: Use when x\n---\n");
        assert_eq!(
            codes(&validate_skill_content(&content)),
            vec![CODE_SKILL_NAME_LENGTH]
        );
    }

    #[test]
    fn description_prefix_is_case_insensitive() {
        let content = "---\nname: a\ndescription: USE WHEN shouting\n---\n";
        assert!(validate_skill_content(content).is_empty());
    }

    #[test]
    fn description_without_prefix_is_rejected() {
        let content = "---\nname: a\ndescription: Helps with things\n---\n";
        assert_eq!(
            codes(&validate_skill_content(content)),
            vec![CODE_SKILL_DESCRIPTION_PREFIX]
        );
    }

    #[test]
    fn long_description_is_rejected() {
        let description = format!("Use when {}", "x".repeat(1100));
        let content = format!("---\nname: a\ndescription: {description}\n---\n");
        assert_eq!(
            codes(&validate_skill_content(&content)),
            vec![CODE_SKILL_DESCRIPTION_LENGTH]
        );
    }

    #[test]
    fn missing_fields_are_collected() {
        let content = "---\nmodel: opus\n---\n";
        assert_eq!(
            codes(&validate_skill_content(content)),
            vec![CODE_SKILL_NAME_MISSING, CODE_SKILL_DESCRIPTION_MISSING]
        );
    }

    #[test]
    fn event_for_other_files_is_skipped() {
        let event: ToolEvent = serde_json::from_value(serde_json::json!({
            "tool_input": {"file_path": "/repo/README.md", "content": "anything"}
        }))
        .unwrap();
        assert!(event.validate().is_none());
    }

    #[test]
    fn event_for_skill_file_is_validated() {
        let event: ToolEvent = serde_json::from_value(serde_json::json!({
            "tool_input": {"file_path": "/repo/.claude/skills/a/SKILL.md", "content": "no frontmatter"}
        }))
        .unwrap();
        let issues = event.validate().unwrap();
        assert_eq!(codes(&issues), vec![CODE_FRONTMATTER_MISSING]);
    }

    #[test]
    fn event_without_tool_input_defaults() {
        let event: ToolEvent = serde_json::from_str("{}").unwrap();
        assert!(event.validate().is_none());
    }
}
