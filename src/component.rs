//! Discovered component records.
//!
//! Every record embeds a [`ComponentInfo`] (name, path, scope). The
//! closed set of variants is exposed through [`Component`], a borrowed
//! view used wherever code needs to treat components uniformly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::frontmatter::{parse_frontmatter, truncate_chars};
use crate::types::{LifecycleEvent, Scope};

/// Maximum number of characters of a skill description kept in the
/// inventory.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Fields shared by every component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Component name (directory name, file stem, or config key).
    pub name: String,
    /// Filesystem location the component was read from.
    #[serde(default, alias = "source")]
    pub path: PathBuf,
    /// Personal or project.
    #[serde(default)]
    pub scope: Scope,
}

impl ComponentInfo {
    /// Creates a new info record.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            scope,
        }
    }
}

/// A skill directory containing `SKILL.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(flatten)]
    pub info: ComponentInfo,
    /// `true` if `hooks:` appears anywhere in the file (case-insensitive).
    #[serde(default)]
    pub has_hooks: bool,
    /// First 100 characters of the frontmatter `description`.
    #[serde(default)]
    pub description: String,
}

impl Skill {
    /// Builds a skill record from the contents of its `SKILL.md`.
    #[must_use]
    pub fn from_content(info: ComponentInfo, content: &str) -> Self {
        let frontmatter = parse_frontmatter(content);
        Self {
            info,
            has_hooks: content.to_lowercase().contains("hooks:"),
            description: truncate_chars(
                frontmatter.get_or_empty("description"),
                DESCRIPTION_MAX_CHARS,
            ),
        }
    }

    /// Record used when `SKILL.md` exists but could not be read.
    #[must_use]
    pub fn unreadable(info: ComponentInfo) -> Self {
        Self {
            info,
            has_hooks: false,
            description: String::new(),
        }
    }
}

/// An agent definition file (`agents/<name>.md`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(flatten)]
    pub info: ComponentInfo,
    /// `true` if the text mentions `skills:` or frontmatter has `skills`.
    #[serde(default)]
    pub has_skills: bool,
    /// Raw frontmatter `skills` value.
    #[serde(default)]
    pub skills: String,
    /// Raw frontmatter `model` value.
    #[serde(default)]
    pub model: String,
}

impl Agent {
    /// Builds an agent record from the contents of its definition file.
    #[must_use]
    pub fn from_content(info: ComponentInfo, content: &str) -> Self {
        let frontmatter = parse_frontmatter(content);
        let has_skills = content.to_lowercase().contains("skills:")
            || frontmatter.fields.contains_key("skills");
        Self {
            info,
            has_skills,
            skills: frontmatter.get_or_empty("skills").to_string(),
            model: frontmatter.get_or_empty("model").to_string(),
        }
    }

    /// Record used when the definition file could not be read.
    #[must_use]
    pub fn unreadable(info: ComponentInfo) -> Self {
        Self {
            info,
            has_skills: false,
            skills: String::new(),
            model: String::new(),
        }
    }
}

/// An entry under `mcpServers` in an MCP configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    #[serde(flatten)]
    pub info: ComponentInfo,
    /// Tool name pattern, always `mcp__<name>__*`.
    #[serde(default)]
    pub tools_pattern: String,
    /// Raw `command` value, empty for remote transports.
    #[serde(default)]
    pub command: String,
}

impl McpServer {
    /// Creates a server record, deriving its tool pattern from the name.
    #[must_use]
    pub fn new(info: ComponentInfo, command: impl Into<String>) -> Self {
        let tools_pattern = tools_pattern(&info.name);
        Self {
            info,
            tools_pattern,
            command: command.into(),
        }
    }

    /// Prefix every tool exposed by this server starts with.
    #[must_use]
    pub fn tool_prefix(&self) -> String {
        tool_prefix(&self.info.name)
    }
}

/// Returns `mcp__<name>__`.
#[must_use]
pub fn tool_prefix(server: &str) -> String {
    format!("mcp__{server}__")
}

/// Returns `mcp__<name>__*`.
#[must_use]
pub fn tools_pattern(server: &str) -> String {
    format!("{}*", tool_prefix(server))
}

/// A file under `hooks/scripts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookScript {
    #[serde(flatten)]
    pub info: ComponentInfo,
    /// Whether any execute permission bit is set.
    #[serde(default)]
    pub executable: bool,
}

/// One handler registered for a lifecycle event in a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookRegistration {
    /// `info.name` is the event name; `info.path` is the settings file.
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub event: LifecycleEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    /// The handler object exactly as registered.
    #[serde(default)]
    pub handler: serde_json::Value,
}

impl HookRegistration {
    /// Wraps a handler object read from `source`.
    #[must_use]
    pub fn new(
        event: LifecycleEvent,
        source: &Path,
        scope: Scope,
        handler: serde_json::Value,
    ) -> Self {
        let matcher = handler
            .get("matcher")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Self {
            info: ComponentInfo::new(event.as_str(), source, scope),
            event,
            matcher,
            handler,
        }
    }

    /// The settings file this registration came from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.info.path
    }
}

/// A borrowed view over any discovered component.
#[derive(Debug, Clone, Copy)]
pub enum Component<'a> {
    Skill(&'a Skill),
    Agent(&'a Agent),
    McpServer(&'a McpServer),
    HookScript(&'a HookScript),
    HookRegistration(&'a HookRegistration),
}

impl<'a> Component<'a> {
    /// The shared base record.
    #[must_use]
    pub fn info(&self) -> &'a ComponentInfo {
        match *self {
            Self::Skill(c) => &c.info,
            Self::Agent(c) => &c.info,
            Self::McpServer(c) => &c.info,
            Self::HookScript(c) => &c.info,
            Self::HookRegistration(c) => &c.info,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.info().name
    }

    #[must_use]
    pub fn path(&self) -> &'a Path {
        &self.info().path
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.info().scope
    }

    /// Short kind label used in log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Skill(_) => "skill",
            Self::Agent(_) => "agent",
            Self::McpServer(_) => "mcp_server",
            Self::HookScript(_) => "hook_script",
            Self::HookRegistration(_) => "hook_registration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> ComponentInfo {
        ComponentInfo::new(name, format!("/p/{name}"), Scope::Project)
    }

    #[test]
    fn skill_detects_hooks_case_insensitively() {
        let skill = Skill::from_content(info("a"), "---\nname: a\n---\nSee HOOKS: below");
        assert!(skill.has_hooks);
    }

    #[test]
    fn skill_without_hooks_marker() {
        let skill = Skill::from_content(info("a"), "---\nname: a\n---\nno hooks here");
        assert!(!skill.has_hooks);
    }

    #[test]
    fn skill_description_is_truncated() {
        let long = "x".repeat(250);
        let content = format!("---\ndescription: {long}\n---\n");
        let skill = Skill::from_content(info("a"), &content);
        assert_eq!(skill.description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn skill_without_frontmatter_has_empty_description() {
        let skill = Skill::from_content(info("a"), "plain body");
        assert_eq!(skill.description, "");
    }

    #[test]
    fn agent_skills_from_frontmatter_key() {
        let agent = Agent::from_content(info("r"), "---\nskills:\nmodel: opus\n---\n");
        assert!(agent.has_skills);
        assert_eq!(agent.skills, "");
        assert_eq!(agent.model, "opus");
    }

    #[test]
    fn agent_skills_from_body_marker() {
        let agent = Agent::from_content(info("r"), "Preload Skills: tdd");
        assert!(agent.has_skills);
    }

    #[test]
    fn agent_without_skills() {
        let agent = Agent::from_content(info("r"), "---\nname: r\n---\nBody");
        assert!(!agent.has_skills);
        assert_eq!(agent.model, "");
    }

    #[test]
    fn mcp_server_patterns() {
        let server = McpServer::new(info("github"), "npx");
        assert_eq!(server.tools_pattern, "mcp__github__*");
        assert_eq!(server.tool_prefix(), "mcp__github__");
    }

    #[test]
    fn registration_reads_matcher() {
        let handler = serde_json::json!({"matcher": "Bash", "hooks": []});
        let reg = HookRegistration::new(
            LifecycleEvent::PreToolUse,
            Path::new("/p/settings.json"),
            Scope::Project,
            handler,
        );
        assert_eq!(reg.matcher.as_deref(), Some("Bash"));
        assert_eq!(reg.source(), Path::new("/p/settings.json"));
        assert_eq!(reg.info.name, "PreToolUse");
    }

    #[test]
    fn registration_ignores_non_string_matcher() {
        let handler = serde_json::json!({"matcher": 3});
        let reg = HookRegistration::new(
            LifecycleEvent::Stop,
            Path::new("s.json"),
            Scope::Project,
            handler,
        );
        assert!(reg.matcher.is_none());
    }

    #[test]
    fn skill_serializes_flat() {
        let skill = Skill::unreadable(info("a"));
        let value = serde_json::to_value(&skill).unwrap();
        assert_eq!(value["name"], "a");
        assert_eq!(value["scope"], "project");
        assert_eq!(value["has_hooks"], false);
        assert_eq!(value["description"], "");
    }

    #[test]
    fn mcp_server_accepts_source_key() {
        let value = serde_json::json!({
            "name": "db",
            "source": "/p/.mcp.json",
            "scope": "project",
            "tools_pattern": "mcp__db__*",
            "command": "node"
        });
        let server: McpServer = serde_json::from_value(value).unwrap();
        assert_eq!(server.info.path, PathBuf::from("/p/.mcp.json"));
    }

    #[test]
    fn component_view_exposes_base() {
        let script = HookScript {
            info: info("foo.sh"),
            executable: false,
        };
        let component = Component::HookScript(&script);
        assert_eq!(component.name(), "foo.sh");
        assert_eq!(component.path(), Path::new("/p/foo.sh"));
        assert_eq!(component.scope(), Scope::Project);
        assert_eq!(component.kind(), "hook_script");
    }
}
